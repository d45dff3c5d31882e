//! Ranks: how conclusively a value has resolved.

use std::fmt;

/// Total order `Top > True > Neutral > False > Bottom`.
///
/// The discriminants are the ordinals reported by the `rank` native.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Rank {
    Bottom = -2,
    False = -1,
    Neutral = 0,
    True = 1,
    Top = 2,
}

impl Rank {
    pub const ALL: [Rank; 5] = [
        Rank::Bottom,
        Rank::False,
        Rank::Neutral,
        Rank::True,
        Rank::Top,
    ];

    pub const fn ordinal(self) -> i8 {
        self as i8
    }

    /// The next rank up; `Top` is its own successor.
    pub const fn succ(self) -> Rank {
        match self {
            Rank::Bottom => Rank::False,
            Rank::False => Rank::Neutral,
            Rank::Neutral => Rank::True,
            Rank::True | Rank::Top => Rank::Top,
        }
    }

    /// The next rank down; `Bottom` is its own predecessor.
    pub const fn pred(self) -> Rank {
        match self {
            Rank::Top => Rank::True,
            Rank::True => Rank::Neutral,
            Rank::Neutral => Rank::False,
            Rank::False | Rank::Bottom => Rank::Bottom,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rank::Top => "Top",
            Rank::True => "True",
            Rank::Neutral => "Neutral",
            Rank::False => "False",
            Rank::Bottom => "Bottom",
        };
        f.write_str(name)
    }
}
