//! Short-circuiting lattice combinators and scope signatures.

use crate::native::Atoms;
use crate::theory::Theory;
use crate::value::Value;
use crate::Rank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Join,
    Meet,
}

/// A join or meet that stops as soon as its left operand reaches `rank`.
///
/// The right operand is a thunk and is never forced when the left operand
/// already decides the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    pub polarity: Polarity,
    pub rank: Rank,
}

/// Collects alternatives until one is proven
pub const UPPER_JOIN: Threshold = Threshold::join(Rank::Top);
/// First alternative that does not fail
pub const LOWER_JOIN: Threshold = Threshold::join(Rank::Bottom.succ());
pub const UPPER_MEET: Threshold = Threshold::meet(Rank::Top.pred());
/// Stops at the first failure
pub const LOWER_MEET: Threshold = Threshold::meet(Rank::Bottom);

impl Threshold {
    pub const fn join(rank: Rank) -> Self {
        Self {
            polarity: Polarity::Join,
            rank,
        }
    }

    pub const fn meet(rank: Rank) -> Self {
        Self {
            polarity: Polarity::Meet,
            rank,
        }
    }

    /// True once `rank` is past the threshold in this combinator's direction.
    pub fn reached(&self, rank: Rank) -> bool {
        match self.polarity {
            Polarity::Join => rank >= self.rank,
            Polarity::Meet => rank <= self.rank,
        }
    }

    pub fn combine(&self, theory: &Theory, a: Value, b: impl FnOnce() -> Value) -> Value {
        if self.reached(a.rank()) {
            return a;
        }
        let b = b();
        let (ra, rb) = (a.rank(), b.rank());
        match self.polarity {
            Polarity::Join if ra > rb => a,
            Polarity::Join if rb > ra => b,
            Polarity::Join => theory.join(a, b),
            Polarity::Meet if ra < rb => a,
            Polarity::Meet if rb < ra => b,
            Polarity::Meet => theory.meet(a, b),
        }
    }

    /// Combines optional operands; a missing side leaves the other unchanged.
    pub fn combine_opt(
        &self,
        theory: &Theory,
        a: Option<Value>,
        b: impl FnOnce() -> Option<Value>,
    ) -> Option<Value> {
        match a {
            Some(a) if self.reached(a.rank()) => Some(a),
            Some(a) => match b() {
                Some(b) => Some(self.combine(theory, a, || b)),
                None => Some(a),
            },
            None => b(),
        }
    }
}

/// Accumulation policy of one scope: identity element, append and saturation.
#[derive(Debug, Clone)]
pub struct Signature {
    unit: Value,
    append: Threshold,
}

impl Signature {
    pub fn new(unit: Value, append: Threshold) -> Self {
        Self { unit, append }
    }

    /// AND scope: starts at `success`, stops at the first failure
    pub fn conjunctive(atoms: &Atoms) -> Self {
        Self::new(atoms.success.clone(), LOWER_MEET)
    }

    /// OR scope: starts at `failure`, stops once proven
    pub fn disjunctive(atoms: &Atoms) -> Self {
        Self::new(atoms.failure.clone(), UPPER_JOIN)
    }

    pub fn unit(&self) -> &Value {
        &self.unit
    }

    pub fn append(&self, theory: &Theory, program: Value, value: impl FnOnce() -> Value) -> Value {
        self.append.combine(theory, program, value)
    }

    /// No further append can change a saturated program.
    pub fn saturated(&self, program: &Value) -> bool {
        self.append.reached(program.rank())
    }

    pub fn is_conjunctive(&self) -> bool {
        self.append.polarity == Polarity::Meet
    }
}
