//! Dispatch on the runtime kind of one or two operands.
//!
//! A dispatcher is a registration table of handlers keyed by the kind of each
//! operand, where a slot may also be the wildcard [`Slot::Any`]. Resolution
//! order for a call is:
//!
//! 1. exact kind beats wildcard, per operand, left operand first;
//! 2. within one key, the most recently registered handler runs first;
//! 3. a handler returning `None` declines, and the next matching handler runs;
//! 4. when every matching handler declines, the default handler answers.
//!
//! The table is compiled into a lookup map on first use and is immutable
//! afterwards.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Types whose runtime kind can key a dispatcher.
pub trait Tagged {
    type Tag: Copy + Eq + Hash + fmt::Debug;

    fn tag(&self) -> Self::Tag;
}

/// One operand position of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot<T> {
    /// Matches any kind
    Any,
    /// Matches exactly this kind
    Is(T),
}

impl<T: Copy> Slot<T> {
    /// Slots to try for an operand of kind `tag`, most specific first.
    fn candidates(tag: T) -> [Slot<T>; 2] {
        [Slot::Is(tag), Slot::Any]
    }
}

type UnaryHandler<C, A, R> = Box<dyn Fn(&mut C, &A) -> Option<R>>;
type UnaryDefault<C, A, R> = Box<dyn Fn(&mut C, &A) -> R>;

/// Dispatcher over the kind of a single operand, with a mutable context.
pub struct UnaryDispatcher<C: ?Sized, A: Tagged + ?Sized, R> {
    default: UnaryDefault<C, A, R>,
    cases: Vec<(Slot<A::Tag>, UnaryHandler<C, A, R>)>,
    table: OnceCell<HashMap<Slot<A::Tag>, Vec<usize>>>,
}

impl<C: ?Sized, A: Tagged + ?Sized, R> UnaryDispatcher<C, A, R> {
    pub fn new(default: impl Fn(&mut C, &A) -> R + 'static) -> Self {
        Self {
            default: Box::new(default),
            cases: Vec::new(),
            table: OnceCell::new(),
        }
    }

    /// Registers a handler; later registrations take precedence.
    pub fn case(
        mut self,
        slot: Slot<A::Tag>,
        handler: impl Fn(&mut C, &A) -> Option<R> + 'static,
    ) -> Self {
        self.cases.push((slot, Box::new(handler)));
        self.table = OnceCell::new();
        self
    }

    /// Number of registered handlers, excluding the default
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn apply(&self, ctx: &mut C, a: &A) -> R {
        let table = self.table.get_or_init(|| self.compile());
        for slot in Slot::candidates(a.tag()) {
            for &index in table.get(&slot).into_iter().flatten() {
                if let Some(result) = (self.cases[index].1)(ctx, a) {
                    return result;
                }
            }
        }
        (self.default)(ctx, a)
    }

    fn compile(&self) -> HashMap<Slot<A::Tag>, Vec<usize>> {
        let mut table: HashMap<Slot<A::Tag>, Vec<usize>> = HashMap::new();
        for (index, (slot, _)) in self.cases.iter().enumerate().rev() {
            table.entry(*slot).or_default().push(index);
        }
        table
    }
}

type BinaryHandler<C, A, B, R> = Box<dyn Fn(&C, &A, &B) -> Option<R>>;
type BinaryDefault<C, A, B, R> = Box<dyn Fn(&C, &A, &B) -> R>;

/// Dispatcher over the kinds of two operands, with a shared context.
pub struct BinaryDispatcher<C: ?Sized, A: Tagged + ?Sized, B: Tagged + ?Sized, R> {
    default: BinaryDefault<C, A, B, R>,
    cases: Vec<((Slot<A::Tag>, Slot<B::Tag>), BinaryHandler<C, A, B, R>)>,
    table: OnceCell<HashMap<(Slot<A::Tag>, Slot<B::Tag>), Vec<usize>>>,
}

impl<C: ?Sized, A: Tagged + ?Sized, B: Tagged + ?Sized, R> BinaryDispatcher<C, A, B, R> {
    pub fn new(default: impl Fn(&C, &A, &B) -> R + 'static) -> Self {
        Self {
            default: Box::new(default),
            cases: Vec::new(),
            table: OnceCell::new(),
        }
    }

    /// Registers a handler; later registrations take precedence.
    pub fn case(
        mut self,
        slot_a: Slot<A::Tag>,
        slot_b: Slot<B::Tag>,
        handler: impl Fn(&C, &A, &B) -> Option<R> + 'static,
    ) -> Self {
        self.cases.push(((slot_a, slot_b), Box::new(handler)));
        self.table = OnceCell::new();
        self
    }

    /// Number of registered handlers, excluding the default
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn apply(&self, ctx: &C, a: &A, b: &B) -> R {
        let table = self.table.get_or_init(|| self.compile());
        for slot_a in Slot::candidates(a.tag()) {
            for slot_b in Slot::candidates(b.tag()) {
                for &index in table.get(&(slot_a, slot_b)).into_iter().flatten() {
                    if let Some(result) = (self.cases[index].1)(ctx, a, b) {
                        return result;
                    }
                }
            }
        }
        (self.default)(ctx, a, b)
    }

    fn compile(&self) -> HashMap<(Slot<A::Tag>, Slot<B::Tag>), Vec<usize>> {
        let mut table: HashMap<(Slot<A::Tag>, Slot<B::Tag>), Vec<usize>> = HashMap::new();
        for (index, (key, _)) in self.cases.iter().enumerate().rev() {
            table.entry(*key).or_default().push(index);
        }
        table
    }
}
