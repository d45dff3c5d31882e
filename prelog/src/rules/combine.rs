//! Join and meet tables.
//!
//! Both are total: when no same-kind combination applies, the operands are
//! wrapped into a Union or Intersection. The theory only calls these with
//! operands of equal rank.

use super::CombineRules;
use crate::dispatch::Slot;
use crate::theory::Theory;
use crate::threshold::{Threshold, LOWER_MEET, UPPER_JOIN};
use crate::value::{Value, ValueKind};

/// Kinds that combine only with a structurally equal value of their own kind.
const SELF_COMBINING: [ValueKind; 9] = [
    ValueKind::Symbol,
    ValueKind::String,
    ValueKind::Number,
    ValueKind::Atom,
    ValueKind::Union,
    ValueKind::Intersection,
    ValueKind::Deferred,
    ValueKind::Native,
    ValueKind::Error,
];

pub(super) fn join_rules() -> CombineRules {
    let rules = CombineRules::new(|_, a, b| Value::union(a.clone(), b.clone(), a.rank()));
    register(rules, UPPER_JOIN)
}

pub(super) fn meet_rules() -> CombineRules {
    let rules = CombineRules::new(|_, a, b| Value::intersection(a.clone(), b.clone(), a.rank()));
    register(rules, LOWER_MEET)
}

fn register(rules: CombineRules, values: Threshold) -> CombineRules {
    let rules = SELF_COMBINING.into_iter().fold(rules, |rules, kind| {
        rules.case(Slot::Is(kind), Slot::Is(kind), |_, a, b| {
            a.struct_eq(b).then(|| a.clone())
        })
    });
    // Two facts about one name combine their values
    rules.case(
        Slot::Is(ValueKind::Binding),
        Slot::Is(ValueKind::Binding),
        move |th: &Theory, a, b| {
            if a.struct_eq(b) {
                return Some(a.clone());
            }
            let (left, right) = (a.as_binding()?, b.as_binding()?);
            if !left.name().struct_eq(right.name())
                || left.is_hypothetical() != right.is_hypothetical()
            {
                return None;
            }
            let value = values.combine(th, left.value().clone(), || right.value().clone());
            Some(left.with_value(value, left.is_native() && right.is_native()))
        },
    )
}
