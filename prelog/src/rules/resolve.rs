use super::CombineRules;
use crate::dispatch::Slot;
use crate::threshold::{LOWER_MEET, UPPER_JOIN};
use crate::value::{Value, ValueKind};

pub(super) fn rules() -> CombineRules {
    // Anything unrelated to the program is adopted as is
    CombineRules::new(|_, _, incoming| incoming.clone())
        .case(
            Slot::Is(ValueKind::Binding),
            Slot::Is(ValueKind::Binding),
            |_, existing, incoming| {
                let (old, new) = (existing.as_binding()?, incoming.as_binding()?);
                let conflict = old.is_native()
                    && old.name().struct_eq(new.name())
                    && !old.value().struct_eq(new.value());
                conflict.then(|| {
                    Value::semantics_error("native binding cannot be redefined", incoming.clone())
                })
            },
        )
        // Against a disjunction, a value that settles one branch narrows it
        .case(Slot::Is(ValueKind::Union), Slot::Any, |th, existing, incoming| {
            let union = existing.as_union()?;
            Some(LOWER_MEET.combine(th, th.resolve(union.left(), incoming), || {
                th.resolve(union.right(), incoming)
            }))
        })
        // Against a conjunction, one clause that already holds it settles it
        .case(Slot::Is(ValueKind::Intersection), Slot::Any, |th, existing, incoming| {
            let both = existing.as_intersection()?;
            Some(UPPER_JOIN.combine(th, th.resolve(both.left(), incoming), || {
                th.resolve(both.right(), incoming)
            }))
        })
        .case(Slot::Any, Slot::Is(ValueKind::Union), |th, existing, incoming| {
            let union = incoming.as_union()?;
            Some(UPPER_JOIN.combine(th, th.resolve(existing, union.left()), || {
                th.resolve(existing, union.right())
            }))
        })
        .case(Slot::Any, Slot::Is(ValueKind::Intersection), |th, existing, incoming| {
            let both = incoming.as_intersection()?;
            Some(LOWER_MEET.combine(th, th.resolve(existing, both.left()), || {
                th.resolve(existing, both.right())
            }))
        })
}
