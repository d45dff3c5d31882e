use super::LookupRules;
use crate::dispatch::Slot;
use crate::threshold::{LOWER_JOIN, UPPER_JOIN};
use crate::value::ValueKind;

pub(super) fn rules() -> LookupRules {
    LookupRules::new(|_, _, _| None)
        .case(Slot::Is(ValueKind::Binding), Slot::Any, |_, program, name| {
            let binding = program.as_binding()?;
            let visible = !binding.is_hypothetical() && binding.name().struct_eq(name);
            Some(visible.then(|| binding.value().clone()))
        })
        // A name is only known in a disjunction when every branch knows it
        .case(Slot::Is(ValueKind::Union), Slot::Any, |th, program, name| {
            let union = program.as_union()?;
            Some(th.lookup(union.left(), name).and_then(|left| {
                th.lookup(union.right(), name)
                    .map(|right| UPPER_JOIN.combine(th, left, || right))
            }))
        })
        // The newest conjunct shadows older ones
        .case(Slot::Is(ValueKind::Intersection), Slot::Any, |th, program, name| {
            let both = program.as_intersection()?;
            Some(LOWER_JOIN.combine_opt(th, th.lookup(both.right(), name), || {
                th.lookup(both.left(), name)
            }))
        })
}
