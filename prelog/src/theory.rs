use crate::native::Atoms;
use crate::rules::Rules;
use crate::threshold::Signature;
use crate::value::Value;
use crate::ResourceLimits;
use std::rc::Rc;

/// Rule tables plus the accumulation signature of one scope.
#[derive(Debug, Clone)]
pub struct Theory {
    rules: Rc<Rules>,
    signature: Signature,
}

impl Theory {
    pub fn new(rules: Rc<Rules>, signature: Signature) -> Self {
        Self { rules, signature }
    }

    pub fn rules(&self) -> &Rc<Rules> {
        &self.rules
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn unit(&self) -> &Value {
        self.signature.unit()
    }

    pub fn is_conjunctive(&self) -> bool {
        self.signature.is_conjunctive()
    }

    /// Folds `incoming` into `existing`.
    ///
    /// Re-asserting a known fact collapses to the unit.
    pub fn resolve(&self, existing: &Value, incoming: &Value) -> Value {
        if existing.struct_eq(incoming) {
            return self.unit().clone();
        }
        self.rules.resolve.apply(self, existing, incoming)
    }

    /// Total join; the higher ranked operand wins outright.
    pub fn join(&self, a: Value, b: Value) -> Value {
        if a.rank() > b.rank() {
            return a;
        }
        if b.rank() > a.rank() {
            return b;
        }
        self.rules.join.apply(self, &a, &b)
    }

    /// Total meet; the lower ranked operand wins outright.
    pub fn meet(&self, a: Value, b: Value) -> Value {
        if a.rank() < b.rank() {
            return a;
        }
        if b.rank() < a.rank() {
            return b;
        }
        self.rules.meet.apply(self, &a, &b)
    }

    /// The value bound to `name` in `program`, if any.
    pub fn lookup(&self, program: &Value, name: &Value) -> Option<Value> {
        self.rules.lookup.apply(self, program, name)
    }

    pub fn append(&self, program: Value, value: impl FnOnce() -> Value) -> Value {
        self.signature.append(self, program, value)
    }

    pub fn saturated(&self, program: &Value) -> bool {
        self.signature.saturated(program)
    }
}

/// Everything shared by the interpreters of one session.
#[derive(Debug)]
pub struct Runtime {
    rules: Rc<Rules>,
    atoms: Atoms,
    limits: ResourceLimits,
    conjunctive: Theory,
    disjunctive: Theory,
}

impl Runtime {
    pub fn new(limits: ResourceLimits) -> Self {
        Self::with_rules(Rules::standard(), limits)
    }

    pub fn with_rules(rules: Rules, limits: ResourceLimits) -> Self {
        let rules = Rc::new(rules);
        let atoms = Atoms::new();
        let conjunctive = Theory::new(rules.clone(), Signature::conjunctive(&atoms));
        let disjunctive = Theory::new(rules.clone(), Signature::disjunctive(&atoms));
        Self {
            rules,
            atoms,
            limits,
            conjunctive,
            disjunctive,
        }
    }

    pub fn rules(&self) -> &Rc<Rules> {
        &self.rules
    }

    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn conjunctive(&self) -> &Theory {
        &self.conjunctive
    }

    pub fn disjunctive(&self) -> &Theory {
        &self.disjunctive
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(ResourceLimits::default())
    }
}
