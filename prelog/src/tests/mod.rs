

// Value domain tests
mod values;

mod syntax;
