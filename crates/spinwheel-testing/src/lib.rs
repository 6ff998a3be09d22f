//! Testing utilities and harness for Spinwheel

pub mod test_cell;
pub mod test_rule;

pub use test_cell::*;
pub use test_rule::*;
