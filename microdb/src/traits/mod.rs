//! Core traits for microdb

mod driver;
mod from_value;

pub use driver::{Driver, Statement};
pub use from_value::FromValue;
