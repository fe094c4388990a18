//! Storage layer: the persistence trait and the JSON-file implementation.

pub mod json;
pub mod traits;

pub use json::{ExpenseRepository, JsonConnection};
pub use traits::ExpenseStorage;
