//! Domain error type for the expense service.
//!
//! Every failure the service can surface falls into one of four kinds:
//!
//! - [`Validation`] — bad amount or category on add/update; the user
//!   corrects the input.
//! - [`NotFound`] — an operation referenced an id that no longer exists;
//!   indicates stale view state.
//! - [`Import`] — the import payload did not parse as a collection of
//!   valid records; the user re-selects the file.
//! - [`Persistence`] — the store write failed; recoverable only by retry.
//!
//! Store *read* failures are deliberately not represented here: the
//! storage layer's fallback policy substitutes the empty collection and
//! logs, so the application stays usable (see `storage::ExpenseStorage`).
//!
//! [`Validation`]: ExpenseError::Validation
//! [`NotFound`]: ExpenseError::NotFound
//! [`Import`]: ExpenseError::Import
//! [`Persistence`]: ExpenseError::Persistence
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpenseError {
    #[error("{0}")]
    Validation(String),
    #[error("expense not found: {0}")]
    NotFound(String),
    #[error("import failed: {0}")]
    Import(String),
    #[error("failed to save expense data: {0}")]
    Persistence(String),
}
