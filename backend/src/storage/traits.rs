//! # Storage Traits
//!
//! Defines the storage abstraction the domain layer is written against,
//! so different backends (JSON file, in-memory fake for tests) can be
//! used interchangeably.

use crate::domain::models::expense::Expense;
use anyhow::Result;
use log::warn;

/// Persistence handle for the single expense collection.
///
/// The whole collection is the unit of persistence: every mutation in the
/// domain layer is a read-all / transform / write-all sequence. There is
/// exactly one writer at a time by construction of the host application,
/// so no locking is needed here.
pub trait ExpenseStorage: Send + Sync {
    /// Load the full stored collection. Propagates read failures.
    fn load_expenses(&self) -> Result<Vec<Expense>>;

    /// Replace the full stored collection. Propagates write failures;
    /// implementations must leave the previously written state intact
    /// when the write fails.
    fn save_expenses(&self, expenses: &[Expense]) -> Result<()>;

    /// Read-fallback policy: a failure to load the collection is
    /// non-fatal. The error is logged and the empty collection is
    /// substituted so the application stays usable. This is the only
    /// place in the system where an error is swallowed.
    fn load_expenses_or_empty(&self) -> Vec<Expense> {
        match self.load_expenses() {
            Ok(expenses) => expenses,
            Err(e) => {
                warn!("failed to load expense data, starting from an empty collection: {e:#}");
                Vec::new()
            }
        }
    }
}
