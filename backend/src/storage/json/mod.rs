//! # JSON Storage Module
//!
//! File-based storage for the expense tracker. The entire collection
//! lives under a single key: one pretty-printed JSON array of expense
//! records in `expenses.json` inside the data directory.
//!
//! ## File Format
//!
//! ```json
//! [
//!   {
//!     "id": "3b2e...",
//!     "amount": 12.5,
//!     "category": "food",
//!     "note": "lunch",
//!     "expenseDate": "2024-01-05",
//!     "createdAt": "2024-01-05T10:00:00Z",
//!     "updatedAt": "2024-01-05T10:00:00Z"
//!   }
//! ]
//! ```
//!
//! The same shape is used verbatim by the export/import feature, so an
//! exported file can be imported back without translation.

pub mod connection;
pub mod expense_repository;

pub use connection::JsonConnection;
pub use expense_repository::ExpenseRepository;
