//! # Expense Tracker Backend
//!
//! Core library for the expense tracker: domain models, the expense data
//! service (validation, filtering, aggregation, import/export), the report
//! formatter, and the JSON-file storage layer.
//!
//! The domain layer is storage-agnostic: services are generic over the
//! [`storage::ExpenseStorage`] trait, so tests (or alternative frontends)
//! can inject an in-memory store instead of the on-disk JSON repository.

pub mod domain;
pub mod storage;
