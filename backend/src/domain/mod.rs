//! Domain layer: models, commands, services, and the domain error type.

pub mod commands;
pub mod error;
pub mod expense_service;
pub mod models;
pub mod report_service;

pub use error::ExpenseError;
pub use expense_service::ExpenseService;
pub use report_service::{ExpenseReport, ReportService};
