//! Domain model for an expense record.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One expense entry.
///
/// Serializes to the camelCase shape the store file and the export format
/// share: `id, amount, category, note, expenseDate, createdAt, updatedAt`.
/// `expense_date` round-trips as `YYYY-MM-DD`, the timestamps as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Opaque unique identifier, assigned at creation, immutable.
    pub id: String,
    /// Positive amount. `amount > 0` is enforced by the service on
    /// add and update.
    pub amount: f64,
    /// Category name from the fixed set published by `shared::CATEGORIES`.
    pub category: String,
    /// Free-text note, defaults to the empty string.
    #[serde(default)]
    pub note: String,
    /// Calendar date the expense occurred, user supplied.
    pub expense_date: NaiveDate,
    /// Set once by the service at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed by the service on every update.
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Generate a fresh record id.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// The `YYYY-MM` key this expense contributes to in the monthly
    /// summary breakdown.
    pub fn month_key(&self) -> String {
        self.expense_date.format("%Y-%m").to_string()
    }
}
