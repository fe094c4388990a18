//! Shared types for the expense tracker.
//!
//! These are the display-facing DTOs exchanged between the backend domain
//! layer and the UI. All date fields are plain strings so the UI never has
//! to carry its own date handling; the domain layer owns real date types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single expense entry as shown in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// Positive amount in the user's currency
    pub amount: f64,
    /// One of [`CATEGORIES`]
    pub category: String,
    /// Optional free-text note (empty string when absent)
    pub note: String,
    /// Date the expense occurred (`YYYY-MM-DD`)
    pub expense_date: String,
    /// When the record was created (RFC 3339)
    pub created_at: String,
    /// When the record was last updated (RFC 3339)
    pub updated_at: String,
}

/// Aggregate totals over a (possibly filtered) expense listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    /// Sum of all amounts
    pub total: f64,
    /// Number of expenses
    pub count: usize,
    /// Category -> summed amount (only categories present appear)
    pub by_category: BTreeMap<String, f64>,
    /// `YYYY-MM` -> summed amount
    pub by_month: BTreeMap<String, f64>,
}

impl ExpenseSummary {
    /// Average amount per expense, 0 when the listing is empty.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// The fixed set of expense categories.
pub const CATEGORIES: [&str; 8] = [
    "food",
    "travel",
    "bills",
    "shopping",
    "entertainment",
    "utilities",
    "healthcare",
    "other",
];

/// Capitalize a category for display ("food" -> "Food").
pub fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
