//! Command and query types for the expense service.
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Input for creating a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct AddExpenseCommand {
    pub amount: f64,
    pub category: String,
    pub note: String,
    pub expense_date: NaiveDate,
}

/// Input for replacing the editable fields of an existing expense.
/// `id` and `created_at` are never touched by an update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpenseCommand {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub note: String,
    pub expense_date: NaiveDate,
}

/// Conjunctive filter over a listing. Every supplied predicate must match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Inclusive lower bound on the expense date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the expense date
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring match against note or category
    pub search_text: Option<String>,
}

impl ExpenseFilter {
    /// A filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.search_text.is_none()
    }
}

/// Aggregate totals derived from a filtered listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseSummary {
    pub total: f64,
    pub count: usize,
    /// Category -> summed amount; only categories present appear.
    pub by_category: BTreeMap<String, f64>,
    /// `YYYY-MM` -> summed amount.
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
