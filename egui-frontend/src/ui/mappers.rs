//! Mapping from backend domain models to the shared display DTOs.
use expense_tracker_backend::domain::commands::expenses::ExpenseSummary as DomainSummary;
use expense_tracker_backend::domain::models::expense::Expense as DomainExpense;

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(expense: DomainExpense) -> shared::Expense {
        shared::Expense {
            id: expense.id,
            amount: expense.amount,
            category: expense.category,
            note: expense.note,
            expense_date: expense.expense_date.format("%Y-%m-%d").to_string(),
            created_at: expense.created_at.to_rfc3339(),
            updated_at: expense.updated_at.to_rfc3339(),
        }
    }
}

pub struct SummaryMapper;

impl SummaryMapper {
    pub fn to_dto(summary: DomainSummary) -> shared::ExpenseSummary {
        shared::ExpenseSummary {
            total: summary.total,
            count: summary.count,
            by_category: summary.by_category,
            by_month: summary.by_month,
        }
    }
}
