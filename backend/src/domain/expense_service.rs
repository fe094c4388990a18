//! Expense service domain logic: validation, filtering, aggregation, and
//! import/export over the single stored collection.
//!
//! Every mutation is a synchronous read-all / transform / write-all pass
//! over the collection. There are no intermediate observable states and
//! no concurrent callers, so each operation either completes or fails
//! atomically from the caller's point of view.
use chrono::Utc;
use log::{info, warn};
use serde_json::Value;

use crate::domain::commands::expenses::{
    AddExpenseCommand, ExpenseFilter, ExpenseSummary, UpdateExpenseCommand,
};
use crate::domain::error::ExpenseError;
use crate::domain::models::expense::Expense;
use crate::storage::traits::ExpenseStorage;

pub struct ExpenseService<S: ExpenseStorage> {
    store: S,
}

impl<S: ExpenseStorage> ExpenseService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List expenses matching the filter, sorted by expense date
    /// descending (most recent first). Ties keep their stored relative
    /// order; the sort is stable.
    pub fn list_expenses(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        let mut expenses = self.store.load_expenses_or_empty();

        if let Some(category) = &filter.category {
            expenses.retain(|e| &e.category == category);
        }
        if let Some(start_date) = filter.start_date {
            expenses.retain(|e| e.expense_date >= start_date);
        }
        if let Some(end_date) = filter.end_date {
            expenses.retain(|e| e.expense_date <= end_date);
        }
        if let Some(search_text) = &filter.search_text {
            let search = search_text.to_lowercase();
            expenses.retain(|e| {
                e.note.to_lowercase().contains(&search)
                    || e.category.to_lowercase().contains(&search)
            });
        }

        expenses.sort_by(|a, b| b.expense_date.cmp(&a.expense_date));
        expenses
    }

    /// Create a new expense and persist the grown collection.
    pub fn add_expense(&self, command: AddExpenseCommand) -> Result<Expense, ExpenseError> {
        validate_fields(command.amount, &command.category)?;

        let mut expenses = self.store.load_expenses_or_empty();
        let now = Utc::now();
        let expense = Expense {
            id: Expense::generate_id(),
            amount: command.amount,
            category: command.category,
            note: command.note,
            expense_date: command.expense_date,
            created_at: now,
            updated_at: now,
        };

        expenses.push(expense.clone());
        self.persist(&expenses)?;

        info!("Added expense {} ({} {:.2})", expense.id, expense.category, expense.amount);
        Ok(expense)
    }

    /// Replace the editable fields of an existing expense. `id` and
    /// `created_at` are preserved; `updated_at` is refreshed.
    pub fn update_expense(&self, command: UpdateExpenseCommand) -> Result<Expense, ExpenseError> {
        validate_fields(command.amount, &command.category)?;

        let mut expenses = self.store.load_expenses_or_empty();
        let expense = expenses
            .iter_mut()
            .find(|e| e.id == command.id)
            .ok_or_else(|| ExpenseError::NotFound(command.id.clone()))?;

        expense.amount = command.amount;
        expense.category = command.category;
        expense.note = command.note;
        expense.expense_date = command.expense_date;
        expense.updated_at = Utc::now();
        let updated = expense.clone();

        self.persist(&expenses)?;

        info!("Updated expense {}", updated.id);
        Ok(updated)
    }

    /// Remove an expense and persist the shrunk collection.
    pub fn delete_expense(&self, id: &str) -> Result<(), ExpenseError> {
        let mut expenses = self.store.load_expenses_or_empty();
        let before = expenses.len();
        expenses.retain(|e| e.id != id);

        if expenses.len() == before {
            return Err(ExpenseError::NotFound(id.to_string()));
        }

        self.persist(&expenses)?;
        info!("Deleted expense {id}");
        Ok(())
    }

    /// Aggregate totals over the filtered listing.
    pub fn summarize(&self, filter: &ExpenseFilter) -> ExpenseSummary {
        let expenses = self.list_expenses(filter);

        let mut summary = ExpenseSummary {
            count: expenses.len(),
            ..Default::default()
        };

        for expense in &expenses {
            summary.total += expense.amount;
            *summary.by_category.entry(expense.category.clone()).or_insert(0.0) +=
                expense.amount;
            *summary.by_month.entry(expense.month_key()).or_insert(0.0) += expense.amount;
        }

        summary
    }

    /// Serialize the entire unfiltered collection as pretty-printed JSON,
    /// independent of any active listing filter.
    pub fn export_json(&self) -> Result<String, ExpenseError> {
        let expenses = self.store.load_expenses_or_empty();
        serde_json::to_string_pretty(&expenses)
            .map_err(|e| ExpenseError::Persistence(e.to_string()))
    }

    /// Parse an exported JSON payload and replace the stored collection
    /// wholesale (not merged). Returns the number of imported records.
    ///
    /// The payload is schema-checked: it must be a JSON array, every
    /// element must deserialize as an expense record, and every record
    /// must satisfy the model invariants (positive amount, non-empty
    /// category, unique id). Failures carry the offending index and leave
    /// the stored collection untouched.
    pub fn import_json(&self, payload: &str) -> Result<usize, ExpenseError> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| ExpenseError::Import(format!("not valid JSON: {e}")))?;

        let Value::Array(items) = value else {
            return Err(ExpenseError::Import(
                "expected a JSON array of expense records".to_string(),
            ));
        };

        let mut expenses = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let expense: Expense = serde_json::from_value(item).map_err(|e| {
                ExpenseError::Import(format!("record {index} is not a valid expense: {e}"))
            })?;
            if let Err(ExpenseError::Validation(reason)) =
                validate_fields(expense.amount, &expense.category)
            {
                return Err(ExpenseError::Import(format!("record {index}: {reason}")));
            }
            if expenses.iter().any(|e: &Expense| e.id == expense.id) {
                return Err(ExpenseError::Import(format!(
                    "record {index}: duplicate id {}",
                    expense.id
                )));
            }
            expenses.push(expense);
        }

        self.persist(&expenses)?;
        info!("Imported {} expenses, replacing the stored collection", expenses.len());
        Ok(expenses.len())
    }

    fn persist(&self, expenses: &[Expense]) -> Result<(), ExpenseError> {
        self.store.save_expenses(expenses).map_err(|e| {
            warn!("store write failed: {e:#}");
            ExpenseError::Persistence(format!("{e:#}"))
        })
    }
}

fn validate_fields(amount: f64, category: &str) -> Result<(), ExpenseError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ExpenseError::Validation(
            "Amount must be greater than 0".to_string(),
        ));
    }
    if category.is_empty() {
        return Err(ExpenseError::Validation("Category is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::{ExpenseRepository, JsonConnection};
    use anyhow::anyhow;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn create_test_service() -> (ExpenseService<ExpenseRepository>, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        (ExpenseService::new(ExpenseRepository::new(connection)), temp_dir)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn add_cmd(amount: f64, category: &str, note: &str, expense_date: &str) -> AddExpenseCommand {
        AddExpenseCommand {
            amount,
            category: category.to_string(),
            note: note.to_string(),
            expense_date: date(expense_date),
        }
    }

    /// In-memory store whose writes can be switched to fail, for
    /// exercising the persistence failure policy.
    struct FlakyStore {
        expenses: Mutex<Vec<Expense>>,
        fail_writes: Mutex<bool>,
        fail_reads: bool,
    }

    impl FlakyStore {
        fn new() -> Self {
            Self {
                expenses: Mutex::new(Vec::new()),
                fail_writes: Mutex::new(false),
                fail_reads: false,
            }
        }

        fn set_fail_writes(&self, fail: bool) {
            *self.fail_writes.lock().unwrap() = fail;
        }
    }

    impl ExpenseStorage for &FlakyStore {
        fn load_expenses(&self) -> anyhow::Result<Vec<Expense>> {
            if self.fail_reads {
                return Err(anyhow!("disk on fire"));
            }
            Ok(self.expenses.lock().unwrap().clone())
        }

        fn save_expenses(&self, expenses: &[Expense]) -> anyhow::Result<()> {
            if *self.fail_writes.lock().unwrap() {
                return Err(anyhow!("disk full"));
            }
            *self.expenses.lock().unwrap() = expenses.to_vec();
            Ok(())
        }
    }

    #[test]
    fn test_add_then_list_contains_matching_record() {
        let (service, _temp_dir) = create_test_service();

        let added = service
            .add_expense(add_cmd(12.5, "food", "lunch", "2024-01-05"))
            .unwrap();

        let listed = service.list_expenses(&ExpenseFilter::all());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], added);
        assert_eq!(listed[0].amount, 12.5);
        assert_eq!(listed[0].category, "food");
        assert_eq!(listed[0].note, "lunch");
        assert_eq!(listed[0].expense_date, date("2024-01-05"));
        assert_eq!(listed[0].created_at, listed[0].updated_at);
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let (service, _temp_dir) = create_test_service();
        for _ in 0..5 {
            service
                .add_expense(add_cmd(1.0, "other", "", "2024-01-01"))
                .unwrap();
        }

        let listed = service.list_expenses(&ExpenseFilter::all());
        let mut ids: Vec<_> = listed.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_add_rejects_bad_amount_and_leaves_collection_unchanged() {
        let (service, _temp_dir) = create_test_service();

        for amount in [0.0, -3.5] {
            let err = service
                .add_expense(add_cmd(amount, "food", "", "2024-01-05"))
                .unwrap_err();
            assert!(matches!(err, ExpenseError::Validation(_)));
        }

        assert!(service.list_expenses(&ExpenseFilter::all()).is_empty());
    }

    #[test]
    fn test_add_rejects_empty_category() {
        let (service, _temp_dir) = create_test_service();

        let err = service
            .add_expense(add_cmd(5.0, "", "", "2024-01-05"))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Validation(_)));
        assert!(service.list_expenses(&ExpenseFilter::all()).is_empty());
    }

    #[test]
    fn test_update_unknown_id_fails_and_collection_unchanged() {
        let (service, _temp_dir) = create_test_service();
        service
            .add_expense(add_cmd(10.0, "food", "", "2024-01-05"))
            .unwrap();

        let err = service
            .update_expense(UpdateExpenseCommand {
                id: "no-such-id".to_string(),
                amount: 20.0,
                category: "travel".to_string(),
                note: String::new(),
                expense_date: date("2024-01-06"),
            })
            .unwrap_err();

        assert_eq!(err, ExpenseError::NotFound("no-such-id".to_string()));
        let listed = service.list_expenses(&ExpenseFilter::all());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, 10.0);
    }

    #[test]
    fn test_update_changes_fields_but_preserves_id_and_created_at() {
        let (service, _temp_dir) = create_test_service();
        let original = service
            .add_expense(add_cmd(10.0, "food", "lunch", "2024-01-05"))
            .unwrap();

        // updated_at has millisecond precision in practice; make sure the
        // clock moves between create and update.
        std::thread::sleep(std::time::Duration::from_millis(5));

        let updated = service
            .update_expense(UpdateExpenseCommand {
                id: original.id.clone(),
                amount: 22.0,
                category: "travel".to_string(),
                note: "train ticket".to_string(),
                expense_date: date("2024-02-01"),
            })
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.amount, 22.0);
        assert_eq!(updated.category, "travel");
        assert_eq!(updated.note, "train ticket");
        assert_eq!(updated.expense_date, date("2024-02-01"));
        assert!(updated.updated_at > original.updated_at);

        // The persisted state matches what was returned.
        let listed = service.list_expenses(&ExpenseFilter::all());
        assert_eq!(listed, vec![updated]);
    }

    #[test]
    fn test_update_validates_like_add() {
        let (service, _temp_dir) = create_test_service();
        let original = service
            .add_expense(add_cmd(10.0, "food", "", "2024-01-05"))
            .unwrap();

        let err = service
            .update_expense(UpdateExpenseCommand {
                id: original.id.clone(),
                amount: -1.0,
                category: "food".to_string(),
                note: String::new(),
                expense_date: date("2024-01-05"),
            })
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Validation(_)));

        let listed = service.list_expenses(&ExpenseFilter::all());
        assert_eq!(listed[0].amount, 10.0);
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        let (service, _temp_dir) = create_test_service();
        let err = service.delete_expense("missing").unwrap_err();
        assert_eq!(err, ExpenseError::NotFound("missing".to_string()));
    }

    #[test]
    fn test_delete_removes_exactly_one_record() {
        let (service, _temp_dir) = create_test_service();
        let first = service
            .add_expense(add_cmd(10.0, "food", "", "2024-01-05"))
            .unwrap();
        service
            .add_expense(add_cmd(20.0, "travel", "", "2024-01-06"))
            .unwrap();

        service.delete_expense(&first.id).unwrap();

        let listed = service.list_expenses(&ExpenseFilter::all());
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|e| e.id != first.id));
    }

    #[test]
    fn test_list_filters_by_category_and_sorts_descending() {
        let (service, _temp_dir) = create_test_service();
        service.add_expense(add_cmd(1.0, "food", "", "2024-01-01")).unwrap();
        service.add_expense(add_cmd(2.0, "travel", "", "2024-01-02")).unwrap();
        service.add_expense(add_cmd(3.0, "food", "", "2024-01-03")).unwrap();

        let filter = ExpenseFilter {
            category: Some("food".to_string()),
            ..Default::default()
        };
        let listed = service.list_expenses(&filter);

        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|e| e.category == "food"));
        assert_eq!(listed[0].expense_date, date("2024-01-03"));
        assert_eq!(listed[1].expense_date, date("2024-01-01"));
    }

    #[test]
    fn test_list_filters_by_inclusive_date_range() {
        let (service, _temp_dir) = create_test_service();
        service.add_expense(add_cmd(1.0, "food", "", "2023-12-31")).unwrap();
        service.add_expense(add_cmd(2.0, "food", "", "2024-01-01")).unwrap();
        service.add_expense(add_cmd(3.0, "food", "", "2024-01-31")).unwrap();
        service.add_expense(add_cmd(4.0, "food", "", "2024-02-01")).unwrap();

        let filter = ExpenseFilter {
            start_date: Some(date("2024-01-01")),
            end_date: Some(date("2024-01-31")),
            ..Default::default()
        };
        let listed = service.list_expenses(&filter);

        let dates: Vec<_> = listed.iter().map(|e| e.expense_date).collect();
        assert_eq!(dates, vec![date("2024-01-31"), date("2024-01-01")]);
    }

    #[test]
    fn test_list_search_matches_note_or_category_case_insensitive() {
        let (service, _temp_dir) = create_test_service();
        service
            .add_expense(add_cmd(1.0, "food", "Weekly Groceries", "2024-01-01"))
            .unwrap();
        service
            .add_expense(add_cmd(2.0, "travel", "flight", "2024-01-02"))
            .unwrap();
        service
            .add_expense(add_cmd(3.0, "bills", "electricity", "2024-01-03"))
            .unwrap();

        let by_note = service.list_expenses(&ExpenseFilter {
            search_text: Some("groceries".to_string()),
            ..Default::default()
        });
        assert_eq!(by_note.len(), 1);
        assert_eq!(by_note[0].note, "Weekly Groceries");

        let by_category = service.list_expenses(&ExpenseFilter {
            search_text: Some("TRAV".to_string()),
            ..Default::default()
        });
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].category, "travel");
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let (service, _temp_dir) = create_test_service();
        service.add_expense(add_cmd(1.0, "food", "lunch", "2024-01-10")).unwrap();
        service.add_expense(add_cmd(2.0, "food", "lunch", "2024-03-10")).unwrap();
        service.add_expense(add_cmd(3.0, "travel", "lunch", "2024-01-10")).unwrap();

        let listed = service.list_expenses(&ExpenseFilter {
            category: Some("food".to_string()),
            start_date: Some(date("2024-01-01")),
            end_date: Some(date("2024-01-31")),
            search_text: Some("lunch".to_string()),
        });
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, 1.0);
    }

    #[test]
    fn test_summarize_totals_by_category_and_month() {
        let (service, _temp_dir) = create_test_service();
        service.add_expense(add_cmd(10.0, "food", "", "2024-01-05")).unwrap();
        service.add_expense(add_cmd(20.0, "food", "", "2024-02-10")).unwrap();

        let summary = service.summarize(&ExpenseFilter::all());
        assert_eq!(summary.total, 30.0);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category["food"], 30.0);
        assert_eq!(summary.by_month["2024-01"], 10.0);
        assert_eq!(summary.by_month["2024-02"], 20.0);
    }

    #[test]
    fn test_summarize_respects_filter() {
        let (service, _temp_dir) = create_test_service();
        service.add_expense(add_cmd(10.0, "food", "", "2024-01-05")).unwrap();
        service.add_expense(add_cmd(99.0, "travel", "", "2024-01-06")).unwrap();

        let summary = service.summarize(&ExpenseFilter {
            category: Some("food".to_string()),
            ..Default::default()
        });
        assert_eq!(summary.total, 10.0);
        assert_eq!(summary.count, 1);
        assert!(!summary.by_category.contains_key("travel"));
    }

    #[test]
    fn test_export_ignores_filters_and_round_trips_through_import() {
        let (service, _temp_dir) = create_test_service();
        service.add_expense(add_cmd(10.0, "food", "lunch", "2024-01-05")).unwrap();
        service.add_expense(add_cmd(20.0, "travel", "taxi", "2024-02-10")).unwrap();

        let before = service.list_expenses(&ExpenseFilter::all());
        let exported = service.export_json().unwrap();

        let imported = service.import_json(&exported).unwrap();
        assert_eq!(imported, 2);

        let after = service.list_expenses(&ExpenseFilter::all());
        assert_eq!(after, before);
    }

    #[test]
    fn test_import_replaces_collection_wholesale() {
        let (service, _temp_dir) = create_test_service();
        service.add_expense(add_cmd(10.0, "food", "", "2024-01-05")).unwrap();
        let exported = service.export_json().unwrap();

        service.add_expense(add_cmd(99.0, "travel", "", "2024-03-01")).unwrap();
        service.import_json(&exported).unwrap();

        let listed = service.list_expenses(&ExpenseFilter::all());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category, "food");
    }

    #[test]
    fn test_import_rejects_non_array_and_leaves_collection_unchanged() {
        let (service, _temp_dir) = create_test_service();
        service.add_expense(add_cmd(10.0, "food", "", "2024-01-05")).unwrap();

        for payload in [r#"{"id": "x"}"#, "42", "\"hello\"", "{broken"] {
            let err = service.import_json(payload).unwrap_err();
            assert!(matches!(err, ExpenseError::Import(_)), "payload: {payload}");
        }

        assert_eq!(service.list_expenses(&ExpenseFilter::all()).len(), 1);
    }

    #[test]
    fn test_import_reports_offending_record_index() {
        let (service, _temp_dir) = create_test_service();

        let payload = r#"[
            {"id": "a", "amount": 5.0, "category": "food", "note": "",
             "expenseDate": "2024-01-01", "createdAt": "2024-01-01T00:00:00Z",
             "updatedAt": "2024-01-01T00:00:00Z"},
            {"id": "b", "amount": -5.0, "category": "food", "note": "",
             "expenseDate": "2024-01-02", "createdAt": "2024-01-02T00:00:00Z",
             "updatedAt": "2024-01-02T00:00:00Z"}
        ]"#;

        let err = service.import_json(payload).unwrap_err();
        match err {
            ExpenseError::Import(message) => assert!(message.contains("record 1")),
            other => panic!("expected import error, got {other:?}"),
        }
        assert!(service.list_expenses(&ExpenseFilter::all()).is_empty());
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let (service, _temp_dir) = create_test_service();

        let payload = r#"[
            {"id": "a", "amount": 5.0, "category": "food", "note": "",
             "expenseDate": "2024-01-01", "createdAt": "2024-01-01T00:00:00Z",
             "updatedAt": "2024-01-01T00:00:00Z"},
            {"id": "a", "amount": 6.0, "category": "bills", "note": "",
             "expenseDate": "2024-01-02", "createdAt": "2024-01-02T00:00:00Z",
             "updatedAt": "2024-01-02T00:00:00Z"}
        ]"#;

        let err = service.import_json(payload).unwrap_err();
        assert!(matches!(err, ExpenseError::Import(_)));
    }

    #[test]
    fn test_write_failure_surfaces_as_persistence_error() {
        let store = FlakyStore::new();
        let service = ExpenseService::new(&store);

        service
            .add_expense(add_cmd(10.0, "food", "", "2024-01-05"))
            .unwrap();

        store.set_fail_writes(true);
        let err = service
            .add_expense(add_cmd(20.0, "travel", "", "2024-01-06"))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Persistence(_)));

        // The store keeps its last successfully written state.
        store.set_fail_writes(false);
        let listed = service.list_expenses(&ExpenseFilter::all());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category, "food");
    }

    #[test]
    fn test_read_failure_falls_back_to_empty_collection() {
        let store = FlakyStore {
            expenses: Mutex::new(Vec::new()),
            fail_writes: Mutex::new(false),
            fail_reads: true,
        };
        let service = ExpenseService::new(&store);

        assert!(service.list_expenses(&ExpenseFilter::all()).is_empty());
        let summary = service.summarize(&ExpenseFilter::all());
        assert_eq!(summary.count, 0);
    }
}
