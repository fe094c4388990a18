//! # App State Module
//!
//! Central application state for the expense tracker UI: the backend
//! service handles, the currently loaded (filtered) listing and summary,
//! filter/form/dialog state, and the handlers the components call. The
//! components themselves only render and collect input; every mutation
//! goes through the backend service and every failure ends up in
//! `error_message` for the message bar to display.

use chrono::{Local, NaiveDate};
use log::info;

use expense_tracker_backend::domain::commands::expenses::{
    AddExpenseCommand, ExpenseFilter, UpdateExpenseCommand,
};
use expense_tracker_backend::domain::{ExpenseService, ReportService};
use expense_tracker_backend::storage::{ExpenseRepository, JsonConnection};

use crate::ui::mappers::{ExpenseMapper, SummaryMapper};

/// A delete waiting for the user's confirmation.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub id: String,
    /// Short human-readable description shown in the confirm dialog
    pub label: String,
}

pub struct ExpenseTrackerApp {
    pub service: ExpenseService<ExpenseRepository>,
    pub report_service: ReportService,

    // Loaded data (already filtered and mapped for display)
    pub expenses: Vec<shared::Expense>,
    pub summary: shared::ExpenseSummary,

    // Filter state
    pub filter_category: Option<String>,
    pub filter_start_date: String,
    pub filter_end_date: String,
    pub search_text: String,

    // Form state (shared between add and edit; `editing_id` decides)
    pub form_amount: String,
    pub form_category: String,
    pub form_note: String,
    pub form_date: String,
    pub editing_id: Option<String>,

    // UI state
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub confirm_delete: Option<PendingDelete>,
    pub show_import_dialog: bool,
    pub import_path: String,
}

impl ExpenseTrackerApp {
    /// Create the app against the default on-disk JSON store.
    pub fn new() -> Result<Self, anyhow::Error> {
        let connection = JsonConnection::new_default()?;
        info!("Using data directory: {}", connection.base_directory().display());

        let service = ExpenseService::new(ExpenseRepository::new(connection));
        let mut app = Self {
            service,
            report_service: ReportService::new(),
            expenses: Vec::new(),
            summary: shared::ExpenseSummary {
                total: 0.0,
                count: 0,
                by_category: Default::default(),
                by_month: Default::default(),
            },
            filter_category: None,
            filter_start_date: String::new(),
            filter_end_date: String::new(),
            search_text: String::new(),
            form_amount: String::new(),
            form_category: shared::CATEGORIES[0].to_string(),
            form_note: String::new(),
            form_date: Local::now().format("%Y-%m-%d").to_string(),
            editing_id: None,
            error_message: None,
            success_message: None,
            confirm_delete: None,
            show_import_dialog: false,
            import_path: String::new(),
        };
        app.reload();
        Ok(app)
    }

    /// The filter built from the current filter bar state. Date fields
    /// that do not parse as `YYYY-MM-DD` (typically half-typed) are
    /// treated as absent.
    pub fn current_filter(&self) -> ExpenseFilter {
        ExpenseFilter {
            category: self.filter_category.clone(),
            start_date: parse_date(&self.filter_start_date),
            end_date: parse_date(&self.filter_end_date),
            search_text: if self.search_text.is_empty() {
                None
            } else {
                Some(self.search_text.clone())
            },
        }
    }

    /// Re-query the service with the current filter and refresh the
    /// displayed listing and summary.
    pub fn reload(&mut self) {
        let filter = self.current_filter();
        self.expenses = self
            .service
            .list_expenses(&filter)
            .into_iter()
            .map(ExpenseMapper::to_dto)
            .collect();
        self.summary = SummaryMapper::to_dto(self.service.summarize(&filter));
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    /// Submit the form: add a new expense, or update the one being edited.
    pub fn handle_submit_form(&mut self) {
        self.clear_messages();

        let amount = match self.form_amount.trim().parse::<f64>() {
            Ok(amount) => amount,
            Err(_) => {
                self.error_message = Some("Amount must be a number".to_string());
                return;
            }
        };
        let expense_date = match parse_date(&self.form_date) {
            Some(date) => date,
            None => {
                self.error_message = Some("Date must be in YYYY-MM-DD format".to_string());
                return;
            }
        };

        let result = match self.editing_id.clone() {
            Some(id) => self.service.update_expense(UpdateExpenseCommand {
                id,
                amount,
                category: self.form_category.clone(),
                note: self.form_note.trim().to_string(),
                expense_date,
            }),
            None => self.service.add_expense(AddExpenseCommand {
                amount,
                category: self.form_category.clone(),
                note: self.form_note.trim().to_string(),
                expense_date,
            }),
        };

        match result {
            Ok(_) => {
                self.success_message = Some(if self.editing_id.is_some() {
                    "Expense updated".to_string()
                } else {
                    "Expense added".to_string()
                });
                self.reset_form();
                self.reload();
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    /// Load an existing expense into the form for editing.
    pub fn start_editing(&mut self, expense: &shared::Expense) {
        self.editing_id = Some(expense.id.clone());
        self.form_amount = format!("{:.2}", expense.amount);
        self.form_category = expense.category.clone();
        self.form_note = expense.note.clone();
        self.form_date = expense.expense_date.clone();
        self.clear_messages();
    }

    pub fn reset_form(&mut self) {
        self.editing_id = None;
        self.form_amount.clear();
        self.form_note.clear();
        self.form_category = shared::CATEGORIES[0].to_string();
        self.form_date = Local::now().format("%Y-%m-%d").to_string();
    }

    /// Ask for confirmation before deleting; the actual delete happens in
    /// [`Self::handle_confirmed_delete`].
    pub fn request_delete(&mut self, expense: &shared::Expense) {
        self.confirm_delete = Some(PendingDelete {
            id: expense.id.clone(),
            label: format!(
                "{} ${:.2} on {}",
                shared::display_category(&expense.category),
                expense.amount,
                expense.expense_date
            ),
        });
    }

    pub fn handle_confirmed_delete(&mut self) {
        let Some(pending) = self.confirm_delete.take() else {
            return;
        };
        self.clear_messages();
        match self.service.delete_expense(&pending.id) {
            Ok(()) => {
                // Deleting the record being edited would otherwise leave a
                // dangling edit form.
                if self.editing_id.as_deref() == Some(pending.id.as_str()) {
                    self.reset_form();
                }
                self.success_message = Some("Expense deleted".to_string());
                self.reload();
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    /// Export the full collection as a JSON file in Documents.
    pub fn handle_export_json(&mut self) {
        self.clear_messages();
        let json = match self.service.export_json() {
            Ok(json) => json,
            Err(e) => {
                self.error_message = Some(e.to_string());
                return;
            }
        };

        let filename = format!("expense-data-{}.json", Local::now().format("%Y-%m-%d"));
        match export_directory() {
            Some(dir) => {
                let path = dir.join(&filename);
                match std::fs::write(&path, json) {
                    Ok(()) => {
                        info!("Exported expense data to {}", path.display());
                        self.success_message = Some(format!("Exported to {}", path.display()));
                    }
                    Err(e) => self.error_message = Some(format!("Export failed: {e}")),
                }
            }
            None => self.error_message = Some("Could not determine an export directory".to_string()),
        }
    }

    /// Read the file named in the import dialog and hand its contents to
    /// the service. A failed read takes no action beyond the message.
    pub fn handle_import(&mut self) {
        self.clear_messages();
        let path = self.import_path.trim().to_string();
        if path.is_empty() {
            self.error_message = Some("Enter the path of a JSON export file".to_string());
            return;
        }

        let payload = match std::fs::read_to_string(&path) {
            Ok(payload) => payload,
            Err(e) => {
                self.error_message = Some(format!("Could not read {path}: {e}"));
                return;
            }
        };

        match self.service.import_json(&payload) {
            Ok(count) => {
                self.success_message = Some(format!("Imported {count} expenses"));
                self.show_import_dialog = false;
                self.import_path.clear();
                self.reload();
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    /// Generate the report over the currently filtered listing and write
    /// it to Documents.
    pub fn handle_generate_report(&mut self) {
        self.clear_messages();
        let filter = self.current_filter();
        let expenses = self.service.list_expenses(&filter);
        let summary = self.service.summarize(&filter);

        let report = self.report_service.generate_expense_report(&expenses, &summary);
        match self.report_service.write_to_documents(&report) {
            Ok(path) => self.success_message = Some(format!("Report saved to {}", path.display())),
            Err(e) => self.error_message = Some(format!("Report failed: {e}")),
        }
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

fn export_directory() -> Option<std::path::PathBuf> {
    dirs::document_dir().or_else(dirs::home_dir)
}
