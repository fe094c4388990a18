//! Report formatting for the expense tracker.
//!
//! Turns a (already filtered and sorted) expense listing plus its summary
//! into a paginated plain-text tabular document: a statistics block, a
//! category breakdown sorted by amount descending, and a per-record
//! detail table. The caller decides where the document goes;
//! [`ReportService::write_to_documents`] covers the common case of
//! dropping it into the user's Documents folder.
use anyhow::Result;
use chrono::Local;
use log::info;
use std::fs;
use std::path::PathBuf;

use crate::domain::commands::expenses::ExpenseSummary;
use crate::domain::models::expense::Expense;

/// Detail rows per page before a page break is inserted.
const ROWS_PER_PAGE: usize = 40;

const PAGE_WIDTH: usize = 78;

/// A rendered report ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseReport {
    /// Suggested file name, with the generation date embedded.
    pub filename: String,
    pub content: String,
}

#[derive(Clone, Default)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Render the report document for the given listing and summary.
    pub fn generate_expense_report(
        &self,
        expenses: &[Expense],
        summary: &ExpenseSummary,
    ) -> ExpenseReport {
        let now = Local::now();
        let mut content = String::new();

        content.push_str("EXPENSE REPORT\n");
        content.push_str(&format!(
            "Generated on: {}\n",
            now.format("%B %e, %Y %H:%M")
        ));
        content.push('\n');

        content.push_str("Summary Statistics\n");
        content.push_str(&"-".repeat(PAGE_WIDTH));
        content.push('\n');
        content.push_str(&format!("Total Expenses:  {}\n", summary.count));
        content.push_str(&format!("Total Amount:    ${:.2}\n", summary.total));
        content.push_str(&format!("Average Expense: ${:.2}\n", summary.average()));
        content.push('\n');

        self.render_category_table(summary, &mut content);
        self.render_detail_table(expenses, &mut content);

        let filename = format!("expenses-{}.txt", now.format("%Y-%m-%d"));
        info!("Generated expense report '{}' covering {} records", filename, expenses.len());

        ExpenseReport { filename, content }
    }

    /// Category breakdown, largest amounts first.
    fn render_category_table(&self, summary: &ExpenseSummary, content: &mut String) {
        if summary.by_category.is_empty() {
            return;
        }

        let mut rows: Vec<(&String, &f64)> = summary.by_category.iter().collect();
        rows.sort_by(|a, b| b.1.total_cmp(a.1));

        content.push_str("Category Breakdown\n");
        content.push_str(&"-".repeat(PAGE_WIDTH));
        content.push('\n');
        content.push_str(&format!("{:<18} {:>12}\n", "Category", "Amount"));
        for (category, amount) in rows {
            content.push_str(&format!(
                "{:<18} {:>12}\n",
                capitalize(category),
                format!("${amount:.2}")
            ));
        }
        content.push('\n');
    }

    /// Per-record detail table in the order the caller gave, broken into
    /// pages with repeated column headers and a page footer.
    fn render_detail_table(&self, expenses: &[Expense], content: &mut String) {
        content.push_str("Expense Details\n");

        if expenses.is_empty() {
            content.push_str(&"-".repeat(PAGE_WIDTH));
            content.push_str("\n(no expenses)\n");
            return;
        }

        let page_count = expenses.len().div_ceil(ROWS_PER_PAGE);
        for (page_index, page) in expenses.chunks(ROWS_PER_PAGE).enumerate() {
            content.push_str(&"-".repeat(PAGE_WIDTH));
            content.push('\n');
            content.push_str(&format!(
                "{:<12} {:<15} {:<38} {:>10}\n",
                "Date", "Category", "Note", "Amount"
            ));
            for expense in page {
                content.push_str(&format!(
                    "{:<12} {:<15} {:<38} {:>10}\n",
                    expense.expense_date.format("%b %e, %Y"),
                    capitalize(&expense.category),
                    truncate_note(&expense.note),
                    format!("${:.2}", expense.amount)
                ));
            }
            content.push_str(&"-".repeat(PAGE_WIDTH));
            content.push('\n');
            content.push_str(&format!("Page {} of {}\n\n", page_index + 1, page_count));
        }
    }

    /// Write a rendered report into the user's Documents directory
    /// (home directory when no Documents folder exists), creating the
    /// directory if needed. Returns the full path written.
    pub fn write_to_documents(&self, report: &ExpenseReport) -> Result<PathBuf> {
        let export_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine an export directory"))?;

        self.write_to_directory(report, export_dir)
    }

    /// Write a rendered report into an arbitrary directory.
    pub fn write_to_directory(&self, report: &ExpenseReport, dir: PathBuf) -> Result<PathBuf> {
        fs::create_dir_all(&dir)?;
        let path = dir.join(&report.filename);
        fs::write(&path, &report.content)?;
        info!("Wrote expense report to {}", path.display());
        Ok(path)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Keep the detail table aligned: notes wider than their column are cut
/// with an ellipsis. An empty note renders as "-" like the category table
/// in the old report.
fn truncate_note(note: &str) -> String {
    if note.is_empty() {
        return "-".to_string();
    }
    if note.chars().count() <= 38 {
        return note.to_string();
    }
    let cut: String = note.chars().take(35).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn expense(amount: f64, category: &str, note: &str, day: u32) -> Expense {
        let now = Utc::now();
        Expense {
            id: format!("{category}-{day}"),
            amount,
            category: category.to_string(),
            note: note.to_string(),
            expense_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn summary_for(expenses: &[Expense]) -> ExpenseSummary {
        let mut summary = ExpenseSummary {
            count: expenses.len(),
            ..Default::default()
        };
        for e in expenses {
            summary.total += e.amount;
            *summary.by_category.entry(e.category.clone()).or_insert(0.0) += e.amount;
            *summary.by_month.entry(e.month_key()).or_insert(0.0) += e.amount;
        }
        summary
    }

    #[test]
    fn test_report_contains_statistics_block() {
        let expenses = vec![expense(10.0, "food", "lunch", 5), expense(30.0, "travel", "", 6)];
        let report = ReportService::new().generate_expense_report(&expenses, &summary_for(&expenses));

        assert!(report.content.contains("Total Expenses:  2"));
        assert!(report.content.contains("Total Amount:    $40.00"));
        assert!(report.content.contains("Average Expense: $20.00"));
    }

    #[test]
    fn test_category_breakdown_sorted_by_amount_descending() {
        let expenses = vec![
            expense(5.0, "food", "", 1),
            expense(50.0, "travel", "", 2),
            expense(20.0, "bills", "", 3),
        ];
        let report = ReportService::new().generate_expense_report(&expenses, &summary_for(&expenses));

        let travel = report.content.find("Travel").unwrap();
        let bills = report.content.find("Bills").unwrap();
        let food = report.content.find("Food").unwrap();
        assert!(travel < bills && bills < food);
    }

    #[test]
    fn test_filename_embeds_current_date() {
        let report = ReportService::new().generate_expense_report(
            &[],
            &ExpenseSummary {
                total: 0.0,
                count: 0,
                by_category: BTreeMap::new(),
                by_month: BTreeMap::new(),
            },
        );

        let today = Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(report.filename, format!("expenses-{today}.txt"));
    }

    #[test]
    fn test_detail_table_paginates() {
        let expenses: Vec<Expense> =
            (0..85u32).map(|i| expense(1.0, "food", "", (i % 28) + 1)).collect();
        let report = ReportService::new().generate_expense_report(&expenses, &summary_for(&expenses));

        assert!(report.content.contains("Page 1 of 3"));
        assert!(report.content.contains("Page 3 of 3"));
        assert!(!report.content.contains("Page 4"));
        // Column headers repeat on every page.
        let header = format!("{:<12} {:<15} {:<38} {:>10}", "Date", "Category", "Note", "Amount");
        assert_eq!(report.content.matches(&header).count(), 3);
    }

    #[test]
    fn test_empty_note_renders_as_dash() {
        let expenses = vec![expense(10.0, "food", "", 5)];
        let report = ReportService::new().generate_expense_report(&expenses, &summary_for(&expenses));
        assert!(report.content.contains(" - "));
    }

    #[test]
    fn test_write_to_directory() {
        let temp_dir = TempDir::new().unwrap();
        let service = ReportService::new();
        let expenses = vec![expense(10.0, "food", "lunch", 5)];
        let report = service.generate_expense_report(&expenses, &summary_for(&expenses));

        let path = service
            .write_to_directory(&report, temp_dir.path().to_path_buf())
            .unwrap();
        assert!(path.exists());
        let written = fs::read_to_string(path).unwrap();
        assert_eq!(written, report.content);
    }
}
