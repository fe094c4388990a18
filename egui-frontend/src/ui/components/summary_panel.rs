//! Summary panel: overall totals plus per-category and per-month
//! breakdowns for the current filter.
use eframe::egui;

use crate::ui::app_state::ExpenseTrackerApp;

impl ExpenseTrackerApp {
    pub fn draw_summary_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Summary");
        ui.add_space(6.0);

        ui.label(format!("Expenses: {}", self.summary.count));
        ui.label(format!("Total: ${:.2}", self.summary.total));
        ui.label(format!("Average: ${:.2}", self.summary.average()));

        if !self.summary.by_category.is_empty() {
            ui.add_space(6.0);
            ui.collapsing("By category", |ui| {
                // Largest categories first, matching the report layout.
                let mut rows: Vec<(&String, &f64)> = self.summary.by_category.iter().collect();
                rows.sort_by(|a, b| b.1.total_cmp(a.1));
                for (category, amount) in rows {
                    ui.label(format!(
                        "{}: ${amount:.2}",
                        shared::display_category(category)
                    ));
                }
            });
        }

        if !self.summary.by_month.is_empty() {
            ui.collapsing("By month", |ui| {
                // BTreeMap iterates months in ascending order; show the
                // most recent first like the expense list.
                for (month, amount) in self.summary.by_month.iter().rev() {
                    ui.label(format!("{month}: ${amount:.2}"));
                }
            });
        }
    }
}
