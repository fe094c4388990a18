//! Scrollable expense list with per-row edit and delete actions.
use eframe::egui;

use crate::ui::app_state::ExpenseTrackerApp;

impl ExpenseTrackerApp {
    pub fn draw_expense_list(&mut self, ui: &mut egui::Ui) {
        if self.expenses.is_empty() {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.label("No expenses match the current filter.");
            });
            return;
        }

        // Buttons inside the grid can't borrow self mutably while the
        // expense list is being iterated; collect the requested action
        // and apply it afterwards.
        let mut edit_requested: Option<shared::Expense> = None;
        let mut delete_requested: Option<shared::Expense> = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("expense_list")
                .num_columns(6)
                .striped(true)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("Date");
                    ui.strong("Category");
                    ui.strong("Note");
                    ui.strong("Amount");
                    ui.strong("");
                    ui.strong("");
                    ui.end_row();

                    for expense in &self.expenses {
                        ui.label(&expense.expense_date);
                        ui.label(shared::display_category(&expense.category));
                        ui.label(if expense.note.is_empty() {
                            "-"
                        } else {
                            expense.note.as_str()
                        });
                        ui.label(format!("${:.2}", expense.amount));
                        if ui.small_button("Edit").clicked() {
                            edit_requested = Some(expense.clone());
                        }
                        if ui.small_button("Delete").clicked() {
                            delete_requested = Some(expense.clone());
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(expense) = edit_requested {
            self.start_editing(&expense);
        }
        if let Some(expense) = delete_requested {
            self.request_delete(&expense);
        }
    }
}
