//! Add/edit expense form. The same form serves both modes; `editing_id`
//! decides whether submit creates or updates.
use eframe::egui;

use crate::ui::app_state::ExpenseTrackerApp;

impl ExpenseTrackerApp {
    pub fn draw_expense_form(&mut self, ui: &mut egui::Ui) {
        let editing = self.editing_id.is_some();
        ui.heading(if editing { "Edit Expense" } else { "Add Expense" });
        ui.add_space(6.0);

        egui::Grid::new("expense_form")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Amount");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form_amount)
                        .hint_text("0.00")
                        .desired_width(120.0),
                );
                ui.end_row();

                ui.label("Category");
                egui::ComboBox::from_id_source("form_category")
                    .selected_text(shared::display_category(&self.form_category))
                    .show_ui(ui, |ui| {
                        for category in shared::CATEGORIES {
                            ui.selectable_value(
                                &mut self.form_category,
                                category.to_string(),
                                shared::display_category(category),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Date");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form_date)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(120.0),
                );
                ui.end_row();

                ui.label("Note");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form_note)
                        .hint_text("optional")
                        .desired_width(160.0),
                );
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .button(if editing { "Save Changes" } else { "Add Expense" })
                .clicked()
            {
                self.handle_submit_form();
            }
            if editing && ui.button("Cancel").clicked() {
                self.reset_form();
                self.clear_messages();
            }
        });
    }
}
