//! Filter bar: category, inclusive date range, and free-text search.
use eframe::egui;

use crate::ui::app_state::ExpenseTrackerApp;

impl ExpenseTrackerApp {
    pub fn draw_filter_bar(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;

        ui.horizontal(|ui| {
            let selected = self
                .filter_category
                .as_deref()
                .map(shared::display_category)
                .unwrap_or_else(|| "All Categories".to_string());
            egui::ComboBox::from_id_source("filter_category")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    changed |= ui
                        .selectable_value(&mut self.filter_category, None, "All Categories")
                        .changed();
                    for category in shared::CATEGORIES {
                        changed |= ui
                            .selectable_value(
                                &mut self.filter_category,
                                Some(category.to_string()),
                                shared::display_category(category),
                            )
                            .changed();
                    }
                });

            ui.label("From");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut self.filter_start_date)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(90.0),
                )
                .changed();
            ui.label("To");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut self.filter_end_date)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(90.0),
                )
                .changed();

            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut self.search_text)
                        .hint_text("Search note or category")
                        .desired_width(180.0),
                )
                .changed();

            if ui.button("Clear").clicked() {
                self.filter_category = None;
                self.filter_start_date.clear();
                self.filter_end_date.clear();
                self.search_text.clear();
                changed = true;
            }
        });
        ui.add_space(4.0);

        if changed {
            self.reload();
        }
    }
}
