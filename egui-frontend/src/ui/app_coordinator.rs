//! Top-level layout and the `eframe::App` implementation.
//!
//! Panel layout: a header strip with the export/import/report actions, a
//! message bar for service errors and confirmations, the filter bar, a
//! left panel holding the add/edit form and the summary, and the central
//! expense list. Dialogs (delete confirmation, import) render as egui
//! windows on top.

use eframe::egui;

use crate::ui::app_state::ExpenseTrackerApp;

impl eframe::App for ExpenseTrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.draw_header(ui);
            self.draw_message_bar(ui);
            self.draw_filter_bar(ui);
        });

        egui::SidePanel::left("form_panel")
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| {
                self.draw_expense_form(ui);
                ui.separator();
                self.draw_summary_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_expense_list(ui);
        });

        self.draw_confirm_delete_dialog(ctx);
        self.draw_import_dialog(ctx);
    }
}

impl ExpenseTrackerApp {
    fn draw_header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.heading("Expense Tracker");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Report").clicked() {
                    self.handle_generate_report();
                }
                if ui.button("Import").clicked() {
                    self.clear_messages();
                    self.show_import_dialog = true;
                }
                if ui.button("Export").clicked() {
                    self.handle_export_json();
                }
            });
        });
        ui.add_space(4.0);
    }

    fn draw_message_bar(&mut self, ui: &mut egui::Ui) {
        let mut dismissed = false;
        if let Some(error) = &self.error_message {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(200, 40, 40), error);
                dismissed = ui.small_button("x").clicked();
            });
        } else if let Some(message) = &self.success_message {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(40, 140, 60), message);
                dismissed = ui.small_button("x").clicked();
            });
        }
        if dismissed {
            self.clear_messages();
        }
    }

    fn draw_confirm_delete_dialog(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.confirm_delete.clone() else {
            return;
        };

        egui::Window::new("Delete expense?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Delete \"{}\"? This cannot be undone.", pending.label));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        self.handle_confirmed_delete();
                    }
                    if ui.button("Cancel").clicked() {
                        self.confirm_delete = None;
                    }
                });
            });
    }

    fn draw_import_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_import_dialog {
            return;
        }

        egui::Window::new("Import expenses")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Path of a previously exported JSON file.");
                ui.label("Importing replaces all current expenses.");
                ui.add_space(4.0);
                ui.text_edit_singleline(&mut self.import_path);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Import").clicked() {
                        self.handle_import();
                    }
                    if ui.button("Cancel").clicked() {
                        self.show_import_dialog = false;
                        self.import_path.clear();
                    }
                });
            });
    }
}
