use eframe::egui;
use log::{error, info};

mod ui;

use ui::ExpenseTrackerApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    info!("Starting Expense Tracker egui application");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([800.0, 550.0])
            .with_title("Expense Tracker")
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Expense Tracker",
        options,
        Box::new(|_cc| match ExpenseTrackerApp::new() {
            Ok(app) => {
                info!("Successfully initialized Expense Tracker app");
                Ok(Box::new(app))
            }
            Err(e) => {
                error!("Failed to initialize app: {}", e);
                Err(format!("Failed to initialize app: {}", e).into())
            }
        }),
    )
}
