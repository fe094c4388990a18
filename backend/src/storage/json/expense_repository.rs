//! JSON-file expense repository.
use anyhow::{Context, Result};
use log::debug;
use std::fs;

use super::connection::JsonConnection;
use crate::domain::models::expense::Expense;
use crate::storage::traits::ExpenseStorage;

/// Stores the whole expense collection as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    connection: JsonConnection,
}

impl ExpenseRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn load_expenses(&self) -> Result<Vec<Expense>> {
        let store_path = self.connection.store_file_path();

        // A store file that was never written is simply an empty
        // collection, not a failure.
        if !store_path.exists() {
            debug!("No store file at {}, loading empty collection", store_path.display());
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&store_path)
            .with_context(|| format!("could not read {}", store_path.display()))?;
        let expenses: Vec<Expense> = serde_json::from_str(&contents)
            .with_context(|| format!("could not parse {}", store_path.display()))?;

        debug!("Loaded {} expenses from {}", expenses.len(), store_path.display());
        Ok(expenses)
    }

    fn save_expenses(&self, expenses: &[Expense]) -> Result<()> {
        let store_path = self.connection.store_file_path();
        let json = serde_json::to_string_pretty(expenses)?;

        // Atomic write pattern: write to a temp file, then rename over the
        // store file, so a failed write leaves the last written state intact.
        let temp_path = store_path.with_extension("tmp");
        fs::write(&temp_path, json)
            .with_context(|| format!("could not write {}", temp_path.display()))?;
        fs::rename(&temp_path, &store_path)
            .with_context(|| format!("could not replace {}", store_path.display()))?;

        debug!("Saved {} expenses to {}", expenses.len(), store_path.display());
        Ok(())
    }
}
