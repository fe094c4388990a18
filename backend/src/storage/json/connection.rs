//! Connection type managing the data directory for the JSON store.
use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "expenses.json";

/// JsonConnection manages the base data directory and the location of the
/// single store file within it.
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at a base directory, creating the
    /// directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory:
    /// `Documents/Expense Tracker`, falling back to the home directory
    /// when no Documents folder is available.
    pub fn new_default() -> Result<Self> {
        let parent = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine a data directory"))?;
        Self::new(parent.join("Expense Tracker"))
    }

    /// The base data directory.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the store file holding the expense collection.
    pub fn store_file_path(&self) -> PathBuf {
        self.base_directory.join(STORE_FILE_NAME)
    }
}
