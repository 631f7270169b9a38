use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the data directory created under the user's documents folder
pub const DEFAULT_DATA_DIRECTORY_NAME: &str = "Cashback Tracker";

/// JsonConnection manages the data directory and the paths of the files in it
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory
    /// (~/Documents/Cashback Tracker, or ~/Cashback Tracker without a documents folder)
    pub fn new_default() -> Result<Self> {
        let parent = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow!("Could not determine home directory"))?;

        let data_dir = parent.join(DEFAULT_DATA_DIRECTORY_NAME);
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the card snapshot
    pub fn cards_file_path(&self) -> PathBuf {
        self.base_directory.join("cards.json")
    }

    /// Path of the tracker configuration
    pub fn config_file_path(&self) -> PathBuf {
        self.base_directory.join("config.yaml")
    }
}

/// Write `contents` to `path` through a temp file and a rename, so readers see
/// either the old file or the complete new one
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move {} into place", temp_path.display()))?;
    Ok(())
}
