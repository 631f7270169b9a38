//! Test utilities for filesystem-backed storage tests
//!
//! The temporary directory is removed when the environment is dropped, even if
//! the test panics.

use std::path::PathBuf;
use tempfile::TempDir;
use anyhow::Result;
use super::connection::JsonConnection;

/// RAII test environment rooted in a fresh temporary directory
pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}
