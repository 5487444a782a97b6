#![allow(dead_code)]

use locadora::application::Locadora;
use locadora::config::AppConfig;
use std::path::PathBuf;
use tempfile::TempDir;

/// Data directory in a temporary folder, removed when dropped.
///
/// Every test gets its own directory, so shops never share files.
pub struct TestData {
    root: TempDir,
}

impl TestData {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::new(self.root.path())
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.root.path().join(file)
    }

    /// Writes `lines` as a newline-terminated file.
    pub fn seed(&self, file: &str, lines: &[&str]) {
        let mut content = lines.join("\n");
        content.push('\n');
        std::fs::write(self.path(file), content).expect("Failed to seed data file");
    }

    /// Reads a data file back as lines; a missing file has none.
    pub fn lines(&self, file: &str) -> Vec<String> {
        match std::fs::read_to_string(self.path(file)) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn open(&self) -> Locadora {
        Locadora::open(&self.config()).expect("Failed to open shop")
    }
}
