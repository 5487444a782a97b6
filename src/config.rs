use std::path::{Path, PathBuf};

pub const USERS_FILE: &str = "usuarios.txt";
pub const FILMS_FILE: &str = "filmes.txt";
pub const RENTALS_FILE: &str = "alugueis.txt";

/// Environment variable selecting the directory that holds the data files
pub const DATA_DIR_VAR: &str = "LOCADORA_DATA_DIR";

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "locadora=warn";

/// Start-up configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Reads `LOCADORA_DATA_DIR`, defaulting to the working directory.
    pub fn from_env() -> Self {
        let data_dir = std::env::var_os(DATA_DIR_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { data_dir }
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    pub fn films_path(&self) -> PathBuf {
        self.data_dir.join(FILMS_FILE)
    }

    pub fn rentals_path(&self) -> PathBuf {
        self.data_dir.join(RENTALS_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
