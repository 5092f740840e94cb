//! Project file handling for hwtask

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::targets::project::Project;

/// Errors that can occur while loading the project file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Project file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unable to read project file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to find directory: {path:?}")]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to parse YAML project file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Unable to parse JSON project file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("Invalid project file: {0}")]
    Validation(String),
}

/// On-disk shape of the project file; every field is optional
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub hwtask_version: Option<String>,
    pub package: Option<String>,
    pub tests_dir: Option<PathBuf>,
    pub env: Option<HashMap<String, String>>,
}

impl From<Config> for Project {
    fn from(config: Config) -> Self {
        let defaults = Project::default();
        Project {
            package: config.package.unwrap_or(defaults.package),
            tests_dir: config.tests_dir.unwrap_or(defaults.tests_dir),
            env: config.env.unwrap_or_default().into_iter().collect(),
            root: defaults.root,
        }
    }
}

/// List of supported project file names
pub const FILENAMES: [&str; 3] = [".hwtask.json", ".hwtask.yaml", ".hwtask.yml"];

impl Config {
    /// Loads and parses a project file. An empty file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, or
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            debug!("Project file {} is empty, using defaults", file.display());
            return Ok(Config::default());
        }
        let config: Config = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        Ok(config)
    }

    /// Searches for a project file in `start` and its parents.
    ///
    /// Returns `None` when no directory up to the filesystem root has one.
    #[must_use]
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        let mut path = start.to_path_buf();
        debug!("Searching for project file in {}", start.display());
        loop {
            for file in &FILENAMES {
                let config_path = path.join(file);
                if config_path.is_file() {
                    info!("Found project file: {}", config_path.display());
                    return Some(config_path);
                }
            }
            if !path.pop() {
                debug!("No project file found, using defaults");
                return None;
            }
        }
    }
}
