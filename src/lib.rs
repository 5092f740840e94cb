//! Core implementation of the hwtask dispatcher
//!
//! hwtask maps a handful of fixed target names (`install`, `run`, `lint`, `test`) to the
//! external tools that implement them and runs the selected one as a child process,
//! passing its exit status through unchanged. An optional project file can adjust the
//! package name, the tests directory and the environment the tools see.

use std::path::Path;

use log::{debug, warn};

use crate::config_file::{Config, ConfigError};
use crate::targets::project::Project;

pub mod config_file;
pub mod dispatch;
pub mod listing;
pub mod logger;
pub mod targets;
pub mod theme;

/// Resolve the working directory and project settings.
///
/// `directory` replaces the current directory when given. The project file is either
/// `config_file`, resolved against the working directory when relative, or the first one
/// found walking up from the working directory; no file at all means the built-in
/// defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the working directory cannot be determined, an explicit
/// project file does not exist, or the project file cannot be parsed or is invalid.
pub fn load_project(
    config_file: Option<&str>,
    directory: Option<&Path>,
) -> Result<Project, ConfigError> {
    let root = match directory {
        Some(dir) => dir
            .canonicalize()
            .map_err(|source| ConfigError::DirectoryNotFound {
                path: dir.to_path_buf(),
                source,
            })?,
        None => std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?,
    };
    if !root.is_dir() {
        return Err(ConfigError::DirectoryNotFound {
            path: root,
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    let config_path = match config_file {
        Some(file) => {
            // Relative paths follow `-C`, like `make -C dir -f file`
            let config_path = root.join(file);
            if !config_path.exists() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            Some(config_path)
        }
        None => Config::find_config(&root),
    };

    let config = match &config_path {
        Some(path) => {
            debug!(
                "Loading project file {} (root: {})",
                path.display(),
                root.display()
            );
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    if let Some(version) = &config.hwtask_version {
        validate_version(version);
    }

    let mut project = Project::from(config);
    project.root = root;
    validate_project(&project)?;
    Ok(project)
}

/// Warn if the project's `hwtask_version` doesn't match the binary version
fn validate_version(config_version: &str) {
    let binary_version = env!("CARGO_PKG_VERSION");
    if config_version != binary_version {
        warn!(
            "Project hwtask_version '{config_version}' differs from binary version '{binary_version}'"
        );
    }
}

fn validate_project(project: &Project) -> Result<(), ConfigError> {
    check_package(&project.package)?;
    if project.tests_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "tests_dir must not be empty".to_string(),
        ));
    }
    for key in project.env.keys() {
        if key.is_empty() || key.contains(['=', '\0']) {
            return Err(ConfigError::Validation(format!(
                "env key '{key}' is not a valid variable name"
            )));
        }
    }
    for (key, value) in &project.env {
        if value.contains('\0') {
            return Err(ConfigError::Validation(format!(
                "env value for '{key}' contains a NUL byte"
            )));
        }
    }
    Ok(())
}

/// A package is a dotted path of Python identifiers, e.g. `homework_01` or `app.cli`
fn check_package(package: &str) -> Result<(), ConfigError> {
    if package.trim().is_empty() {
        return Err(ConfigError::Validation(
            "package must not be empty".to_string(),
        ));
    }
    let valid_segment = |segment: &str| {
        let mut chars = segment.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    if !package.split('.').all(valid_segment) {
        return Err(ConfigError::Validation(format!(
            "package '{package}' is not a valid Python module path"
        )));
    }
    Ok(())
}
