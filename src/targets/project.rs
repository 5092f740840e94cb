use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_PACKAGE: &str = "homework_01";
pub const DEFAULT_TESTS_DIR: &str = "tests";

/// Values the target invocations are built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Python package run as the entry point and measured for coverage
    pub package: String,
    pub tests_dir: PathBuf,
    /// Extra environment added on top of the inherited one
    pub env: BTreeMap<String, String>,
    /// Directory the commands run in; empty means the caller's working directory
    pub root: PathBuf,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            package: DEFAULT_PACKAGE.to_string(),
            tests_dir: PathBuf::from(DEFAULT_TESTS_DIR),
            env: BTreeMap::new(),
            root: PathBuf::new(),
        }
    }
}
