use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use thiserror::Error;

use crate::targets::invocation::Invocation;
use crate::targets::project::Project;

/// Raised when a name does not match any target
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown target '{name}' (expected one of: {})", Target::names().join(", "))]
pub struct UnknownTarget {
    pub name: String,
}

/// A named unit of work with one fixed external command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Install,
    Run,
    Lint,
    Test,
}

impl Target {
    /// All targets, in the order they are listed
    pub const ALL: [Target; 4] = [Target::Install, Target::Run, Target::Lint, Target::Test];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Target::Install => "install",
            Target::Run => "run",
            Target::Lint => "lint",
            Target::Test => "test",
        }
    }

    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Target::ALL.iter().map(|t| t.name()).collect()
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Target::Install => "Install project dependencies",
            Target::Run => "Run the application entry point",
            Target::Lint => "Run pre-commit hooks over all files",
            Target::Test => "Run the test suite with coverage",
        }
    }

    /// Build the command this target runs for the given project.
    #[must_use]
    pub fn invocation(self, project: &Project) -> Invocation {
        let invocation = match self {
            Target::Install => Invocation::new("poetry", ["install"]),
            Target::Run => Invocation::new("python", ["-m", project.package.as_str()]),
            Target::Lint => Invocation::new("pre-commit", ["run", "--all-files"]),
            Target::Test => Invocation::new(
                "pytest",
                [
                    tests_arg(&project.tests_dir),
                    format!("--cov={}", project.package),
                    "--cov-report=term-missing".to_string(),
                ],
            ),
        };
        invocation.envs(&project.env).current_dir(&project.root)
    }
}

/// Relative test directories are passed as `./<dir>` so pytest treats them as paths
fn tests_arg(tests_dir: &Path) -> String {
    let explicit = tests_dir.is_absolute()
        || matches!(
            tests_dir.components().next(),
            Some(Component::CurDir | Component::ParentDir)
        );
    if explicit {
        tests_dir.to_string_lossy().into_owned()
    } else {
        format!("./{}", tests_dir.to_string_lossy())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|target| target.name() == name)
            .ok_or_else(|| UnknownTarget {
                name: name.to_string(),
            })
    }
}
