use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::process::Command as ProcessCommand;

use log::debug;

/// A fully resolved external command: program, arguments and extra environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    /// Empty means inherit the caller's working directory
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn envs(mut self, env: &BTreeMap<String, String>) -> Self {
        self.env
            .extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }
}

/// Quote a word so it can be pasted back into a POSIX shell
fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:,+@%".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{key}={} ", shell_quote(value))?;
        }
        f.write_str(&shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

impl From<&Invocation> for ProcessCommand {
    fn from(invocation: &Invocation) -> Self {
        debug!(
            "Building process for `{invocation}` (cwd: {})",
            if invocation.cwd.as_os_str().is_empty() {
                "<inherited>".into()
            } else {
                invocation.cwd.display().to_string()
            }
        );
        let mut command = ProcessCommand::new(&invocation.program);
        command.args(&invocation.args).envs(&invocation.env);
        if !invocation.cwd.as_os_str().is_empty() {
            command.current_dir(&invocation.cwd);
        }
        command
    }
}
