use anyhow::{Context, Result};
use serde::Deserialize;

use crate::docker::{self, DEFAULT_RUNTIME};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Executable to invoke, either a name on `PATH` or a full path.
    pub runtime: String,
    /// Extra flags for `run`, written as a shell-style string.
    pub run_args: Option<String>,
    /// Run containers as the invoking user (Unix only).
    pub run_as_user: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: DEFAULT_RUNTIME.to_string(),
            run_args: None,
            run_as_user: false,
        }
    }
}

impl Config {
    /// Configured `run` flags as discrete argument tokens.
    pub fn run_flags(&self) -> Result<Vec<String>> {
        let mut flags = match &self.run_args {
            Some(raw) => shell_words::split(raw)
                .with_context(|| format!("cannot tokenise run_args {raw:?}"))?,
            None => Vec::new(),
        };
        if self.run_as_user {
            flags.extend(docker::user_args());
        }
        Ok(flags)
    }
}
