use std::fmt;

/// Result of a finished runtime process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Successful exit with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Exit with `code` and the given stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len());
        out.push_str(&self.stdout);
        out.push_str(&self.stderr);
        out
    }
}

/// The client operation an invocation belongs to. Displays as the label
/// used in error context, e.g. `pullImage(nginx) failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Pull,
    Run,
    Stop,
    ListContainerIds,
    RemoveContainers,
    Inspect,
    Version,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Pull => "pullImage",
            Operation::Run => "run",
            Operation::Stop => "stop",
            Operation::ListContainerIds => "getContainerIds",
            Operation::RemoveContainers => "removeContainers",
            Operation::Inspect => "inspect",
            Operation::Version => "version",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
