use std::io;

use thiserror::Error;

use super::types::Operation;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by [`Client`](super::Client) operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The runtime could not be spawned or exited unsuccessfully. The
    /// failure is part of the message, not a separate source.
    #[error("{op}({target}) failed: {failure}")]
    Invocation {
        op: Operation,
        target: String,
        failure: Failure,
    },

    /// The runtime succeeded but printed something we could not interpret.
    #[error("{op}({target}) failed: cannot parse {output:?} as a boolean")]
    Parse {
        op: Operation,
        target: String,
        output: String,
    },

    /// An error from a nested operation, annotated with the caller's context.
    #[error("{op}({target}) failed")]
    Context {
        op: Operation,
        target: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// The operation that produced this error (the outermost one for
    /// [`Error::Context`]).
    pub fn operation(&self) -> Operation {
        match self {
            Error::Invocation { op, .. } | Error::Parse { op, .. } | Error::Context { op, .. } => {
                *op
            }
        }
    }

    /// Exit code of the failed process, looking through nested context.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::Invocation {
                failure: Failure::Exit { code, .. },
                ..
            } => *code,
            Error::Context { source, .. } => source.exit_code(),
            _ => None,
        }
    }
}

/// Why an invocation failed.
#[derive(Debug, Error)]
pub enum Failure {
    #[error("failed to invoke `{program}`: {error}")]
    Spawn { program: String, error: io::Error },

    #[error("{}{}", exit_status(.code), output_suffix(.output))]
    Exit { code: Option<i32>, output: String },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn output_suffix(output: &str) -> String {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(" : {trimmed}")
    }
}
