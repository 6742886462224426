use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use super::runner::ProcessRunner;
use super::types::ProcessOutput;

/// One recorded call to a [`ScriptedRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug)]
enum Response {
    Output(ProcessOutput),
    SpawnError(io::ErrorKind),
}

/// Test double that replays queued responses in order and records every
/// invocation it receives.
///
/// Running out of responses is reported as a spawn error so a test that
/// triggers an unexpected extra invocation fails loudly.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Response>>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a completed process.
    pub fn respond(self, output: ProcessOutput) -> Self {
        self.push(Response::Output(output));
        self
    }

    /// Queue a successful exit printing `stdout`.
    pub fn respond_ok(self, stdout: &str) -> Self {
        self.respond(ProcessOutput::ok(stdout))
    }

    /// Queue an exit with `code`, printing `stderr`.
    pub fn respond_exit(self, code: i32, stderr: &str) -> Self {
        self.respond(ProcessOutput::failed(code, stderr))
    }

    /// Queue a failure to start the process.
    pub fn respond_spawn_error(self, kind: io::ErrorKind) -> Self {
        self.push(Response::SpawnError(kind));
        self
    }

    /// Every invocation seen so far, oldest first.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Argument lists of every invocation, oldest first.
    pub fn call_args(&self) -> Vec<Vec<String>> {
        self.calls().into_iter().map(|c| c.args).collect()
    }

    /// Number of responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn push(&self, response: Response) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Invocation {
                program: program.to_string(),
                args: args.to_vec(),
            });
        }

        let next = self
            .responses
            .lock()
            .map_err(|_| io::Error::other("scripted runner lock poisoned"))?
            .pop_front();

        match next {
            Some(Response::Output(output)) => Ok(output),
            Some(Response::SpawnError(kind)) => {
                Err(io::Error::new(kind, format!("cannot spawn `{program}`")))
            }
            None => Err(io::Error::other(format!(
                "no scripted response for `{program} {}`",
                args.join(" ")
            ))),
        }
    }
}
