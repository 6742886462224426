use std::io;
use std::process::{Command, Stdio};

use super::types::ProcessOutput;

/// Spawns the runtime executable and waits for it to exit.
///
/// [`Client`](super::Client) never touches `std::process` directly, so tests
/// can swap in a scripted runner and run without a container runtime.
pub trait ProcessRunner {
    /// Run `program` with `args` to completion, capturing stdout and stderr.
    ///
    /// An `Err` means the process could not be started at all. A process
    /// that started and exited non-zero is an `Ok` with that exit code.
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        (**self).run(program, args)
    }
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for Box<R> {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        (**self).run(program, args)
    }
}

/// Runs real processes via `std::process::Command`, blocking until exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_runner_reports_missing_executable() {
        let err = SystemRunner
            .run("dockwrap-definitely-not-installed", &[])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_output_and_exit_code() {
        let out = SystemRunner
            .run("sh", &["-c".into(), "echo hello; echo oops >&2; exit 3".into()])
            .unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout, "hello\n");
        assert_eq!(out.stderr, "oops\n");
    }
}
