use tracing::{debug, warn};

use crate::config::Config;

use super::error::{Error, Failure, Result};
use super::runner::{ProcessRunner, SystemRunner};
use super::types::{Operation, ProcessOutput};

/// Default executable used when none is configured.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Go-template passed to `inspect -f`. The surrounding single quotes reach
/// the runtime verbatim and are stripped again when parsing the output.
const RUNNING_FORMAT: &str = "'{{.State.Running}}'";

/// Exit status of `rm --force` that is not treated as a failure: Docker
/// reports it when a listed container is already gone, or when no
/// containers were given at all.
const ACCEPTABLE_RM_EXIT: i32 = 1;

/// Append the `latest` tag to a repository name.
pub fn latest_image_name(repo_name: &str) -> String {
    format!("{repo_name}:latest")
}

/// Returns `["--user", "uid:gid"]` on Unix so containers write files
/// as the invoking user. Empty on other platforms.
pub fn user_args() -> Vec<String> {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() and getegid() are simple POSIX getters that always succeed and have no side effects.
        let uid = unsafe { libc::geteuid() };
        let gid = unsafe { libc::getegid() };
        vec!["--user".into(), format!("{uid}:{gid}")]
    }

    #[cfg(not(unix))]
    {
        Vec::new()
    }
}

/// Synchronous client for a Docker-compatible CLI.
///
/// Every method spawns exactly one runtime process (two for
/// [`remove_containers`](Self::remove_containers)) and blocks until it exits.
/// Nothing is cached and nothing is retried.
#[derive(Debug, Clone)]
pub struct Client<R = SystemRunner> {
    program: String,
    runner: R,
}

impl Client<SystemRunner> {
    /// Client for `docker` on `PATH`.
    pub fn new() -> Self {
        Self::with_runner(DEFAULT_RUNTIME, SystemRunner)
    }

    /// Client for the executable named in `cfg.runtime`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::with_runner(cfg.runtime.clone(), SystemRunner)
    }
}

impl Default for Client<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> Client<R> {
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// The executable this client invokes.
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// `pull <image>`
    pub fn pull(&self, image: &str) -> Result<()> {
        self.invoke(Operation::Pull, image, vec!["pull".into(), image.into()])?;
        Ok(())
    }

    /// `run -d [extra_args...] <image>`
    ///
    /// Returns the container id the runtime prints.
    pub fn run<I, S>(&self, image: &str, extra_args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: Vec<String> = vec!["run".into(), "-d".into()];
        args.extend(extra_args.into_iter().map(Into::into));
        args.push(image.into());

        let output = self.invoke(Operation::Run, image, args)?;
        Ok(output.stdout.trim().to_string())
    }

    /// `stop <container>`
    pub fn stop(&self, container: &str) -> Result<()> {
        self.invoke(
            Operation::Stop,
            container,
            vec!["stop".into(), container.into()],
        )?;
        Ok(())
    }

    /// Ids of every container (running or not) created from `image`.
    pub fn list_container_ids(&self, image: &str) -> Result<Vec<String>> {
        let args = vec![
            "ps".into(),
            "-a".into(),
            "-q".into(),
            "--filter".into(),
            format!("ancestor={image}"),
        ];
        let output = self.invoke(Operation::ListContainerIds, image, args)?;
        Ok(parse_container_ids(&output.stdout))
    }

    /// Force-remove every container created from `image` with a single
    /// `rm ... --force`.
    pub fn remove_containers(&self, image: &str) -> Result<()> {
        let ids = self
            .list_container_ids(image)
            .map_err(|source| Error::Context {
                op: Operation::RemoveContainers,
                target: image.to_string(),
                source: Box::new(source),
            })?;

        let nothing_to_remove = ids.is_empty();
        if nothing_to_remove {
            debug!(image, "no containers to remove");
        }

        let mut args: Vec<String> = Vec::with_capacity(ids.len() + 2);
        args.push("rm".into());
        args.extend(ids);
        args.push("--force".into());

        match self.invoke(Operation::RemoveContainers, image, args) {
            Ok(_) => Ok(()),
            Err(err) if err.exit_code() == Some(ACCEPTABLE_RM_EXIT) => {
                if nothing_to_remove {
                    debug!(image, error = %err, "ignoring rm exit status");
                } else {
                    warn!(image, error = %err, "ignoring rm exit status");
                }
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Whether `container` is currently running, per `inspect`.
    pub fn is_running(&self, container: &str) -> Result<bool> {
        let args = vec![
            "inspect".into(),
            "-f".into(),
            RUNNING_FORMAT.into(),
            container.into(),
        ];
        let output = self.invoke(Operation::Inspect, container, args)?;
        parse_running(&output.stdout).ok_or_else(|| Error::Parse {
            op: Operation::Inspect,
            target: container.to_string(),
            output: output.stdout,
        })
    }

    /// Verify the runtime daemon is reachable; returns its server version.
    pub fn ensure_available(&self) -> Result<String> {
        let args = vec![
            "version".into(),
            "--format".into(),
            "{{.Server.Version}}".into(),
        ];
        let output = self.invoke(Operation::Version, &self.program, args)?;
        Ok(output.stdout.trim().to_string())
    }

    fn invoke(&self, op: Operation, target: &str, args: Vec<String>) -> Result<ProcessOutput> {
        debug!(program = %self.program, ?args, %op, "invoking container runtime");

        let output = self
            .runner
            .run(&self.program, &args)
            .map_err(|error| Error::Invocation {
                op,
                target: target.to_string(),
                failure: Failure::Spawn {
                    program: self.program.clone(),
                    error,
                },
            })?;

        debug!(%op, code = ?output.code, "container runtime exited");

        if output.success() {
            return Ok(output);
        }

        Err(Error::Invocation {
            op,
            target: target.to_string(),
            failure: Failure::Exit {
                code: output.code,
                output: output.combined(),
            },
        })
    }
}

/// Split `ps -q` output into ids. Blank output means no containers.
fn parse_container_ids(output: &str) -> Vec<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().map(|line| line.trim().to_string()).collect()
}

/// Parse `inspect` output such as `'true'\n`.
fn parse_running(output: &str) -> Option<bool> {
    parse_bool(output.trim().trim_matches('\''))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
