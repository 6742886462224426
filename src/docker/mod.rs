// Docker CLI wrapper: argument construction, process invocation, output parsing.

pub mod engine;
pub mod error;
pub mod runner;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;
pub mod types;

pub use engine::{Client, DEFAULT_RUNTIME, latest_image_name, user_args};
pub use error::{Error, Failure, Result};
pub use runner::{ProcessRunner, SystemRunner};
#[cfg(any(test, feature = "test-util"))]
pub use scripted::{Invocation, ScriptedRunner};
pub use types::{Operation, ProcessOutput};
