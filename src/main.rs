use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dockwrap::config::{self, Config};
use dockwrap::docker::{self, Client};

/// Pull images and manage containers through the docker CLI.
#[derive(Debug, Parser)]
#[command(name = "dockwrap", version, about)]
struct Cli {
    /// Config file (defaults to ./.dockwrap.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every runtime invocation to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the image name with the `latest` tag
    Tag { repo: String },
    /// Pull an image
    Pull { image: String },
    /// Start a detached container and print its id
    Run {
        image: String,
        /// Extra `docker run` flags, after `--`
        #[arg(last = true)]
        flags: Vec<String>,
    },
    /// Stop a container
    Stop { container: String },
    /// List ids of all containers created from an image
    Ids {
        image: String,
        #[arg(long)]
        json: bool,
    },
    /// Force-remove all containers created from an image
    Rm { image: String },
    /// Print whether a container is running; exits 1 when it is not
    Running { container: String },
    /// Check that the runtime daemon is reachable
    Check,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = load_config(cli.config.as_deref())?;
    let client = Client::from_config(&cfg);

    let ok = run(&cli.command, &cfg, &client)?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,dockwrap=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    match explicit {
        Some(path) => config::load_file(path),
        None => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            config::load(&cwd)
        }
    }
}

/// Execute one subcommand. `Ok(false)` means "exit non-zero without an error".
fn run(command: &Command, cfg: &Config, client: &Client) -> Result<bool> {
    match command {
        Command::Tag { repo } => {
            println!("{}", docker::latest_image_name(repo));
        }
        Command::Pull { image } => {
            client.pull(image)?;
        }
        Command::Run { image, flags } => {
            let mut args = cfg.run_flags()?;
            args.extend(flags.iter().cloned());
            let id = client.run(image, args)?;
            if !id.is_empty() {
                println!("{id}");
            }
        }
        Command::Stop { container } => {
            client.stop(container)?;
        }
        Command::Ids { image, json } => {
            let ids = client.list_container_ids(image)?;
            if *json {
                println!("{}", serde_json::to_string(&ids)?);
            } else {
                for id in ids {
                    println!("{id}");
                }
            }
        }
        Command::Rm { image } => {
            client.remove_containers(image)?;
        }
        Command::Running { container } => {
            let running = client.is_running(container)?;
            println!("{running}");
            return Ok(running);
        }
        Command::Check => {
            let version = client
                .ensure_available()
                .with_context(|| format!("is `{}` installed and on PATH?", client.program()))?;
            println!("{} server {version}", client.program());
        }
    }
    Ok(true)
}
