use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use upscrot::{CaptureError, Config, PipelineDependencies, Resolved, capture};

/// Exit status after writing the first-run config template.
const BOOTSTRAP_EXIT: u8 = 1;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("UPSCROT_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "upscrot")]
#[command(
    version = VERSION,
    about = "Take a screenshot of a screen region and upload it to your server"
)]
struct Cli {
    /// Use this config file instead of ~/.config/upscrot/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log every step to stderr (overridden by RUST_LOG)
    #[arg(long, short = 'v', action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(Resolved::Loaded(config)) => config,
        Ok(Resolved::Bootstrapped(path)) => {
            println!("Created initial config file.");
            println!(
                "Please edit '{}' and then run upscrot again.",
                path.display()
            );
            return ExitCode::from(BOOTSTRAP_EXIT);
        }
        Err(err) => return fail(CaptureError::Config(err)),
    };

    let dependencies = PipelineDependencies::default();
    let mut stdout = io::stdout().lock();
    match capture::run(&config, &dependencies, &mut stdout) {
        Ok(outcome) => {
            if outcome.url.is_none() {
                log::info!(
                    "Upload not configured; screenshot kept at {}",
                    outcome.record.path.display()
                );
            }
        }
        Err(err) => return fail(err),
    }

    close_stderr();
    ExitCode::SUCCESS
}

fn fail(err: CaptureError) -> ExitCode {
    log::debug!("Aborting: {:?}", err);
    eprintln!("upscrot: {}", err);
    ExitCode::from(err.exit_code())
}

/// Release fd 2 once the run has finished successfully.
#[cfg(unix)]
fn close_stderr() {
    // SAFETY: nothing writes to stderr after this point; a failing close is harmless.
    unsafe {
        libc::close(libc::STDERR_FILENO);
    }
}

#[cfg(not(unix))]
fn close_stderr() {}
