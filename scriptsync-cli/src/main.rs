//! scriptsync — keep sibling copies of a script in step.
//!
//! # Usage
//!
//! ```text
//! scriptsync            # report the latest copy and the outdated ones
//! scriptsync --update   # overwrite outdated copies with the latest one
//! scriptsync --json     # machine-readable report
//! ```
//!
//! The search base and target file name come from `scriptsync.yaml` next to
//! the executable or from `SCRIPTSYNC_BASE_PATH` / `SCRIPTSYNC_TARGET_NAME`.

mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use scriptsync_core::{ScanError, SyncConfig};
use scriptsync_sync::{pipeline, SyncError, SyncMode};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "scriptsync",
    version,
    about = "Find the latest copy of a script across sibling directories and sync the rest",
    long_about = None,
)]
struct Cli {
    /// Copy the latest file over every outdated copy.
    #[arg(short, long)]
    update: bool,

    /// Emit the report as JSON.
    #[arg(long)]
    json: bool,

    /// Log discovery and version details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn run(self) -> Result<()> {
        let config = SyncConfig::load()?;
        let mode = if self.update {
            SyncMode::Update
        } else {
            SyncMode::Report
        };

        if self.json {
            let report = pipeline::run(&config, mode)?;
            output::print_json(&report)?;
        } else {
            // Lines go out as each copy is handled, so a failed run still
            // shows what was already written.
            pipeline::run_with(&config, mode, output::print_progress)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => return fail("IoError", &err.to_string()),
    };

    runtime.block_on(async move {
        tokio::select! {
            joined = tokio::task::spawn_blocking(move || cli.run()) => match joined {
                Ok(Ok(())) => ExitCode::SUCCESS,
                Ok(Err(err)) => fail(error_kind(&err), &err.to_string()),
                Err(err) => fail("JoinError", &err.to_string()),
            },
            Ok(()) = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted");
                // Copies already made stay made; nothing to clean up.
                std::process::exit(0)
            }
        }
    })
}

fn fail(kind: &str, message: &str) -> ExitCode {
    eprintln!("Error:{kind}: {message}");
    ExitCode::FAILURE
}

fn error_kind(err: &anyhow::Error) -> &'static str {
    if let Some(err) = err.downcast_ref::<SyncError>() {
        err.kind()
    } else if let Some(err) = err.downcast_ref::<ScanError>() {
        err.kind()
    } else if err.downcast_ref::<serde_json::Error>().is_some() {
        "JsonError"
    } else if err.downcast_ref::<std::io::Error>().is_some() {
        "IoError"
    } else {
        "Error"
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
