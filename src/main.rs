use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::debug;

mod engine;
mod env;
mod error;
mod networking;
mod preflight;
mod storage;
mod ui;
mod updater;
mod util;

#[cfg(test)]
mod test_support;

use crate::engine::{RunOutcome, SyncEngine};
use crate::error::SyncError;

#[derive(Parser, Debug)]
#[command(
    name = "artifact-sync",
    version,
    about = "Download a published artifact again whenever its remote version marker changes",
    long_about = "Reads LOCAL_ARTIFACT_FILE and LOCAL_VERSION_FILE from the environment \
                  (or a .env file), compares the remote version marker with the local one \
                  and replaces the local artifact when they differ."
)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let _ = Cli::parse();
    env::load_dotenv();

    report(run().await)
}

/// Print the final status line and pick the exit code.
fn report(result: Result<RunOutcome, SyncError>) -> ExitCode {
    match result {
        Ok(RunOutcome::UpToDate) => {
            ui::info("Version files match, artifact is up to date.");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Updated { version, download }) => {
            ui::success(format!(
                "Artifact download success! (version {}, {} bytes, {})",
                version.trim(),
                download.bytes,
                download.speed_text()
            ));
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!("run failed: {err:?}");
            ui::error(&err);
            ui::critical();
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<RunOutcome, SyncError> {
    let config = env::Config::from_env()?;
    SyncEngine::new(config).run().await
}
