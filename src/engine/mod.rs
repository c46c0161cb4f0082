use log::info;

use crate::env::Config;
use crate::error::SyncError;
use crate::networking::NetworkClient;
use crate::preflight;
use crate::ui;
use crate::updater::{self, DownloadReport, SyncOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    UpToDate,
    Updated {
        version: String,
        download: DownloadReport,
    },
}

/// Runs the whole pipeline: preflight, version sync, then the artifact
/// download when the version changed.
pub struct SyncEngine {
    config: Config,
    networking: NetworkClient,
    elevated: fn() -> bool,
}

impl SyncEngine {
    pub fn new(config: Config) -> Self {
        Self::with_privilege_probe(config, preflight::is_elevated)
    }

    fn with_privilege_probe(config: Config, elevated: fn() -> bool) -> Self {
        Self {
            config,
            networking: NetworkClient::new(),
            elevated,
        }
    }

    pub async fn run(&self) -> Result<RunOutcome, SyncError> {
        preflight::check(&self.config, (self.elevated)())?;

        match updater::sync_version(&self.networking, &self.config).await? {
            SyncOutcome::UpToDate => {
                info!("engine: nothing to download");
                Ok(RunOutcome::UpToDate)
            }
            SyncOutcome::Updated { previous, current } => {
                info!(
                    "engine: version changed from {:?} to {:?}",
                    previous.trim(),
                    current.trim()
                );
                ui::info("Version file is out of date! Updated to the latest marker.");
                let download = updater::download_artifact(&self.networking, &self.config).await?;
                Ok(RunOutcome::Updated {
                    version: current,
                    download,
                })
            }
        }
    }
}
