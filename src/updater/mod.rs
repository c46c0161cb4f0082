use std::time::{Duration, Instant};

use log::{debug, info};

use crate::env::Config;
use crate::error::SyncError;
use crate::networking::NetworkClient;
use crate::storage;
use crate::ui::progress::TransferBar;
use crate::util::{average_speed, file_label, format_speed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    UpToDate,
    Updated { previous: String, current: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub bytes: u64,
    pub elapsed: Duration,
}

impl DownloadReport {
    pub fn speed_text(&self) -> String {
        format_speed(average_speed(self.bytes, self.elapsed))
    }
}

/// Compare the remote version marker with the local one and, when they
/// differ, overwrite the local marker with the remote text.
///
/// # Errors
/// Network and status failures, or I/O on the local marker. The local file is
/// untouched on every error path before the write.
pub async fn sync_version(
    networking: &NetworkClient,
    config: &Config,
) -> Result<SyncOutcome, SyncError> {
    info!("sync: checking {}", config.version_url);
    let remote = networking.fetch_text(&config.version_url).await?;
    let local = storage::read_local_version(&config.version_path).await?;

    if remote == local {
        debug!("sync: markers match ({} bytes)", remote.len());
        return Ok(SyncOutcome::UpToDate);
    }

    storage::write_local_version(&config.version_path, &remote).await?;
    info!("sync: version file updated");
    Ok(SyncOutcome::Updated {
        previous: local,
        current: remote,
    })
}

/// Download the artifact over the local copy, showing a progress bar.
pub async fn download_artifact(
    networking: &NetworkClient,
    config: &Config,
) -> Result<DownloadReport, SyncError> {
    info!(
        "download: {} -> {}",
        config.artifact_url,
        config.artifact_path.display()
    );
    let started = Instant::now();
    let mut bar = TransferBar::new(file_label(&config.artifact_path));

    let result = networking
        .download_to_path(&config.artifact_url, &config.artifact_path, |done, total| {
            bar.update(done, total)
        })
        .await;

    match result {
        Ok(bytes) => {
            bar.finish();
            Ok(DownloadReport {
                bytes,
                elapsed: started.elapsed(),
            })
        }
        Err(err) => {
            bar.abandon();
            Err(err)
        }
    }
}
