use std::env;
use std::path::PathBuf;

use log::{debug, warn};

use crate::error::SyncError;

pub const LOCAL_ARTIFACT_KEY: &str = "LOCAL_ARTIFACT_FILE";
pub const LOCAL_VERSION_KEY: &str = "LOCAL_VERSION_FILE";
const REMOTE_VERSION_KEY: &str = "REMOTE_VERSION_URL";
const REMOTE_ARTIFACT_KEY: &str = "REMOTE_ARTIFACT_URL";

const DEFAULT_VERSION_URL: &str =
    "https://git.blendos.co/api/v4/projects/32/jobs/artifacts/main/raw/version?job=build-job";
const DEFAULT_ARTIFACT_URL: &str =
    "https://git.blendos.co/api/v4/projects/32/jobs/artifacts/main/raw/blendOS.iso?job=build-job";

/// Everything a sync run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub artifact_path: PathBuf,
    pub version_path: PathBuf,
    pub version_url: String,
    pub artifact_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let artifact_path = value(LOCAL_ARTIFACT_KEY).ok_or(SyncError::MissingConfig {
            key: LOCAL_ARTIFACT_KEY,
        })?;
        let version_path = value(LOCAL_VERSION_KEY).ok_or(SyncError::MissingConfig {
            key: LOCAL_VERSION_KEY,
        })?;

        let config = Self {
            artifact_path: PathBuf::from(artifact_path),
            version_path: PathBuf::from(version_path),
            version_url: value(REMOTE_VERSION_KEY).unwrap_or_else(|| DEFAULT_VERSION_URL.into()),
            artifact_url: value(REMOTE_ARTIFACT_KEY)
                .unwrap_or_else(|| DEFAULT_ARTIFACT_URL.into()),
        };
        debug!(
            "config: artifact={} version={} version_url={} artifact_url={}",
            config.artifact_path.display(),
            config.version_path.display(),
            config.version_url,
            config.artifact_url
        );
        Ok(config)
    }
}

/// Load `.env` from the working directory when one exists. Call after the
/// logger is installed so a broken file is reported.
pub fn load_dotenv() {
    if let Some(problem) = dotenv_problem(dotenv::dotenv()) {
        warn!("config: {problem}");
    }
}

/// What to tell the user about a `.env` load result. A missing file is fine.
fn dotenv_problem(result: dotenv::Result<PathBuf>) -> Option<String> {
    match result {
        Ok(path) => {
            debug!("config: loaded {}", path.display());
            None
        }
        Err(dotenv::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => Some(format!("ignoring unreadable .env file ({err})")),
    }
}
