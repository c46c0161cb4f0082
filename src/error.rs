use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Every way a sync run can fail. All variants are terminal; the dispatcher in
/// `main` reports them and exits with status 1.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{key} is empty! Please specify this value in your .env file!")]
    MissingConfig { key: &'static str },

    #[error("{key} is not a path to a file! ({})", path.display())]
    NotAFile { key: &'static str, path: PathBuf },

    #[error(
        "Cannot write to {key} ({})! Please verify this user has write permissions.",
        path.display()
    )]
    NotWritable { key: &'static str, path: PathBuf },

    #[error(
        "Cannot create files next to {key} in {}! Please verify this user has write permissions.",
        dir.display()
    )]
    DirNotWritable { key: &'static str, dir: PathBuf },

    #[error("Do not run this tool as admin.")]
    Elevated,

    #[error("Connection to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Remote gave a {} response for {url}", status.as_u16())]
    HttpStatus { url: String, status: StatusCode },

    #[error("Download incomplete: received {received} of {expected} bytes")]
    Incomplete { received: u64, expected: u64 },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn network(url: &str, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.to_owned(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_show_numeric_code() {
        let err = SyncError::HttpStatus {
            url: "http://localhost/version".into(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "Remote gave a 404 response for http://localhost/version"
        );
    }

    #[test]
    fn config_errors_name_the_key() {
        let err = SyncError::MissingConfig {
            key: "LOCAL_VERSION_FILE",
        };
        assert!(err.to_string().starts_with("LOCAL_VERSION_FILE is empty!"));
    }

    #[test]
    fn io_errors_keep_context_and_source() {
        let err = SyncError::io(
            "unable to read version file",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "unable to read version file: gone");
        assert!(std::error::Error::source(&err).is_some());
    }
}
