use std::fs::OpenOptions;
use std::path::Path;

use log::debug;

use crate::env::{Config, LOCAL_ARTIFACT_KEY, LOCAL_VERSION_KEY};
use crate::error::SyncError;
use crate::storage::parent_dir;

/// True when the process runs as root.
#[cfg(unix)]
pub fn is_elevated() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// True when the process runs with an administrator token.
#[cfg(windows)]
pub fn is_elevated() -> bool {
    unsafe { windows_sys::Win32::UI::Shell::IsUserAnAdmin() != 0 }
}

#[cfg(not(any(unix, windows)))]
pub fn is_elevated() -> bool {
    false
}

/// Startup checks, run before any network activity. The first failing check
/// wins.
pub fn check(config: &Config, elevated: bool) -> Result<(), SyncError> {
    if elevated {
        return Err(SyncError::Elevated);
    }

    let files = [
        (LOCAL_ARTIFACT_KEY, config.artifact_path.as_path()),
        (LOCAL_VERSION_KEY, config.version_path.as_path()),
    ];

    for (key, path) in files {
        if !path.is_file() {
            return Err(SyncError::NotAFile {
                key,
                path: path.to_path_buf(),
            });
        }
    }

    for (key, path) in files {
        if !is_writable(path) {
            return Err(SyncError::NotWritable {
                key,
                path: path.to_path_buf(),
            });
        }
    }

    // Replacements are staged next to their target.
    for (key, path) in files {
        let dir = parent_dir(path);
        if tempfile::tempfile_in(dir).is_err() {
            return Err(SyncError::DirNotWritable {
                key,
                dir: dir.to_path_buf(),
            });
        }
    }

    debug!("preflight: all checks passed");
    Ok(())
}

fn is_writable(path: &Path) -> bool {
    OpenOptions::new().write(true).open(path).is_ok()
}
