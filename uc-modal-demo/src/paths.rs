//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "uc";
const APPLICATION: &str = "uc-modal-demo";

const LATEST_LOG: &str = "latest.log";

/// Used when no home directory can be determined.
pub const FALLBACK_LOG: &str = "uc-modal-demo.log";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Cache directory, where logs go.
///
/// - Linux: `$XDG_CACHE_HOME/uc-modal-demo` or `~/.cache/uc-modal-demo`
/// - macOS: `~/Library/Caches/dev.uc.uc-modal-demo`
/// - Windows: `C:\Users\<User>\AppData\Local\uc\uc-modal-demo\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path of the log file for this run, creating the cache directory if needed.
pub fn log_file() -> PathBuf {
    let cache = cache_dir().filter(|dir| fs::create_dir_all(dir).is_ok());
    log_path(cache.as_deref())
}

fn log_path(cache: Option<&Path>) -> PathBuf {
    cache.map_or_else(|| PathBuf::from(FALLBACK_LOG), |dir| dir.join(LATEST_LOG))
}

/// Archive the previous run's log under a timestamp and prune old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    let latest = cache.join(LATEST_LOG);

    if latest.exists() {
        let archived = cache.join(archive_name(chrono::Local::now()));
        let _ = fs::rename(&latest, &archived);
    }

    cleanup_old_logs(&cache);
}

fn archive_name(at: chrono::DateTime<chrono::Local>) -> String {
    format!("{}.log", at.format("%Y%m%d_%H%M%S"))
}

fn cleanup_old_logs(cache: &Path) {
    let Ok(entries) = fs::read_dir(cache) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first.
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    let excess = logs.len().saturating_sub(MAX_OLD_LOGS);
    for entry in logs.iter().take(excess) {
        let _ = fs::remove_file(entry.path());
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_archive_name_is_sortable_timestamp() {
        let at = chrono::Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .unwrap();
        assert_eq!(archive_name(at), "20240309_140507.log");
    }

    #[test]
    fn test_log_path_in_cache_dir() {
        let cache = Path::new("/var/cache/uc-modal-demo");
        assert_eq!(log_path(Some(cache)), cache.join("latest.log"));
    }

    #[test]
    fn test_log_path_falls_back_without_cache_dir() {
        assert_eq!(log_path(None), PathBuf::from("uc-modal-demo.log"));
    }
}
