//! Cache directory lookup and log rotation for the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "checklist";
const APPLICATION: &str = "checklist";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs are written.
///
/// - Linux: `$XDG_CACHE_HOME/checklist` or `~/.cache/checklist`
/// - macOS: `~/Library/Caches/dev.checklist.checklist`
/// - Windows: `C:\Users\<User>\AppData\Local\checklist\checklist\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Name of the log file written by the current run.
const LATEST_LOG: &str = "latest.log";

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Move the previous run's log aside and prune archives in `dir`.
///
/// Must run before the new `latest.log` is opened.
pub fn rotate_logs(dir: &Path) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, dir.join(format!("{stamp}.log")));
    }
    prune_archives(dir, MAX_OLD_LOGS);
}

fn is_archive(name: &str) -> bool {
    name.ends_with(".log") && name != LATEST_LOG
}

/// Delete archived logs beyond `keep`, by modification time.
fn prune_archives(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archives: Vec<_> = entries
        .filter_map(Result::ok)
        .filter(|entry| is_archive(&entry.file_name().to_string_lossy()))
        .collect();
    archives.sort_by_key(|entry| entry.metadata().and_then(|m| m.modified()).ok());

    let excess = archives.len().saturating_sub(keep);
    for entry in &archives[..excess] {
        let _ = fs::remove_file(entry.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_archive() {
        assert!(is_archive("20260101_120000.log"));
        assert!(!is_archive(LATEST_LOG));
        assert!(!is_archive("notes.txt"));
    }

    #[test]
    fn test_rotate_archives_latest_and_prunes() {
        let dir = std::env::temp_dir().join(format!("checklist-logs-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        for i in 0..3 {
            fs::write(dir.join(format!("old{i}.log")), "").unwrap();
        }
        fs::write(dir.join(LATEST_LOG), "previous run").unwrap();

        rotate_logs(&dir);
        assert!(!dir.join(LATEST_LOG).exists());

        prune_archives(&dir, 2);
        let remaining = fs::read_dir(&dir).unwrap().count();
        assert_eq!(remaining, 2);

        fs::remove_dir_all(&dir).unwrap();
    }
}
