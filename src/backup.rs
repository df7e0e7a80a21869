//! Rotating copies of the data file taken before it is changed.

use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::ffi::OsStr;
use std::path::PathBuf;
use tracing::debug;

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
    data_path: PathBuf,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
            data_path: config.data_path(),
        }
    }

    /// Copies the data file to the backups directory.
    ///
    /// The filename format is `{data file name}.YYYY-MM-DD-NNN` where NNN is a sequence number.
    /// Automatically rotates old backups, keeping only `backup_copies` files.
    ///
    /// Returns the path to the created backup file, or `None` if there is no data file yet.
    pub fn copy_data_file(&self) -> Result<Option<PathBuf>> {
        if !self.data_path.is_file() {
            debug!("No data file to back up at {}", self.data_path.display());
            return Ok(None);
        }
        let prefix = self.prefix();
        let date = today();
        let seq = self.next_sequence_number(&prefix, &date)?;
        let path = self.backups_dir.join(format!("{prefix}.{date}-{seq:03}"));

        utils::copy(&self.data_path, &path)?;
        debug!("Backed up the data file to {}", path.display());

        self.rotate(&prefix)?;
        Ok(Some(path))
    }

    fn prefix(&self) -> String {
        self.data_path
            .file_name()
            .unwrap_or(OsStr::new("data.json"))
            .to_string_lossy()
            .to_string()
    }

    /// Names of the files in the backups directory.
    fn file_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in utils::read_dir(&self.backups_dir)? {
            let entry = entry.context("Failed to read directory entry")?;
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let max_seq = self
            .file_names()?
            .iter()
            .filter_map(|name| parse_sequence_number(name, prefix, date))
            .max()
            .unwrap_or(0);
        Ok(max_seq + 1)
    }

    /// Deletes the oldest backups with the given prefix until only `backup_copies` remain.
    fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<String> = self
            .file_names()?
            .into_iter()
            .filter(|name| is_backup_file(name, prefix))
            .collect();

        // the name format sorts by date and then sequence number
        files.sort();

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for name in files.into_iter().take(to_delete) {
            let path = self.backups_dir.join(name);
            utils::remove(&path)?;
            debug!("Removed old backup {}", path.display());
        }
        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format(crate::model::DATE_FORMAT).to_string()
}

/// Parses the sequence number from a backup filename of the form `{prefix}.{date}-{NNN}`.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    let seq = filename.strip_prefix(&format!("{prefix}.{date}-"))?;
    if seq.is_empty() || !seq.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    seq.parse().ok()
}

/// Checks if a filename is a backup of the file named `prefix`.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    let Some(stamp) = filename.strip_prefix(&format!("{prefix}.")) else {
        return false;
    };
    // YYYY-MM-DD-NNN
    match stamp.rsplit_once('-') {
        Some((date, seq)) => {
            crate::model::parse_date(date).is_ok()
                && !seq.is_empty()
                && seq.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{capture_logs, TestEnv};

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number("data.json.2025-12-14-001", "data.json", "2025-12-14"),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number("data.json.2025-12-14-042", "data.json", "2025-12-14"),
            Some(42)
        );
        // Wrong prefix
        assert_eq!(
            parse_sequence_number("other.json.2025-12-14-001", "data.json", "2025-12-14"),
            None
        );
        // Wrong date
        assert_eq!(
            parse_sequence_number("data.json.2025-12-13-001", "data.json", "2025-12-14"),
            None
        );
        // Temp file left behind by a save
        assert_eq!(
            parse_sequence_number("data.json.2025-12-14-001.tmp", "data.json", "2025-12-14"),
            None
        );
    }

    #[test]
    fn test_is_backup_file() {
        assert!(is_backup_file("data.json.2025-12-14-001", "data.json"));
        assert!(is_backup_file("money.json.2025-01-01-120", "money.json"));
        assert!(!is_backup_file("data.json.2025-12-14-001", "money.json"));
        assert!(!is_backup_file("data.json.tmp", "data.json"));
        assert!(!is_backup_file("data.json", "data.json"));
    }

    #[test]
    fn test_skipping_stray_files_logs_no_warnings() {
        let logs = capture_logs(|| {
            assert!(!is_backup_file("data.json.junk-001", "data.json"));
            assert!(!is_backup_file("data.json.2025-13-40-001", "data.json"));
        });
        assert!(!logs.contains("WARN"));
    }

    #[test]
    fn test_no_data_file_no_backup() {
        let env = TestEnv::new();
        let backup = env.config().backup();
        assert!(backup.copy_data_file().unwrap().is_none());
        assert!(backup.file_names().unwrap().is_empty());
    }

    #[test]
    fn test_copy_and_rotate() {
        let env = TestEnv::new();
        let config = env.config();
        utils::write(config.data_path(), "{}\n").unwrap();
        let backup = config.backup();

        let first = backup.copy_data_file().unwrap().unwrap();
        assert!(first.to_string_lossy().ends_with("-001"));
        assert_eq!(utils::read(&first).unwrap(), "{}\n");

        for _ in 0..(config.backup_copies() + 2) {
            backup.copy_data_file().unwrap();
        }
        let mut names = backup.file_names().unwrap();
        names.sort();
        assert_eq!(names.len(), config.backup_copies() as usize);
        // the oldest were removed and the newest kept
        let last = config.backup_copies() + 3;
        assert!(names.last().unwrap().ends_with(&format!("-{last:03}")));
        assert!(!names.iter().any(|n| n.ends_with("-001")));
    }
}
