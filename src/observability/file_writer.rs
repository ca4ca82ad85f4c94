//! Append-only line writer with size-based rotation.

use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the trace file grows past 10 MB.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the live one.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe line writer for trace export.
///
/// The file is opened lazily on the first write. Before each write the
/// current size is checked; an oversized file is renamed to
/// `<file name>.<UTC timestamp>` and the oldest backups beyond the retention
/// limit are removed.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    writer: Mutex<Option<fs::File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails when rotation, opening or writing the file fails, or when the
    /// lock was poisoned by a panicking writer.
    pub fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| std::io::Error::other(format!("trace writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        let mut file = match writer.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.file_path)?,
        };

        writeln!(file, "{line}")?;
        file.flush()?;
        *writer = Some(file);
        Ok(())
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate(&self) -> std::io::Result<()> {
        let suffix = Utc::now().format("%Y%m%dT%H%M%S%.9fZ");
        let mut backup = self.file_path.clone().into_os_string();
        backup.push(format!(".{suffix}"));

        fs::rename(&self.file_path, PathBuf::from(backup))?;
        self.prune_backups()
    }

    /// Backups of this file, newest first.
    pub fn backups(&self) -> std::io::Result<Vec<PathBuf>> {
        let parent = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
        let Some(file_name) = self.file_path.file_name().and_then(|n| n.to_str()) else {
            return Err(std::io::Error::other("trace file name is not valid UTF-8"));
        };
        let prefix = format!("{file_name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamp suffixes sort chronologically.
        backups.sort();
        backups.reverse();
        Ok(backups)
    }

    fn prune_backups(&self) -> std::io::Result<()> {
        for stale in self.backups()?.iter().skip(self.max_backups) {
            if let Err(e) = fs::remove_file(stale) {
                tracing::trace!(path = %stale.display(), error = %e, "failed to remove old trace file");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefinder-otlp.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line(r#"{"n":1}"#).unwrap();
        writer.write_line(r#"{"n":2}"#).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"n\":1}\n{\"n\":2}\n");
        assert!(writer.backups().unwrap().is_empty());
    }

    #[test]
    fn rotates_and_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefinder-otlp.json");
        let writer = FileWriter::with_limits(path.clone(), 10, 1);

        for n in 0..4 {
            writer.write_line(&format!("line number {n}")).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line number 3\n");
        let backups = writer.backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "line number 2\n");
    }
}
