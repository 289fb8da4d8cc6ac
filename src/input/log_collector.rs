use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from log file acquisition
#[derive(Error, Debug)]
pub enum InputError {
    #[error("log file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads a whole log file as an ordered sequence of raw lines.
///
/// The scanner works over history, so the file is read from the start in
/// one pass; nothing downstream depends on how the lines were acquired.
pub struct LogCollector {
    file_path: PathBuf,
}

impl LogCollector {
    /// Create a new log collector
    pub fn new(file_path: PathBuf) -> Self {
        LogCollector { file_path }
    }

    /// Read every line of the file, preserving order.
    pub fn collect_lines(&self) -> Result<Vec<String>, InputError> {
        if !self.file_path.exists() {
            return Err(InputError::NotFound(self.file_path.clone()));
        }

        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);

        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }

        Ok(lines)
    }

    /// Check if the file exists and is readable
    pub fn is_valid(&self) -> bool {
        self.file_path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_collect_lines_preserves_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first line").unwrap();
        writeln!(file, "second line").unwrap();
        writeln!(file, "third line").unwrap();

        let collector = LogCollector::new(file.path().to_path_buf());
        let lines = collector.collect_lines().unwrap();

        assert_eq!(lines, vec!["first line", "second line", "third line"]);
    }

    #[test]
    fn test_collect_lines_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let collector = LogCollector::new(file.path().to_path_buf());
        assert!(collector.collect_lines().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let collector = LogCollector::new(PathBuf::from("/nonexistent/auth.log"));

        assert!(!collector.is_valid());
        assert!(matches!(
            collector.collect_lines(),
            Err(InputError::NotFound(_))
        ));
    }
}
