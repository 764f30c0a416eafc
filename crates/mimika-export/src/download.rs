//! Timestamped download filenames, unique within a session.

use std::io;
use std::path::{Path, PathBuf};

/// A finished export ready to hand to the embedding shell's file-save
/// surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    /// e.g. `avatar-performance-20260807-153000.avi`.
    pub filename: String,
    /// Complete container bytes.
    pub bytes: Vec<u8>,
}

impl DownloadArtifact {
    /// Writes the artifact into `dir` under its own filename and returns
    /// the full path.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Builds download filenames, disambiguating repeats of the same
/// timestamp so back-to-back exports never collide.
#[derive(Debug, Default)]
pub struct FilenameSeries {
    last_stamp: Option<String>,
    seq: u32,
}

impl FilenameSeries {
    /// Next unique filename for the given timestamp string.
    pub fn next(&mut self, stamp: &str, extension: &str) -> String {
        if self.last_stamp.as_deref() == Some(stamp) {
            self.seq += 1;
            format!("avatar-performance-{}-{}.{}", stamp, self.seq, extension)
        } else {
            self.last_stamp = Some(stamp.to_string());
            self.seq = 0;
            format!("avatar-performance-{}.{}", stamp, extension)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_stamps_plain_names() {
        let mut series = FilenameSeries::default();
        assert_eq!(
            series.next("20260807-120000", "avi"),
            "avatar-performance-20260807-120000.avi"
        );
        assert_eq!(
            series.next("20260807-120001", "avi"),
            "avatar-performance-20260807-120001.avi"
        );
    }

    #[test]
    fn test_repeated_stamp_gets_sequence() {
        let mut series = FilenameSeries::default();
        let a = series.next("20260807-120000", "avi");
        let b = series.next("20260807-120000", "avi");
        let c = series.next("20260807-120000", "avi");
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(b.ends_with("-1.avi"));
        assert!(c.ends_with("-2.avi"));
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = DownloadArtifact {
            filename: "avatar-performance-test.avi".into(),
            bytes: vec![1, 2, 3, 4],
        };
        let path = artifact.write_to(dir.path()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3, 4]);
    }
}
