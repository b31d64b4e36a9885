use crate::types::ExportFormat;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const MAX_NAME_ATTEMPTS: u32 = 100;

/// `outgoing-messages-<timestamp>[-<n>].<ext>`; `attempt` 0 has no suffix
pub fn export_file_name(format: ExportFormat, at: DateTime<Local>, attempt: u32) -> String {
    let stamp = at.format("%Y%m%d-%H%M%S");
    match attempt {
        0 => format!("outgoing-messages-{stamp}.{}", format.as_str()),
        n => format!("outgoing-messages-{stamp}-{n}.{}", format.as_str()),
    }
}

/// Write an exported file into `dir`, creating the directory if needed
pub fn save_export(dir: &Path, format: ExportFormat, bytes: &[u8]) -> Result<PathBuf> {
    save_export_at(dir, format, Local::now(), bytes)
}

/// Never overwrites: a name that is taken gets the next numeric suffix
fn save_export_at(
    dir: &Path,
    format: ExportFormat,
    at: DateTime<Local>,
    bytes: &[u8],
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("could not create export directory {}", dir.display()))?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(export_file_name(format, at, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(bytes)
                    .with_context(|| format!("could not write {}", path.display()))?;
                return Ok(path);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
            Err(err) => {
                return Err(err).with_context(|| format!("could not create {}", path.display()));
            }
        }
    }

    bail!("no free export file name in {}", dir.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_name() {
        let at = Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(
            export_file_name(ExportFormat::Csv, at, 0),
            "outgoing-messages-20240506-070809.csv"
        );
        assert_eq!(
            export_file_name(ExportFormat::Pdf, at, 2),
            "outgoing-messages-20240506-070809-2.pdf"
        );
    }

    #[test]
    fn test_save_export_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports");
        let path = save_export(&nested, ExportFormat::Csv, b"id\n1\n").unwrap();

        assert!(path.starts_with(&nested));
        assert_eq!(fs::read(&path).unwrap(), b"id\n1\n");
    }

    #[test]
    fn test_same_second_exports_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let at = Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();

        let first = save_export_at(dir.path(), ExportFormat::Csv, at, b"first").unwrap();
        let second = save_export_at(dir.path(), ExportFormat::Csv, at, b"second").unwrap();

        assert_ne!(first, second);
        assert!(second.ends_with("outgoing-messages-20240506-070809-1.csv"));
        assert_eq!(fs::read(&first).unwrap(), b"first");
        assert_eq!(fs::read(&second).unwrap(), b"second");
    }
}
