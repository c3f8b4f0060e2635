//! Zip extraction.
//!
//! On Unix, file mode bits stored in the archive are applied to extracted
//! files. Elsewhere they are ignored.

use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::sanitize::sanitize_path;

#[derive(Clone, Debug, Default)]
pub struct ArchiveReport {
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ExtractedEntry>,
}

#[derive(Clone, Debug)]
pub struct ExtractedEntry {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub size: u64,
    pub is_directory: bool,
}

/// Extract the zip file at `archive` into `destination`.
pub fn extract_zip_file(archive: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<ArchiveReport> {
    let archive = archive.as_ref();
    let file = File::open(archive).map_err(|e| Error::ExtractionFailed {
        path: archive.to_path_buf(),
        source: e,
    })?;
    extract_zip(file, destination)
}

/// Extract every entry of a zip stream into `destination`.
///
/// Entry paths are sanitized before anything is written; the first invalid
/// entry aborts the extraction.
pub fn extract_zip<R: Read + Seek>(reader: R, destination: impl AsRef<Path>) -> Result<ArchiveReport> {
    let destination = destination.as_ref();
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut report = ArchiveReport::default();

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let original_path = PathBuf::from(file.name());
        let target_path = sanitize_path(&original_path, destination)?;
        let is_directory = file.is_dir();

        if is_directory {
            ensure_directory(&target_path)?;
        } else {
            if let Some(parent) = target_path.parent() {
                ensure_directory(parent)?;
            }
            write_file(&mut file, &target_path)?;
            apply_mode(&target_path, file.unix_mode())?;
        }

        let size = file.size();
        report.entry_count += 1;
        report.total_bytes += size;
        report.entries.push(ExtractedEntry {
            original_path,
            target_path,
            size,
            is_directory,
        });
    }

    tracing::debug!(
        entries = report.entry_count,
        bytes = report.total_bytes,
        destination = %destination.display(),
        "extracted archive"
    );
    Ok(report)
}

fn write_file(reader: &mut impl Read, target_path: &Path) -> Result<()> {
    let mut out = File::create(target_path).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;
    io::copy(reader, &mut out).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    match mode.map(|m| m & 0o777) {
        Some(m) if m != 0 => {
            fs::set_permissions(path, fs::Permissions::from_mode(m))?;
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
