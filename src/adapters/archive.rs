//! Extraction of selected archive members into a directory.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::debug;

use crate::domain::{AppError, ArchiveFormat};

/// Write every regular-file member whose file name contains `filter` into
/// `target_dir` under its base name, replacing existing files.
///
/// Members with `..` or absolute paths are ignored. Two matching members with
/// the same base name are rejected. Returns the written paths. Fails with [`AppError::EmptyArchive`] when no
/// member matches.
pub fn extract_matching(
    bytes: &[u8],
    format: ArchiveFormat,
    filter: &str,
    target_dir: &Path,
) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(target_dir)?;

    let written = match format {
        ArchiveFormat::Zip => extract_zip(bytes, filter, target_dir)?,
        ArchiveFormat::TarGz => extract_tar_gz(bytes, filter, target_dir)?,
    };

    if written.is_empty() {
        return Err(AppError::EmptyArchive { filter: filter.to_string() });
    }
    Ok(written)
}

fn extract_zip(bytes: &[u8], filter: &str, target_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Archive(format!("Invalid zip archive: {}", e)))?;

    let mut written = Vec::new();
    let mut seen = HashSet::new();
    for index in 0..archive.len() {
        let mut member = archive
            .by_index(index)
            .map_err(|e| AppError::Archive(format!("Failed to read zip member {}: {}", index, e)))?;
        if !member.is_file() {
            continue;
        }
        let Some(name) = member.enclosed_name().and_then(|path| matching_name(&path, filter))
        else {
            continue;
        };
        claim(&mut seen, &name)?;
        written.push(write_member(&mut member, target_dir, &name)?);
    }
    Ok(written)
}

fn extract_tar_gz(bytes: &[u8], filter: &str, target_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut archive = tar::Archive::new(GzDecoder::new(Cursor::new(bytes)));
    let entries =
        archive.entries().map_err(|e| AppError::Archive(format!("Invalid tar.gz archive: {}", e)))?;

    let mut written = Vec::new();
    let mut seen = HashSet::new();
    for entry in entries {
        let mut entry =
            entry.map_err(|e| AppError::Archive(format!("Failed to read tar member: {}", e)))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry
            .path()
            .map_err(|e| AppError::Archive(format!("Invalid tar member path: {}", e)))?
            .into_owned();
        if !is_enclosed(&path) {
            debug!(path = %path.display(), "skipping unsafe tar member");
            continue;
        }
        let Some(name) = matching_name(&path, filter) else {
            continue;
        };
        claim(&mut seen, &name)?;
        written.push(write_member(&mut entry, target_dir, &name)?);
    }
    Ok(written)
}

fn matching_name(path: &Path, filter: &str) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.contains(filter).then(|| name.to_string())
}

/// Same rule `zip::read::ZipFile::enclosed_name` applies.
fn is_enclosed(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn claim(seen: &mut HashSet<String>, name: &str) -> Result<(), AppError> {
    if !seen.insert(name.to_string()) {
        return Err(AppError::Archive(format!(
            "Archive has more than one member named '{}'",
            name
        )));
    }
    Ok(())
}

fn write_member(reader: &mut impl Read, target_dir: &Path, name: &str) -> Result<PathBuf, AppError> {
    let destination = target_dir.join(name);
    let mut file = File::create(&destination)?;
    let bytes = io::copy(reader, &mut file)?;
    debug!(path = %destination.display(), bytes, "installed archive member");
    Ok(destination)
}
