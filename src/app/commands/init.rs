//! Write the built-in provisioning profile to disk.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{AppError, render_default_profile};

/// Write the default profile to `target`.
///
/// An existing file is only replaced when `force` is set.
pub fn execute(target: &Path, force: bool) -> Result<PathBuf, AppError> {
    if target.exists() && !force {
        return Err(AppError::ProfileExists(target.to_path_buf()));
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let content = render_default_profile()?;
    std::fs::write(target, content)?;
    info!(path = %target.display(), "profile written");
    Ok(target.to_path_buf())
}
