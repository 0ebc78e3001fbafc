//! Provisioning profile loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{AppError, ProvisionConfig};

/// Profile file looked up in the working directory when none is given.
pub const PROFILE_FILE: &str = "provision.toml";

/// Load the provisioning profile.
///
/// An explicit path must exist. Without one, `provision.toml` in `base_dir` is
/// used when present and the built-in defaults otherwise.
pub fn load_profile(explicit: Option<&Path>, base_dir: &Path) -> Result<ProvisionConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::config_error(format!(
                    "Profile not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let candidate = base_dir.join(PROFILE_FILE);
            if !candidate.exists() {
                debug!("no {} found, using built-in profile", PROFILE_FILE);
                return Ok(ProvisionConfig::default());
            }
            candidate
        }
    };

    debug!(path = %path.display(), "loading profile");
    let content = std::fs::read_to_string(&path)?;
    parse_profile_content(&content)
}

/// Parse and validate a profile from string content.
pub fn parse_profile_content(content: &str) -> Result<ProvisionConfig, AppError> {
    let config: ProvisionConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Render the built-in profile as TOML.
pub fn render_default_profile() -> Result<String, AppError> {
    toml::to_string_pretty(&ProvisionConfig::default())
        .map_err(|e| AppError::config_error(format!("Failed to render default profile: {}", e)))
}

/// Resolve where `init` writes a profile.
pub fn profile_target(path: Option<&Path>, base_dir: &Path) -> PathBuf {
    match path {
        Some(path) if path.is_dir() => path.join(PROFILE_FILE),
        Some(path) => path.to_path_buf(),
        None => base_dir.join(PROFILE_FILE),
    }
}
