//! Optional binary extension installation.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::adapters::archive;
use crate::domain::extension::select_artifact;
use crate::domain::{AppError, ExtensionConfig};
use crate::ports::ArtifactFetcher;

/// How the install was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionMode {
    /// Part of a full provisioning run; honors `enabled` and `required`.
    Sequenced { skip: bool },
    /// Asked for directly; always attempts the install.
    Explicit,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum ExtensionOutcome {
    Installed { files: Vec<PathBuf> },
    Skipped { reason: String },
}

/// Why a sequenced run would not install the extension, if it would not.
pub fn skip_reason(config: &ExtensionConfig, skip_requested: bool) -> Option<String> {
    if !config.enabled {
        return Some("extension disabled in profile".to_string());
    }
    if skip_requested {
        return Some("skipped on request".to_string());
    }
    let arch = config.target_arch();
    if !config.required && select_artifact(&config.matrix, arch, &config.interpreter).is_none() {
        return Some(format!("no artifact for {}/{}", arch, config.interpreter));
    }
    None
}

/// Download, verify and unpack the extension matching this host.
pub fn install(
    fetcher: &impl ArtifactFetcher,
    config: &ExtensionConfig,
    mode: ExtensionMode,
) -> Result<ExtensionOutcome, AppError> {
    if let ExtensionMode::Sequenced { skip } = mode
        && let Some(reason) = skip_reason(config, skip)
    {
        return Ok(ExtensionOutcome::Skipped { reason });
    }

    let arch = config.target_arch();
    let Some(artifact) = select_artifact(&config.matrix, arch, &config.interpreter) else {
        return Err(AppError::UnsupportedPlatform {
            arch: arch.to_string(),
            interpreter: config.interpreter.clone(),
        });
    };
    artifact.validate()?;

    let bytes = fetcher.fetch(&artifact.url)?;
    artifact.verify(&bytes)?;

    let files = archive::extract_matching(
        &bytes,
        artifact.format,
        &artifact.member_filter,
        &artifact.target_dir,
    )?;
    info!(count = files.len(), target = %artifact.target_dir.display(), "extension installed");
    Ok(ExtensionOutcome::Installed { files })
}
