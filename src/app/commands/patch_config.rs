//! Apply configuration patches to a generated service config file.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{
    AppError, ConfigDocument, ConfigPatch, MissingSectionPolicy, PatchOutcome,
};

#[derive(Debug, Clone, Serialize)]
pub struct PatchResult {
    pub patch: ConfigPatch,
    pub outcome: PatchOutcome,
}

/// Apply a single patch.
pub fn apply_one(
    path: &Path,
    patch: &ConfigPatch,
    policy: MissingSectionPolicy,
) -> Result<PatchOutcome, AppError> {
    let results = apply_all(path, std::slice::from_ref(patch), policy)?;
    Ok(results[0].outcome)
}

/// Apply `patches` in order and write the file once.
///
/// Nothing is written if any patch fails, and an already patched file is not
/// rewritten at all.
pub fn apply_all(
    path: &Path,
    patches: &[ConfigPatch],
    policy: MissingSectionPolicy,
) -> Result<Vec<PatchResult>, AppError> {
    if !path.is_file() {
        return Err(AppError::ConfigFileMissing(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let mut doc = ConfigDocument::parse(&content);

    let mut results = Vec::with_capacity(patches.len());
    for patch in patches {
        let outcome = patch.apply(&mut doc, policy)?;
        debug!(section = %patch.section, key = %patch.key, outcome = outcome.label(), "patch applied");
        results.push(PatchResult { patch: patch.clone(), outcome });
    }

    if results.iter().any(|result| result.outcome.changed_file()) {
        replace_file(path, &doc.render())?;
        info!(path = %path.display(), "configuration updated");
    }
    Ok(results)
}

/// Write via a sibling temp file so readers never see a half-written config.
fn replace_file(path: &Path, content: &str) -> Result<(), AppError> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    std::fs::write(&tmp, content)?;
    let permissions = std::fs::metadata(path)?.permissions();
    std::fs::set_permissions(&tmp, permissions)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patch::default_patches;
    use tempfile::tempdir;

    const GENERATED: &str = "[DEFAULT]\n\n[database]\n\n[oslo_messaging_rabbit]\n\n[pecan]\n";

    #[test]
    fn applies_default_patches_after_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mistral.conf");
        std::fs::write(&path, GENERATED).unwrap();

        let results = apply_all(&path, &default_patches(), MissingSectionPolicy::Error).unwrap();

        assert!(results.iter().all(|r| r.outcome == PatchOutcome::Inserted));
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        let after = |header: &str| lines[lines.iter().position(|l| *l == header).unwrap() + 1];
        assert_eq!(after("[database]"), "connection = sqlite:////home/mistral/mistral.sqlite");
        assert_eq!(after("[oslo_messaging_rabbit]"), "rabbit_host = rabbitmq");
        assert_eq!(after("[pecan]"), "auth_enable = false");
        assert_eq!(lines.len(), GENERATED.lines().count() + 3);
    }

    #[test]
    fn failing_patch_leaves_file_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mistral.conf");
        std::fs::write(&path, "[database]\n").unwrap();

        let err = apply_all(&path, &default_patches(), MissingSectionPolicy::Error).unwrap_err();

        assert!(matches!(err, AppError::SectionNotFound { section } if section == "oslo_messaging_rabbit"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[database]\n");
        assert!(!dir.path().join("mistral.conf.tmp").exists());
    }

    #[test]
    fn skip_policy_keeps_file_without_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mistral.conf");
        std::fs::write(&path, "[DEFAULT]\n").unwrap();
        let patch = ConfigPatch::new("pecan", "auth_enable", "false");

        let outcome = apply_one(&path, &patch, MissingSectionPolicy::Skip).unwrap();

        assert_eq!(outcome, PatchOutcome::SectionMissing);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[DEFAULT]\n");
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let patch = ConfigPatch::new("pecan", "auth_enable", "false");

        let err =
            apply_one(&dir.path().join("absent.conf"), &patch, MissingSectionPolicy::Error).unwrap_err();

        assert!(matches!(err, AppError::ConfigFileMissing(_)));
    }

    #[cfg(unix)]
    #[test]
    fn rewrite_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("mistral.conf");
        std::fs::write(&path, "[pecan]\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        apply_one(&path, &ConfigPatch::new("pecan", "auth_enable", "false"), MissingSectionPolicy::Error)
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }
}
