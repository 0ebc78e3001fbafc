//! Optional binary extension and its compatibility matrix.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use crate::domain::AppError;

/// Archive container format of an extension artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    #[default]
    Zip,
    TarGz,
}

/// One row of the compatibility matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionArtifact {
    /// CPU architecture as reported by `std::env::consts::ARCH`.
    pub arch: String,
    /// Interpreter whose binary layout the archive targets (e.g. `python2.7`).
    pub interpreter: String,
    pub url: Url,
    /// Lowercase hex SHA-256 of the archive.
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub format: ArchiveFormat,
    /// Substring selecting which archive members are installed.
    pub member_filter: String,
    /// Directory the selected members are copied into.
    pub target_dir: PathBuf,
}

impl ExtensionArtifact {
    pub fn validate(&self) -> Result<(), AppError> {
        if !is_sha256_hex(&self.sha256) {
            return Err(AppError::invalid_config(format!(
                "extension artifact for {}/{} needs a 64-character hex sha256 before it can be enabled",
                self.arch, self.interpreter
            )));
        }
        if self.member_filter.is_empty() {
            return Err(AppError::invalid_config(format!(
                "extension artifact for {}/{} has an empty member_filter",
                self.arch, self.interpreter
            )));
        }
        Ok(())
    }

    /// Fail unless `bytes` hash to the declared digest.
    pub fn verify(&self, bytes: &[u8]) -> Result<(), AppError> {
        let actual = sha256_hex(bytes);
        if actual != self.sha256.to_ascii_lowercase() {
            return Err(AppError::ChecksumMismatch {
                url: self.url.to_string(),
                expected: self.sha256.clone(),
                actual,
            });
        }
        Ok(())
    }
}

/// Find the matrix row for a host.
pub fn select_artifact<'a>(
    matrix: &'a [ExtensionArtifact],
    arch: &str,
    interpreter: &str,
) -> Option<&'a ExtensionArtifact> {
    matrix.iter().find(|row| row.arch == arch && row.interpreter == interpreter)
}

pub fn host_arch() -> &'static str {
    std::env::consts::ARCH
}

pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

fn is_sha256_hex(value: &str) -> bool {
    value.len() == 64 && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// The PyV8 build the JavaScript expression feature was shipped with.
///
/// Only x86_64 hosts running Python 2.7 are covered.
pub fn default_matrix() -> Vec<ExtensionArtifact> {
    vec![ExtensionArtifact {
        arch: "x86_64".to_string(),
        interpreter: "python2.7".to_string(),
        url: Url::parse(
            "https://raw.githubusercontent.com/emmetio/pyv8-binaries/master/pyv8-linux64.zip",
        )
        .expect("Default extension URL must be valid"),
        sha256: String::new(),
        format: ArchiveFormat::Zip,
        member_filter: "PyV8".to_string(),
        target_dir: PathBuf::from("/usr/lib/python2.7/dist-packages"),
    }]
}
