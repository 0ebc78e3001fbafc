//! Provisioning profile domain models.
//!
//! Every default below is the constant the Mistral host setup has always used,
//! so an empty profile provisions exactly that host.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::extension::{ExtensionArtifact, default_matrix};
use crate::domain::patch::{ConfigPatch, MissingSectionPolicy, default_patches};

/// Provisioning profile loaded from `provision.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisionConfig {
    #[serde(default)]
    pub packages: PackagesConfig,
    #[serde(default)]
    pub tooling: ToolingConfig,
    #[serde(default)]
    pub application: ApplicationConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub config_generation: ConfigGenerationConfig,
    #[serde(default)]
    pub schema_sync: SchemaSyncConfig,
    #[serde(default)]
    pub patching: PatchingConfig,
    /// Settings written into the generated configuration, in order.
    #[serde(default = "default_patches")]
    pub patches: Vec<ConfigPatch>,
    #[serde(default)]
    pub extension: ExtensionConfig,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            packages: PackagesConfig::default(),
            tooling: ToolingConfig::default(),
            application: ApplicationConfig::default(),
            runtime: RuntimeConfig::default(),
            config_generation: ConfigGenerationConfig::default(),
            schema_sync: SchemaSyncConfig::default(),
            patching: PatchingConfig::default(),
            patches: default_patches(),
            extension: ExtensionConfig::default(),
        }
    }
}

impl ProvisionConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.packages.validate()?;
        self.tooling.validate()?;
        require_non_empty(&self.config_generation.program, "config_generation.program")?;
        require_non_empty(&self.schema_sync.program, "schema_sync.program")?;
        for patch in &self.patches {
            patch.validate()?;
        }
        self.extension.validate()?;
        Ok(())
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_config(format!("{field} must not be empty")));
    }
    Ok(())
}

/// OS package installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagesConfig {
    /// Package manager executable.
    #[serde(default = "default_package_manager")]
    pub manager: String,
    /// Refresh the package index before installing.
    #[serde(default = "default_true")]
    pub update_index: bool,
    /// Pass `DEBIAN_FRONTEND=noninteractive` to the package manager.
    #[serde(default = "default_true")]
    pub noninteractive: bool,
    #[serde(default = "default_os_packages")]
    pub install: Vec<String>,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            manager: default_package_manager(),
            update_index: default_true(),
            noninteractive: default_true(),
            install: default_os_packages(),
        }
    }
}

impl PackagesConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty(&self.manager, "packages.manager")?;
        if self.install.is_empty() {
            return Err(AppError::invalid_config("packages.install must list at least one package"));
        }
        Ok(())
    }
}

fn default_package_manager() -> String {
    "apt-get".to_string()
}

fn default_os_packages() -> Vec<String> {
    [
        "build-essential",
        "libssl-dev",
        "libffi-dev",
        "python-dev",
        "python-pip",
        "python-setuptools",
        "git",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_true() -> bool {
    true
}

/// Language package installer and the pinned tooling it bootstraps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolingConfig {
    #[serde(default = "default_installer")]
    pub installer: String,
    /// Pinned requirement specifiers, e.g. `tox==2.3.1`.
    #[serde(default = "default_pinned_tooling")]
    pub pinned: Vec<String>,
}

impl Default for ToolingConfig {
    fn default() -> Self {
        Self { installer: default_installer(), pinned: default_pinned_tooling() }
    }
}

impl ToolingConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty(&self.installer, "tooling.installer")?;
        if let Some(spec) = self.pinned.iter().find(|spec| !spec.contains("==")) {
            return Err(AppError::invalid_config(format!(
                "tooling.pinned entry '{spec}' must pin an exact version with '=='"
            )));
        }
        Ok(())
    }
}

fn default_installer() -> String {
    "pip".to_string()
}

fn default_pinned_tooling() -> Vec<String> {
    vec!["pbr==1.10.0".to_string(), "tox==2.3.1".to_string()]
}

/// Source checkout of the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationConfig {
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// Dependency manifest, relative to `source_dir`.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self { source_dir: default_source_dir(), manifest: default_manifest() }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("/opt/stack/mistral")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("requirements.txt")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    #[serde(default = "default_runtime_dir")]
    pub dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { dir: default_runtime_dir() }
    }
}

fn default_runtime_dir() -> PathBuf {
    PathBuf::from("/home/mistral")
}

/// Service configuration file generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigGenerationConfig {
    #[serde(default = "default_generator")]
    pub program: String,
    /// Generator template, relative to the source checkout.
    #[serde(default = "default_generator_template")]
    pub template: PathBuf,
    #[serde(default = "default_config_output")]
    pub output: PathBuf,
}

impl Default for ConfigGenerationConfig {
    fn default() -> Self {
        Self {
            program: default_generator(),
            template: default_generator_template(),
            output: default_config_output(),
        }
    }
}

fn default_generator() -> String {
    "oslo-config-generator".to_string()
}

fn default_generator_template() -> PathBuf {
    PathBuf::from("tools/config/config-generator.mistral.conf")
}

fn default_config_output() -> PathBuf {
    PathBuf::from("/home/mistral/mistral.conf")
}

/// Database schema synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaSyncConfig {
    #[serde(default = "default_interpreter_program")]
    pub program: String,
    /// Sync script, relative to the source checkout.
    #[serde(default = "default_sync_script")]
    pub script: PathBuf,
}

impl Default for SchemaSyncConfig {
    fn default() -> Self {
        Self { program: default_interpreter_program(), script: default_sync_script() }
    }
}

fn default_interpreter_program() -> String {
    "python".to_string()
}

fn default_sync_script() -> PathBuf {
    PathBuf::from("tools/sync_db.py")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchingConfig {
    #[serde(default)]
    pub on_missing_section: MissingSectionPolicy,
}

/// Optional JavaScript expression support (PyV8).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Fail instead of skipping when no matrix row matches the host.
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_extension_interpreter")]
    pub interpreter: String,
    /// Overrides the detected host architecture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default = "default_download_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_matrix")]
    pub matrix: Vec<ExtensionArtifact>,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            required: false,
            interpreter: default_extension_interpreter(),
            arch: None,
            timeout_secs: default_download_timeout(),
            matrix: default_matrix(),
        }
    }
}

impl ExtensionConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.enabled {
            return Ok(());
        }
        if self.timeout_secs == 0 {
            return Err(AppError::invalid_config(
                "extension.timeout_secs must be greater than 0",
            ));
        }
        for row in &self.matrix {
            row.validate()?;
        }
        Ok(())
    }

    pub fn target_arch(&self) -> &str {
        self.arch.as_deref().unwrap_or_else(|| crate::domain::extension::host_arch())
    }
}

fn default_extension_interpreter() -> String {
    "python2.7".to_string()
}

fn default_download_timeout() -> u64 {
    120
}
