//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together profile
//! loading, context creation and command execution.

use std::path::{Path, PathBuf};

use crate::adapters::{HttpArtifactFetcher, ProcessCommandRunner};
use crate::app::{
    AppContext,
    commands::{extension, init, patch_config, provision},
};
use crate::domain::{ProvisionConfig, load_profile, profile_target};

pub use crate::app::commands::extension::ExtensionOutcome;
pub use crate::app::commands::patch_config::PatchResult;
pub use crate::app::commands::provision::ProvisionOptions;
pub use crate::domain::{AppError, ProvisionReport};

/// Load the profile from `config_path`, `./provision.toml`, or the built-in defaults.
pub fn load(config_path: Option<&Path>) -> Result<ProvisionConfig, AppError> {
    load_profile(config_path, &std::env::current_dir()?)
}

fn create_context(
    config: &ProvisionConfig,
) -> Result<AppContext<ProcessCommandRunner, HttpArtifactFetcher>, AppError> {
    let fetcher = HttpArtifactFetcher::new(config.extension.timeout_secs)?;
    Ok(AppContext::new(ProcessCommandRunner::new(), fetcher))
}

/// Provision this host.
pub fn provision(
    config_path: Option<&Path>,
    options: ProvisionOptions,
) -> Result<ProvisionReport, AppError> {
    let config = load(config_path)?;
    let ctx = create_context(&config)?;
    provision::execute(&ctx, &config, options)
}

/// Describe the provisioning run without executing it.
pub fn plan(
    config_path: Option<&Path>,
    options: ProvisionOptions,
) -> Result<ProvisionReport, AppError> {
    let config = load(config_path)?;
    Ok(provision::plan(&config, options))
}

/// Apply the profile's patches to `file`, or to the generated config path.
pub fn patch_config(
    config_path: Option<&Path>,
    file: Option<&Path>,
) -> Result<Vec<PatchResult>, AppError> {
    let config = load(config_path)?;
    let target = file.unwrap_or(config.config_generation.output.as_path());
    patch_config::apply_all(target, &config.patches, config.patching.on_missing_section)
}

/// Install only the optional extension.
pub fn install_extension(config_path: Option<&Path>) -> Result<ExtensionOutcome, AppError> {
    let config = load(config_path)?;
    let ctx = create_context(&config)?;
    extension::install(ctx.fetcher(), &config.extension, extension::ExtensionMode::Explicit)
}

/// Write the built-in profile to `path` (a file or directory), defaulting to `./provision.toml`.
pub fn init(path: Option<&Path>, force: bool) -> Result<PathBuf, AppError> {
    let target = profile_target(path, &std::env::current_dir()?);
    init::execute(&target, force)
}
