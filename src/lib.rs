//! mistral-provision: provision a host to run the Mistral workflow service.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    ExtensionOutcome, PatchResult, ProvisionOptions, init, install_extension, patch_config, plan,
    provision,
};
pub use domain::{AppError, ConfigDocument, ConfigPatch, ProvisionConfig, ProvisionReport};
