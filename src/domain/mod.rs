pub mod command;
pub mod config_document;
pub mod configuration;
pub mod error;
pub mod extension;
pub mod patch;
pub mod report;
pub mod step;

pub use command::CommandSpec;
pub use config_document::{ConfigDocument, UpsertOutcome};
pub use configuration::{
    ExtensionConfig, PROFILE_FILE, ProvisionConfig, load_profile, parse_profile_content,
    profile_target, render_default_profile,
};
pub use error::AppError;
pub use extension::{ArchiveFormat, ExtensionArtifact};
pub use patch::{ConfigPatch, MissingSectionPolicy, PatchOutcome};
pub use report::{ProvisionReport, StepRecord, StepStatus};
pub use step::Step;
