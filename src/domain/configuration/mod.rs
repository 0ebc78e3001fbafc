pub mod loader;
pub mod profile;

pub use loader::{
    PROFILE_FILE, load_profile, parse_profile_content, profile_target, render_default_profile,
};
pub use profile::{
    ApplicationConfig, ConfigGenerationConfig, ExtensionConfig, PackagesConfig, PatchingConfig,
    ProvisionConfig, RuntimeConfig, SchemaSyncConfig, ToolingConfig,
};
