//! The provisioning step sequence.

use crate::domain::command::CommandSpec;
use crate::domain::configuration::ProvisionConfig;
use crate::domain::patch::ConfigPatch;

/// One step of the provisioning sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    InstallPackages,
    BootstrapTooling,
    InstallApplication,
    PrepareRuntimeDir,
    GenerateConfig,
    SyncDatabase,
    PatchConfig(ConfigPatch),
    InstallExtension,
}

impl Step {
    /// The fixed order every run follows.
    pub fn sequence(config: &ProvisionConfig) -> Vec<Step> {
        let mut steps = vec![
            Step::InstallPackages,
            Step::BootstrapTooling,
            Step::InstallApplication,
            Step::PrepareRuntimeDir,
            Step::GenerateConfig,
            Step::SyncDatabase,
        ];
        steps.extend(config.patches.iter().cloned().map(Step::PatchConfig));
        steps.push(Step::InstallExtension);
        steps
    }

    pub fn name(&self) -> String {
        match self {
            Step::InstallPackages => "install-packages".to_string(),
            Step::BootstrapTooling => "bootstrap-tooling".to_string(),
            Step::InstallApplication => "install-application".to_string(),
            Step::PrepareRuntimeDir => "prepare-runtime-dir".to_string(),
            Step::GenerateConfig => "generate-config".to_string(),
            Step::SyncDatabase => "sync-database".to_string(),
            Step::PatchConfig(patch) => format!("patch-config:{}", patch.section),
            Step::InstallExtension => "install-extension".to_string(),
        }
    }

    /// External programs this step runs, in order. In-process steps return none.
    pub fn commands(&self, config: &ProvisionConfig) -> Vec<CommandSpec> {
        let source_dir = &config.application.source_dir;
        match self {
            Step::InstallPackages => {
                let packages = &config.packages;
                let with_frontend = |command: CommandSpec| {
                    if packages.noninteractive {
                        command.env("DEBIAN_FRONTEND", "noninteractive")
                    } else {
                        command
                    }
                };

                let mut commands = Vec::new();
                if packages.update_index {
                    commands.push(with_frontend(CommandSpec::new(&packages.manager).arg("update")));
                }
                commands.push(with_frontend(
                    CommandSpec::new(&packages.manager)
                        .args(["install", "-y"])
                        .args(packages.install.iter().cloned()),
                ));
                commands
            }
            Step::BootstrapTooling => {
                if config.tooling.pinned.is_empty() {
                    return Vec::new();
                }
                vec![
                    CommandSpec::new(&config.tooling.installer)
                        .arg("install")
                        .args(config.tooling.pinned.iter().cloned()),
                ]
            }
            Step::InstallApplication => vec![
                CommandSpec::new(&config.tooling.installer)
                    .args(["install", "-r"])
                    .arg(config.application.manifest.to_string_lossy())
                    .current_dir(source_dir),
                CommandSpec::new(&config.tooling.installer)
                    .args(["install", "."])
                    .current_dir(source_dir),
            ],
            Step::GenerateConfig => vec![
                CommandSpec::new(&config.config_generation.program)
                    .arg("--config-file")
                    .arg(config.config_generation.template.to_string_lossy())
                    .arg("--output-file")
                    .arg(config.config_generation.output.to_string_lossy())
                    .current_dir(source_dir),
            ],
            Step::SyncDatabase => vec![
                CommandSpec::new(&config.schema_sync.program)
                    .arg(config.schema_sync.script.to_string_lossy())
                    .arg("--config-file")
                    .arg(config.config_generation.output.to_string_lossy())
                    .current_dir(source_dir),
            ],
            Step::PrepareRuntimeDir | Step::PatchConfig(_) | Step::InstallExtension => Vec::new(),
        }
    }

    /// Human-readable summary for plans.
    pub fn describe(&self, config: &ProvisionConfig) -> String {
        match self {
            Step::InstallPackages => {
                format!("install {} OS package(s)", config.packages.install.len())
            }
            Step::BootstrapTooling => {
                format!("install pinned tooling: {}", config.tooling.pinned.join(", "))
            }
            Step::InstallApplication => {
                format!("install service from {}", config.application.source_dir.display())
            }
            Step::PrepareRuntimeDir => {
                format!("create {}", config.runtime.dir.display())
            }
            Step::GenerateConfig => {
                format!("generate {}", config.config_generation.output.display())
            }
            Step::SyncDatabase => "synchronize database schema".to_string(),
            Step::PatchConfig(patch) => {
                format!("set [{}] {}", patch.section, patch.line())
            }
            Step::InstallExtension => {
                let extension = &config.extension;
                if extension.enabled {
                    format!(
                        "install extension for {}/{}",
                        extension.target_arch(),
                        extension.interpreter
                    )
                } else {
                    "extension disabled".to_string()
                }
            }
        }
    }
}
