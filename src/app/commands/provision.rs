//! The provisioning sequencer.
//!
//! Steps run strictly in [`Step::sequence`] order. The first failing step
//! aborts the run; whatever earlier steps changed on the host stays as it is.

use std::path::Path;

use tracing::{error, info, warn};

use crate::app::AppContext;
use crate::app::commands::{extension, patch_config};
use crate::domain::{
    AppError, CommandSpec, PatchOutcome, ProvisionConfig, ProvisionReport, Step, StepRecord,
    StepStatus,
};
use crate::ports::{ArtifactFetcher, CommandRunner};

/// Options for a provisioning run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvisionOptions {
    /// Render the plan without touching the host.
    pub dry_run: bool,
    /// Skip the optional extension even when the profile enables it.
    pub skip_extension: bool,
}

/// Run every step in order, stopping at the first failure.
pub fn execute<R, F>(
    ctx: &AppContext<R, F>,
    config: &ProvisionConfig,
    options: ProvisionOptions,
) -> Result<ProvisionReport, AppError>
where
    R: CommandRunner,
    F: ArtifactFetcher,
{
    if options.dry_run {
        return Ok(plan(config, options));
    }

    let mut report = ProvisionReport::start(false);
    for step in Step::sequence(config) {
        let name = step.name();
        info!(step = %name, "starting step");

        let status = run_step(ctx, config, options, &step).map_err(|source| {
            error!(step = %name, error = %source, "step failed, aborting");
            AppError::StepFailed { step: name.clone(), source: Box::new(source) }
        })?;

        match &status {
            StepStatus::Skipped { reason } => warn!(step = %name, %reason, "step skipped"),
            _ => info!(step = %name, "step completed"),
        }
        report.steps.push(record(&step, config, status));
    }

    Ok(report.finish())
}

/// Describe what [`execute`] would do without running anything.
pub fn plan(config: &ProvisionConfig, options: ProvisionOptions) -> ProvisionReport {
    let mut report = ProvisionReport::start(true);
    for step in Step::sequence(config) {
        let status = match &step {
            Step::InstallExtension => {
                match extension::skip_reason(&config.extension, options.skip_extension) {
                    Some(reason) => StepStatus::Skipped { reason },
                    None => StepStatus::Planned,
                }
            }
            _ => StepStatus::Planned,
        };
        report.steps.push(record(&step, config, status));
    }
    report.finish()
}

fn record(step: &Step, config: &ProvisionConfig, status: StepStatus) -> StepRecord {
    StepRecord {
        name: step.name(),
        description: step.describe(config),
        commands: step.commands(config).iter().map(ToString::to_string).collect(),
        status,
    }
}

fn run_step<R, F>(
    ctx: &AppContext<R, F>,
    config: &ProvisionConfig,
    options: ProvisionOptions,
    step: &Step,
) -> Result<StepStatus, AppError>
where
    R: CommandRunner,
    F: ArtifactFetcher,
{
    match step {
        Step::InstallApplication => {
            let source_dir = &config.application.source_dir;
            if !source_dir.is_dir() {
                return Err(AppError::SourceDirMissing(source_dir.clone()));
            }
            let manifest = source_dir.join(&config.application.manifest);
            if !manifest.is_file() {
                return Err(AppError::ManifestMissing(manifest));
            }
            run_all(ctx.runner(), &step.commands(config))?;
        }
        Step::PrepareRuntimeDir => prepare_runtime_dir(&config.runtime.dir)?,
        Step::GenerateConfig => {
            run_all(ctx.runner(), &step.commands(config))?;
            let output = &config.config_generation.output;
            if !output.is_file() {
                return Err(AppError::ConfigNotGenerated(output.clone()));
            }
        }
        Step::PatchConfig(patch) => {
            let outcome = patch_config::apply_one(
                &config.config_generation.output,
                patch,
                config.patching.on_missing_section,
            )?;
            if outcome == PatchOutcome::SectionMissing {
                return Ok(StepStatus::Skipped {
                    reason: format!("section [{}] not present", patch.section),
                });
            }
        }
        Step::InstallExtension => {
            let mode = extension::ExtensionMode::Sequenced { skip: options.skip_extension };
            if let extension::ExtensionOutcome::Skipped { reason } =
                extension::install(ctx.fetcher(), &config.extension, mode)?
            {
                return Ok(StepStatus::Skipped { reason });
            }
        }
        Step::InstallPackages | Step::BootstrapTooling | Step::SyncDatabase => {
            run_all(ctx.runner(), &step.commands(config))?;
        }
    }
    Ok(StepStatus::Completed)
}

fn run_all(runner: &impl CommandRunner, commands: &[CommandSpec]) -> Result<(), AppError> {
    for command in commands {
        runner.run(command)?;
    }
    Ok(())
}

/// Create the runtime directory. Existing directories are left alone.
pub fn prepare_runtime_dir(dir: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}
