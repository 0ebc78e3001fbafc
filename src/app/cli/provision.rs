//! Provision and plan command implementations.

use std::io::{ErrorKind, IsTerminal};
use std::path::PathBuf;

use dialoguer::{Confirm, Error as DialoguerError};

use super::OutputFormat;
use crate::app::api::{self, ProvisionOptions};
use crate::domain::{AppError, ProvisionReport, StepStatus};

pub fn run_provision(
    config: Option<PathBuf>,
    dry_run: bool,
    skip_extension: bool,
    yes: bool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let options = ProvisionOptions { dry_run, skip_extension };

    if dry_run {
        let report = api::plan(config.as_deref(), options)?;
        return print_report(&report, format);
    }

    if !yes {
        let plan = api::plan(config.as_deref(), options)?;
        print_plan(&plan);
        if !confirm()? {
            println!("Aborted, no changes made");
            return Ok(());
        }
    }

    let report = api::provision(config.as_deref(), options)?;
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => println!(
            "✅ Provisioned host: {} step(s) completed, {} skipped",
            report.completed(),
            report.skipped()
        ),
    }
    Ok(())
}

pub fn run_plan(
    config: Option<PathBuf>,
    skip_extension: bool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let options = ProvisionOptions { dry_run: true, skip_extension };
    let report = api::plan(config.as_deref(), options)?;
    print_report(&report, format)
}

fn print_report(report: &ProvisionReport, format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Text => {
            print_plan(report);
            Ok(())
        }
    }
}

fn print_plan(report: &ProvisionReport) {
    println!("Provisioning plan ({} steps):", report.steps.len());
    for (i, step) in report.steps.iter().enumerate() {
        match &step.status {
            StepStatus::Skipped { reason } => {
                println!("{:>3}. {} - {} (skipped: {})", i + 1, step.name, step.description, reason)
            }
            _ => println!("{:>3}. {} - {}", i + 1, step.name, step.description),
        }
        for command in &step.commands {
            println!("       $ {}", command);
        }
    }
}

fn print_json(report: &ProvisionReport) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| AppError::config_error(format!("Failed to serialize report: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn confirm() -> Result<bool, AppError> {
    if !std::io::stdin().is_terminal() {
        return Err(AppError::Prompt(
            "Refusing to provision without confirmation in a non-interactive session. Pass --yes to proceed."
                .to_string(),
        ));
    }

    match Confirm::new().with_prompt("Provision this host?").default(false).interact_opt() {
        Ok(answer) => Ok(answer.unwrap_or(false)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(false),
        Err(err) => Err(AppError::Prompt(format!("Failed to read confirmation: {}", err))),
    }
}
