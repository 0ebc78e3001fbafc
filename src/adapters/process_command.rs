use std::process::{Command, Stdio};

use tracing::info;

use crate::domain::{AppError, CommandSpec};
use crate::ports::CommandRunner;

/// Runs commands as child processes.
///
/// Child stdout/stderr are inherited so the tools' own diagnostics reach the
/// operator unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProcessCommandRunner;

impl ProcessCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<(), AppError> {
        info!(command = %spec, "+");

        let mut command = Command::new(&spec.program);
        command.args(&spec.args).stdin(Stdio::null());
        if let Some(dir) = &spec.cwd {
            command.current_dir(dir);
        }
        command.envs(spec.env.iter().map(|(key, value)| (key, value)));

        let status = command.status().map_err(|e| AppError::CommandSpawn {
            command: spec.to_string(),
            details: e.to_string(),
        })?;

        if !status.success() {
            return Err(AppError::CommandFailed { command: spec.to_string(), code: status.code() });
        }

        Ok(())
    }
}
