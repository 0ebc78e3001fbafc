use crate::domain::{AppError, CommandSpec};

/// Port for running external programs.
pub trait CommandRunner {
    /// Run `command` to completion.
    ///
    /// A non-zero exit is reported as [`AppError::CommandFailed`].
    fn run(&self, command: &CommandSpec) -> Result<(), AppError>;
}
