use std::sync::Mutex;

use crate::domain::{AppError, CommandSpec};
use crate::ports::CommandRunner;

/// Records every command and optionally fails one program.
#[derive(Default)]
pub struct FakeCommandRunner {
    pub executed: Mutex<Vec<CommandSpec>>,
    pub fail_program: Mutex<Option<(String, i32)>>,
    /// Runs after a command is recorded, e.g. to emulate files a tool writes.
    pub on_run: Option<Box<dyn Fn(&CommandSpec) + Send + Sync>>,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(hook: impl Fn(&CommandSpec) + Send + Sync + 'static) -> Self {
        Self { on_run: Some(Box::new(hook)), ..Self::default() }
    }

    pub fn fail_on(&self, program: &str, code: i32) {
        *self.fail_program.lock().unwrap() = Some((program.to_string(), code));
    }

    pub fn programs(&self) -> Vec<String> {
        self.executed.lock().unwrap().iter().map(|c| c.program.clone()).collect()
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(&self, command: &CommandSpec) -> Result<(), AppError> {
        self.executed.lock().unwrap().push(command.clone());

        if let Some((program, code)) = self.fail_program.lock().unwrap().as_ref()
            && *program == command.program
        {
            return Err(AppError::CommandFailed {
                command: command.to_string(),
                code: Some(*code),
            });
        }

        if let Some(hook) = &self.on_run {
            hook(command);
        }
        Ok(())
    }
}
