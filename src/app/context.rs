use crate::ports::{ArtifactFetcher, CommandRunner};

/// Application context holding dependencies for command execution.
pub struct AppContext<R: CommandRunner, F: ArtifactFetcher> {
    runner: R,
    fetcher: F,
}

impl<R: CommandRunner, F: ArtifactFetcher> AppContext<R, F> {
    /// Create a new application context.
    pub fn new(runner: R, fetcher: F) -> Self {
        Self { runner, fetcher }
    }

    /// Get a reference to the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Get a reference to the artifact fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}
