mod artifact_fetcher;
mod command_runner;

pub use artifact_fetcher::ArtifactFetcher;
pub use command_runner::CommandRunner;
