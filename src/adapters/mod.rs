pub mod archive;
pub mod http_artifact_fetcher;
pub mod process_command;

pub use http_artifact_fetcher::HttpArtifactFetcher;
pub use process_command::ProcessCommandRunner;
