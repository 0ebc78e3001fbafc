mod fake_command_runner;
mod fake_fetcher;

pub use fake_command_runner::FakeCommandRunner;
pub use fake_fetcher::FakeFetcher;
