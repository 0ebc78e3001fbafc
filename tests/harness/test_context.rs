//! Shared testing harness for `mistral-provision` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fake_tools::FakeTools;

/// Isolated host layout: a source checkout, a runtime dir and fake host tools.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    pub(crate) tools: FakeTools,
}

impl TestContext {
    /// Create a new isolated environment with a profile pointing into it.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        let source_dir = root.path().join("src/mistral");
        fs::create_dir_all(&source_dir).expect("Failed to create source checkout");
        fs::write(source_dir.join("requirements.txt"), "pbr>=1.6\n")
            .expect("Failed to write requirements.txt");

        let tools = FakeTools::install(root.path());
        let ctx = Self { root, work_dir, tools };
        ctx.write_profile("");
        ctx
    }

    /// Write `work/provision.toml`, appending `extra` verbatim.
    pub(crate) fn write_profile(&self, extra: &str) {
        let content = format!(
            r#"[packages]
install = ["build-essential", "libssl-dev", "git"]

[application]
source_dir = "{source}"

[runtime]
dir = "{runtime}"

[config_generation]
output = "{output}"
{extra}"#,
            source = self.source_dir().display(),
            runtime = self.runtime_dir().display(),
            output = self.config_file().display(),
        );
        fs::write(self.work_dir.join("provision.toml"), content).expect("Failed to write profile");
    }

    pub(crate) fn root(&self) -> &Path {
        self.root.path()
    }

    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub(crate) fn source_dir(&self) -> PathBuf {
        self.root.path().join("src/mistral")
    }

    pub(crate) fn runtime_dir(&self) -> PathBuf {
        self.root.path().join("home/mistral")
    }

    pub(crate) fn config_file(&self) -> PathBuf {
        self.runtime_dir().join("mistral.conf")
    }

    pub(crate) fn read_config(&self) -> String {
        fs::read_to_string(self.config_file()).expect("Failed to read generated config")
    }

    /// Line directly after `header` in the generated config.
    pub(crate) fn line_after(&self, header: &str) -> Option<String> {
        let content = self.read_config();
        let mut lines = content.lines();
        lines.find(|line| *line == header)?;
        lines.next().map(str::to_string)
    }

    /// Build a command for invoking the compiled binary in the work dir with fake tools first on `PATH`.
    pub(crate) fn cli(&self) -> Command {
        let path = match std::env::var_os("PATH") {
            Some(existing) => {
                let mut paths = vec![self.tools.bin_dir.clone()];
                paths.extend(std::env::split_paths(&existing));
                std::env::join_paths(paths).expect("Failed to build PATH")
            }
            None => self.tools.bin_dir.clone().into_os_string(),
        };

        let mut cmd =
            Command::cargo_bin("mistral-provision").expect("Failed to locate mistral-provision binary");
        cmd.current_dir(&self.work_dir)
            .env("PATH", path)
            .env_remove("DEBIAN_FRONTEND")
            .env_remove("RUST_LOG");
        cmd
    }
}
