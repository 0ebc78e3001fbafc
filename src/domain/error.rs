use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for provisioning operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Profile loaded but failed validation.
    #[error("Invalid profile: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// External program could not be started at all.
    #[error("Failed to start '{command}': {details}")]
    CommandSpawn { command: String, details: String },

    /// External program exited unsuccessfully.
    #[error("'{command}' {}", describe_exit(*.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// A provisioning step aborted the sequence.
    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<AppError>,
    },

    /// Application source checkout is absent.
    #[error("Source directory not found: {}", .0.display())]
    SourceDirMissing(PathBuf),

    /// Dependency manifest is absent from the source checkout.
    #[error("Dependency manifest not found: {}", .0.display())]
    ManifestMissing(PathBuf),

    /// Config generator exited zero but produced no file.
    #[error("Configuration file was not generated at {}", .0.display())]
    ConfigNotGenerated(PathBuf),

    /// File to patch does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigFileMissing(PathBuf),

    /// Patch target section does not exist in the configuration file.
    #[error("Section '[{section}]' not found in configuration file")]
    SectionNotFound { section: String },

    /// No compatibility matrix row matches this host.
    #[error("No extension artifact for architecture '{arch}' and interpreter '{interpreter}'")]
    UnsupportedPlatform { arch: String, interpreter: String },

    /// Artifact download failed.
    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String, status: Option<u16> },

    /// Downloaded bytes do not match the declared digest.
    #[error("Checksum mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch { url: String, expected: String, actual: String },

    /// Archive could not be read.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Archive contained no member matching the filter.
    #[error("Archive contains no files matching '{filter}'")]
    EmptyArchive { filter: String },

    /// Profile file already exists and overwrite was not requested.
    #[error("Profile already exists at {}. Use --force to overwrite.", .0.display())]
    ProfileExists(PathBuf),

    /// Interactive prompt failed.
    #[error("{0}")]
    Prompt(String),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        AppError::InvalidConfig(message.into())
    }

    /// Process exit code to report for this error.
    ///
    /// A failing external program propagates its own status; everything else maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::CommandFailed { code: Some(code), .. } if *code != 0 => *code,
            AppError::StepFailed { source, .. } => source.exit_code(),
            _ => 1,
        }
    }
}
