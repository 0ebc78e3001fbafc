//! Install-extension command implementation.

use std::path::PathBuf;

use crate::app::api::ExtensionOutcome;
use crate::domain::AppError;

pub fn run_install_extension(config: Option<PathBuf>) -> Result<(), AppError> {
    match crate::app::api::install_extension(config.as_deref())? {
        ExtensionOutcome::Installed { files } => {
            println!("✅ Installed extension ({} file(s))", files.len());
            for file in &files {
                println!("  • {}", file.display());
            }
        }
        ExtensionOutcome::Skipped { reason } => {
            println!("Extension not installed: {}", reason);
        }
    }
    Ok(())
}
