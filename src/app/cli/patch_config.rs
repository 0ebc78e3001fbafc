//! Patch-config command implementation.

use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_patch_config(config: Option<PathBuf>, file: Option<PathBuf>) -> Result<(), AppError> {
    let results = crate::app::api::patch_config(config.as_deref(), file.as_deref())?;

    println!("✅ Applied {} configuration patch(es)", results.len());
    for result in &results {
        println!(
            "  • [{}] {} ({})",
            result.patch.section,
            result.patch.line(),
            result.outcome.label()
        );
    }
    Ok(())
}
