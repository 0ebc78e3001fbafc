//! Init command implementation.

use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_init(path: Option<PathBuf>, force: bool) -> Result<(), AppError> {
    let written = crate::app::api::init(path.as_deref(), force)?;
    println!("✅ Wrote provisioning profile to {}", written.display());
    Ok(())
}
