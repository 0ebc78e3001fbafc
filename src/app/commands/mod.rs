pub mod extension;
pub mod init;
pub mod patch_config;
pub mod provision;
