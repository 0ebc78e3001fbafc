//! Artifact download over HTTPS using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};
use url::Url;

use crate::domain::AppError;
use crate::ports::ArtifactFetcher;

/// HTTP transport for extension archives.
///
/// Certificates are always verified; there is no switch to turn that off.
#[derive(Debug, Clone)]
pub struct HttpArtifactFetcher {
    client: Client,
}

impl HttpArtifactFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(client_error)?;

        Ok(Self { client })
    }
}

fn client_error(err: impl std::fmt::Display) -> AppError {
    AppError::config_error(format!("Failed to create HTTP client: {}", err))
}

impl ArtifactFetcher for HttpArtifactFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, AppError> {
        info!(%url, "downloading");

        let response = self.client.get(url.clone()).send().map_err(|e| AppError::Download {
            url: url.to_string(),
            message: format!("HTTP request failed: {}", e),
            status: None,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Download {
                url: url.to_string(),
                message: format!("server responded with {}", status),
                status: Some(status.as_u16()),
            });
        }

        let body = response.bytes().map_err(|e| AppError::Download {
            url: url.to_string(),
            message: format!("Failed to read response body: {}", e),
            status: Some(status.as_u16()),
        })?;

        debug!(%url, bytes = body.len(), "download complete");
        Ok(body.to_vec())
    }
}
