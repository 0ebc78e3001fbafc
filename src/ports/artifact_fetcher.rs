use url::Url;

use crate::domain::AppError;

/// Port for downloading remote artifacts.
pub trait ArtifactFetcher {
    /// Download the full body at `url`.
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, AppError>;
}
