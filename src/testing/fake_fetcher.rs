use std::sync::Mutex;

use url::Url;

use crate::domain::AppError;
use crate::ports::ArtifactFetcher;

/// Serves a fixed body for every URL.
#[derive(Default)]
pub struct FakeFetcher {
    pub body: Vec<u8>,
    pub requested: Mutex<Vec<Url>>,
}

impl FakeFetcher {
    pub fn serving(body: Vec<u8>) -> Self {
        Self { body, requested: Mutex::new(Vec::new()) }
    }

    pub fn request_count(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

impl ArtifactFetcher for FakeFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, AppError> {
        self.requested.lock().unwrap().push(url.clone());
        Ok(self.body.clone())
    }
}
