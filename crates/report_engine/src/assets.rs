use std::path::PathBuf;

use bytes::Bytes;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("asset {url}: {message}")]
    Http { url: String, message: String },
    #[error("invalid asset location {0}")]
    InvalidLocation(String),
}

/// Where static report assets (font, logo) are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetBase {
    Dir(PathBuf),
    Url(Url),
}

impl AssetBase {
    /// `http(s)://` locations become [`AssetBase::Url`], anything else a directory.
    pub fn parse(location: &str) -> Result<Self, AssetError> {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            let mut url = Url::parse(trimmed)
                .map_err(|err| AssetError::InvalidLocation(format!("{trimmed}: {err}")))?;
            // Without the trailing slash `join` would replace the last segment.
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Self::Url(url))
        } else if trimmed.is_empty() {
            Err(AssetError::InvalidLocation("empty asset base".to_string()))
        } else {
            Ok(Self::Dir(PathBuf::from(trimmed)))
        }
    }
}

/// Loads assets relative to an [`AssetBase`].
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base: AssetBase,
    client: reqwest::Client,
}

impl AssetLoader {
    pub fn new(base: AssetBase) -> Self {
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    pub async fn load(&self, relative: &str) -> Result<Bytes, AssetError> {
        let relative = relative.trim_start_matches('/');
        match &self.base {
            AssetBase::Dir(dir) => {
                let path = dir.join(relative);
                tokio::fs::read(&path)
                    .await
                    .map(Bytes::from)
                    .map_err(|source| AssetError::Io {
                        path: path.display().to_string(),
                        source,
                    })
            }
            AssetBase::Url(base) => {
                let url = base
                    .join(relative)
                    .map_err(|err| AssetError::InvalidLocation(format!("{relative}: {err}")))?;
                let http_err = |message: String| AssetError::Http {
                    url: url.to_string(),
                    message,
                };
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|err| http_err(err.to_string()))?;
                if !response.status().is_success() {
                    return Err(http_err(response.status().to_string()));
                }
                response.bytes().await.map_err(|err| http_err(err.to_string()))
            }
        }
    }
}
