use std::path::PathBuf;

use log::info;
use reqwest::Client;

use super::error::LoadError;

/// A trait, necessary for every entity that will be used for getting the course catalog.
/// The fetch is one-shot: no retry, no cancellation.
#[allow(async_fn_in_trait)]
pub trait CatalogGetter {
    async fn get_catalog(&self) -> Result<String, LoadError>;
}

/// Getting the catalog over http(s) with a shared Client.
pub struct RemoteCatalog {
    pub client: Client,
    pub url: String,
}

impl CatalogGetter for RemoteCatalog {
    async fn get_catalog(&self) -> Result<String, LoadError> {
        info!("Fetching catalog from {}", self.url);
        let network = |source: reqwest::Error| LoadError::Network {
            url: self.url.clone(),
            source,
        };
        self.client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(network)?
            .text()
            .await
            .map_err(network)
    }
}

/// Reading the catalog from a file next to the tool.
pub struct LocalCatalog {
    pub path: PathBuf,
}

impl CatalogGetter for LocalCatalog {
    async fn get_catalog(&self) -> Result<String, LoadError> {
        info!("Reading catalog from {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }
}

/// Remote for http(s) URLs, local file otherwise.
pub enum CatalogSource {
    Remote(RemoteCatalog),
    Local(LocalCatalog),
}

impl CatalogSource {
    pub fn from_source(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            CatalogSource::Remote(RemoteCatalog {
                client: Client::new(),
                url: source.to_owned(),
            })
        } else {
            CatalogSource::Local(LocalCatalog {
                path: PathBuf::from(source),
            })
        }
    }
}

impl CatalogGetter for CatalogSource {
    async fn get_catalog(&self) -> Result<String, LoadError> {
        match self {
            CatalogSource::Remote(remote) => remote.get_catalog().await,
            CatalogSource::Local(local) => local.get_catalog().await,
        }
    }
}
