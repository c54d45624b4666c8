pub mod jikan;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::NewAnime;

pub use jikan::JikanClient;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Anime {0} not found in catalog")]
    NotFound(i32),

    #[error("Catalog API error: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed catalog document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Catalog response has no data object")]
    MissingData,
}

/// Source of normalized anime records keyed by catalog id.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_anime(&self, mal_id: i32) -> Result<NewAnime, CatalogError>;
}
