use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{CatalogError, CatalogSource};
use crate::config::CatalogConfig;
use crate::models::NewAnime;

/// The slice of a Jikan `/anime/{id}` document that gets stored.
///
/// Every key must be present; the nullable ones may carry `null`.
#[derive(Debug, Deserialize)]
struct MalAnime {
    mal_id: i32,
    title: String,
    #[serde(deserialize_with = "Option::deserialize")]
    synopsis: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    episodes: Option<i32>,
    status: String,
    aired: Aired,
    broadcast: Broadcast,
}

#[derive(Debug, Deserialize)]
struct Aired {
    #[serde(deserialize_with = "Option::deserialize")]
    from: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    to: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Broadcast {
    #[serde(deserialize_with = "Option::deserialize")]
    string: Option<String>,
}

impl From<MalAnime> for NewAnime {
    fn from(anime: MalAnime) -> Self {
        Self {
            external_id: anime.mal_id,
            title: anime.title,
            synopsis: anime.synopsis,
            episode_count: anime.episodes,
            status: anime.status,
            air_start: anime.aired.from,
            air_end: anime.aired.to,
            broadcast_slot: anime.broadcast.string,
        }
    }
}

#[derive(Clone)]
pub struct JikanClient {
    client: Client,
    base_url: String,
}

impl JikanClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = Client::builder();
        if config.request_timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(u64::from(
                config.request_timeout_seconds,
            )));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn anime_url(&self, mal_id: i32) -> String {
        format!("{}/anime/{}", self.base_url, mal_id)
    }

    /// Fetches the raw `data` object for one catalog entry.
    pub async fn fetch(&self, mal_id: i32) -> Result<Value, CatalogError> {
        let url = self.anime_url(mal_id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(mal_id));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let document: Value = serde_json::from_slice(&bytes)?;

        match document {
            Value::Object(mut map) => map.remove("data").ok_or(CatalogError::MissingData),
            _ => Err(CatalogError::MissingData),
        }
    }

    /// Projects a raw `data` object onto the stored anime fields.
    pub fn normalize(raw: &Value) -> Result<NewAnime, CatalogError> {
        let anime = MalAnime::deserialize(raw)?;
        Ok(anime.into())
    }

    pub async fn get_anime(&self, mal_id: i32) -> Result<NewAnime, CatalogError> {
        let raw = self.fetch(mal_id).await?;
        Self::normalize(&raw)
    }
}

#[async_trait]
impl CatalogSource for JikanClient {
    async fn fetch_anime(&self, mal_id: i32) -> Result<NewAnime, CatalogError> {
        self.get_anime(mal_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "mal_id": 1,
            "url": "https://myanimelist.net/anime/1/Cowboy_Bebop",
            "title": "X",
            "title_english": "Cowboy Bebop",
            "synopsis": "Space bounty hunters.",
            "episodes": 26,
            "status": "Finished Airing",
            "score": 8.75,
            "aired": {
                "from": "2020-01-01",
                "to": "2020-03-01",
                "prop": { "from": { "day": 1, "month": 1, "year": 2020 } }
            },
            "broadcast": {
                "day": "Sundays",
                "time": "17:00",
                "string": "Sundays at 17:00"
            },
            "genres": [{ "mal_id": 1, "name": "Action" }]
        })
    }

    #[test]
    fn test_normalize_projects_stored_fields() {
        let anime = JikanClient::normalize(&sample()).unwrap();

        assert_eq!(
            anime,
            NewAnime {
                external_id: 1,
                title: "X".to_string(),
                synopsis: Some("Space bounty hunters.".to_string()),
                episode_count: Some(26),
                status: "Finished Airing".to_string(),
                air_start: Some("2020-01-01".to_string()),
                air_end: Some("2020-03-01".to_string()),
                broadcast_slot: Some("Sundays at 17:00".to_string()),
            }
        );
    }

    #[test]
    fn test_normalize_keeps_nulls() {
        let mut raw = sample();
        raw["aired"]["to"] = Value::Null;
        raw["broadcast"]["string"] = Value::Null;
        raw["episodes"] = Value::Null;

        let anime = JikanClient::normalize(&raw).unwrap();
        assert_eq!(anime.air_end, None);
        assert_eq!(anime.broadcast_slot, None);
        assert_eq!(anime.episode_count, None);
    }

    #[test]
    fn test_normalize_rejects_missing_nested_keys() {
        let mut raw = sample();
        raw["aired"].as_object_mut().unwrap().remove("to");
        assert!(matches!(
            JikanClient::normalize(&raw),
            Err(CatalogError::Decode(_))
        ));

        let mut raw = sample();
        raw.as_object_mut().unwrap().remove("broadcast");
        assert!(matches!(
            JikanClient::normalize(&raw),
            Err(CatalogError::Decode(_))
        ));

        let mut raw = sample();
        raw.as_object_mut().unwrap().remove("synopsis");
        assert!(JikanClient::normalize(&raw).is_err());
    }

    #[test]
    fn test_anime_url() {
        let config = CatalogConfig {
            base_url: "http://localhost:9000/v4/".to_string(),
            request_timeout_seconds: 0,
        };
        let client = JikanClient::new(&config).unwrap();
        assert_eq!(client.anime_url(21), "http://localhost:9000/v4/anime/21");
    }
}
