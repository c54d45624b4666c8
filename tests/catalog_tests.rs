//! Catalog client tests against a local stand-in for the Jikan API.

use anitrack::clients::{CatalogError, CatalogSource, JikanClient};
use anitrack::config::CatalogConfig;
use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

async fn anime_handler(Path(id): Path<i32>) -> Response {
    match id {
        1 => Json(json!({
            "data": {
                "mal_id": 1,
                "title": "X",
                "synopsis": null,
                "episodes": 12,
                "status": "Finished Airing",
                "aired": { "from": "2020-01-01", "to": "2020-03-01" },
                "broadcast": { "string": "Sundays at 17:00" },
                "score": 7.1
            }
        }))
        .into_response(),
        2 => Json(json!({ "pagination": {} })).into_response(),
        3 => Json(json!({ "data": { "mal_id": 3, "title": "No dates" } })).into_response(),
        429 => (StatusCode::TOO_MANY_REQUESTS, "slow down").into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "status": 404 }))).into_response(),
    }
}

async fn spawn_catalog() -> JikanClient {
    let app = Router::new().route("/v4/anime/{id}", get(anime_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub catalog");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    JikanClient::new(&CatalogConfig {
        base_url: format!("http://{addr}/v4"),
        request_timeout_seconds: 5,
    })
    .expect("failed to build client")
}

#[tokio::test]
async fn test_fetch_anime_normalizes_document() {
    let client = spawn_catalog().await;

    let anime = client.fetch_anime(1).await.unwrap();
    assert_eq!(anime.external_id, 1);
    assert_eq!(anime.title, "X");
    assert_eq!(anime.synopsis, None);
    assert_eq!(anime.episode_count, Some(12));
    assert_eq!(anime.air_start.as_deref(), Some("2020-01-01"));
    assert_eq!(anime.air_end.as_deref(), Some("2020-03-01"));
    assert_eq!(anime.broadcast_slot.as_deref(), Some("Sundays at 17:00"));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let client = spawn_catalog().await;

    assert!(matches!(
        client.fetch_anime(999).await,
        Err(CatalogError::NotFound(999))
    ));
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let client = spawn_catalog().await;

    match client.fetch_anime(429).await {
        Err(CatalogError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_data_is_rejected() {
    let client = spawn_catalog().await;

    assert!(matches!(
        client.fetch_anime(2).await,
        Err(CatalogError::MissingData)
    ));
    assert!(matches!(
        client.fetch_anime(3).await,
        Err(CatalogError::Decode(_))
    ));
}

#[tokio::test]
async fn test_fetch_returns_raw_data_object() {
    let client = spawn_catalog().await;

    let raw = client.fetch(1).await.unwrap();
    assert_eq!(raw["score"], 7.1);
    assert_eq!(JikanClient::normalize(&raw).unwrap().title, "X");
}
