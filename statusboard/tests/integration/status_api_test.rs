//! HTTP API経由の問い合わせテスト

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use statusboard::health::{HealthMonitor, HttpProbe};
use statusboard::metrics::counter_store;
use statusboard::query::StatusService;
use statusboard::registry::{EndpointRegistry, FileEndpointSource};
use statusboard::shutdown::ShutdownController;
use statusboard::AppState;

use crate::support::http::spawn_status_board;
use crate::support::sites::{mock_site, write_sites_file};

async fn warmed_state(site_uris: &[String], metrics_enabled: bool) -> AppState {
    let lines: Vec<&str> = site_uris.iter().map(String::as_str).collect();
    let sites = write_sites_file(&lines);
    let registry = EndpointRegistry::load(&FileEndpointSource::new(sites.path()))
        .await
        .expect("sites should load");

    let shutdown = ShutdownController::new();
    let probe = HttpProbe::new(Duration::from_millis(300)).unwrap();
    // 監視ループはサーバーと同じシャットダウンで止まる
    let _handle = HealthMonitor::new(registry.clone(), Arc::new(probe))
        .with_interval(Duration::from_secs(60))
        .start(shutdown.clone())
        .await;

    AppState {
        status_service: StatusService::new(registry, counter_store(metrics_enabled)),
        shutdown,
    }
}

#[tokio::test]
async fn status_endpoints_over_http() {
    let fast = mock_site(200, Duration::ZERO).await;
    let slow = mock_site(200, Duration::from_millis(100)).await;
    let state = warmed_state(&[fast.uri(), slow.uri()], true).await;
    let server = spawn_status_board(state).await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/status/min")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["name"], fast.uri());
    assert_eq!(body["alive"], true);
    assert!(body["latency_ms"].as_f64().is_some());

    let res = client.get(server.url("/status/max")).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["name"], slow.uri());
    assert!(body["latency_ms"].as_f64().unwrap() >= 100.0);

    let res = client.get(server.url("/status/random")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(server.url("/status/site/unknown.example"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Unknown site: unknown.example");

    let res = client.get(server.url("/health")).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["endpoints"], 2);
    assert_eq!(body["available"], 2);

    let res = client.get(server.url("/metrics")).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    let total: u64 = body
        .as_object()
        .unwrap()
        .values()
        .map(|count| count.as_u64().unwrap())
        .sum();
    // min, max, randomの3回（不明サイトとhealthは数えない）
    assert_eq!(total, 3);

    server.stop().await;
}

#[tokio::test]
async fn no_available_sites_returns_no_content() {
    let hanging = mock_site(200, Duration::from_secs(5)).await;
    let state = warmed_state(&[hanging.uri()], false).await;
    let server = spawn_status_board(state).await;
    let client = reqwest::Client::new();

    for path in ["/status/min", "/status/max"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT, "{}", path);
        assert!(res.bytes().await.unwrap().is_empty());
    }

    // randomは停止中のサイトも返す
    let res = client.get(server.url("/status/random")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["alive"], false);
    assert!(body["latency_ms"].is_null());

    server.stop().await;
}
