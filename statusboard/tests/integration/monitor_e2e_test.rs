//! 実サイト（wiremock）に対する監視の結合テスト

use std::sync::Arc;
use std::time::Duration;

use statusboard::common::error::{SourceError, StatusError};
use statusboard::health::{HealthMonitor, HttpProbe, MonitorState};
use statusboard::metrics::counter_store;
use statusboard::query::StatusService;
use statusboard::registry::{EndpointRegistry, FileEndpointSource};
use statusboard::shutdown::ShutdownController;

use crate::support::sites::{mock_site, write_sites_file};

#[tokio::test]
async fn warm_up_classifies_sites_and_answers_queries() {
    let fast = mock_site(200, Duration::ZERO).await;
    let failing = mock_site(500, Duration::from_millis(150)).await;
    let hanging = mock_site(200, Duration::from_secs(5)).await;

    let sites = write_sites_file(&[&fast.uri(), &failing.uri(), &hanging.uri()]);
    let registry = EndpointRegistry::load(&FileEndpointSource::new(sites.path()))
        .await
        .expect("sites should load");
    assert_eq!(registry.len(), 3);

    let probe = HttpProbe::new(Duration::from_secs(1)).expect("client should build");
    let shutdown = ShutdownController::new();
    let handle = HealthMonitor::new(registry.clone(), Arc::new(probe))
        .with_interval(Duration::from_secs(60))
        .start(shutdown.clone())
        .await;
    assert_eq!(handle.state(), MonitorState::Running);

    let service = StatusService::new(registry, counter_store(true));

    // 5xxでも応答があれば稼働中
    let failing_status = service.get(&failing.uri()).unwrap();
    assert!(failing_status.alive);
    assert!(failing_status.latency.unwrap() >= Duration::from_millis(150));

    let hanging_status = service.get(&hanging.uri()).unwrap();
    assert!(!hanging_status.alive);
    assert_eq!(hanging_status.latency, None);

    assert_eq!(service.get_min().unwrap().name, fast.uri());
    assert_eq!(service.get_max().unwrap().name, failing.uri());

    let snapshot = service.counters().snapshot();
    assert_eq!(snapshot[&fast.uri()], 1);
    assert_eq!(snapshot[&failing.uri()], 2);
    assert_eq!(snapshot[&hanging.uri()], 1);

    handle.stop();
    tokio::time::timeout(Duration::from_secs(3), handle.join())
        .await
        .expect("monitor should drain");
}

#[tokio::test]
async fn sites_file_skips_comments_invalid_lines_and_duplicates() {
    let sites = write_sites_file(&[
        "# production sites",
        "",
        "site-a.example",
        "ftp://files.example",
        "https://site-b.example",
        "site-a.example",
    ]);

    let registry = EndpointRegistry::load(&FileEndpointSource::new(sites.path()))
        .await
        .expect("sites should load");

    let names: Vec<String> = registry
        .list()
        .iter()
        .map(|endpoint| endpoint.name().to_string())
        .collect();
    assert_eq!(names, vec!["site-a.example", "https://site-b.example"]);
}

#[tokio::test]
async fn missing_sites_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileEndpointSource::new(dir.path().join("missing.txt"));

    let err = EndpointRegistry::load(&source).await.unwrap_err();
    assert!(matches!(err, SourceError::Io { .. }));
}

#[tokio::test]
async fn sites_file_without_valid_entries_is_fatal() {
    let sites = write_sites_file(&["# nothing here", "   "]);

    let err = EndpointRegistry::load(&FileEndpointSource::new(sites.path()))
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::NoEndpoints { .. }));
}

#[tokio::test]
async fn periodic_checks_pick_up_recovered_site() {
    let site = mock_site(200, Duration::from_secs(5)).await;
    let sites = write_sites_file(&[&site.uri()]);
    let registry = EndpointRegistry::load(&FileEndpointSource::new(sites.path()))
        .await
        .unwrap();

    let probe = HttpProbe::new(Duration::from_millis(200)).unwrap();
    let handle = HealthMonitor::new(registry.clone(), Arc::new(probe))
        .with_interval(Duration::from_millis(100))
        .start(ShutdownController::new())
        .await;

    let service = StatusService::new(registry, counter_store(false));
    assert_eq!(service.get_min(), Err(StatusError::Empty));

    // 遅延なしの応答に差し替える
    site.reset().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(200))
        .mount(&site)
        .await;

    let recovered = tokio::time::timeout(Duration::from_secs(3), async {
        loop {
            if let Ok(status) = service.get_min() {
                return status;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await
    .expect("site should recover");
    assert_eq!(recovered.name, site.uri());

    handle.stop();
    tokio::time::timeout(Duration::from_secs(2), handle.join())
        .await
        .expect("monitor should drain");
}
