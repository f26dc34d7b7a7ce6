//! スキャンサイクル全体の統合テスト
//!
//! 実ディレクトリ + モックElasticsearchノードでサイクルを実行し、
//! メトリクスに書き込まれる値を確認する。

use std::time::Duration;

use esconn::config::{OverlapPolicy, PollerConfig};
use esconn::metrics::ConnectivityMetrics;
use esconn::poller::PollingScheduler;
use esconn::shutdown::ShutdownController;
use esconn_common::types::ProbeResult;

use crate::support::cluster::{write_cluster_file, write_raw_file};
use crate::support::elasticsearch::{closed_port_address, spawn_node};

fn fast_config() -> PollerConfig {
    PollerConfig {
        interval: Duration::from_secs(60),
        probe_timeout: Duration::from_secs(1),
        overlap: OverlapPolicy::Allow,
        max_concurrent_probes: 16,
    }
}

fn scheduler(dir: &std::path::Path, metrics: &ConnectivityMetrics) -> PollingScheduler {
    PollingScheduler::new(
        dir,
        fast_config(),
        metrics.clone(),
        ShutdownController::default(),
    )
    .unwrap()
}

/// 健全なノードは自己申告値をそのまま、到達不能なノードは failed=1 を報告する
#[tokio::test]
async fn healthy_and_unreachable_nodes_are_reported_independently() {
    let node = spawn_node(3, 3, 0).await;
    let dead = closed_port_address();

    let dir = tempfile::tempdir().unwrap();
    write_cluster_file(
        dir.path(),
        "prod.json",
        "prod",
        &[&node.address().to_string()],
    );
    write_cluster_file(dir.path(), "legacy.json", "legacy", &[&dead]);

    let metrics = ConnectivityMetrics::new().unwrap();
    let summary = scheduler(dir.path(), &metrics).scan_once().await.unwrap();

    assert_eq!(summary.files_loaded, 2);
    assert_eq!(summary.probes_reported, 1);
    assert_eq!(summary.probes_transport_failed, 1);

    assert_eq!(metrics.sample("127.0.0.1", "prod"), ProbeResult::new(3, 3, 0));
    assert_eq!(
        metrics.sample("127.0.0.1", "legacy"),
        ProbeResult::transport_failure()
    );
    assert_eq!(metrics.probe_error_count("transport"), 1);
    assert_eq!(metrics.scan_cycle_count("completed"), 1);
}

/// 同じクラスタ内の健全なノードと到達不能なノードがそれぞれの ip ラベルで記録される
#[tokio::test]
async fn one_cluster_with_healthy_and_unreachable_node() {
    let node = spawn_node(3, 3, 0).await;

    let dir = tempfile::tempdir().unwrap();
    write_cluster_file(
        dir.path(),
        "c1.json",
        "c1",
        &[&node.address().to_string(), "127.0.0.2:1"],
    );

    let metrics = ConnectivityMetrics::new().unwrap();
    let summary = scheduler(dir.path(), &metrics).scan_once().await.unwrap();

    assert_eq!(summary.files_loaded, 1);
    assert_eq!(summary.probes_reported, 1);
    assert_eq!(summary.probes_transport_failed, 1);
    assert_eq!(metrics.sample("127.0.0.1", "c1"), ProbeResult::new(3, 3, 0));
    assert_eq!(metrics.sample("127.0.0.2", "c1"), ProbeResult::new(0, 0, 1));
}

/// 壊れた定義ファイルがあっても同じサイクルの他のファイルは処理される
#[tokio::test]
async fn malformed_file_does_not_block_other_files() {
    let node = spawn_node(5, 4, 1).await;

    let dir = tempfile::tempdir().unwrap();
    write_raw_file(dir.path(), "broken.json", "{ \"cluster_name\": ");
    write_cluster_file(
        dir.path(),
        "ok.json",
        "search",
        &[&node.address().to_string()],
    );

    let metrics = ConnectivityMetrics::new().unwrap();
    let summary = scheduler(dir.path(), &metrics).scan_once().await.unwrap();

    assert_eq!(summary.files_loaded, 1);
    assert_eq!(summary.files_failed, 1);
    assert_eq!(metrics.config_error_count("parse"), 1);
    assert_eq!(metrics.sample("127.0.0.1", "search"), ProbeResult::new(5, 4, 1));
}

/// ポート無し・不正なアドレスはスキップされ、残りのノードは処理される
#[tokio::test]
async fn malformed_addresses_are_skipped() {
    let node = spawn_node(2, 2, 0).await;

    let dir = tempfile::tempdir().unwrap();
    write_cluster_file(
        dir.path(),
        "mixed.json",
        "mixed",
        &["no-port-here", "a:b:c", &node.address().to_string()],
    );

    let metrics = ConnectivityMetrics::new().unwrap();
    let summary = scheduler(dir.path(), &metrics).scan_once().await.unwrap();

    assert_eq!(summary.addresses_skipped, 2);
    assert_eq!(summary.probes_reported, 1);
    assert_eq!(metrics.config_error_count("address"), 2);

    let exposition = metrics.gather().unwrap();
    assert!(!exposition.contains("no-port-here"));
    assert!(exposition.contains(
        "elasticsearch_node_connectivity_total{cluster=\"mixed\",ip=\"127.0.0.1\"} 2"
    ));
}

/// 後のサイクルの結果で前の値が上書きされる
#[tokio::test]
async fn later_cycle_overwrites_previous_values() {
    let dir = tempfile::tempdir().unwrap();
    let metrics = ConnectivityMetrics::new().unwrap();

    let node = spawn_node(3, 3, 0).await;
    write_cluster_file(
        dir.path(),
        "prod.json",
        "prod",
        &[&node.address().to_string()],
    );
    let scheduler = scheduler(dir.path(), &metrics);
    scheduler.scan_once().await.unwrap();
    assert_eq!(metrics.sample("127.0.0.1", "prod"), ProbeResult::new(3, 3, 0));

    // 同じ (ip, cluster) が到達不能なアドレスを指すように書き換える
    write_cluster_file(dir.path(), "prod.json", "prod", &[&closed_port_address()]);
    scheduler.scan_once().await.unwrap();
    assert_eq!(
        metrics.sample("127.0.0.1", "prod"),
        ProbeResult::transport_failure()
    );
    assert_eq!(metrics.scan_cycle_count("completed"), 2);
}

/// サブディレクトリは無視される
#[tokio::test]
async fn subdirectories_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    write_cluster_file(&dir.path().join("nested"), "inner.json", "inner", &["127.0.0.1:1"]);

    let metrics = ConnectivityMetrics::new().unwrap();
    let summary = scheduler(dir.path(), &metrics).scan_once().await.unwrap();

    assert_eq!(summary.files_loaded, 0);
    assert_eq!(summary.probes_total(), 0);
}

/// ディレクトリが消えた場合はサイクルがスキップされる
#[tokio::test]
async fn missing_directory_fails_the_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("gone");

    let metrics = ConnectivityMetrics::new().unwrap();
    let err = scheduler(&target, &metrics).scan_once().await.unwrap_err();

    assert_eq!(err.kind(), "directory");
    assert_eq!(metrics.config_error_count("directory"), 1);
    assert_eq!(metrics.scan_cycle_count("failed"), 1);
}
