//! scan サブコマンドの統合テスト

use clap::Parser;
use esconn::cli::{self, Cli, Commands};

use crate::support::cluster::write_cluster_file;
use crate::support::elasticsearch::spawn_node;

#[tokio::test]
async fn scan_command_prints_exposition() {
    let node = spawn_node(4, 4, 0).await;
    let dir = tempfile::tempdir().unwrap();
    write_cluster_file(
        dir.path(),
        "audit.json",
        "audit",
        &[&node.address().to_string()],
    );

    let folder = dir.path().to_str().unwrap();
    let cli = Cli::try_parse_from(["esconn", "scan", "--folder", folder]).unwrap();
    let Commands::Scan(args) = cli.into_command() else {
        panic!("expected scan");
    };

    let exposition = cli::scan::execute(&args).await.unwrap();
    assert!(exposition.contains(
        "elasticsearch_node_connectivity_successful{cluster=\"audit\",ip=\"127.0.0.1\"} 4"
    ));
}

#[tokio::test]
async fn scan_command_rejects_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let cli = Cli::try_parse_from(["esconn", "scan", "--folder", missing.to_str().unwrap()])
        .unwrap();
    let Commands::Scan(args) = cli.into_command() else {
        panic!("expected scan");
    };

    let err = cli::scan::execute(&args).await.unwrap_err();
    assert_eq!(err.kind(), "startup");
}
