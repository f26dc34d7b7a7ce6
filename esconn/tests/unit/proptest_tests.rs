//! Property-based tests using proptest

use proptest::prelude::*;

use esconn::cluster;
use esconn::metrics::ConnectivityMetrics;
use esconn_common::types::{ClusterDescriptor, NodeAddress, ProbeResult};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// cluster::load
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// 書き出した名前とノード一覧がそのまま読み戻せる（順序・重複も保持）
    #[test]
    fn loader_preserves_name_and_node_order(
        name in "[a-zA-Z0-9_-]{1,24}",
        nodes in prop::collection::vec("[a-z0-9.]{1,16}:[0-9]{1,5}", 0..8),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cluster.json");
        let body = serde_json::json!({ "cluster_name": name, "node_list": nodes });
        std::fs::write(&path, body.to_string()).unwrap();

        let loaded = runtime().block_on(cluster::load(&path)).unwrap();
        prop_assert_eq!(loaded, ClusterDescriptor::new(name, nodes));
    }
}

// ---------------------------------------------------------------------------
// NodeAddress::parse
// ---------------------------------------------------------------------------

proptest! {
    /// host:port 形式はホスト部・ポート部に正しく分解される
    #[test]
    fn node_address_splits_host_and_port(
        host in "[a-z0-9][a-z0-9.-]{0,30}",
        port in any::<u16>(),
    ) {
        let address = NodeAddress::parse(&format!("{host}:{port}")).unwrap();
        prop_assert_eq!(address.host(), host.as_str());
        prop_assert_eq!(address.port(), port);
    }

    /// コロンを含まない文字列は常に拒否される
    #[test]
    fn node_address_without_colon_is_rejected(raw in "[a-z0-9.]{0,30}") {
        prop_assert!(NodeAddress::parse(&raw).is_err());
    }
}

// ---------------------------------------------------------------------------
// ConnectivityMetrics::record
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// 異なるラベル組への並行書き込みは互いに干渉しない
    #[test]
    fn concurrent_records_on_distinct_pairs_are_isolated(
        values in prop::collection::vec((0i64..1000, 0i64..1000, 0i64..1000), 1..32),
    ) {
        let metrics = ConnectivityMetrics::new().unwrap();

        std::thread::scope(|scope| {
            for (i, (total, successful, failed)) in values.iter().enumerate() {
                let metrics = metrics.clone();
                scope.spawn(move || {
                    metrics.record(
                        &format!("10.0.0.{i}"),
                        "prop",
                        &ProbeResult::new(*total, *successful, *failed),
                    );
                });
            }
        });

        for (i, (total, successful, failed)) in values.iter().enumerate() {
            prop_assert_eq!(
                metrics.sample(&format!("10.0.0.{i}"), "prop"),
                ProbeResult::new(*total, *successful, *failed)
            );
        }
    }

    /// 同じラベル組への書き込みは最後の値だけが残る
    #[test]
    fn last_record_wins(
        first in (0i64..1000, 0i64..1000, 0i64..1000),
        second in (0i64..1000, 0i64..1000, 0i64..1000),
    ) {
        let metrics = ConnectivityMetrics::new().unwrap();
        metrics.record("10.1.1.1", "prop", &ProbeResult::new(first.0, first.1, first.2));
        metrics.record("10.1.1.1", "prop", &ProbeResult::new(second.0, second.1, second.2));
        prop_assert_eq!(
            metrics.sample("10.1.1.1", "prop"),
            ProbeResult::new(second.0, second.1, second.2)
        );
    }
}
