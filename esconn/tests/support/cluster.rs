use std::path::{Path, PathBuf};

use serde_json::json;

/// クラスタ定義ファイルを書き出す
#[allow(dead_code)]
pub fn write_cluster_file(dir: &Path, file_name: &str, cluster: &str, nodes: &[&str]) -> PathBuf {
    let path = dir.join(file_name);
    let body = json!({
        "cluster_name": cluster,
        "node_list": nodes,
    });
    std::fs::write(&path, serde_json::to_vec_pretty(&body).unwrap()).unwrap();
    path
}

/// 任意の内容でファイルを書き出す（壊れた定義ファイル用）
#[allow(dead_code)]
pub fn write_raw_file(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, content).unwrap();
    path
}
