//! クラスタ定義ファイルの発見と読み込み
//!
//! 監視ディレクトリをサイクルごとに走査し（再帰なし）、
//! 各JSONファイルを [`ClusterDescriptor`](esconn_common::types::ClusterDescriptor) に変換する。

pub mod loader;
pub mod scanner;

pub use loader::load;
pub use scanner::{list_files, validate_target_dir, ClusterFile};
