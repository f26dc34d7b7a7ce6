//! esconn 共通クレート
//!
//! クラスタ定義・ノードアドレス・プローブ結果などのデータ型と、
//! それらに付随するエラー型・設定デフォルト値を提供する。

#![warn(missing_docs)]

/// 設定のデフォルト値
pub mod config;

/// エラー型定義
pub mod error;

/// Elasticsearchとのワイヤフォーマット
pub mod protocol;

/// コアデータ型
pub mod types;
