//! テスト共通ユーティリティ

pub mod cluster;
