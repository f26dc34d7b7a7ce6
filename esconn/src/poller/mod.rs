//! ポーリングループ
//!
//! ディレクトリ走査 → クラスタファイル読み込み → ノードプローブ → メトリクス書き込み

pub mod cycle;
pub mod scheduler;

pub use cycle::CycleSummary;
pub use scheduler::PollingScheduler;
