//! スキャンサイクルの集計

use crate::health::ProbeOutcome;

/// 1サイクル分の処理件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// 読み込めたクラスタファイル数
    pub files_loaded: usize,
    /// 読み込みに失敗したクラスタファイル数
    pub files_failed: usize,
    /// `_nodes` を取得できたプローブ数
    pub probes_reported: usize,
    /// 通信エラーになったプローブ数
    pub probes_transport_failed: usize,
    /// ボディのパースに失敗したプローブ数
    pub probes_decode_failed: usize,
    /// 不正なアドレスとして除外したノード数
    pub addresses_skipped: usize,
}

impl CycleSummary {
    /// 読み込み失敗したファイル1件分
    pub fn file_failed() -> Self {
        Self {
            files_failed: 1,
            ..Self::default()
        }
    }

    /// プローブ結果を1件数える
    pub fn count_probe(&mut self, outcome: &ProbeOutcome) {
        match outcome {
            ProbeOutcome::Reported(_) => self.probes_reported += 1,
            ProbeOutcome::TransportError(_) => self.probes_transport_failed += 1,
            ProbeOutcome::DecodeError(_) => self.probes_decode_failed += 1,
        }
    }

    /// 別の集計を加算する
    pub fn merge(&mut self, other: CycleSummary) {
        self.files_loaded += other.files_loaded;
        self.files_failed += other.files_failed;
        self.probes_reported += other.probes_reported;
        self.probes_transport_failed += other.probes_transport_failed;
        self.probes_decode_failed += other.probes_decode_failed;
        self.addresses_skipped += other.addresses_skipped;
    }

    /// 実行したプローブの総数
    pub fn probes_total(&self) -> usize {
        self.probes_reported + self.probes_transport_failed + self.probes_decode_failed
    }
}
