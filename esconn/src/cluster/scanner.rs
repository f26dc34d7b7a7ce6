//! ディレクトリスキャナー
//!
//! 監視ディレクトリ直下のエントリを列挙する。サブディレクトリには降りない。

use std::path::{Path, PathBuf};

use crate::error::{ExporterError, ExporterResult};

/// ディレクトリエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterFile {
    /// フルパス
    pub path: PathBuf,
    /// ファイル名（ログ用）
    pub file_name: String,
    /// ディレクトリかどうか（呼び出し側で除外する）
    pub is_dir: bool,
}

/// ディレクトリ直下のエントリをファイル名順で返す
pub async fn list_files(dir: &Path) -> ExporterResult<Vec<ClusterFile>> {
    let read_error = |source| ExporterError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_error)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        // シンボリックリンクは辿った先の種別で判定する
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        files.push(ClusterFile {
            path: entry.path(),
            file_name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

/// 起動時にターゲットディレクトリを検証する
///
/// 存在しない・ディレクトリでない・読めない場合は起動エラー。
pub async fn validate_target_dir(dir: &Path) -> ExporterResult<()> {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(ExporterError::InvalidTargetDir(dir.to_path_buf())),
    }
    match tokio::fs::read_dir(dir).await {
        Ok(_) => Ok(()),
        Err(_) => Err(ExporterError::InvalidTargetDir(dir.to_path_buf())),
    }
}
