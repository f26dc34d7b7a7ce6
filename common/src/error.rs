//! エラー型定義
//!
//! 共通層のエラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Node address could not be split into host and port
    #[error("Invalid node address '{address}': {reason}")]
    InvalidNodeAddress {
        /// The raw address as written in the cluster file
        address: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for the common layer
pub type CommonResult<T> = Result<T, CommonError>;
