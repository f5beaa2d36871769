//! 數據來源錯誤定義

use thiserror::Error;

/// 數據來源錯誤類型
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("請求失敗: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{ticker} 回應 HTTP 狀態 {status}")]
    Http { ticker: String, status: u16 },

    #[error("{ticker} API 錯誤 [{code}]: {description}")]
    Api {
        ticker: String,
        code: String,
        description: String,
    },

    #[error("{ticker} 回應格式錯誤: {reason}")]
    Malformed { ticker: String, reason: String },
}

impl ProviderError {
    pub fn malformed(ticker: &str, reason: impl Into<String>) -> Self {
        ProviderError::Malformed {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }
}

/// 數據來源結果類型
pub type ProviderResult<T> = Result<T, ProviderError>;
