//! 輸出錯誤定義

use std::path::PathBuf;
use thiserror::Error;

/// 輸出錯誤類型
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("無法建立輸出目錄 {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("檔案寫入錯誤: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Polars 錯誤: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

/// 輸出結果類型
pub type OutputResult<T> = Result<T, OutputError>;
