//! 輸出模組
//!
//! 將報酬率序列、基本面快照與執行紀錄寫入配置指定的目錄。

pub mod error;
pub mod writer;

pub use error::{OutputError, OutputResult};
pub use writer::{ArtifactWriter, RunReceipt};
