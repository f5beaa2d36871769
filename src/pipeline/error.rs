use thiserror::Error;

use crate::data_provider::ProviderError;
use crate::output::OutputError;
use crate::returns::PortfolioError;

/// 報酬率流程錯誤類型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("數據來源錯誤: {0}")]
    Provider(#[from] ProviderError),

    #[error("投資組合彙總錯誤: {0}")]
    Portfolio(#[from] PortfolioError),

    #[error("輸出錯誤: {0}")]
    Output(#[from] OutputError),
}

/// 報酬率流程結果類型
pub type PipelineResult<T> = Result<T, PipelineError>;
