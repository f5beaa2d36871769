//! 報酬率計算錯誤定義

use thiserror::Error;

/// 投資組合彙總錯誤類型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    #[error("成分序列日期不一致: {ticker} 有 {actual_rows} 筆，基準成分 {reference} 有 {expected_rows} 筆")]
    MisalignedSeries {
        ticker: String,
        reference: String,
        expected_rows: usize,
        actual_rows: usize,
    },
}

/// 投資組合彙總結果類型
pub type PortfolioResult<T> = Result<T, PortfolioError>;
