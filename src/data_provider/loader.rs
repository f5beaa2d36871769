use async_trait::async_trait;

use super::error::ProviderResult;
use crate::domain_types::{FundamentalTable, Period, RawObservation};

/// 數據來源特性 - 定義行情與基本面資料的取得接口
///
/// 實作只負責取得資料，不做快取或重試；任何錯誤直接回傳給呼叫端。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 取得指定區間的日線行情，依日期遞增排列
    ///
    /// 查無資料（例如已下市的代碼）回傳空序列而非錯誤。
    async fn fetch_history(&self, ticker: &str, period: &Period) -> ProviderResult<Vec<RawObservation>>;

    /// 取得年度損益表快照
    async fn fetch_financials(&self, ticker: &str) -> ProviderResult<FundamentalTable>;

    /// 取得年度資產負債表快照
    async fn fetch_balance_sheet(&self, ticker: &str) -> ProviderResult<FundamentalTable>;
}
