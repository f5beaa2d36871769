#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

use portfolio_returns::data_provider::{MarketDataProvider, ProviderError, ProviderResult};
use portfolio_returns::domain_types::{FundamentalTable, Period, RawObservation};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 依收盤價建立連續日期的行情，其餘價格欄位等於收盤價
pub fn raw_closes(start: NaiveDate, closes: &[f64]) -> Vec<RawObservation> {
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let day = start + chrono::Duration::days(i as i64);
            RawObservation::ohlcv(day, *close, *close, *close, *close, 1_000.0)
        })
        .collect()
}

/// 記錄呼叫順序的測試用數據來源
#[derive(Default)]
pub struct StubProvider {
    histories: HashMap<String, Vec<RawObservation>>,
    failing: Vec<String>,
    fundamentals: FundamentalTable,
    calls: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, ticker: &str, rows: Vec<RawObservation>) -> Self {
        self.histories.insert(ticker.to_string(), rows);
        self
    }

    /// 指定代碼取行情時回傳 HTTP 錯誤
    pub fn failing_on(mut self, ticker: &str) -> Self {
        self.failing.push(ticker.to_string());
        self
    }

    pub fn with_fundamentals(mut self, table: FundamentalTable) -> Self {
        self.fundamentals = table;
        self
    }

    /// 呼叫紀錄，格式為 `方法:代碼`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &str, ticker: &str) {
        self.calls.lock().unwrap().push(format!("{method}:{ticker}"));
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn fetch_history(&self, ticker: &str, _period: &Period) -> ProviderResult<Vec<RawObservation>> {
        self.record("history", ticker);
        if self.failing.iter().any(|t| t == ticker) {
            return Err(ProviderError::Http {
                ticker: ticker.to_string(),
                status: 500,
            });
        }
        Ok(self.histories.get(ticker).cloned().unwrap_or_default())
    }

    async fn fetch_financials(&self, ticker: &str) -> ProviderResult<FundamentalTable> {
        self.record("financials", ticker);
        Ok(self.fundamentals.clone())
    }

    async fn fetch_balance_sheet(&self, ticker: &str) -> ProviderResult<FundamentalTable> {
        self.record("balance_sheet", ticker);
        Ok(self.fundamentals.clone())
    }
}
