//! Yahoo Finance 數據來源
//!
//! 日線行情使用 chart API，基本面使用 fundamentals-timeseries API。

pub mod fundamentals;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::{ProviderError, ProviderResult};
use super::loader::MarketDataProvider;
use crate::config::ProviderConfig;
use crate::domain_types::{FundamentalTable, Period, RawObservation};
use crate::utils::{date_to_timestamp_secs, timestamp_to_local_date};
use fundamentals::{parse_timeseries, timeseries_types, BALANCE_SHEET_ITEMS, FINANCIALS_ITEMS};

/// 查無商品時 API 回傳的錯誤代碼
const NOT_FOUND_CODE: &str = "Not Found";

/// 日線
const DAILY_INTERVAL: &str = "1d";

/// 基本面查詢的起始日
const FUNDAMENTALS_START: (i32, u32, u32) = (2016, 12, 31);

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

/// API 回應中的錯誤區塊
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    events: ChartEvents,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ChartEvents {
    #[serde(default)]
    dividends: HashMap<String, DividendEvent>,
    #[serde(default)]
    splits: HashMap<String, SplitEvent>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct SplitEvent {
    date: i64,
    numerator: f64,
    denominator: f64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance 數據來源
#[derive(Debug, Clone)]
pub struct YahooFinanceProvider {
    client: Client,
    chart_url: String,
    fundamentals_url: String,
    auto_adjust: bool,
}

impl YahooFinanceProvider {
    /// 依配置建立 HTTP 客戶端
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            chart_url: config.chart_url.trim_end_matches('/').to_string(),
            fundamentals_url: config.fundamentals_url.trim_end_matches('/').to_string(),
            auto_adjust: config.auto_adjust,
        })
    }

    fn chart_endpoint(&self, ticker: &str) -> String {
        format!("{}/{}", self.chart_url, ticker)
    }

    fn fundamentals_endpoint(&self, ticker: &str) -> String {
        format!("{}/{}", self.fundamentals_url, ticker)
    }

    /// 發送 GET 請求並取回回應內容
    ///
    /// 404 的內容仍交由解析處理，因為查無商品時錯誤訊息在 JSON 中。
    async fn get_body(&self, ticker: &str, url: &str, query: &[(&str, String)]) -> ProviderResult<String> {
        debug!("GET {} {:?}", url, query);
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(ProviderError::Http {
                ticker: ticker.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(body)
    }

    async fn fetch_fundamentals(&self, ticker: &str, items: &[&str]) -> ProviderResult<FundamentalTable> {
        let (year, month, day) = FUNDAMENTALS_START;
        let start = NaiveDate::from_ymd_opt(year, month, day).map(date_to_timestamp_secs).unwrap_or_default();
        let query = [
            ("symbol", ticker.to_string()),
            ("type", timeseries_types(items)),
            ("period1", start.to_string()),
            ("period2", Utc::now().timestamp().to_string()),
        ];

        let body = self.get_body(ticker, &self.fundamentals_endpoint(ticker), &query).await?;
        parse_timeseries(ticker, &body, items)
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    async fn fetch_history(&self, ticker: &str, period: &Period) -> ProviderResult<Vec<RawObservation>> {
        let query = [
            ("range", period.to_string()),
            ("interval", DAILY_INTERVAL.to_string()),
            ("events", "div,splits".to_string()),
        ];

        let body = self.get_body(ticker, &self.chart_endpoint(ticker), &query).await?;
        let observations = parse_chart(ticker, &body, self.auto_adjust)?;
        info!("取得 {} 日線 {} 筆 (區間 {})", ticker, observations.len(), period);
        Ok(observations)
    }

    async fn fetch_financials(&self, ticker: &str) -> ProviderResult<FundamentalTable> {
        let table = self.fetch_fundamentals(ticker, FINANCIALS_ITEMS).await?;
        info!("取得 {} 損益表 {} 個科目", ticker, table.items().len());
        Ok(table)
    }

    async fn fetch_balance_sheet(&self, ticker: &str) -> ProviderResult<FundamentalTable> {
        let table = self.fetch_fundamentals(ticker, BALANCE_SHEET_ITEMS).await?;
        info!("取得 {} 資產負債表 {} 個科目", ticker, table.items().len());
        Ok(table)
    }
}

/// 將事件時間戳轉換為當地日期的對照表
fn events_by_date<T>(
    ticker: &str,
    events: &HashMap<String, T>,
    gmt_offset: i64,
    date_of: impl Fn(&T) -> i64,
    value_of: impl Fn(&T) -> f64,
) -> ProviderResult<HashMap<NaiveDate, f64>> {
    events
        .values()
        .map(|event| {
            timestamp_to_local_date(date_of(event), gmt_offset)
                .map(|date| (date, value_of(event)))
                .ok_or_else(|| ProviderError::malformed(ticker, format!("無效的事件時間戳 {}", date_of(event))))
        })
        .collect()
}

/// 解析 chart API 回應
///
/// 任一 OHLC 欄位為 null 的交易日略過；成交量為 null 視為 0。
/// `auto_adjust` 時以還原收盤價比例調整開高低收。
fn parse_chart(ticker: &str, body: &str, auto_adjust: bool) -> ProviderResult<Vec<RawObservation>> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::malformed(ticker, e.to_string()))?;

    if let Some(error) = response.chart.error {
        if error.code == NOT_FOUND_CODE {
            warn!("{} 查無資料: {}", ticker, error.description);
            return Ok(Vec::new());
        }
        return Err(ProviderError::Api {
            ticker: ticker.to_string(),
            code: error.code,
            description: error.description,
        });
    }

    let Some(data) = response.chart.result.and_then(|results| results.into_iter().next()) else {
        return Ok(Vec::new());
    };
    if data.timestamp.is_empty() {
        return Ok(Vec::new());
    }

    let quote = data
        .indicators
        .quote
        .first()
        .ok_or_else(|| ProviderError::malformed(ticker, "缺少 quote 指標"))?;
    let n = data.timestamp.len();
    if [&quote.open, &quote.high, &quote.low, &quote.close].iter().any(|col| col.len() != n) {
        return Err(ProviderError::malformed(ticker, "OHLC 欄位長度與時間戳不一致"));
    }

    let adj_close = data.indicators.adjclose.as_ref().and_then(|a| a.first());
    let gmt_offset = data.meta.gmtoffset;
    let dividends = events_by_date(ticker, &data.events.dividends, gmt_offset, |e| e.date, |e| e.amount)?;
    let splits = events_by_date(
        ticker,
        &data.events.splits,
        gmt_offset,
        |e| e.date,
        |e| e.numerator / e.denominator,
    )?;

    let mut observations = Vec::with_capacity(n);
    for (i, &ts) in data.timestamp.iter().enumerate() {
        let date = timestamp_to_local_date(ts, gmt_offset)
            .ok_or_else(|| ProviderError::malformed(ticker, format!("無效的時間戳 {ts}")))?;

        let (Some(mut open), Some(mut high), Some(mut low), Some(mut close)) =
            (quote.open[i], quote.high[i], quote.low[i], quote.close[i])
        else {
            debug!("{} {} 行情不完整，略過", ticker, date);
            continue;
        };

        if auto_adjust {
            if let Some(adj) = adj_close.and_then(|a| a.adjclose.get(i).copied().flatten()) {
                let ratio = adj / close;
                if ratio.is_finite() {
                    open *= ratio;
                    high *= ratio;
                    low *= ratio;
                    close = adj;
                }
            }
        }

        observations.push(RawObservation {
            date,
            open,
            high,
            low,
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0.0),
            dividends: dividends.get(&date).copied().unwrap_or(0.0),
            stock_splits: splits.get(&date).copied().unwrap_or(0.0),
        });
    }

    Ok(observations)
}
