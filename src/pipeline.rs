//! 報酬率流程
//!
//! 取得行情 → 建構報酬率序列 →（投資組合模式）加權彙總，並一律附上基準指數序列。
//! 各商品依呼叫順序逐一處理，任一商品失敗即中止整個流程。

pub mod error;

use std::path::PathBuf;
use tracing::info;

use crate::data_provider::MarketDataProvider;
use crate::domain_types::{FundamentalTable, Period, PortfolioSeries, PortfolioWeight, ReturnSeries};
use crate::output::ArtifactWriter;
use crate::returns::{AlignmentPolicy, PortfolioAggregator, ReturnSeriesBuilder, WeightedSeries};

pub use error::{PipelineError, PipelineResult};

/// 單一商品模式的結果
#[derive(Debug, Clone, PartialEq)]
pub struct SingleTickerReport {
    pub ticker: String,
    pub prices: ReturnSeries,
    pub financials: FundamentalTable,
    pub balance_sheet: FundamentalTable,
    pub benchmark: ReturnSeries,
}

impl SingleTickerReport {
    /// 寫出報酬率、基本面快照與基準指數
    pub fn write_to(&self, writer: &ArtifactWriter) -> PipelineResult<Vec<PathBuf>> {
        Ok(vec![
            writer.write_prices(&self.prices)?,
            writer.write_financials(&self.financials)?,
            writer.write_balance_sheet(&self.balance_sheet)?,
            writer.write_benchmark(&self.benchmark)?,
        ])
    }
}

/// 投資組合模式的結果
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioReport {
    pub portfolio: PortfolioSeries,
    pub benchmark: ReturnSeries,
}

impl PortfolioReport {
    /// 寫出投資組合序列與基準指數
    pub fn write_to(&self, writer: &ArtifactWriter) -> PipelineResult<Vec<PathBuf>> {
        Ok(vec![
            writer.write_portfolio(self.portfolio.series())?,
            writer.write_benchmark(&self.benchmark)?,
        ])
    }
}

/// 報酬率流程
pub struct ReturnsPipeline<P> {
    provider: P,
    benchmark_symbol: String,
    aggregator: PortfolioAggregator,
}

impl<P: MarketDataProvider> ReturnsPipeline<P> {
    pub fn new(provider: P, benchmark_symbol: impl Into<String>, alignment: AlignmentPolicy) -> Self {
        Self {
            provider,
            benchmark_symbol: benchmark_symbol.into(),
            aggregator: PortfolioAggregator::new(alignment),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn benchmark_symbol(&self) -> &str {
        &self.benchmark_symbol
    }

    /// 取得單一商品行情並建構報酬率序列
    pub async fn returns_for(&self, ticker: &str, period: &Period) -> PipelineResult<ReturnSeries> {
        let raw = self.provider.fetch_history(ticker, period).await?;
        let series = ReturnSeriesBuilder::build(&raw);
        info!("{} 報酬率序列 {} 筆", ticker, series.len());
        Ok(series)
    }

    /// 基準指數報酬率序列，與投資組合權重無關
    pub async fn benchmark(&self, period: &Period) -> PipelineResult<ReturnSeries> {
        self.returns_for(&self.benchmark_symbol, period).await
    }

    /// 單一商品模式
    pub async fn run_single(&self, ticker: &str, period: &Period) -> PipelineResult<SingleTickerReport> {
        info!("開始單一商品流程: {} (區間 {})", ticker, period);

        let prices = self.returns_for(ticker, period).await?;
        let financials = self.provider.fetch_financials(ticker).await?;
        let balance_sheet = self.provider.fetch_balance_sheet(ticker).await?;
        let benchmark = self.benchmark(period).await?;

        Ok(SingleTickerReport {
            ticker: ticker.to_string(),
            prices,
            financials,
            balance_sheet,
            benchmark,
        })
    }

    /// 投資組合模式
    pub async fn run_portfolio(&self, basket: &[PortfolioWeight], period: &Period) -> PipelineResult<PortfolioReport> {
        info!("開始投資組合流程: {} 個成分 (區間 {})", basket.len(), period);

        let mut constituents = Vec::with_capacity(basket.len());
        for weight in basket {
            let series = self.returns_for(&weight.ticker, period).await?;
            constituents.push(WeightedSeries::new(weight.clone(), series));
        }

        let portfolio = self.aggregator.aggregate(&constituents)?;
        let benchmark = self.benchmark(period).await?;

        Ok(PortfolioReport { portfolio, benchmark })
    }
}
