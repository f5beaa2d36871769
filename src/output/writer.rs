//! 輸出檔案寫入器

use polars::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use super::error::{OutputError, OutputResult};
use crate::config::OutputConfig;
use crate::domain_types::{FundamentalTable, Period, ReturnSeries};

/// 執行紀錄，用於確認輸入與執行結果
#[derive(Debug, Clone, PartialEq)]
pub enum RunReceipt {
    /// 單一商品：記錄代碼
    Single { ticker: String },
    /// 投資組合：依序記錄區間、代碼清單、權重清單
    Portfolio {
        period: Period,
        tickers: String,
        weights: String,
    },
}

impl RunReceipt {
    pub fn contents(&self) -> String {
        match self {
            RunReceipt::Single { ticker } => ticker.clone(),
            RunReceipt::Portfolio {
                period,
                tickers,
                weights,
            } => format!("{period}\n{tickers}\n{weights}\n"),
        }
    }
}

/// 輸出檔案寫入器
///
/// 所有檔案寫入 `OutputConfig::directory`，UTF-8、逗號分隔並包含標題列。
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    config: OutputConfig,
}

impl ArtifactWriter {
    /// 建立寫入器，輸出目錄不存在時自動建立
    pub fn new(config: OutputConfig) -> OutputResult<Self> {
        let dir = config.directory();
        fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// 主要商品的報酬率序列
    pub fn write_prices(&self, series: &ReturnSeries) -> OutputResult<PathBuf> {
        self.write_series(&self.config.prices_file, series)
    }

    /// 投資組合報酬率序列
    pub fn write_portfolio(&self, series: &ReturnSeries) -> OutputResult<PathBuf> {
        self.write_series(&self.config.portfolio_file, series)
    }

    /// 基準指數報酬率序列
    pub fn write_benchmark(&self, series: &ReturnSeries) -> OutputResult<PathBuf> {
        self.write_series(&self.config.benchmark_file, series)
    }

    pub fn write_financials(&self, table: &FundamentalTable) -> OutputResult<PathBuf> {
        self.write_fundamentals(&self.config.financials_file, table)
    }

    pub fn write_balance_sheet(&self, table: &FundamentalTable) -> OutputResult<PathBuf> {
        self.write_fundamentals(&self.config.balance_sheet_file, table)
    }

    pub fn write_receipt(&self, receipt: &RunReceipt) -> OutputResult<PathBuf> {
        let path = self.config.path_for(&self.config.receipt_file);
        let mut file = File::create(&path)?;
        file.write_all(receipt.contents().as_bytes())?;
        info!("已寫入執行紀錄: {}", path.display());
        Ok(path)
    }

    fn write_series(&self, file_name: &str, series: &ReturnSeries) -> OutputResult<PathBuf> {
        let mut df = series.to_dataframe()?;
        let path = self.write_csv(file_name, &mut df)?;
        info!("已寫入報酬率序列 {} 筆: {}", series.len(), path.display());
        Ok(path)
    }

    fn write_fundamentals(&self, file_name: &str, table: &FundamentalTable) -> OutputResult<PathBuf> {
        let mut df = table.to_dataframe()?;
        let path = self.write_csv(file_name, &mut df)?;
        info!("已寫入基本面快照 {} 個科目: {}", table.items().len(), path.display());
        Ok(path)
    }

    fn write_csv(&self, file_name: &str, df: &mut DataFrame) -> OutputResult<PathBuf> {
        let path = self.config.path_for(file_name);
        let mut file = File::create(&path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(df)?;
        Ok(path)
    }
}
