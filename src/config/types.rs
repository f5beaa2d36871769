use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::returns::AlignmentPolicy;

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub log: LogConfig,
    pub provider: ProviderConfig,
    pub benchmark: BenchmarkConfig,
    #[serde(default)]
    pub portfolio: PortfolioConfig,
    pub output: OutputConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.log.validate()?;
        self.provider.validate()?;
        self.benchmark.validate()?;
        self.output.validate()?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
    /// 日誌檔目錄，未設定時只輸出到終端
    #[serde(default)]
    pub directory: Option<String>,
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(&self.level, &["trace", "debug", "info", "warn", "error"], "log.level")?;

        // 驗證日誌格式
        ValidationUtils::one_of(&self.format, &["pretty", "compact"], "log.format")?;

        if let Some(dir) = &self.directory {
            ValidationUtils::not_empty(dir, "log.directory")?;
        }

        Ok(())
    }
}

/// 數據來源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub chart_url: String,
    pub fundamentals_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// 是否以還原收盤價調整開高低收
    #[serde(default = "default_auto_adjust")]
    pub auto_adjust: bool,
}

fn default_auto_adjust() -> bool {
    true
}

impl Validator for ProviderConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::http_url(&self.chart_url, "provider.chart_url")?;
        ValidationUtils::http_url(&self.fundamentals_url, "provider.fundamentals_url")?;
        ValidationUtils::not_empty(&self.user_agent, "provider.user_agent")?;
        ValidationUtils::in_range(self.timeout_secs, 1, 300, "provider.timeout_secs")?;

        Ok(())
    }
}

/// 基準指數配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub symbol: String,
}

impl Validator for BenchmarkConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.symbol, "benchmark.symbol")
    }
}

/// 投資組合配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioConfig {
    #[serde(default)]
    pub alignment: AlignmentPolicy,
}

/// 輸出檔案配置
///
/// 所有輸出路徑皆由此推導，不依賴執行檔所在目錄。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: String,
    pub prices_file: String,
    pub portfolio_file: String,
    pub benchmark_file: String,
    pub financials_file: String,
    pub balance_sheet_file: String,
    pub receipt_file: String,
}

impl OutputConfig {
    pub fn directory(&self) -> &Path {
        Path::new(&self.directory)
    }

    /// 取得輸出目錄下的檔案路徑
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.directory().join(file_name)
    }

    /// 覆寫輸出目錄
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
            prices_file: "prices.csv".to_string(),
            portfolio_file: "prices_portfolio.csv".to_string(),
            benchmark_file: "prices_sp500.csv".to_string(),
            financials_file: "financials.csv".to_string(),
            balance_sheet_file: "balance_sheet.csv".to_string(),
            receipt_file: "output.txt".to_string(),
        }
    }
}

impl Validator for OutputConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.directory, "output.directory")?;
        ValidationUtils::file_name(&self.prices_file, "output.prices_file")?;
        ValidationUtils::file_name(&self.portfolio_file, "output.portfolio_file")?;
        ValidationUtils::file_name(&self.benchmark_file, "output.benchmark_file")?;
        ValidationUtils::file_name(&self.financials_file, "output.financials_file")?;
        ValidationUtils::file_name(&self.balance_sheet_file, "output.balance_sheet_file")?;
        ValidationUtils::file_name(&self.receipt_file, "output.receipt_file")?;

        Ok(())
    }
}
