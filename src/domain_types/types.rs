//! 基本類型定義

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// 輸出表格的欄位名稱
pub struct ColumnName;

impl ColumnName {
    pub const DATE: &'static str = "date"; // YYYY-MM-DD，列索引
    pub const RETURN: &'static str = "return"; // 簡單日報酬率
    pub const OPEN: &'static str = "open"; // 開盤價
    pub const HIGH: &'static str = "high"; // 最高價
    pub const LOW: &'static str = "low"; // 最低價
    pub const CLOSE: &'static str = "close"; // 收盤價
    pub const VOLUME: &'static str = "volume"; // 成交量
    pub const DIVIDENDS: &'static str = "dividends"; // 現金股利
    pub const STOCK_SPLITS: &'static str = "stock_splits"; // 分割比例

    /// 原始行情欄位，依數據來源的順序
    pub const RAW_COLUMNS: [&'static str; 7] = [
        Self::OPEN,
        Self::HIGH,
        Self::LOW,
        Self::CLOSE,
        Self::VOLUME,
        Self::DIVIDENDS,
        Self::STOCK_SPLITS,
    ];

    /// 報酬率序列的數值欄位，`return` 永遠排第一
    pub const RETURN_COLUMNS: [&'static str; 8] = [
        Self::RETURN,
        Self::OPEN,
        Self::HIGH,
        Self::LOW,
        Self::CLOSE,
        Self::VOLUME,
        Self::DIVIDENDS,
        Self::STOCK_SPLITS,
    ];
}

/// 數據來源定義的回溯區間，例如 `1y`、`6mo`、`max`
///
/// 內容原樣傳給數據來源，不做解析。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(String);

impl Period {
    pub fn new(period: impl Into<String>) -> Self {
        Self(period.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Period {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_column_first() {
        assert_eq!(ColumnName::RETURN_COLUMNS[0], ColumnName::RETURN);
        assert_eq!(&ColumnName::RETURN_COLUMNS[1..], &ColumnName::RAW_COLUMNS[..]);
    }

    #[test]
    fn test_period_passthrough() {
        let period: Period = " 1y ".parse().unwrap();
        assert_eq!(period.as_str(), "1y");
        assert_eq!(period.to_string(), "1y");
    }
}
