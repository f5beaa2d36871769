//! 報酬率時間序列

use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeMap;

use super::data_point::ReturnObservation;
use super::portfolio::PortfolioWeight;
use super::types::ColumnName;
use crate::utils::format_date;

/// 報酬率時間序列
///
/// 以日期為唯一鍵、依日期遞增排列，建立後不可變更。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnSeries {
    rows: Vec<ReturnObservation>,
}

impl ReturnSeries {
    /// 空序列
    pub fn empty() -> Self {
        Self::default()
    }

    /// 由日期索引建立序列
    pub fn from_indexed(rows: BTreeMap<NaiveDate, ReturnObservation>) -> Self {
        Self {
            rows: rows.into_values().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ReturnObservation] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReturnObservation> {
        self.rows.iter()
    }

    /// 依日期查找數據點
    pub fn get(&self, date: NaiveDate) -> Option<&ReturnObservation> {
        self.rows
            .binary_search_by_key(&date, |row| row.date)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.date).collect()
    }

    /// 報酬率欄位
    pub fn returns(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.return_).collect()
    }

    /// 序列化時的欄位名稱（不含日期索引）
    pub fn columns(&self) -> &'static [&'static str] {
        &ColumnName::RETURN_COLUMNS
    }

    /// 轉換為 DataFrame，欄位順序為日期、報酬率、原始欄位
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<String> = self.rows.iter().map(|row| format_date(row.date)).collect();
        let column = |f: fn(&ReturnObservation) -> f64| -> Vec<f64> { self.rows.iter().map(f).collect() };

        df!(
            ColumnName::DATE => dates,
            ColumnName::RETURN => column(|r| r.return_),
            ColumnName::OPEN => column(|r| r.open),
            ColumnName::HIGH => column(|r| r.high),
            ColumnName::LOW => column(|r| r.low),
            ColumnName::CLOSE => column(|r| r.close),
            ColumnName::VOLUME => column(|r| r.volume),
            ColumnName::DIVIDENDS => column(|r| r.dividends),
            ColumnName::STOCK_SPLITS => column(|r| r.stock_splits),
        )
    }
}

impl<'a> IntoIterator for &'a ReturnSeries {
    type Item = &'a ReturnObservation;
    type IntoIter = std::slice::Iter<'a, ReturnObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// 加權投資組合序列
///
/// 欄位配置與 [`ReturnSeries`] 相同，數值為各成分加權後的總和。
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSeries {
    weights: Vec<PortfolioWeight>,
    series: ReturnSeries,
}

impl PortfolioSeries {
    pub fn new(weights: Vec<PortfolioWeight>, series: ReturnSeries) -> Self {
        Self { weights, series }
    }

    /// 組成此序列的權重，依呼叫順序
    pub fn weights(&self) -> &[PortfolioWeight] {
        &self.weights
    }

    pub fn series(&self) -> &ReturnSeries {
        &self.series
    }

    pub fn into_series(self) -> ReturnSeries {
        self.series
    }
}
