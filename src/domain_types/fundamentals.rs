//! 基本面快照（財報、資產負債表）
//!
//! 原樣保存數據來源的表格形狀：每列為一個會計科目，每欄為一個財報期末日。

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::format_date;

/// 快照第一欄的名稱
pub const ITEM_COLUMN: &str = "item";

/// 基本面表格
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalTable {
    /// 財報期末日，新到舊
    periods: Vec<NaiveDate>,
    /// (科目名稱, 各期數值)，數值順序對應 `periods`
    items: Vec<(String, Vec<Option<f64>>)>,
}

impl FundamentalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    pub fn items(&self) -> &[(String, Vec<Option<f64>>)] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 寫入單一儲存格，必要時新增期別或科目
    pub fn insert(&mut self, item: &str, period: NaiveDate, value: Option<f64>) {
        let col = match self.periods.iter().position(|p| *p == period) {
            Some(idx) => idx,
            None => {
                // 保持新到舊
                let idx = self.periods.iter().position(|p| *p < period).unwrap_or(self.periods.len());
                self.periods.insert(idx, period);
                for (_, values) in self.items.iter_mut() {
                    values.insert(idx, None);
                }
                idx
            }
        };

        let row = match self.items.iter().position(|(name, _)| name == item) {
            Some(idx) => idx,
            None => {
                self.items.push((item.to_string(), vec![None; self.periods.len()]));
                self.items.len() - 1
            }
        };

        self.items[row].1[col] = value;
    }

    /// 查詢單一儲存格
    pub fn value(&self, item: &str, period: NaiveDate) -> Option<f64> {
        let col = self.periods.iter().position(|p| *p == period)?;
        self.items
            .iter()
            .find(|(name, _)| name == item)
            .and_then(|(_, values)| values[col])
    }

    /// 轉換為 DataFrame：第一欄為科目，其後每期一欄
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.periods.len() + 1);
        let names: Vec<&str> = self.items.iter().map(|(name, _)| name.as_str()).collect();
        columns.push(Column::new(ITEM_COLUMN.into(), names));

        for (idx, period) in self.periods.iter().enumerate() {
            let values: Vec<Option<f64>> = self.items.iter().map(|(_, values)| values[idx]).collect();
            columns.push(Column::new(format_date(*period).into(), values));
        }

        DataFrame::new(columns)
    }
}
