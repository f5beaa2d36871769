//! 單一商品報酬率序列建構

use std::collections::BTreeMap;
use tracing::debug;

use crate::domain_types::{RawObservation, ReturnObservation, ReturnSeries};

/// 簡單報酬率 `curr / prev - 1`
///
/// 前一日收盤價為 0 時依浮點規則得到 inf 或 NaN。
#[inline]
pub fn simple_return(prev_close: f64, curr_close: f64) -> f64 {
    curr_close / prev_close - 1.0
}

/// 報酬率序列建構器
///
/// 輸入須已依日期遞增排列，此處不重新排序。第一筆沒有前一日收盤價，
/// 因此 N 筆輸入產生 N-1 筆輸出；空輸入得到空序列。
/// 重複日期以較後的一筆覆蓋。
pub struct ReturnSeriesBuilder;

impl ReturnSeriesBuilder {
    pub fn build(raw: &[RawObservation]) -> ReturnSeries {
        let mut index = BTreeMap::new();

        for pair in raw.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            let observation = ReturnObservation::from_raw(curr, simple_return(prev.close, curr.close));
            index.insert(curr.date, observation);
        }

        let series = ReturnSeries::from_indexed(index);
        debug!("建構報酬率序列: 輸入 {} 筆，輸出 {} 筆", raw.len(), series.len());
        series
    }
}
