use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 數據來源回傳的單日行情
///
/// 每個交易日一筆，日期不含時間部分。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// 當日配發的現金股利，無則為 0
    pub dividends: f64,
    /// 當日分割比例（分子 / 分母），無則為 0
    pub stock_splits: f64,
}

impl RawObservation {
    /// 建立僅含 OHLCV 的行情，股利與分割欄位為 0
    pub fn ohlcv(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }
}

/// 報酬率數據點
///
/// `return_` 為相對前一筆可用收盤價的簡單報酬率，其餘欄位原樣帶入。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReturnObservation {
    pub date: NaiveDate,
    #[serde(rename = "return")]
    pub return_: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub dividends: f64,
    pub stock_splits: f64,
}

impl ReturnObservation {
    /// 由原始行情與已計算的報酬率組成
    pub fn from_raw(raw: &RawObservation, return_: f64) -> Self {
        Self {
            date: raw.date,
            return_,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
            dividends: raw.dividends,
            stock_splits: raw.stock_splits,
        }
    }

    /// 全部數值欄位為 0 的數據點
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            return_: 0.0,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close: 0.0,
            volume: 0.0,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }

    /// 所有數值欄位乘上權重（含價格與成交量）
    pub fn scaled(&self, weight: f64) -> Self {
        Self {
            date: self.date,
            return_: self.return_ * weight,
            open: self.open * weight,
            high: self.high * weight,
            low: self.low * weight,
            close: self.close * weight,
            volume: self.volume * weight,
            dividends: self.dividends * weight,
            stock_splits: self.stock_splits * weight,
        }
    }

    /// 逐欄累加另一個數據點，日期保持不變
    pub fn accumulate(&mut self, other: &ReturnObservation) {
        self.return_ += other.return_;
        self.open += other.open;
        self.high += other.high;
        self.low += other.low;
        self.close += other.close;
        self.volume += other.volume;
        self.dividends += other.dividends;
        self.stock_splits += other.stock_splits;
    }

    /// 依序列化欄位順序列出數值（不含日期）
    pub fn values(&self) -> [f64; 8] {
        [
            self.return_,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.dividends,
            self.stock_splits,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_scaled_applies_to_every_numeric_field() {
        let raw = RawObservation {
            date: date(2),
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.0,
            volume: 1000.0,
            dividends: 0.5,
            stock_splits: 2.0,
        };
        let obs = ReturnObservation::from_raw(&raw, 0.1).scaled(2.0);

        assert_eq!(obs.date, date(2));
        assert_eq!(obs.values(), [0.2, 20.0, 24.0, 18.0, 22.0, 2000.0, 1.0, 4.0]);
    }

    #[test]
    fn test_accumulate_keeps_date() {
        let mut acc = ReturnObservation::zero(date(3));
        let other = ReturnObservation::from_raw(&RawObservation::ohlcv(date(4), 1.0, 2.0, 0.5, 1.5, 10.0), 0.25);
        acc.accumulate(&other);

        assert_eq!(acc.date, date(3));
        assert_eq!(acc.return_, 0.25);
        assert_eq!(acc.volume, 10.0);
    }

    #[test]
    fn test_serialized_return_field_name() {
        let obs = ReturnObservation::zero(date(5));
        let json = serde_json::to_value(obs).unwrap();
        assert!(json.get("return").is_some());
        assert!(json.get("return_").is_none());
    }
}
