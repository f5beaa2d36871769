// time_utils.rs
//
// 提供日期轉換相關的工具函數，用於在數據來源與領域模型之間轉換時間格式。

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// 輸出與索引使用的日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 將日期格式化為 YYYY-MM-DD
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 解析 YYYY-MM-DD 日期
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// 將秒級時間戳依交易所時區偏移轉換為當地日期
///
/// 日線時間戳落在當地開盤時間，直接取 UTC 日期可能跨日。
pub fn timestamp_to_local_date(timestamp_secs: i64, gmt_offset_secs: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(timestamp_secs.checked_add(gmt_offset_secs)?, 0)
        .map(|dt| dt.date_naive())
}

/// 將日期（UTC 午夜）轉換為秒級時間戳
pub fn date_to_timestamp_secs(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
