// utils.rs - 公共工具模組
//
// 提供日期轉換與命令列輸入解析等通用函數。

pub mod input_utils;
pub mod time_utils;

// 重新導出，使其可以通過 utils::function_name 直接訪問
pub use input_utils::{parse_decimal, split_list};
pub use time_utils::{
    date_to_timestamp_secs, format_date, parse_date, timestamp_to_local_date, DATE_FORMAT,
};
