// input_utils.rs
//
// 命令列輸入的清單與數字解析。

/// 清單分隔符
pub const LIST_SEPARATOR: char = '/';

/// 以 `/` 分割清單，去除空白與空項目
pub fn split_list(value: &str) -> Vec<&str> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// 解析小數，接受 `,` 或 `.` 作為小數點
pub fn parse_decimal(value: &str) -> Option<f64> {
    value.trim().replace(',', ".").parse::<f64>().ok()
}
