//! fundamentals-timeseries API 的科目清單與回應解析

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::ApiError;
use crate::data_provider::error::{ProviderError, ProviderResult};
use crate::domain_types::FundamentalTable;
use crate::utils::parse_date;

/// 年度資料的類型前綴
pub const ANNUAL_PREFIX: &str = "annual";

/// 損益表科目
pub const FINANCIALS_ITEMS: &[&str] = &[
    "TotalRevenue",
    "CostOfRevenue",
    "GrossProfit",
    "ResearchAndDevelopment",
    "SellingGeneralAndAdministration",
    "OperatingExpense",
    "OperatingIncome",
    "InterestExpense",
    "PretaxIncome",
    "TaxProvision",
    "NetIncome",
    "EBIT",
    "EBITDA",
    "BasicEPS",
    "DilutedEPS",
    "BasicAverageShares",
    "DilutedAverageShares",
];

/// 資產負債表科目
pub const BALANCE_SHEET_ITEMS: &[&str] = &[
    "TotalAssets",
    "CurrentAssets",
    "CashAndCashEquivalents",
    "Receivables",
    "Inventory",
    "TotalNonCurrentAssets",
    "NetPPE",
    "Goodwill",
    "TotalLiabilitiesNetMinorityInterest",
    "CurrentLiabilities",
    "AccountsPayable",
    "CurrentDebt",
    "LongTermDebt",
    "TotalDebt",
    "NetDebt",
    "StockholdersEquity",
    "RetainedEarnings",
    "CommonStock",
    "WorkingCapital",
    "TotalCapitalization",
    "OrdinarySharesNumber",
];

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesBody,
}

#[derive(Debug, Deserialize)]
struct TimeseriesBody {
    #[serde(default)]
    result: Option<Vec<Value>>,
    error: Option<ApiError>,
}

/// 組合查詢參數 `type`，例如 `annualTotalRevenue,annualNetIncome`
pub fn timeseries_types(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("{ANNUAL_PREFIX}{item}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// 解析回應為基本面表格
///
/// 科目依 `items` 的順序排列，沒有任何數值的科目不出現在表格中。
pub fn parse_timeseries(ticker: &str, body: &str, items: &[&str]) -> ProviderResult<FundamentalTable> {
    let response: TimeseriesResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::malformed(ticker, e.to_string()))?;

    if let Some(error) = response.timeseries.error {
        return Err(ProviderError::Api {
            ticker: ticker.to_string(),
            code: error.code,
            description: error.description,
        });
    }

    // 依類型名稱索引各筆結果
    let mut by_type: HashMap<String, Value> = HashMap::new();
    for result in response.timeseries.result.unwrap_or_default() {
        let key = result
            .pointer("/meta/type/0")
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(key) = key {
            by_type.insert(key, result);
        }
    }

    let mut table = FundamentalTable::new();
    for item in items {
        let key = format!("{ANNUAL_PREFIX}{item}");
        let Some(entries) = by_type.get(&key).and_then(|r| r.get(&key)).and_then(Value::as_array) else {
            continue;
        };

        for entry in entries.iter().filter(|e| !e.is_null()) {
            let as_of = entry
                .get("asOfDate")
                .and_then(Value::as_str)
                .and_then(parse_date)
                .ok_or_else(|| ProviderError::malformed(ticker, format!("{key} 缺少有效的 asOfDate")))?;
            let value = entry.pointer("/reportedValue/raw").and_then(Value::as_f64);
            table.insert(item, as_of, value);
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    const BODY: &str = r#"{"timeseries":{"result":[
        {"meta":{"symbol":["AAPL"],"type":["annualNetIncome"]},"timestamp":[1664496000,1696032000],
         "annualNetIncome":[
            {"asOfDate":"2022-09-30","periodType":"12M","currencyCode":"USD","reportedValue":{"raw":99803000000,"fmt":"99.8B"}},
            {"asOfDate":"2023-09-30","periodType":"12M","currencyCode":"USD","reportedValue":{"raw":96995000000,"fmt":"97B"}}]},
        {"meta":{"symbol":["AAPL"],"type":["annualTotalRevenue"]},"timestamp":[1696032000],
         "annualTotalRevenue":[null,
            {"asOfDate":"2023-09-30","periodType":"12M","currencyCode":"USD","reportedValue":{"raw":383285000000,"fmt":"383.29B"}}]},
        {"meta":{"symbol":["AAPL"],"type":["annualGoodwill"]}}
    ],"error":null}}"#;

    fn sept30(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 9, 30).unwrap()
    }

    #[test]
    fn test_timeseries_types() {
        assert_eq!(timeseries_types(&["TotalRevenue", "NetIncome"]), "annualTotalRevenue,annualNetIncome");
    }

    #[test]
    fn test_parse_timeseries_items_in_requested_order() {
        let table = parse_timeseries("AAPL", BODY, &["TotalRevenue", "NetIncome", "Goodwill"]).unwrap();

        let names: Vec<&str> = table.items().iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["TotalRevenue", "NetIncome"]);
        assert_eq!(table.periods(), &[sept30(2023), sept30(2022)]);
        assert_eq!(table.value("TotalRevenue", sept30(2023)), Some(383_285_000_000.0));
        assert_eq!(table.value("TotalRevenue", sept30(2022)), None);
        assert_eq!(table.value("NetIncome", sept30(2022)), Some(99_803_000_000.0));
    }

    #[test]
    fn test_parse_timeseries_empty_result() {
        let body = r#"{"timeseries":{"result":[],"error":null}}"#;
        assert!(parse_timeseries("X", body, FINANCIALS_ITEMS).unwrap().is_empty());
    }

    #[test]
    fn test_parse_timeseries_errors() {
        let body = r#"{"timeseries":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#;
        assert_matches!(parse_timeseries("X", body, FINANCIALS_ITEMS), Err(ProviderError::Api { .. }));
        assert_matches!(parse_timeseries("X", "{}", FINANCIALS_ITEMS), Err(ProviderError::Malformed { .. }));
    }
}
