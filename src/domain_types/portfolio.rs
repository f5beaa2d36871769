use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::{parse_decimal, split_list};

/// 投資組合成分權重
///
/// 權重可為任意實數，不檢查總和也不做正規化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioWeight {
    pub ticker: String,
    pub weight: f64,
}

/// 投資組合輸入解析錯誤
#[derive(Error, Debug, PartialEq)]
pub enum BasketParseError {
    #[error("未提供任何股票代碼")]
    NoTickers,

    #[error("無效的權重: {0}")]
    InvalidWeight(String),

    #[error("股票代碼數量 {tickers} 與權重數量 {weights} 不一致")]
    CountMismatch { tickers: usize, weights: usize },
}

impl PortfolioWeight {
    pub fn new(ticker: impl Into<String>, weight: f64) -> Self {
        Self {
            ticker: ticker.into(),
            weight,
        }
    }

    /// 解析以 `/` 分隔的代碼與權重清單
    ///
    /// 權重的小數點可用 `,` 或 `.`，例如 `AAPL/MSFT` 搭配 `0,6/0.4`。
    pub fn parse_basket(tickers: &str, weights: &str) -> Result<Vec<Self>, BasketParseError> {
        let tickers = split_list(tickers);
        if tickers.is_empty() {
            return Err(BasketParseError::NoTickers);
        }

        let weights = split_list(weights)
            .into_iter()
            .map(|raw| parse_decimal(raw).ok_or_else(|| BasketParseError::InvalidWeight(raw.to_string())))
            .collect::<Result<Vec<f64>, _>>()?;

        if tickers.len() != weights.len() {
            return Err(BasketParseError::CountMismatch {
                tickers: tickers.len(),
                weights: weights.len(),
            });
        }

        Ok(tickers
            .into_iter()
            .zip(weights)
            .map(|(ticker, weight)| Self::new(ticker, weight))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_basket_mixed_separators() {
        let basket = PortfolioWeight::parse_basket("AAPL/MSFT/^GSPC", "0,6/0.3/0,1").unwrap();
        assert_eq!(
            basket,
            vec![
                PortfolioWeight::new("AAPL", 0.6),
                PortfolioWeight::new("MSFT", 0.3),
                PortfolioWeight::new("^GSPC", 0.1),
            ]
        );
    }

    #[test]
    fn test_parse_basket_weights_not_normalised() {
        let basket = PortfolioWeight::parse_basket("A/B", "2/-0,5").unwrap();
        assert_eq!(basket[0].weight, 2.0);
        assert_eq!(basket[1].weight, -0.5);
    }

    #[rstest]
    #[case("", "1", BasketParseError::NoTickers)]
    #[case("A/B", "1", BasketParseError::CountMismatch { tickers: 2, weights: 1 })]
    #[case("A", "0.5/0.5", BasketParseError::CountMismatch { tickers: 1, weights: 2 })]
    #[case("A", "abc", BasketParseError::InvalidWeight("abc".to_string()))]
    fn test_parse_basket_errors(#[case] tickers: &str, #[case] weights: &str, #[case] expected: BasketParseError) {
        assert_eq!(PortfolioWeight::parse_basket(tickers, weights), Err(expected));
    }
}
