mod common;

use std::fs;

use common::{date, raw_closes, StubProvider};
use portfolio_returns::config::OutputConfig;
use portfolio_returns::domain_types::{FundamentalTable, Period, PortfolioWeight};
use portfolio_returns::output::{ArtifactWriter, RunReceipt};
use portfolio_returns::pipeline::ReturnsPipeline;
use portfolio_returns::returns::{AlignmentPolicy, ReturnSeriesBuilder};

const SERIES_HEADER: &str = "date,return,open,high,low,close,volume,dividends,stock_splits";

fn writer_in(dir: &tempfile::TempDir) -> ArtifactWriter {
    ArtifactWriter::new(OutputConfig::default().with_directory(dir.path().to_string_lossy())).unwrap()
}

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn test_write_prices_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = writer_in(&tmp);
    let series = ReturnSeriesBuilder::build(&raw_closes(date(2024, 1, 1), &[100.0, 110.0, 99.0]));

    let path = writer.write_prices(&series).unwrap();

    assert_eq!(path, tmp.path().join("prices.csv"));
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], SERIES_HEADER);
    assert!(lines[1].starts_with("2024-01-02,"));
    assert!(lines[2].starts_with("2024-01-03,"));
}

#[test]
fn test_empty_series_writes_header_only() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = writer_in(&tmp);

    let path = writer.write_benchmark(&ReturnSeriesBuilder::build(&[])).unwrap();

    assert_eq!(path, tmp.path().join("prices_sp500.csv"));
    assert_eq!(read_lines(&path), vec![SERIES_HEADER.to_string()]);
}

#[test]
fn test_write_financials_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = writer_in(&tmp);
    let mut table = FundamentalTable::new();
    table.insert("TotalRevenue", date(2023, 12, 31), Some(10.0));
    table.insert("TotalRevenue", date(2022, 12, 31), Some(8.0));
    table.insert("NetIncome", date(2023, 12, 31), None);

    let path = writer.write_financials(&table).unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "item,2023-12-31,2022-12-31");
    assert!(lines[1].starts_with("TotalRevenue,"));
    assert!(lines[2].starts_with("NetIncome,"));
}

#[test]
fn test_portfolio_receipt_written_verbatim() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = writer_in(&tmp);

    let path = writer
        .write_receipt(&RunReceipt::Portfolio {
            period: Period::new("1y"),
            tickers: "AAPL/MSFT".to_string(),
            weights: "0,5/0.5".to_string(),
        })
        .unwrap();

    assert_eq!(path, tmp.path().join("output.txt"));
    assert_eq!(fs::read_to_string(path).unwrap(), "1y\nAAPL/MSFT\n0,5/0.5\n");
}

#[tokio::test]
async fn test_single_report_writes_all_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = writer_in(&tmp);
    let start = date(2024, 1, 1);
    let provider = StubProvider::new()
        .with_history("AAA", raw_closes(start, &[1.0, 2.0, 3.0, 4.0]))
        .with_history("^GSPC", raw_closes(start, &[10.0, 11.0]));
    let pipeline = ReturnsPipeline::new(provider, "^GSPC", AlignmentPolicy::Strict);

    let report = pipeline.run_single("AAA", &Period::new("1y")).await.unwrap();
    let written = report.write_to(&writer).unwrap();

    assert_eq!(written.len(), 4);
    assert_eq!(read_lines(&tmp.path().join("prices.csv")).len(), 4);
    assert_eq!(read_lines(&tmp.path().join("prices_sp500.csv")).len(), 2);
    assert!(tmp.path().join("financials.csv").exists());
    assert!(tmp.path().join("balance_sheet.csv").exists());
}

#[tokio::test]
async fn test_portfolio_report_writes_portfolio_and_benchmark() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = writer_in(&tmp);
    let start = date(2024, 1, 1);
    let provider = StubProvider::new()
        .with_history("AAA", raw_closes(start, &[1.0, 2.0, 3.0]))
        .with_history("BBB", raw_closes(start, &[3.0, 2.0, 1.0]))
        .with_history("^GSPC", raw_closes(start, &[10.0, 11.0, 12.0]));
    let pipeline = ReturnsPipeline::new(provider, "^GSPC", AlignmentPolicy::Strict);
    let basket = vec![PortfolioWeight::new("AAA", 0.5), PortfolioWeight::new("BBB", 0.5)];

    let report = pipeline.run_portfolio(&basket, &Period::new("1y")).await.unwrap();
    let written = report.write_to(&writer).unwrap();

    assert_eq!(
        written,
        vec![tmp.path().join("prices_portfolio.csv"), tmp.path().join("prices_sp500.csv")]
    );
    let lines = read_lines(&written[0]);
    assert_eq!(lines[0], SERIES_HEADER);
    assert_eq!(lines.len(), 3);
    assert!(!tmp.path().join("prices.csv").exists());
}
