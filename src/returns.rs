//! 報酬率計算模組
//!
//! 由原始日線行情建構報酬率序列，並將多個加權成分彙總為投資組合序列。

pub mod aggregator;
pub mod builder;
pub mod error;

pub use aggregator::{AlignmentPolicy, PortfolioAggregator, WeightedSeries};
pub use builder::{simple_return, ReturnSeriesBuilder};
pub use error::{PortfolioError, PortfolioResult};
