pub mod data_point;
pub mod fundamentals;
pub mod portfolio;
pub mod series;
pub mod types;

pub use data_point::{RawObservation, ReturnObservation};
pub use fundamentals::FundamentalTable;
pub use portfolio::{BasketParseError, PortfolioWeight};
pub use series::{PortfolioSeries, ReturnSeries};
pub use types::{ColumnName, Period};
