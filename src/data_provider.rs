pub mod error;
pub mod loader;
pub mod yahoo;

pub use error::{ProviderError, ProviderResult};
pub use loader::MarketDataProvider;
pub use yahoo::YahooFinanceProvider;
