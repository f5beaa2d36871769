// 模組定義
pub mod config;
pub mod data_provider;
pub mod domain_types;
pub mod output;
pub mod pipeline;
pub mod returns;
pub mod utils;
