// 模組定義
pub mod config;
pub mod data_ingestion;
pub mod domain_types;
pub mod query;
pub mod report;
pub mod session;
pub mod utils;
pub mod valuation;
