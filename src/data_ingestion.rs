//! 資料載入模組
//!
//! 將三個 `;` 分隔的 CSV 檔案轉換為核心模型。
//!
//! # 主要功能
//!
//! - **欄位對應**：以 serde 將原始列對應到 `Raw*` 結構
//! - **列驗證**：解析日期、類型標籤與數值，錯誤的列略過並記錄警告
//! - **模型建立**：連結交易與投資，建立只讀的 `Registry`
//! - **載入報告**：每個檔案的載入與略過筆數

pub mod error;
pub mod loader;
pub mod reader;
pub mod records;
pub mod report;

pub use error::{LoadError, LoadResult, RowError};
pub use loader::{build_registry, DataLoader};
pub use reader::{CsvReader, CsvReaderConfig, ReadRow};
pub use records::{InvestmentRow, PriceRow, TransactionRow, ValidateRow};
pub use report::{FileReport, LoadReport};
