//! 資料載入錯誤定義

use std::path::PathBuf;
use thiserror::Error;

use crate::domain_types::UnknownTypeTag;
use crate::utils::TimeParseError;
use crate::valuation::RegistryError;

/// 載入流程錯誤，任何一種都會中止載入
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("指定的資料目錄 '{0}' 不存在，請確認路徑是否正確")]
    DirectoryNotFound(PathBuf),

    #[error("資料目錄 '{dir}' 中缺少必要檔案 '{file}'")]
    FileNotFound { dir: PathBuf, file: String },

    #[error("檔案讀取錯誤: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 解析錯誤: {0}")]
    CsvError(#[from] csv::Error),
}

/// 單行資料錯誤，該行會被略過並記錄警告
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("CSV 格式錯誤: {0}")]
    Malformed(String),

    #[error("缺少必要欄位: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    InvalidTimestamp(#[from] TimeParseError),

    #[error(transparent)]
    UnknownType(#[from] UnknownTypeTag),

    #[error("無效的數值: 欄位 {field}, 值 {value}")]
    InvalidNumber { field: &'static str, value: f64 },

    #[error(transparent)]
    DanglingReference(#[from] RegistryError),
}

/// 載入結果類型
pub type LoadResult<T> = Result<T, LoadError>;
