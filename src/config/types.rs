use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::valuation::MissingPricePolicy;

/// 應用程序配置結構
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub data: DataConfig,
    pub log: LogConfig,
    pub valuation: ValuationConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.data.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

/// 資料來源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// 存放三個 CSV 檔案的目錄
    pub folder: String,
    pub investments_file: String,
    pub quotes_file: String,
    pub transactions_file: String,
    /// 欄位分隔符（單一字元）
    pub delimiter: String,
    /// 額外的日期格式，優先於內建格式
    pub date_formats: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            folder: "data".to_string(),
            investments_file: "Investments.csv".to_string(),
            quotes_file: "Quotes.csv".to_string(),
            transactions_file: "Transactions.csv".to_string(),
            delimiter: ";".to_string(),
            date_formats: Vec::new(),
        }
    }
}

impl Validator for DataConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.folder, "data.folder")?;
        ValidationUtils::not_empty(&self.investments_file, "data.investments_file")?;
        ValidationUtils::not_empty(&self.quotes_file, "data.quotes_file")?;
        ValidationUtils::not_empty(&self.transactions_file, "data.transactions_file")?;
        ValidationUtils::single_ascii_char(&self.delimiter, "data.delimiter")?;

        Ok(())
    }
}

impl DataConfig {
    pub fn folder_path(&self) -> &Path {
        Path::new(&self.folder)
    }

    pub fn investments_path(&self) -> PathBuf {
        self.folder_path().join(&self.investments_file)
    }

    pub fn quotes_path(&self) -> PathBuf {
        self.folder_path().join(&self.quotes_file)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.folder_path().join(&self.transactions_file)
    }

    /// 分隔符位元組，驗證未通過時退回 ';'
    pub fn delimiter_byte(&self) -> u8 {
        ValidationUtils::single_ascii_char(&self.delimiter, "data.delimiter").unwrap_or(b';')
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LogConfig {
    /// 日誌過濾器：設定了 `RUST_LOG` 時以其為準，否則使用配置的等級
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_lowercase()))
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level.to_lowercase().as_str(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(
            &self.format.to_lowercase().as_str(),
            &["pretty", "compact"],
            "log.format",
        )?;

        Ok(())
    }
}

/// 估值配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// 找不到股價時的處理方式：zero 或 fail
    pub missing_price_policy: MissingPricePolicy,
}

/// 命令列參數對配置的覆寫
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_folder: Option<String>,
    pub missing_price_policy: Option<MissingPricePolicy>,
    pub log_level: Option<String>,
    /// 未指定日誌等級時將等級提高到 debug
    pub verbose: bool,
}
