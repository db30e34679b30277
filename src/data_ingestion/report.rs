use serde::Serialize;
use std::fmt;

use crate::data_ingestion::error::RowError;

/// 單一檔案的載入報告
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReport {
    /// 檔案名稱
    pub file_name: String,
    /// 總記錄數
    pub total_records: usize,
    /// 成功載入記錄數
    pub loaded_records: usize,
    /// 略過記錄數
    pub skipped_records: usize,
    /// 詳細錯誤
    pub errors: Vec<DetailedError>,
}

/// 詳細錯誤資訊
#[derive(Debug, Clone, Serialize)]
pub struct DetailedError {
    pub line: u64,
    pub message: String,
}

impl FileReport {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// 添加成功記錄
    pub fn add_success(&mut self) {
        self.total_records += 1;
        self.loaded_records += 1;
    }

    /// 添加錯誤
    pub fn add_error(&mut self, line: u64, error: &RowError) {
        self.total_records += 1;
        self.skipped_records += 1;
        self.errors.push(DetailedError {
            line,
            message: error.to_string(),
        });
    }

    /// 獲取成功率
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.loaded_records as f64 / self.total_records as f64 * 100.0
        }
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: 共 {} 筆，載入 {} 筆，略過 {} 筆",
            self.file_name, self.total_records, self.loaded_records, self.skipped_records
        )
    }
}

/// 整體載入報告
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub investments: FileReport,
    pub quotes: FileReport,
    pub transactions: FileReport,
}

impl LoadReport {
    pub fn total_skipped(&self) -> usize {
        self.files().iter().map(|r| r.skipped_records).sum()
    }

    pub fn total_loaded(&self) -> usize {
        self.files().iter().map(|r| r.loaded_records).sum()
    }

    pub fn files(&self) -> [&FileReport; 3] {
        [&self.investments, &self.quotes, &self.transactions]
    }
}
