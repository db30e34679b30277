//! CSV 檔案讀取器

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

use crate::data_ingestion::error::{LoadError, LoadResult, RowError};

/// CSV 讀取器配置
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// 是否有標題行
    pub has_header: bool,
    /// 分隔符
    pub delimiter: u8,
    /// 是否修剪欄位前後空白
    pub trim: bool,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b';',
            trim: true,
        }
    }
}

/// 讀取到的一列：行號與反序列化結果
#[derive(Debug)]
pub struct ReadRow<T> {
    pub line: u64,
    pub result: Result<T, RowError>,
}

/// CSV 檔案讀取器
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    config: CsvReaderConfig,
}

impl CsvReader {
    /// 創建新的 CSV 讀取器
    pub fn new(config: CsvReaderConfig) -> Self {
        Self { config }
    }

    /// 設定分隔符
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// 從檔案路徑讀取並反序列化每一列
    pub fn read_file<T, P>(&self, path: P) -> LoadResult<Vec<ReadRow<T>>>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let file = std::fs::File::open(path.as_ref())?;
        self.read_from(file)
    }

    /// 從字串讀取
    pub fn read_string<T: DeserializeOwned>(&self, data: &str) -> LoadResult<Vec<ReadRow<T>>> {
        self.read_from(data.as_bytes())
    }

    /// 從任意來源讀取
    ///
    /// 標題行錯誤會中止讀取；單列錯誤則保留在結果中由呼叫端決定如何處理。
    pub fn read_from<T, R>(&self, source: R) -> LoadResult<Vec<ReadRow<T>>>
    where
        T: DeserializeOwned,
        R: Read,
    {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(self.config.has_header)
            .trim(if self.config.trim { Trim::All } else { Trim::None })
            .from_reader(source);

        let headers = if self.config.has_header {
            Some(reader.headers()?.clone())
        } else {
            None
        };

        // csv 會略過空行，行號一律取自記錄位置
        let rows = reader
            .records()
            .map(|result| match result {
                Ok(record) => ReadRow {
                    line: record.position().map(|pos| pos.line()).unwrap_or_default(),
                    result: record
                        .deserialize(headers.as_ref())
                        .map_err(|err| RowError::Malformed(err.to_string())),
                },
                Err(err) => ReadRow {
                    line: err.position().map(|pos| pos.line()).unwrap_or_default(),
                    result: Err(RowError::Malformed(err.to_string())),
                },
            })
            .collect();

        Ok(rows)
    }
}
