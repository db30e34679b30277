use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::DataConfig;
use crate::data_ingestion::error::{LoadError, LoadResult, RowError};
use crate::data_ingestion::reader::{CsvReader, CsvReaderConfig, ReadRow};
use crate::data_ingestion::records::{
    InvestmentRow, PriceRow, RawInvestment, RawQuote, RawTransaction, TransactionRow, ValidateRow,
};
use crate::data_ingestion::report::{FileReport, LoadReport};
use crate::domain_types::{Investment, Transaction};
use crate::valuation::Registry;

/// 資料載入器
///
/// 依序讀取投資、報價與交易三個 CSV 檔案，略過並記錄格式錯誤的列，
/// 最後建立只讀的 `Registry`。
pub struct DataLoader {
    config: DataConfig,
    reader: CsvReader,
}

impl DataLoader {
    pub fn new(config: DataConfig) -> Self {
        let reader = CsvReader::new(CsvReaderConfig {
            delimiter: config.delimiter_byte(),
            ..Default::default()
        });
        Self { config, reader }
    }

    /// 檢查資料目錄與三個必要檔案是否存在
    pub fn check_files(&self) -> LoadResult<()> {
        let dir = self.config.folder_path();
        if !dir.is_dir() {
            return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
        }

        for file in [
            &self.config.investments_file,
            &self.config.quotes_file,
            &self.config.transactions_file,
        ] {
            if !dir.join(file).is_file() {
                return Err(LoadError::FileNotFound {
                    dir: dir.to_path_buf(),
                    file: file.clone(),
                });
            }
        }

        Ok(())
    }

    /// 載入全部資料並建立註冊表
    pub fn load(&self) -> LoadResult<(Registry, LoadReport)> {
        self.check_files()?;

        // 交易需要先有投資才能連結，因此投資最先載入
        let (investments, investments_report) = self.read_validated::<RawInvestment>(
            &self.config.investments_path(),
            &self.config.investments_file,
        )?;
        let (quotes, quotes_report) =
            self.read_validated::<RawQuote>(&self.config.quotes_path(), &self.config.quotes_file)?;
        let (transactions, transactions_report) = self.read_validated::<RawTransaction>(
            &self.config.transactions_path(),
            &self.config.transactions_file,
        )?;

        let mut report = LoadReport {
            investments: investments_report,
            quotes: quotes_report,
            transactions: transactions_report,
        };
        let registry = build_registry(investments, quotes, transactions, &mut report);

        for file in report.files() {
            info!("{}", file);
        }
        info!(
            "註冊表建立完成: {} 位投資人, {} 項投資, {} 檔商品",
            registry.investor_count(),
            registry.investment_count(),
            registry.instrument_count()
        );

        Ok((registry, report))
    }

    fn read_validated<R>(
        &self,
        path: &Path,
        file_name: &str,
    ) -> LoadResult<(Vec<(u64, R::Output)>, FileReport)>
    where
        R: DeserializeOwned + ValidateRow,
    {
        let rows: Vec<ReadRow<R>> = self.reader.read_file(path)?;
        debug!("從 {} 讀取 {} 列", file_name, rows.len());

        let mut report = FileReport::new(file_name);
        let mut valid = Vec::with_capacity(rows.len());

        for ReadRow { line, result } in rows {
            match result.and_then(|raw| raw.validate(&self.config.date_formats)) {
                Ok(record) => valid.push((line, record)),
                Err(err) => {
                    warn!("{} 第 {} 行已略過: {}", file_name, line, err);
                    report.add_error(line, &err);
                }
            }
        }

        Ok((valid, report))
    }
}

/// 以驗證後的記錄建立註冊表
///
/// 投資與報價在此必定成功；交易若引用不存在的投資則略過並記入報告。
/// 投資與報價的成功筆數在此計入報告。
pub fn build_registry(
    investments: Vec<(u64, InvestmentRow)>,
    quotes: Vec<(u64, PriceRow)>,
    transactions: Vec<(u64, TransactionRow)>,
    report: &mut LoadReport,
) -> Registry {
    let mut registry = Registry::new();

    for (_, row) in investments {
        registry.add_investment(
            &row.investor_id,
            Investment::new(row.investment_id, row.investment_type, row.reference_id),
        );
        report.investments.add_success();
    }

    for (_, row) in quotes {
        registry.add_price(&row.isin, row.timestamp, row.price_per_share);
        report.quotes.add_success();
    }

    for (line, row) in transactions {
        let transaction = Transaction::new(
            row.investment_id,
            row.transaction_type,
            row.timestamp,
            row.value,
        );
        match registry.add_transaction(transaction) {
            Ok(()) => report.transactions.add_success(),
            Err(err) => {
                let err = RowError::from(err);
                warn!("{} 第 {} 行已略過: {}", report.transactions.file_name, line, err);
                report.transactions.add_error(line, &err);
            }
        }
    }

    registry
}
