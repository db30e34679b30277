use std::fs;
use std::path::Path;

use portfolio_check::config::DataConfig;

pub const INVESTMENTS_HEADER: &str = "InvestorId;InvestmentId;InvestmentType;ISIN;City;FondsInvestor";
pub const QUOTES_HEADER: &str = "ISIN;Date;PricePerShare";
pub const TRANSACTIONS_HEADER: &str = "InvestmentId;Type;Date;Value";

/// 在指定目錄寫入三個資料檔案，每個參數為不含標題的資料列
pub fn write_dataset(dir: &Path, investments: &[&str], quotes: &[&str], transactions: &[&str]) {
    write_csv(&dir.join("Investments.csv"), INVESTMENTS_HEADER, investments);
    write_csv(&dir.join("Quotes.csv"), QUOTES_HEADER, quotes);
    write_csv(&dir.join("Transactions.csv"), TRANSACTIONS_HEADER, transactions);
}

fn write_csv(path: &Path, header: &str, rows: &[&str]) {
    let mut content = String::from(header);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(path, content).expect("無法寫入測試資料");
}

pub fn data_config(dir: &Path) -> DataConfig {
    DataConfig {
        folder: dir.to_string_lossy().into_owned(),
        ..Default::default()
    }
}

/// 一位持股投資人與一個持有其 25% 的基金投資人
pub fn write_stock_and_fund_dataset(dir: &Path) {
    write_dataset(
        dir,
        &[
            "Investor1;Investment1;Stock;ISIN1;;",
            "Investor2;Investment2;Fonds;;;Investor1",
            "Investor2;Investment3;RealEstate;;Berlin;",
        ],
        &[
            "ISIN1;28-05-2020;40.0",
            "ISIN1;30-05-2020;50.0",
            "ISIN1;03-06-2020;70.0",
        ],
        &[
            "Investment1;Shares;01-05-2020;100",
            "Investment2;Percentage;15-05-2020;0.25",
            "Investment3;Estate;01-01-2020;2000",
            "Investment3;Building;01-07-2020;500",
        ],
    );
}
