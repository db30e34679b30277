//! CSV 原始列與驗證後的記錄
//!
//! 原始列只做欄位對應；驗證後的記錄保證日期已解析、類型標籤有效、數值有限，
//! 核心模型只接受驗證後的記錄。

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::data_ingestion::error::RowError;
use crate::domain_types::{InvestmentType, TransactionType};
use crate::utils::parse_datetime;

/// Quotes.csv 原始列
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuote {
    #[serde(rename = "ISIN")]
    pub isin: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "PricePerShare")]
    pub price_per_share: f64,
}

/// Investments.csv 原始列
#[derive(Debug, Clone, Deserialize)]
pub struct RawInvestment {
    #[serde(rename = "InvestorId")]
    pub investor_id: String,
    #[serde(rename = "InvestmentId")]
    pub investment_id: String,
    #[serde(rename = "InvestmentType")]
    pub investment_type: String,
    #[serde(rename = "ISIN", default)]
    pub isin: Option<String>,
    #[serde(rename = "City", default)]
    pub city: Option<String>,
    #[serde(rename = "FondsInvestor", default)]
    pub fonds_investor: Option<String>,
}

/// Transactions.csv 原始列
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "InvestmentId")]
    pub investment_id: String,
    #[serde(rename = "Type")]
    pub transaction_type: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

/// 價格記錄
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub isin: String,
    pub timestamp: DateTime<Utc>,
    pub price_per_share: f64,
}

/// 投資記錄
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentRow {
    pub investor_id: String,
    pub investment_id: String,
    pub investment_type: InvestmentType,
    pub reference_id: String,
}

/// 交易記錄
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub investment_id: String,
    pub transaction_type: TransactionType,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// 原始列轉換為驗證後記錄
pub trait ValidateRow {
    type Output;

    fn validate(self, date_formats: &[String]) -> Result<Self::Output, RowError>;
}

impl ValidateRow for RawQuote {
    type Output = PriceRow;

    fn validate(self, date_formats: &[String]) -> Result<PriceRow, RowError> {
        let isin = required(self.isin, "ISIN")?;
        let timestamp = parse_datetime(&self.date, date_formats)?;
        let price_per_share = finite(self.price_per_share, "PricePerShare")?;

        Ok(PriceRow {
            isin,
            timestamp,
            price_per_share,
        })
    }
}

impl ValidateRow for RawInvestment {
    type Output = InvestmentRow;

    fn validate(self, _date_formats: &[String]) -> Result<InvestmentRow, RowError> {
        let investor_id = required(self.investor_id, "InvestorId")?;
        let investment_id = required(self.investment_id, "InvestmentId")?;
        let investment_type: InvestmentType = self.investment_type.parse()?;

        // 參照欄位依投資類型而定
        let reference_id = match investment_type {
            InvestmentType::Stock => optional_required(self.isin, "ISIN")?,
            InvestmentType::Fonds => optional_required(self.fonds_investor, "FondsInvestor")?,
            InvestmentType::RealEstate => optional_required(self.city, "City")?,
        };

        Ok(InvestmentRow {
            investor_id,
            investment_id,
            investment_type,
            reference_id,
        })
    }
}

impl ValidateRow for RawTransaction {
    type Output = TransactionRow;

    fn validate(self, date_formats: &[String]) -> Result<TransactionRow, RowError> {
        let investment_id = required(self.investment_id, "InvestmentId")?;
        let transaction_type: TransactionType = self.transaction_type.parse()?;
        let timestamp = parse_datetime(&self.date, date_formats)?;
        let value = finite(self.value, "Value")?;

        Ok(TransactionRow {
            investment_id,
            transaction_type,
            timestamp,
            value,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, RowError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RowError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional_required(value: Option<String>, field: &'static str) -> Result<String, RowError> {
    required(value.unwrap_or_default(), field)
}

fn finite(value: f64, field: &'static str) -> Result<f64, RowError> {
    if !value.is_finite() {
        return Err(RowError::InvalidNumber { field, value });
    }
    Ok(value)
}
