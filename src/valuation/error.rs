//! 估值錯誤定義

use chrono::{DateTime, Utc};
use thiserror::Error;

/// 估值錯誤類型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    #[error("找不到投資人: {0}")]
    InvestorNotFound(String),

    #[error("基金持有關係出現循環: {}", chain.join(" -> "))]
    CyclicOwnership { chain: Vec<String> },

    #[error("找不到 {isin} 在 {as_of} 或之前的價格")]
    PriceNotFound { isin: String, as_of: DateTime<Utc> },
}

/// 建立註冊表時的錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("交易引用了不存在的投資 ID: {0}")]
    UnknownInvestment(String),
}

/// 估值結果類型
pub type ValuationResult<T> = Result<T, ValuationError>;
