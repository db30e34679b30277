use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 投資類型枚舉
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum InvestmentType {
    Stock,      // 股票，參照 ISIN
    Fonds,      // 基金，參照基金持有人的投資人 ID
    RealEstate, // 不動產，參照城市名稱
}

impl InvestmentType {
    /// 此類型投資的交易應歸屬的組成桶
    pub fn bucket(&self) -> Bucket {
        match self {
            InvestmentType::Stock => Bucket::Shares,
            InvestmentType::Fonds => Bucket::Fonds,
            InvestmentType::RealEstate => Bucket::RealEstate,
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvestmentType::Stock => write!(f, "Stock"),
            InvestmentType::Fonds => write!(f, "Fonds"),
            InvestmentType::RealEstate => write!(f, "RealEstate"),
        }
    }
}

impl FromStr for InvestmentType {
    type Err = UnknownTypeTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stock" => Ok(InvestmentType::Stock),
            "fonds" => Ok(InvestmentType::Fonds),
            "realestate" => Ok(InvestmentType::RealEstate),
            _ => Err(UnknownTypeTag(s.to_string())),
        }
    }
}

/// 交易類型枚舉
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum TransactionType {
    Share,      // 股數
    Percentage, // 基金持有比例 (0.25 = 25%)
    Estate,     // 土地金額
    Building,   // 建物金額
}

impl TransactionType {
    /// 交易所歸屬的組成桶
    pub fn bucket(&self) -> Bucket {
        match self {
            TransactionType::Share => Bucket::Shares,
            TransactionType::Percentage => Bucket::Fonds,
            TransactionType::Estate | TransactionType::Building => Bucket::RealEstate,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Share => write!(f, "Share"),
            TransactionType::Percentage => write!(f, "Percentage"),
            TransactionType::Estate => write!(f, "Estate"),
            TransactionType::Building => write!(f, "Building"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = UnknownTypeTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "share" | "shares" => Ok(TransactionType::Share),
            "percentage" => Ok(TransactionType::Percentage),
            "estate" => Ok(TransactionType::Estate),
            "building" => Ok(TransactionType::Building),
            _ => Err(UnknownTypeTag(s.to_string())),
        }
    }
}

/// 組成桶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Shares,
    Fonds,
    RealEstate,
}

/// 無法識別的類型標籤
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("無法識別的類型標籤: '{0}'")]
pub struct UnknownTypeTag(pub String);
