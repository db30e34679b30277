use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::domain_types::asset_types::{InvestmentType, TransactionType};
use crate::domain_types::composition::PositionComposition;

/// 單筆持有權交易
///
/// `investment_id` 只是回指所屬投資的鍵，不擁有該投資。
/// `value` 的意義依類型而定：股數、持有比例或金額，正負號照原樣保存。
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub investment_id: String,
    pub transaction_type: TransactionType,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Transaction {
    pub fn new(
        investment_id: impl Into<String>,
        transaction_type: TransactionType,
        timestamp: DateTime<Utc>,
        value: f64,
    ) -> Self {
        Self {
            investment_id: investment_id.into(),
            transaction_type,
            timestamp,
            value,
        }
    }
}

/// 單一投資：類型、類型專屬參照 ID 與依時間排序的交易
#[derive(Debug, Clone)]
pub struct Investment {
    investment_id: String,
    investment_type: InvestmentType,
    reference_id: String,
    // 同一時點可能有多筆交易
    transactions: BTreeMap<DateTime<Utc>, Vec<Transaction>>,
}

impl Investment {
    pub fn new(
        investment_id: impl Into<String>,
        investment_type: InvestmentType,
        reference_id: impl Into<String>,
    ) -> Self {
        Self {
            investment_id: investment_id.into(),
            investment_type,
            reference_id: reference_id.into(),
            transactions: BTreeMap::new(),
        }
    }

    pub fn investment_id(&self) -> &str {
        &self.investment_id
    }

    pub fn investment_type(&self) -> InvestmentType {
        self.investment_type
    }

    /// 類型專屬參照：股票為 ISIN、基金為持有人投資人 ID、不動產為城市
    pub fn reference_id(&self) -> &str {
        &self.reference_id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions
            .entry(transaction.timestamp)
            .or_default()
            .push(transaction);
    }

    /// 交易筆數
    pub fn transaction_count(&self) -> usize {
        self.transactions.values().map(Vec::len).sum()
    }

    /// 計算截至 `cutoff`（含）的淨持倉組成
    ///
    /// 交易依類型歸入對應的桶，鍵為本投資的參照 ID。
    pub fn composition_at(&self, cutoff: DateTime<Utc>) -> PositionComposition {
        let mut composition = PositionComposition::new();
        for transaction in self.transactions.range(..=cutoff).flat_map(|(_, txs)| txs) {
            composition.add(
                transaction.transaction_type.bucket(),
                &self.reference_id,
                transaction.value,
            );
        }
        composition
    }
}

/// 投資人及其名下的投資
#[derive(Debug, Clone)]
pub struct Investor {
    investor_id: String,
    investments: HashMap<String, Investment>,
}

impl Investor {
    pub fn new(investor_id: impl Into<String>) -> Self {
        Self {
            investor_id: investor_id.into(),
            investments: HashMap::new(),
        }
    }

    pub fn investment(&self, investment_id: &str) -> Option<&Investment> {
        self.investments.get(investment_id)
    }

    pub fn investment_mut(&mut self, investment_id: &str) -> Option<&mut Investment> {
        self.investments.get_mut(investment_id)
    }

    /// 新增投資，若 ID 重複則覆蓋並返回舊投資
    pub fn add_investment(&mut self, investment: Investment) -> Option<Investment> {
        let previous = self
            .investments
            .insert(investment.investment_id().to_string(), investment);
        if let Some(old) = &previous {
            warn!(
                "投資人 '{}': 覆蓋投資 ID '{}' 的資料",
                self.investor_id,
                old.investment_id()
            );
        }
        previous
    }

    pub fn remove_investment(&mut self, investment_id: &str) -> Option<Investment> {
        self.investments.remove(investment_id)
    }

    /// 單一投資在 `cutoff` 時的組成，投資不存在時返回空組成
    pub fn investment_composition_at(
        &self,
        investment_id: &str,
        cutoff: DateTime<Utc>,
    ) -> PositionComposition {
        self.investments
            .get(investment_id)
            .map(|investment| investment.composition_at(cutoff))
            .unwrap_or_default()
    }

    /// 所有投資在 `cutoff` 時的合併組成
    pub fn composition_at(&self, cutoff: DateTime<Utc>) -> PositionComposition {
        let mut composition = PositionComposition::new();
        for investment in self.investments.values() {
            composition.combine(&investment.composition_at(cutoff));
        }
        composition
    }
}
