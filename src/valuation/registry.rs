use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::warn;

use crate::domain_types::{Investment, Investor, PriceSeries, Transaction};
use crate::valuation::error::{RegistryError, ValuationResult};
use crate::valuation::resolver::{MissingPricePolicy, PortfolioValuation, ValuationResolver};

/// 投資人、投資與價格序列的註冊表
///
/// 在載入階段建立一次，查詢階段只讀。
#[derive(Debug, Clone, Default)]
pub struct Registry {
    investors: HashMap<String, Investor>,
    // 投資 ID → 投資人 ID，用於連結交易
    investment_owners: HashMap<String, String>,
    price_series: HashMap<String, PriceSeries>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記錄一筆價格觀測值，同一時間戳的舊值會被覆蓋
    pub fn add_price(&mut self, isin: &str, timestamp: DateTime<Utc>, price: f64) {
        self.price_series
            .entry(isin.to_string())
            .or_insert_with(|| PriceSeries::new(isin))
            .add_observation(timestamp, price);
    }

    /// 將投資登記到指定投資人名下，投資人不存在時自動建立
    pub fn add_investment(&mut self, investor_id: &str, investment: Investment) {
        let investment_id = investment.investment_id().to_string();

        if let Some(previous_owner) = self.investment_owners.get(&investment_id) {
            if previous_owner != investor_id {
                warn!(
                    "投資 ID '{}' 已屬於投資人 '{}'，改為歸屬 '{}'",
                    investment_id, previous_owner, investor_id
                );
                if let Some(owner) = self.investors.get_mut(previous_owner) {
                    owner.remove_investment(&investment_id);
                }
            }
        }

        self.investors
            .entry(investor_id.to_string())
            .or_insert_with(|| Investor::new(investor_id))
            .add_investment(investment);
        self.investment_owners
            .insert(investment_id, investor_id.to_string());
    }

    /// 將交易連結到其所屬投資
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<(), RegistryError> {
        let investment = self
            .investment_owners
            .get(&transaction.investment_id)
            .and_then(|owner| self.investors.get_mut(owner))
            .and_then(|investor| investor.investment_mut(&transaction.investment_id))
            .ok_or_else(|| RegistryError::UnknownInvestment(transaction.investment_id.clone()))?;

        // 類型不符時仍依交易類型歸桶
        if transaction.transaction_type.bucket() != investment.investment_type().bucket() {
            warn!(
                "投資 '{}' 類型為 {}，但收到 {} 交易",
                transaction.investment_id,
                investment.investment_type(),
                transaction.transaction_type
            );
        }

        investment.add_transaction(transaction);
        Ok(())
    }

    pub fn investor(&self, investor_id: &str) -> Option<&Investor> {
        self.investors.get(investor_id)
    }

    pub fn contains_investor(&self, investor_id: &str) -> bool {
        self.investors.contains_key(investor_id)
    }

    /// 所有投資人 ID（已排序）
    pub fn investor_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.investors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn price_series(&self, isin: &str) -> Option<&PriceSeries> {
        self.price_series.get(isin)
    }

    /// 查詢某 ISIN 在指定時點的價格
    pub fn price_at(&self, isin: &str, timestamp: DateTime<Utc>) -> Option<f64> {
        self.price_series(isin)
            .and_then(|series| series.price_at(timestamp))
    }

    pub fn investor_count(&self) -> usize {
        self.investors.len()
    }

    pub fn investment_count(&self) -> usize {
        self.investment_owners.len()
    }

    pub fn instrument_count(&self) -> usize {
        self.price_series.len()
    }

    /// 以指定的缺價策略建立估值器
    pub fn resolver(&self, policy: MissingPricePolicy) -> ValuationResolver<'_> {
        ValuationResolver::new(self, policy)
    }

    /// 計算投資人在指定時點的投資組合價值
    pub fn value_portfolio(
        &self,
        investor_id: &str,
        timestamp: DateTime<Utc>,
        policy: MissingPricePolicy,
    ) -> ValuationResult<PortfolioValuation> {
        self.resolver(policy).value_portfolio(investor_id, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_types::{InvestmentType, TransactionType};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_transaction_links_to_investment() {
        let mut registry = Registry::new();
        registry.add_investment("inv1", Investment::new("I1", InvestmentType::Stock, "ISIN1"));

        registry
            .add_transaction(Transaction::new("I1", TransactionType::Share, t0(), 10.0))
            .unwrap();

        let investment = registry.investor("inv1").unwrap().investment("I1").unwrap();
        assert_eq!(investment.transaction_count(), 1);
    }

    #[test]
    fn test_add_transaction_with_unknown_investment_fails() {
        let mut registry = Registry::new();
        let err = registry
            .add_transaction(Transaction::new("nope", TransactionType::Share, t0(), 1.0))
            .unwrap_err();
        assert_eq!(err, RegistryError::UnknownInvestment("nope".to_string()));
    }

    #[test]
    fn test_investment_moved_to_new_owner() {
        let mut registry = Registry::new();
        registry.add_investment("inv1", Investment::new("I1", InvestmentType::Stock, "ISIN1"));
        registry.add_investment("inv2", Investment::new("I1", InvestmentType::Stock, "ISIN1"));

        assert!(registry.investor("inv1").unwrap().investment("I1").is_none());
        assert!(registry.investor("inv2").unwrap().investment("I1").is_some());
        assert_eq!(registry.investment_count(), 1);
    }

    #[test]
    fn test_price_lookup_through_registry() {
        let mut registry = Registry::new();
        registry.add_price("ISIN1", t0(), 50.0);
        registry.add_price("ISIN1", t0(), 55.0);

        assert_eq!(registry.price_at("ISIN1", t0()), Some(55.0));
        assert_eq!(registry.price_at("ISIN1", t0() - chrono::Duration::seconds(1)), None);
        assert_eq!(registry.price_at("ISIN2", t0()), None);
        assert_eq!(registry.instrument_count(), 1);
    }

    #[test]
    fn test_price_series_lookup() {
        let mut registry = Registry::new();
        registry.add_price("ISIN1", t0(), 50.0);
        registry.add_price("ISIN1", t0() + chrono::Duration::days(1), 52.0);

        let series = registry.price_series("ISIN1").unwrap();
        assert_eq!(series.isin(), "ISIN1");
        assert_eq!(series.len(), 2);
        assert_eq!(series.last_timestamp(), Some(t0() + chrono::Duration::days(1)));
        assert!(registry.price_series("ISIN2").is_none());
    }

    #[test]
    fn test_mismatched_transaction_type_is_still_linked() {
        let mut registry = Registry::new();
        registry.add_investment("inv1", Investment::new("I1", InvestmentType::RealEstate, "Berlin"));

        registry
            .add_transaction(Transaction::new("I1", TransactionType::Share, t0(), 3.0))
            .unwrap();

        let investor = registry.investor("inv1").unwrap();
        assert_eq!(investor.investment("I1").unwrap().transaction_count(), 1);
        assert_eq!(investor.composition_at(t0()).shares().get("Berlin"), Some(&3.0));
    }

    #[test]
    fn test_investor_ids_are_sorted() {
        let mut registry = Registry::new();
        registry.add_investment("b", Investment::new("I1", InvestmentType::Stock, "X"));
        registry.add_investment("a", Investment::new("I2", InvestmentType::Stock, "Y"));
        assert_eq!(registry.investor_ids(), vec!["a", "b"]);
        assert!(registry.contains_investor("a"));
        assert_eq!(registry.investor_count(), 2);
    }
}
