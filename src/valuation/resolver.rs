use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::domain_types::PositionComposition;
use crate::valuation::error::{ValuationError, ValuationResult};
use crate::valuation::registry::Registry;

/// 找不到股票價格時的處理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPricePolicy {
    /// 該持股貢獻為零，並標記此 ISIN
    #[default]
    Zero,
    /// 整個查詢失敗
    Fail,
}

impl fmt::Display for MissingPricePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingPricePolicy::Zero => write!(f, "zero"),
            MissingPricePolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for MissingPricePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(MissingPricePolicy::Zero),
            "fail" => Ok(MissingPricePolicy::Fail),
            other => Err(format!("未知的缺價策略: {} (可用: zero, fail)", other)),
        }
    }
}

/// 估值結果：總值與三個桶的小計
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioValuation {
    pub stock: f64,
    pub fonds: f64,
    pub estate: f64,
    /// 無法取得價格而以零計算的 ISIN（含巢狀基金內的持股）
    pub unpriced_isins: BTreeSet<String>,
}

impl PortfolioValuation {
    pub fn total(&self) -> f64 {
        self.stock + self.fonds + self.estate
    }

    /// 估值是否因缺價而不完整
    pub fn is_degraded(&self) -> bool {
        !self.unpriced_isins.is_empty()
    }

    /// 各小計佔總值的百分比 (股票, 基金, 不動產)，總值為零時返回 `None`
    pub fn shares_of_total(&self) -> Option<(f64, f64, f64)> {
        let total = self.total();
        if total == 0.0 {
            return None;
        }
        Some((
            self.stock / total * 100.0,
            self.fonds / total * 100.0,
            self.estate / total * 100.0,
        ))
    }
}

/// 將持倉組成換算為金額，並遞迴解析基金持有
pub struct ValuationResolver<'a> {
    registry: &'a Registry,
    policy: MissingPricePolicy,
}

impl<'a> ValuationResolver<'a> {
    pub fn new(registry: &'a Registry, policy: MissingPricePolicy) -> Self {
        Self { registry, policy }
    }

    pub fn policy(&self) -> MissingPricePolicy {
        self.policy
    }

    /// 計算投資人在 `as_of` 時的完整投資組合價值
    pub fn value_portfolio(
        &self,
        investor_id: &str,
        as_of: DateTime<Utc>,
    ) -> ValuationResult<PortfolioValuation> {
        let mut in_progress = Vec::new();
        self.value_investor(investor_id, as_of, &mut in_progress)
    }

    /// 計算任意組成在 `as_of` 時的價值
    pub fn value_of(
        &self,
        composition: &PositionComposition,
        as_of: DateTime<Utc>,
    ) -> ValuationResult<PortfolioValuation> {
        let mut in_progress = Vec::new();
        self.value_composition(composition, as_of, &mut in_progress)
    }

    fn value_investor(
        &self,
        investor_id: &str,
        as_of: DateTime<Utc>,
        in_progress: &mut Vec<String>,
    ) -> ValuationResult<PortfolioValuation> {
        if in_progress.iter().any(|id| id == investor_id) {
            let mut chain = in_progress.clone();
            chain.push(investor_id.to_string());
            return Err(ValuationError::CyclicOwnership { chain });
        }

        let investor = self
            .registry
            .investor(investor_id)
            .ok_or_else(|| ValuationError::InvestorNotFound(investor_id.to_string()))?;

        in_progress.push(investor_id.to_string());
        let result = self.value_composition(&investor.composition_at(as_of), as_of, in_progress);
        in_progress.pop();

        result
    }

    fn value_composition(
        &self,
        composition: &PositionComposition,
        as_of: DateTime<Utc>,
        in_progress: &mut Vec<String>,
    ) -> ValuationResult<PortfolioValuation> {
        let mut valuation = PortfolioValuation {
            estate: composition.real_estate().values().sum(),
            ..Default::default()
        };

        for (isin, share_count) in composition.shares() {
            match self.registry.price_at(isin, as_of) {
                Some(price) => valuation.stock += share_count * price,
                None => match self.policy {
                    MissingPricePolicy::Zero => {
                        warn!("找不到 {} 在 {} 的價格，以零計算", isin, as_of);
                        valuation.unpriced_isins.insert(isin.clone());
                    }
                    MissingPricePolicy::Fail => {
                        return Err(ValuationError::PriceNotFound {
                            isin: isin.clone(),
                            as_of,
                        });
                    }
                },
            }
        }

        for (fund_owner, fraction) in composition.fonds() {
            debug!("解析基金持有: {} 的 {}", fund_owner, fraction);
            let nested = self.value_investor(fund_owner, as_of, in_progress)?;
            valuation.fonds += fraction * nested.total();
            valuation.unpriced_isins.extend(nested.unpriced_isins);
        }

        Ok(valuation)
    }
}
