//! 估值結果輸出
//!
//! 一般模式只輸出總值；詳細模式另外列出三個桶的小計、百分比與缺價的 ISIN。

use chrono::{DateTime, Utc};
use std::fmt;

use crate::valuation::PortfolioValuation;

/// 單次查詢的估值報告
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationReport<'a> {
    pub investor_id: &'a str,
    pub as_of: DateTime<Utc>,
    pub valuation: &'a PortfolioValuation,
    pub verbose: bool,
}

impl<'a> ValuationReport<'a> {
    pub fn new(
        investor_id: &'a str,
        as_of: DateTime<Utc>,
        valuation: &'a PortfolioValuation,
        verbose: bool,
    ) -> Self {
        Self {
            investor_id,
            as_of,
            valuation,
            verbose,
        }
    }

    fn write_breakdown(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.valuation;
        let (stock_pct, fonds_pct, estate_pct) = v.shares_of_total().unwrap_or((0.0, 0.0, 0.0));

        writeln!(f)?;
        writeln!(f, "  股票:   {:>14.2} ({:>6.2}%)", v.stock, stock_pct)?;
        writeln!(f, "  基金:   {:>14.2} ({:>6.2}%)", v.fonds, fonds_pct)?;
        write!(f, "  不動產: {:>14.2} ({:>6.2}%)", v.estate, estate_pct)?;

        if v.is_degraded() {
            let isins: Vec<&str> = v.unpriced_isins.iter().map(String::as_str).collect();
            writeln!(f)?;
            write!(f, "  缺少價格 (以零計): {}", isins.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for ValuationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} 於 {} 的投資組合價值: {:.2}",
            self.investor_id,
            self.as_of.format("%Y-%m-%d %H:%M:%S"),
            self.valuation.total()
        )?;

        if self.verbose {
            self.write_breakdown(f)?;
        } else if self.valuation.is_degraded() {
            write!(f, " (有 {} 檔商品缺少價格)", self.valuation.unpriced_isins.len())?;
        }
        Ok(())
    }
}
