//! 估值模組
//!
//! 將投資人的持倉組成換算為某時點的金額。
//!
//! # 主要功能
//!
//! - **註冊表**：持有所有投資人、投資與價格序列，載入後只讀
//! - **遞迴估值**：股票以股數乘以當時價格，不動產直接加總，
//!   基金則遞迴計算被持有投資人的完整組合價值再乘以持有比例
//! - **循環偵測**：以進行中的投資人堆疊偵測基金持有循環
//!
//! # 使用範例
//!
//! ```rust,ignore
//! use portfolio_check::valuation::{MissingPricePolicy, Registry};
//!
//! let valuation = registry.value_portfolio("Investor1", as_of, MissingPricePolicy::Zero)?;
//! println!("總值: {:.2}", valuation.total());
//! ```

pub mod error;
pub mod registry;
pub mod resolver;

pub use error::{RegistryError, ValuationError, ValuationResult};
pub use registry::Registry;
pub use resolver::{MissingPricePolicy, PortfolioValuation, ValuationResolver};
