pub mod asset_types;
pub mod composition;
pub mod investment;
pub mod price_series;

pub use asset_types::{Bucket, InvestmentType, TransactionType, UnknownTypeTag};
pub use composition::PositionComposition;
pub use investment::{Investment, Investor, Transaction};
pub use price_series::PriceSeries;
