/// 配置管理模組
///
/// 本模組負責加載與驗證系統配置。
/// 配置來源依優先級由低到高：內建預設值、`config/<環境>.toml`、`PORTFOLIO__` 前綴的環境變數。
// 宣告子模組
pub mod loader;
pub mod manager;
pub mod types;
pub mod validation;

// 重新導出常用組件
pub use loader::{ConfigLoader, Environment};
pub use types::*;
pub use validation::{validate_config, ValidationError, ValidationUtils, Validator};
