// utils.rs - 公共工具模組
//
// 提供各種通用的工具函數和輔助方法，用於簡化系統其他部分的代碼。

pub mod time_utils;

pub use time_utils::{parse_datetime, TimeParseError};
