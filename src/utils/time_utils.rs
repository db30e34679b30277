// time_utils.rs
//
// 提供時間字串解析相關的工具函數，供 CSV 載入與互動查詢共用。
// 主要功能：
// 1. 依序嘗試多種日期時間格式解析字串
// 2. 純日期格式視為當日 00:00:00
// 3. 一律轉為 UTC 時間

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// 預設支援的日期時間格式
pub const DEFAULT_DATETIME_FORMATS: &[&str] = &[
    "%d-%m-%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// 預設支援的純日期格式
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// 時間解析錯誤
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("無法解析時間 '{0}'")]
pub struct TimeParseError(pub String);

/// 解析時間字串
///
/// 依序嘗試 `extra_formats`、RFC 3339、預設日期時間格式與預設純日期格式。
pub fn parse_datetime(input: &str, extra_formats: &[String]) -> Result<DateTime<Utc>, TimeParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TimeParseError(input.to_string()));
    }

    for fmt in extra_formats {
        if let Some(dt) = try_format(input, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    DEFAULT_DATETIME_FORMATS
        .iter()
        .chain(DEFAULT_DATE_FORMATS)
        .find_map(|fmt| try_format(input, fmt))
        .ok_or_else(|| TimeParseError(input.to_string()))
}

// 格式可能含或不含時間部分
fn try_format(input: &str, fmt: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(input, fmt)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
