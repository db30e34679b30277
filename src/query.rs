//! 互動查詢解析
//!
//! 查詢格式為 `<日期時間>;<投資人 ID>`，例如 `01-06-2020 12:00:00;Investor1`。

use chrono::{DateTime, Utc};
use std::str::FromStr;
use thiserror::Error;

use crate::utils::{parse_datetime, TimeParseError};

/// 查詢提示文字
pub const QUERY_PROMPT: &str = "請輸入查詢，格式為 'd-m-Y HH:MM:SS;投資人ID'（空行結束）:";

/// 查詢解析錯誤
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("查詢必須以分號 ';' 分隔時間與投資人 ID，且兩側皆不可為空")]
    InvalidFormat,

    #[error(transparent)]
    InvalidTimestamp(#[from] TimeParseError),
}

/// 一筆估值查詢
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub as_of: DateTime<Utc>,
    pub investor_id: String,
}

impl QueryRequest {
    /// 以額外的日期格式解析查詢
    pub fn parse(line: &str, date_formats: &[String]) -> Result<Self, QueryError> {
        let parts: Vec<&str> = line.trim().split(';').map(str::trim).collect();
        let [timestamp, investor_id] = parts.as_slice() else {
            return Err(QueryError::InvalidFormat);
        };
        if timestamp.is_empty() || investor_id.is_empty() {
            return Err(QueryError::InvalidFormat);
        }

        Ok(Self {
            as_of: parse_datetime(timestamp, date_formats)?,
            investor_id: investor_id.to_string(),
        })
    }
}

impl FromStr for QueryRequest {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn test_parse_valid_query() {
        let query: QueryRequest = "01-06-2020 12:30:00;Investor1".parse().unwrap();
        assert_eq!(query.as_of, Utc.with_ymd_and_hms(2020, 6, 1, 12, 30, 0).unwrap());
        assert_eq!(query.investor_id, "Investor1");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let query: QueryRequest = "  2020-06-01 ; Investor7 ".parse().unwrap();
        assert_eq!(query.investor_id, "Investor7");
        assert_eq!(query.as_of, Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap());
    }

    #[rstest]
    #[case("01-06-2020 12:30:00")]
    #[case(";Investor1")]
    #[case("01-06-2020;")]
    #[case("01-06-2020;Investor1;extra")]
    fn test_parse_invalid_format(#[case] line: &str) {
        assert_eq!(line.parse::<QueryRequest>(), Err(QueryError::InvalidFormat));
    }

    #[test]
    fn test_parse_invalid_timestamp() {
        let result = "someday;Investor1".parse::<QueryRequest>();
        assert!(matches!(result, Err(QueryError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_parse_with_custom_format() {
        let formats = vec!["%Y|%m|%d".to_string()];
        let query = QueryRequest::parse("2020|06|01;Investor1", &formats).unwrap();
        assert_eq!(query.as_of, Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap());
    }
}
