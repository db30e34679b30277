//! 互動查詢迴圈
//!
//! 從輸入逐行讀取查詢，直到空行或輸入結束；單一查詢的錯誤只會輸出訊息，不會中斷迴圈。

use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::query::{QueryError, QueryRequest, QUERY_PROMPT};
use crate::report::ValuationReport;
use crate::valuation::{MissingPricePolicy, Registry, ValuationError};

/// 單次查詢的錯誤
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("查詢格式錯誤: {0}")]
    Query(#[from] QueryError),

    #[error("估值失敗: {0}")]
    Valuation(#[from] ValuationError),
}

/// 查詢迴圈的統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub answered: usize,
    pub failed: usize,
}

/// 針對已載入註冊表的查詢工作階段
pub struct QuerySession<'a> {
    registry: &'a Registry,
    policy: MissingPricePolicy,
    date_formats: &'a [String],
    verbose: bool,
}

impl<'a> QuerySession<'a> {
    pub fn new(registry: &'a Registry, policy: MissingPricePolicy) -> Self {
        Self {
            registry,
            policy,
            date_formats: &[],
            verbose: false,
        }
    }

    pub fn with_date_formats(mut self, date_formats: &'a [String]) -> Self {
        self.date_formats = date_formats;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 執行單一查詢並返回輸出文字
    pub fn answer(&self, line: &str) -> Result<String, SessionError> {
        let request = QueryRequest::parse(line, self.date_formats)?;
        debug!("查詢 {} 於 {}", request.investor_id, request.as_of);

        let valuation =
            self.registry
                .value_portfolio(&request.investor_id, request.as_of, self.policy)?;
        if valuation.is_degraded() {
            warn!(
                "{} 的估值缺少價格: {:?}",
                request.investor_id, valuation.unpriced_isins
            );
        }

        Ok(ValuationReport::new(&request.investor_id, request.as_of, &valuation, self.verbose)
            .to_string())
    }

    /// 逐行處理查詢，空行或輸入結束時停止
    ///
    /// 每筆查詢處理完畢後重新顯示提示。
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> io::Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        write_prompt(output)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                break;
            }

            match self.answer(&line) {
                Ok(text) => {
                    writeln!(output, "{}", text)?;
                    summary.answered += 1;
                }
                Err(err) => {
                    warn!("查詢 '{}' 失敗: {}", line.trim(), err);
                    writeln!(output, "{}", err)?;
                    summary.failed += 1;
                }
            }
            writeln!(output)?;
            write_prompt(output)?;
        }

        info!(
            "查詢結束: 成功 {} 筆, 失敗 {} 筆",
            summary.answered, summary.failed
        );
        Ok(summary)
    }
}

fn write_prompt<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "{}", QUERY_PROMPT)?;
    output.flush()
}
