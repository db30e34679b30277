use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// 單一商品 (ISIN) 的歷史價格序列
///
/// 同一時間戳最多只保留一個價格，後寫入者覆蓋。
/// 以 `BTreeMap` 依時間升冪儲存，查詢「某時點當下的價格」時
/// 只需找出時間戳 ≤ 查詢時點的最後一筆觀測值。
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    isin: String,
    observations: BTreeMap<DateTime<Utc>, f64>,
}

impl PriceSeries {
    /// 創建空的價格序列
    pub fn new(isin: impl Into<String>) -> Self {
        Self {
            isin: isin.into(),
            observations: BTreeMap::new(),
        }
    }

    /// 從既有觀測值創建價格序列
    pub fn from_observations<I>(isin: impl Into<String>, observations: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        let mut series = Self::new(isin);
        for (timestamp, price) in observations {
            series.add_observation(timestamp, price);
        }
        series
    }

    pub fn isin(&self) -> &str {
        &self.isin
    }

    /// 新增或覆蓋指定時間戳的價格
    ///
    /// 返回被覆蓋的舊價格（若有）
    pub fn add_observation(&mut self, timestamp: DateTime<Utc>, price: f64) -> Option<f64> {
        self.observations.insert(timestamp, price)
    }

    /// 查詢指定時點的價格
    ///
    /// 返回時間戳 ≤ `timestamp` 的最新觀測值；
    /// 序列為空或最早的觀測值晚於查詢時點時返回 `None`。
    pub fn price_at(&self, timestamp: DateTime<Utc>) -> Option<f64> {
        self.observations
            .range(..=timestamp)
            .next_back()
            .map(|(_, price)| *price)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// 最早的觀測時間
    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.observations.keys().next().copied()
    }

    /// 最新的觀測時間
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.observations.keys().next_back().copied()
    }
}
