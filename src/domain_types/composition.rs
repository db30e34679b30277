use std::collections::HashMap;

use crate::domain_types::asset_types::Bucket;

/// 某時點的持倉組成快照
///
/// 三個桶分別記錄：
/// - `shares`：ISIN → 累計股數
/// - `fonds`：基金持有人投資人 ID → 累計持有比例
/// - `real_estate`：城市 → 累計金額
///
/// 每次查詢都重新產生，除 `combine` 之外不再變動。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionComposition {
    shares: HashMap<String, f64>,
    fonds: HashMap<String, f64>,
    real_estate: HashMap<String, f64>,
}

impl PositionComposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// 從三個桶直接創建組成
    pub fn from_buckets(
        shares: HashMap<String, f64>,
        fonds: HashMap<String, f64>,
        real_estate: HashMap<String, f64>,
    ) -> Self {
        Self {
            shares,
            fonds,
            real_estate,
        }
    }

    pub fn shares(&self) -> &HashMap<String, f64> {
        &self.shares
    }

    pub fn fonds(&self) -> &HashMap<String, f64> {
        &self.fonds
    }

    pub fn real_estate(&self) -> &HashMap<String, f64> {
        &self.real_estate
    }

    /// 在指定桶內對某個鍵累加數值，鍵不存在時插入
    pub fn add(&mut self, bucket: Bucket, key: &str, value: f64) {
        let target = self.bucket_mut(bucket);
        match target.get_mut(key) {
            Some(existing) => *existing += value,
            None => {
                target.insert(key.to_string(), value);
            }
        }
    }

    /// 將 `source` 的三個桶逐鍵加總到自身
    ///
    /// 不會移除任何鍵，加總為零的項目仍保留。
    pub fn combine(&mut self, source: &PositionComposition) {
        for (bucket, entries) in source.buckets() {
            for (key, value) in entries {
                self.add(bucket, key, *value);
            }
        }
    }

    /// 三個桶皆無任何項目
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty() && self.fonds.is_empty() && self.real_estate.is_empty()
    }

    fn buckets(&self) -> [(Bucket, &HashMap<String, f64>); 3] {
        [
            (Bucket::Shares, &self.shares),
            (Bucket::Fonds, &self.fonds),
            (Bucket::RealEstate, &self.real_estate),
        ]
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut HashMap<String, f64> {
        match bucket {
            Bucket::Shares => &mut self.shares,
            Bucket::Fonds => &mut self.fonds,
            Bucket::RealEstate => &mut self.real_estate,
        }
    }
}
