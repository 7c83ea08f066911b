//! 銷售歷史模型

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ReorderError, Result};

/// 單筆銷售記錄
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    /// SKU
    pub sku: String,

    /// 銷售日期
    pub date: NaiveDate,

    /// 銷售數量
    pub units_sold: Decimal,
}

impl SalesRecord {
    /// 創建新的銷售記錄
    pub fn new(sku: String, date: NaiveDate, units_sold: Decimal) -> Self {
        Self {
            sku,
            date,
            units_sold,
        }
    }
}

/// 單一 SKU 的每日銷售歷史
///
/// 同日的多筆記錄在建構時合併加總；不存在的日期代表「無資料」，
/// 缺失日的解讀（視為零或排除）由策略配置決定。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesHistory {
    sku: String,

    /// 日期 → 當日銷售量
    daily: BTreeMap<NaiveDate, Decimal>,
}

impl SalesHistory {
    /// 創建空的銷售歷史
    pub fn new(sku: String) -> Self {
        Self {
            sku,
            daily: BTreeMap::new(),
        }
    }

    /// 從銷售記錄建構（記錄須屬於同一 SKU，同日記錄合併加總）
    pub fn from_records(sku: String, records: &[SalesRecord]) -> Result<Self> {
        let mut history = Self::new(sku);
        for record in records {
            if record.sku != history.sku {
                return Err(ReorderError::InvalidConfig(format!(
                    "銷售記錄 SKU 不符：預期 {}，實際 {}",
                    history.sku, record.sku
                )));
            }
            history.add(record.date, record.units_sold)?;
        }
        Ok(history)
    }

    /// 將混合多個 SKU 的記錄分組為各自的銷售歷史
    pub fn group_by_sku(records: Vec<SalesRecord>) -> Result<HashMap<String, Self>> {
        let mut grouped: HashMap<String, Self> = HashMap::new();
        for record in records {
            grouped
                .entry(record.sku.clone())
                .or_insert_with(|| Self::new(record.sku.clone()))
                .add(record.date, record.units_sold)?;
        }
        Ok(grouped)
    }

    /// 累加單日銷售量
    pub fn add(&mut self, date: NaiveDate, units_sold: Decimal) -> Result<()> {
        if units_sold < Decimal::ZERO {
            return Err(ReorderError::InvalidConfig(format!(
                "SKU {} 在 {} 的銷售量為負: {}",
                self.sku, date, units_sold
            )));
        }
        *self.daily.entry(date).or_insert(Decimal::ZERO) += units_sold;
        Ok(())
    }

    /// SKU 識別碼
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// 是否沒有任何記錄
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    /// 有記錄的天數
    pub fn recorded_days(&self) -> usize {
        self.daily.len()
    }

    /// 最早有記錄的日期
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.daily.keys().next().copied()
    }

    /// 最晚有記錄的日期
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.daily.keys().next_back().copied()
    }

    /// 指定日期的銷售量（None 代表該日無資料）
    pub fn units_on(&self, date: NaiveDate) -> Option<Decimal> {
        self.daily.get(&date).copied()
    }
}
