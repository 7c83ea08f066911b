//! 回測狀態與輸出記錄

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reorder_core::{ReorderError, Result};

/// 在途補貨（已下單、尚未到貨）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingReplenishment {
    /// 訂單 ID
    pub id: Uuid,

    /// 到貨日期
    pub arrival_date: NaiveDate,

    /// 訂購數量
    pub quantity: Decimal,
}

/// 單一 SKU 的模擬狀態
///
/// 由一次回測獨占，僅由模擬器的每日步驟修改，回測結束即丟棄。
#[derive(Debug, Clone)]
pub struct BacktestState {
    /// 模擬庫存
    pub simulated_stock: Decimal,

    /// 在途補貨佇列（依下單先後排列）
    pub pending: Vec<PendingReplenishment>,
}

impl BacktestState {
    /// 以期初庫存建立狀態
    pub fn new(initial_stock: Decimal) -> Self {
        Self {
            simulated_stock: initial_stock,
            pending: Vec::new(),
        }
    }

    /// Step 1：收取今日到貨，回傳到貨總量
    pub fn receive_arrivals(&mut self, date: NaiveDate) -> Decimal {
        let arrived: Decimal = self
            .pending
            .iter()
            .filter(|order| order.arrival_date == date)
            .map(|order| order.quantity)
            .sum();
        self.pending.retain(|order| order.arrival_date > date);
        self.simulated_stock += arrived;
        arrived
    }

    /// Step 2：扣除當日實際需求
    ///
    /// 庫存不足時歸零並回報缺貨（失銷，不補記欠貨）。
    pub fn consume(&mut self, demand: Decimal) -> bool {
        if demand > self.simulated_stock {
            self.simulated_stock = Decimal::ZERO;
            true
        } else {
            self.simulated_stock -= demand;
            false
        }
    }

    /// Step 4：下單，到貨日 = 下單日 + 交期
    pub fn place_order(
        &mut self,
        order_date: NaiveDate,
        lead_time_days: u32,
        quantity: Decimal,
    ) -> Result<NaiveDate> {
        let arrival_date = order_date
            .checked_add_signed(Duration::days(i64::from(lead_time_days)))
            .ok_or_else(|| {
                ReorderError::InvalidDate(format!(
                    "到貨日期溢出（下單日 {order_date} + {lead_time_days} 天）"
                ))
            })?;
        self.pending.push(PendingReplenishment {
            id: Uuid::new_v4(),
            arrival_date,
            quantity,
        });
        Ok(arrival_date)
    }

    /// 在途總量
    pub fn on_order(&self) -> Decimal {
        self.pending.iter().map(|order| order.quantity).sum()
    }
}

/// 回測每日記錄（審計軌跡，僅追加、不回頭修改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestDayRecord {
    /// 日期
    pub date: NaiveDate,

    /// 日初庫存（到貨入庫前）
    pub stock_before: Decimal,

    /// 今日到貨量
    pub quantity_received: Decimal,

    /// 當日實際需求
    pub demand: Decimal,

    /// 日終庫存
    pub stock_after: Decimal,

    /// 是否缺貨（需求超過可用庫存）
    pub stockout: bool,

    /// 是否實際下單
    pub reorder_triggered: bool,

    /// 下單數量
    pub quantity_ordered: Decimal,
}

/// 單一 SKU 的回測彙總
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSummary {
    /// SKU
    pub sku: String,

    /// 模擬總天數
    pub total_days: u32,

    /// 缺貨天數
    pub stockout_days: u32,

    /// 服務水準（無缺貨天數比例）
    pub service_level: f64,

    /// 平均庫存（日終庫存的平均）
    pub avg_inventory: Decimal,
}

impl BacktestSummary {
    /// 由每日記錄彙總
    pub fn from_records(sku: String, records: &[BacktestDayRecord]) -> Self {
        let total_days = records.len() as u32;
        let stockout_days = records.iter().filter(|r| r.stockout).count() as u32;
        let service_level = if total_days == 0 {
            1.0
        } else {
            1.0 - f64::from(stockout_days) / f64::from(total_days)
        };
        let avg_inventory = if total_days == 0 {
            Decimal::ZERO
        } else {
            let total: Decimal = records.iter().map(|r| r.stock_after).sum();
            total / Decimal::from(total_days)
        };

        Self {
            sku,
            total_days,
            stockout_days,
            service_level,
            avg_inventory,
        }
    }
}
