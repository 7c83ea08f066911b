//! 補貨建議模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 補貨建議（決策引擎輸出）
///
/// 純粹由需求統計 + 供應商配置 + 評估日推導，隨需重新計算，無獨立生命週期。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRecommendation {
    /// 建議 ID
    pub id: Uuid,

    /// SKU
    pub sku: String,

    /// 評估日
    pub evaluation_date: NaiveDate,

    /// 安全庫存
    pub safety_stock: Decimal,

    /// 再訂購點
    pub reorder_point: Decimal,

    /// 是否應立即補貨（目前庫存嚴格低於再訂購點）
    pub should_reorder: bool,

    /// 未進位的建議訂購量
    pub raw_quantity: Decimal,

    /// 進位後的訂購量（整箱倍數）
    pub rounded_quantity: Decimal,

    /// 建議下單日期；平均需求為零且未觸發補貨時無法預測
    pub reorder_by_date: Option<NaiveDate>,

    /// 信心分數 [0, 1]
    pub confidence: f64,
}

impl ReorderRecommendation {
    /// 截至指定日期是否應已下單（回測據此決定是否送出訂單）
    pub fn is_due(&self, date: NaiveDate) -> bool {
        match self.reorder_by_date {
            Some(due) => due <= date && self.rounded_quantity > Decimal::ZERO,
            None => false,
        }
    }

    /// 距建議下單日的天數（已過期為 0）
    pub fn days_until_due(&self, from: NaiveDate) -> Option<i64> {
        self.reorder_by_date
            .map(|due| (due - from).num_days().max(0))
    }
}
