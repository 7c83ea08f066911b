//! 補貨決策規則
//!
//! 確定性統計策略：安全庫存 → 再訂購點 → order-up-to 訂購量 → 建議日期 → 信心分數。
//! 無隱藏狀態，相同輸入必得相同輸出。

use chrono::{Duration, NaiveDate};
use reorder_core::{
    DemandStats, PolicyConfig, ReorderError, ReorderRecommendation, Result, SupplierConfig,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::rounding::round_to_pack;

/// 補貨決策計算器
pub struct ReorderPolicy;

impl ReorderPolicy {
    /// 產生單一 SKU 的補貨建議
    ///
    /// * `primary` - 主要作業視窗的需求統計，決策依據
    /// * `cross_checks` - 其他視窗的統計，僅用於波動度交叉檢查（信心分數）
    pub fn recommend(
        primary: &DemandStats,
        cross_checks: &[DemandStats],
        supplier: &SupplierConfig,
        evaluation_date: NaiveDate,
        config: &PolicyConfig,
    ) -> Result<ReorderRecommendation> {
        supplier.validate()?;
        config.validate()?;

        // 安全庫存 = z * sigma * sqrt(提前期)
        // 使用 f64 計算平方根，然後轉回 Decimal
        let sigma_f64 = primary.sigma.to_string().parse::<f64>().unwrap_or(0.0);
        let safety_f64 =
            config.z_score * sigma_f64 * f64::from(supplier.lead_time_days).sqrt();
        let safety_stock = Decimal::try_from(safety_f64).map_err(|e| {
            ReorderError::CalculationError(format!(
                "SKU {} 安全庫存轉換失敗: {e}",
                supplier.sku
            ))
        })?;

        // 再訂購點 = 平均日需求 * 提前期 + 安全庫存
        let reorder_point = primary.avg_daily_demand * Decimal::from(supplier.lead_time_days)
            + safety_stock;

        // 嚴格小於才觸發；恰好等於再訂購點不補貨
        let should_reorder = supplier.current_stock < reorder_point;

        // order-up-to：補足到目標水位
        let raw_quantity = if should_reorder {
            (supplier.target_stock - supplier.current_stock).max(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        let mut rounded_quantity = round_to_pack(raw_quantity, supplier.pack_size)?;
        if let Some(min_qty) = supplier.min_order_qty {
            // 最小訂購量只抬高非零訂單，抬高後仍須是整箱倍數
            if rounded_quantity > Decimal::ZERO && rounded_quantity < min_qty {
                rounded_quantity = round_to_pack(min_qty, supplier.pack_size)?;
            }
        }

        let reorder_by_date = Self::project_reorder_date(
            should_reorder,
            supplier.current_stock,
            reorder_point,
            primary.avg_daily_demand,
            evaluation_date,
        )?;

        let confidence = Self::confidence(primary, cross_checks, config);

        Ok(ReorderRecommendation {
            id: Uuid::new_v4(),
            sku: supplier.sku.clone(),
            evaluation_date,
            safety_stock,
            reorder_point,
            should_reorder,
            raw_quantity,
            rounded_quantity,
            reorder_by_date,
            confidence,
        })
    }

    /// 預計下單日期
    ///
    /// 已觸發補貨 → 評估日當天。未觸發 → 假設庫存以平均日需求遞減，
    /// 預計跌至再訂購點的日期（向下取整天數，不為負）。
    /// 平均需求為零時無法預測，回傳 None（明確防護除以零）。
    fn project_reorder_date(
        should_reorder: bool,
        current_stock: Decimal,
        reorder_point: Decimal,
        avg_daily_demand: Decimal,
        evaluation_date: NaiveDate,
    ) -> Result<Option<NaiveDate>> {
        if should_reorder {
            return Ok(Some(evaluation_date));
        }
        if avg_daily_demand.is_zero() {
            return Ok(None);
        }

        let days_decimal = ((current_stock - reorder_point) / avg_daily_demand).floor();
        let days = days_decimal
            .to_string()
            .parse::<i64>()
            .unwrap_or(0)
            .max(0);

        let projected = evaluation_date
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| {
                ReorderError::InvalidDate(format!("預計下單日期溢出（+{days} 天）"))
            })?;
        Ok(Some(projected))
    }

    /// 信心分數：三個單調懲罰因子的乘積，各自落在 [0, 1]
    ///
    /// 1. 歷史覆蓋率 = min(1, 可用天數 / 視窗天數)
    /// 2. 波動度 = 1 / (1 + 最差變異係數)，含交叉檢查視窗
    /// 3. 需求量級：平均為零 → 0；低於近零門檻 → 平均 / 門檻；否則 1
    fn confidence(
        primary: &DemandStats,
        cross_checks: &[DemandStats],
        config: &PolicyConfig,
    ) -> f64 {
        let history_factor = if primary.window_days == 0 {
            0.0
        } else {
            (f64::from(primary.days_available) / f64::from(primary.window_days)).min(1.0)
        };

        let worst_cv = std::iter::once(primary)
            .chain(cross_checks.iter())
            .filter_map(|stats| stats.coefficient_of_variation())
            .max();
        let volatility_factor = match worst_cv {
            Some(cv) => {
                let cv_f64 = cv.to_string().parse::<f64>().unwrap_or(0.0);
                1.0 / (1.0 + cv_f64)
            }
            None => 1.0,
        };

        let avg_f64 = primary
            .avg_daily_demand
            .to_string()
            .parse::<f64>()
            .unwrap_or(0.0);
        let threshold_f64 = config
            .near_zero_demand_threshold
            .to_string()
            .parse::<f64>()
            .unwrap_or(0.0);
        let demand_factor = if avg_f64 <= 0.0 {
            0.0
        } else if threshold_f64 > 0.0 && avg_f64 < threshold_f64 {
            avg_f64 / threshold_f64
        } else {
            1.0
        };

        (history_factor * volatility_factor * demand_factor).clamp(0.0, 1.0)
    }
}
