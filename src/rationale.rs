//! 建議理由文字產生
//!
//! 理由文字是附加的說明，不參與決策；以 trait 注入外層介面，
//! 核心引擎完全不知道它的存在。外部服務（如語言模型）實作與
//! 確定性模板實作可互換，前者失敗時以 `FallbackRationale` 退回模板。

use reorder_core::{DemandStats, ReorderRecommendation, Result, SupplierConfig};

/// 理由產生能力
pub trait RationaleGenerator {
    /// 為一筆補貨建議產生一段人話說明
    fn generate_rationale(
        &self,
        recommendation: &ReorderRecommendation,
        stats: &DemandStats,
        supplier: &SupplierConfig,
    ) -> Result<String>;
}

/// 確定性模板實作：相同輸入必得相同文字
pub struct TemplateRationale;

impl RationaleGenerator for TemplateRationale {
    fn generate_rationale(
        &self,
        recommendation: &ReorderRecommendation,
        stats: &DemandStats,
        supplier: &SupplierConfig,
    ) -> Result<String> {
        Ok(format!(
            "平均日需求約 {}，需求波動（sigma）約 {}；以交期 {} 天計算，\
             安全庫存約 {}，再訂購點約 {}。目前庫存 {}，建議訂購 {} 件\
             以補足目標水位 {}。",
            stats.avg_daily_demand.round_dp(2),
            stats.sigma.round_dp(2),
            supplier.lead_time_days,
            recommendation.safety_stock.round_dp(1),
            recommendation.reorder_point.round_dp(1),
            supplier.current_stock,
            recommendation.rounded_quantity,
            supplier.target_stock,
        ))
    }
}

/// 主要產生器失敗時退回確定性模板
pub struct FallbackRationale<P> {
    primary: P,
    template: TemplateRationale,
}

impl<P: RationaleGenerator> FallbackRationale<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            template: TemplateRationale,
        }
    }
}

impl<P: RationaleGenerator> RationaleGenerator for FallbackRationale<P> {
    fn generate_rationale(
        &self,
        recommendation: &ReorderRecommendation,
        stats: &DemandStats,
        supplier: &SupplierConfig,
    ) -> Result<String> {
        match self
            .primary
            .generate_rationale(recommendation, stats, supplier)
        {
            Ok(text) => Ok(text),
            Err(error) => {
                tracing::warn!(
                    "SKU {} 的主要理由產生失敗，改用模板: {}",
                    recommendation.sku,
                    error
                );
                self.template
                    .generate_rationale(recommendation, stats, supplier)
            }
        }
    }
}
