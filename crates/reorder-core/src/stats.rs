//! 需求統計模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單一視窗的需求統計（每個評估日重新計算，產生後不可變）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandStats {
    /// 要求的視窗天數
    pub window_days: u32,

    /// 視窗內實際可用的天數（少於視窗天數時信心降低）
    pub days_available: u32,

    /// 平均日需求
    pub avg_daily_demand: Decimal,

    /// 日需求樣本標準差
    pub sigma: Decimal,
}

impl DemandStats {
    /// 創建新的需求統計
    pub fn new(
        window_days: u32,
        days_available: u32,
        avg_daily_demand: Decimal,
        sigma: Decimal,
    ) -> Self {
        Self {
            window_days,
            days_available,
            avg_daily_demand,
            sigma,
        }
    }

    /// 變異係數（sigma / 平均）；平均為零時無定義
    pub fn coefficient_of_variation(&self) -> Option<Decimal> {
        if self.avg_daily_demand > Decimal::ZERO {
            Some(self.sigma / self.avg_daily_demand)
        } else {
            None
        }
    }

    /// 視窗內的歷史是否完整
    pub fn has_full_window(&self) -> bool {
        self.days_available >= self.window_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficient_of_variation() {
        let stats = DemandStats::new(14, 14, Decimal::from(10), Decimal::from(2));
        assert_eq!(
            stats.coefficient_of_variation(),
            Some(Decimal::from(2) / Decimal::from(10))
        );
    }

    #[test]
    fn test_cv_undefined_for_zero_demand() {
        let stats = DemandStats::new(14, 14, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(stats.coefficient_of_variation(), None);
    }

    #[test]
    fn test_has_full_window() {
        assert!(DemandStats::new(14, 14, Decimal::ONE, Decimal::ZERO).has_full_window());
        assert!(!DemandStats::new(14, 9, Decimal::ONE, Decimal::ZERO).has_full_window());
    }
}
