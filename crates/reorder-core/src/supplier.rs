//! 供應商參數模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ReorderError, Result};

/// 單一 SKU 的供應商與庫存參數
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierConfig {
    /// SKU
    pub sku: String,

    /// 供應商交期（天）
    pub lead_time_days: u32,

    /// 整箱倍數（訂購量必須是此倍數）
    pub pack_size: u32,

    /// 最小訂購量
    pub min_order_qty: Option<Decimal>,

    /// 目前庫存
    pub current_stock: Decimal,

    /// 目標庫存水位（order-up-to）
    pub target_stock: Decimal,
}

impl SupplierConfig {
    /// 創建新的供應商配置
    pub fn new(
        sku: String,
        lead_time_days: u32,
        current_stock: Decimal,
        target_stock: Decimal,
    ) -> Self {
        Self {
            sku,
            lead_time_days,
            pack_size: 1,
            min_order_qty: None,
            current_stock,
            target_stock,
        }
    }

    /// 建構器模式：設置整箱倍數
    pub fn with_pack_size(mut self, pack_size: u32) -> Self {
        self.pack_size = pack_size;
        self
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_min_order_qty(mut self, qty: Decimal) -> Self {
        self.min_order_qty = Some(qty);
        self
    }

    /// 建構器模式：替換目前庫存（回測以模擬庫存代入）
    pub fn with_current_stock(mut self, stock: Decimal) -> Self {
        self.current_stock = stock;
        self
    }

    /// 檢查配置的不變量，計算前必須通過
    pub fn validate(&self) -> Result<()> {
        if self.pack_size == 0 {
            return Err(ReorderError::InvalidConfig(format!(
                "SKU {} 的整箱倍數必須至少為 1",
                self.sku
            )));
        }
        if self.current_stock < Decimal::ZERO {
            return Err(ReorderError::InvalidConfig(format!(
                "SKU {} 的目前庫存為負: {}",
                self.sku, self.current_stock
            )));
        }
        if self.target_stock < Decimal::ZERO {
            return Err(ReorderError::InvalidConfig(format!(
                "SKU {} 的目標庫存為負: {}",
                self.sku, self.target_stock
            )));
        }
        if let Some(min_qty) = self.min_order_qty {
            if min_qty < Decimal::ZERO {
                return Err(ReorderError::InvalidConfig(format!(
                    "SKU {} 的最小訂購量為負: {}",
                    self.sku, min_qty
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn base_config() -> SupplierConfig {
        SupplierConfig::new(
            "SKU-A".to_string(),
            7,
            Decimal::from(35),
            Decimal::from(150),
        )
    }

    #[test]
    fn test_create_config_defaults() {
        let config = base_config();

        assert_eq!(config.lead_time_days, 7);
        assert_eq!(config.pack_size, 1);
        assert_eq!(config.min_order_qty, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = base_config()
            .with_pack_size(6)
            .with_min_order_qty(Decimal::from(12));

        assert_eq!(config.pack_size, 6);
        assert_eq!(config.min_order_qty, Some(Decimal::from(12)));
    }

    #[test]
    fn test_with_current_stock_substitution() {
        let config = base_config().with_current_stock(Decimal::from(2));
        assert_eq!(config.current_stock, Decimal::from(2));
    }

    #[rstest]
    #[case::zero_pack(0, 10, 100)]
    #[case::negative_stock(1, -1, 100)]
    #[case::negative_target(1, 10, -5)]
    fn test_invalid_config_rejected(#[case] pack: u32, #[case] stock: i64, #[case] target: i64) {
        let config = SupplierConfig::new(
            "SKU-X".to_string(),
            3,
            Decimal::from(stock),
            Decimal::from(target),
        )
        .with_pack_size(pack);

        assert!(matches!(
            config.validate(),
            Err(ReorderError::InvalidConfig(_))
        ));
    }
}
