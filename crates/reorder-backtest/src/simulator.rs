//! 回測模擬器
//!
//! 逐日重播補貨策略：到貨 → 扣需求 → 以截至當日的統計做決策 → 下單 → 記錄。
//! 每日統計只讀取當日（含）以前的資料，不存在前視。
//! 相同輸入必得逐位元相同的輸出（無亂數、無時鐘）。

use reorder_core::{
    PolicyConfig, ReorderError, Result, SalesHistory, SupplierConfig,
};
use rust_decimal::Decimal;

use crate::state::{BacktestDayRecord, BacktestState, BacktestSummary};
use reorder_calc::{DemandStatsCalculator, ReorderPolicy};

/// 回測模擬器
pub struct BacktestSimulator {
    policy_config: PolicyConfig,
}

impl BacktestSimulator {
    /// 以策略配置建立模擬器
    pub fn new(policy_config: PolicyConfig) -> Self {
        Self { policy_config }
    }

    /// 對單一 SKU 重播補貨策略
    ///
    /// 模擬範圍為銷售歷史的完整日期區間；
    /// 區間內無記錄的日期視為當日實際需求為零。
    /// 決策只看模擬庫存，不計在途量——連續低於再訂購點的日子會各自下單，
    /// 直到補貨到貨為止（與決策引擎的單日語意一致）。
    pub fn run(
        &self,
        history: &SalesHistory,
        supplier: &SupplierConfig,
    ) -> Result<(Vec<BacktestDayRecord>, BacktestSummary)> {
        supplier.validate()?;
        self.policy_config.validate()?;

        let (Some(start_date), Some(end_date)) = (history.first_date(), history.last_date())
        else {
            return Err(ReorderError::InsufficientData(supplier.sku.clone()));
        };

        tracing::debug!(
            "開始回測 SKU {}：{} 至 {}（期初庫存 {}）",
            supplier.sku,
            start_date,
            end_date,
            supplier.current_stock
        );

        let mut state = BacktestState::new(supplier.current_stock);
        let mut records = Vec::new();
        let mut date = start_date;

        loop {
            let stock_before = state.simulated_stock;

            // Step 1：今日到貨入庫
            let quantity_received = state.receive_arrivals(date);

            // Step 2：扣除當日實際需求（不足即失銷）
            let demand = history.units_on(date).unwrap_or(Decimal::ZERO);
            let stockout = state.consume(demand);

            // Step 3-4：以截至今日的統計叫用決策，必要時下單
            let (reorder_triggered, quantity_ordered) =
                self.decide_and_order(history, supplier, date, &mut state)?;

            // Step 5：追加每日記錄
            records.push(BacktestDayRecord {
                date,
                stock_before,
                quantity_received,
                demand,
                stock_after: state.simulated_stock,
                stockout,
                reorder_triggered,
                quantity_ordered,
            });

            if date == end_date {
                break;
            }
            date = date.succ_opt().ok_or_else(|| {
                ReorderError::InvalidDate(format!("日期 {date} 無後一日"))
            })?;
        }

        let summary = BacktestSummary::from_records(supplier.sku.clone(), &records);
        tracing::debug!(
            "回測完成 SKU {}：{} 天，服務水準 {:.3}，缺貨 {} 天",
            summary.sku,
            summary.total_days,
            summary.service_level,
            summary.stockout_days
        );
        Ok((records, summary))
    }

    /// 以模擬庫存代入供應商配置並叫用決策引擎
    fn decide_and_order(
        &self,
        history: &SalesHistory,
        supplier: &SupplierConfig,
        date: chrono::NaiveDate,
        state: &mut BacktestState,
    ) -> Result<(bool, Decimal)> {
        let snapshot = supplier.clone().with_current_stock(state.simulated_stock);

        let primary = DemandStatsCalculator::calculate(
            history,
            date,
            self.policy_config.primary_window_days,
            &self.policy_config,
        )?;
        let cross_checks = DemandStatsCalculator::calculate_windows(
            history,
            date,
            &self.policy_config.volatility_check_windows,
            &self.policy_config,
        )?;

        let recommendation =
            ReorderPolicy::recommend(&primary, &cross_checks, &snapshot, date, &self.policy_config)?;

        // 建議下單日已到且數量為正才送單（零量訂單不進佇列）
        if recommendation.is_due(date) {
            state.place_order(date, supplier.lead_time_days, recommendation.rounded_quantity)?;
            Ok((true, recommendation.rounded_quantity))
        } else {
            Ok((false, Decimal::ZERO))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use reorder_core::SalesRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn constant_history(sku: &str, start: NaiveDate, days: u32, units: i64) -> SalesHistory {
        let records: Vec<SalesRecord> = (0..days)
            .map(|offset| {
                SalesRecord::new(
                    sku.to_string(),
                    start + chrono::Duration::days(i64::from(offset)),
                    Decimal::from(units),
                )
            })
            .collect();
        SalesHistory::from_records(sku.to_string(), &records).unwrap()
    }

    fn test_config() -> PolicyConfig {
        PolicyConfig::default().with_primary_window(7)
    }

    /// 10 天、每日需求 5、交期 2、期初庫存 12、目標 30：
    /// 第 2 天（庫存 2 < 再訂購點 10）首次下單，第 3 天缺貨，
    /// 第 4 天到貨後回補，此後不再缺貨。
    #[test]
    fn test_constant_demand_scenario() {
        let history = constant_history("SKU-A", date(2025, 3, 1), 10, 5);
        let supplier = SupplierConfig::new(
            "SKU-A".to_string(),
            2,
            Decimal::from(12),
            Decimal::from(30),
        );
        let simulator = BacktestSimulator::new(test_config());

        let (records, summary) = simulator.run(&history, &supplier).unwrap();

        assert_eq!(records.len(), 10);

        // 第 1 天：尚無歷史，不下單
        assert_eq!(records[0].stock_after, Decimal::from(7));
        assert!(!records[0].reorder_triggered);

        // 第 2 天：庫存 2 < 再訂購點 10 → 下單 28（目標 30 - 庫存 2）
        assert!(records[1].reorder_triggered);
        assert_eq!(records[1].quantity_ordered, Decimal::from(28));

        // 第 3 天：首次缺貨（需求 5 > 庫存 2），再下單 30
        assert!(records[2].stockout);
        assert_eq!(records[2].stock_after, Decimal::ZERO);
        assert_eq!(records[2].quantity_ordered, Decimal::from(30));

        // 第 4 天：第一張單到貨 28
        assert_eq!(records[3].quantity_received, Decimal::from(28));
        assert_eq!(records[3].stock_after, Decimal::from(23));
        assert!(!records[3].stockout);

        // 第 5 天：第二張單到貨 30
        assert_eq!(records[4].quantity_received, Decimal::from(30));
        assert_eq!(records[4].stock_after, Decimal::from(48));

        // 此後每日遞減 5，無缺貨
        assert_eq!(records[9].stock_after, Decimal::from(23));
        assert_eq!(summary.stockout_days, 1);
        assert!((summary.service_level - 0.9).abs() < 1e-9);
        assert_eq!(summary.avg_inventory, Decimal::new(245, 1)); // 24.5
    }

    #[test]
    fn test_conservation_day_by_day() {
        let history = constant_history("SKU-A", date(2025, 3, 1), 10, 5);
        let supplier = SupplierConfig::new(
            "SKU-A".to_string(),
            2,
            Decimal::from(12),
            Decimal::from(30),
        );
        let simulator = BacktestSimulator::new(test_config());

        let (records, _) = simulator.run(&history, &supplier).unwrap();

        for record in &records {
            if record.stockout {
                assert_eq!(record.stock_after, Decimal::ZERO);
            } else {
                assert_eq!(
                    record.stock_after,
                    record.stock_before + record.quantity_received - record.demand
                );
            }
        }
    }

    #[test]
    fn test_determinism() {
        let history = constant_history("SKU-A", date(2025, 3, 1), 30, 7);
        let supplier = SupplierConfig::new(
            "SKU-A".to_string(),
            3,
            Decimal::from(40),
            Decimal::from(80),
        )
        .with_pack_size(4);
        let simulator = BacktestSimulator::new(test_config());

        let (first_records, _) = simulator.run(&history, &supplier).unwrap();
        let (second_records, _) = simulator.run(&history, &supplier).unwrap();

        assert_eq!(first_records, second_records);
    }

    #[test]
    fn test_gap_days_are_zero_demand() {
        // 3/1 與 3/5 有記錄，中間三天視為零需求
        let records = vec![
            SalesRecord::new("SKU-A".to_string(), date(2025, 3, 1), Decimal::from(5)),
            SalesRecord::new("SKU-A".to_string(), date(2025, 3, 5), Decimal::from(5)),
        ];
        let history = SalesHistory::from_records("SKU-A".to_string(), &records).unwrap();
        let supplier = SupplierConfig::new(
            "SKU-A".to_string(),
            2,
            Decimal::from(100),
            Decimal::from(100),
        );
        let simulator = BacktestSimulator::new(test_config());

        let (day_records, summary) = simulator.run(&history, &supplier).unwrap();

        assert_eq!(day_records.len(), 5);
        assert_eq!(day_records[1].demand, Decimal::ZERO);
        assert_eq!(day_records[2].demand, Decimal::ZERO);
        assert_eq!(summary.total_days, 5);
        assert_eq!(summary.stockout_days, 0);
    }

    #[test]
    fn test_invalid_supplier_rejected() {
        let history = constant_history("SKU-A", date(2025, 3, 1), 5, 5);
        let supplier = SupplierConfig::new(
            "SKU-A".to_string(),
            2,
            Decimal::from(-1),
            Decimal::from(30),
        );
        let simulator = BacktestSimulator::new(test_config());

        assert!(matches!(
            simulator.run(&history, &supplier),
            Err(ReorderError::InvalidConfig(_))
        ));
    }
}
