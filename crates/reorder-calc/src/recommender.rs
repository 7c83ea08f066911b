//! 補貨建議入口
//!
//! 單一 SKU 與批次兩個入口；批次以 SKU 為單位平行分工，
//! 輸入唯讀共享、各 SKU 之間無共享可變狀態。

use std::collections::HashMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use reorder_core::{
    DemandStats, PolicyConfig, ReorderError, ReorderRecommendation, Result, SalesHistory,
    SupplierConfig,
};

use crate::stats::DemandStatsCalculator;
use crate::{BatchRecommendationResult, ReorderPolicy, ReorderWarning};

/// 對單一 SKU 產生補貨建議
pub fn recommend_for_sku(
    history: &SalesHistory,
    supplier: &SupplierConfig,
    evaluation_date: NaiveDate,
    config: &PolicyConfig,
) -> Result<ReorderRecommendation> {
    let (recommendation, _) = compute(history, supplier, evaluation_date, config)?;
    Ok(recommendation)
}

/// 對多個 SKU 平行產生補貨建議
///
/// 單一 SKU 的失敗只影響該 SKU，收集於結果中回報，不中斷整批計算。
pub fn recommend_batch(
    histories: &HashMap<String, SalesHistory>,
    suppliers: &[SupplierConfig],
    evaluation_date: NaiveDate,
    config: &PolicyConfig,
) -> BatchRecommendationResult {
    tracing::info!(
        "開始批次補貨計算：{} 個 SKU（評估日 {}）",
        suppliers.len(),
        evaluation_date
    );
    let start_time = std::time::Instant::now();

    let outcomes: Vec<_> = suppliers
        .par_iter()
        .map(|supplier| {
            let outcome = match histories.get(&supplier.sku) {
                Some(history) => compute(history, supplier, evaluation_date, config),
                None => Err(ReorderError::InsufficientData(supplier.sku.clone())),
            };
            (supplier.sku.clone(), outcome)
        })
        .collect();

    let mut result = BatchRecommendationResult::empty();
    for (sku, outcome) in outcomes {
        match outcome {
            Ok((recommendation, primary)) => {
                collect_warnings(&mut result, &sku, &primary, config);
                result.recommendations.push(recommendation);
            }
            Err(error) => {
                tracing::warn!("SKU {} 補貨計算失敗: {}", sku, error);
                result.failures.push((sku, error));
            }
        }
    }

    result.calculation_time_ms = Some(start_time.elapsed().as_millis());
    tracing::info!(
        "批次補貨計算完成：{} 筆建議，{} 筆失敗，耗時 {:?}",
        result.recommendations.len(),
        result.failures.len(),
        start_time.elapsed()
    );
    result
}

/// 計算單一 SKU：主視窗統計 + 交叉檢查統計 → 決策
fn compute(
    history: &SalesHistory,
    supplier: &SupplierConfig,
    evaluation_date: NaiveDate,
    config: &PolicyConfig,
) -> Result<(ReorderRecommendation, DemandStats)> {
    tracing::debug!(
        "計算 SKU {} 的補貨建議（評估日 {}）",
        supplier.sku,
        evaluation_date
    );

    let primary = DemandStatsCalculator::calculate(
        history,
        evaluation_date,
        config.primary_window_days,
        config,
    )?;
    let cross_checks = DemandStatsCalculator::calculate_windows(
        history,
        evaluation_date,
        &config.volatility_check_windows,
        config,
    )?;

    let recommendation =
        ReorderPolicy::recommend(&primary, &cross_checks, supplier, evaluation_date, config)?;
    Ok((recommendation, primary))
}

/// 近零需求與歷史不足以警告回報，不以例外中斷
fn collect_warnings(
    result: &mut BatchRecommendationResult,
    sku: &str,
    primary: &DemandStats,
    config: &PolicyConfig,
) {
    if primary.avg_daily_demand < config.near_zero_demand_threshold {
        result.warnings.push(ReorderWarning::warning(
            sku.to_string(),
            format!(
                "平均日需求 {} 接近零，建議信心不穩定",
                primary.avg_daily_demand
            ),
        ));
    } else if !primary.has_full_window() {
        result.warnings.push(ReorderWarning::info(
            sku.to_string(),
            format!(
                "歷史僅 {} 天，少於要求視窗 {} 天",
                primary.days_available, primary.window_days
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reorder_core::SalesRecord;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn steady_history(sku: &str, days: u32, units: i64) -> SalesHistory {
        let records: Vec<SalesRecord> = (0..days)
            .map(|offset| {
                SalesRecord::new(
                    sku.to_string(),
                    date(2025, 3, 1) + chrono::Duration::days(i64::from(offset)),
                    Decimal::from(units),
                )
            })
            .collect();
        SalesHistory::from_records(sku.to_string(), &records).unwrap()
    }

    #[test]
    fn test_recommend_for_sku() {
        let history = steady_history("SKU-A", 20, 10);
        let supplier = SupplierConfig::new(
            "SKU-A".to_string(),
            5,
            Decimal::from(40),
            Decimal::from(100),
        );
        let config = PolicyConfig::default();

        let rec =
            recommend_for_sku(&history, &supplier, date(2025, 3, 21), &config).unwrap();

        // 平均 10/日、sigma 0 → 再訂購點 50，庫存 40 → 補貨 60
        assert_eq!(rec.reorder_point, Decimal::from(50));
        assert!(rec.should_reorder);
        assert_eq!(rec.rounded_quantity, Decimal::from(60));
    }

    #[test]
    fn test_recommend_batch_isolates_failures() {
        let mut histories = HashMap::new();
        histories.insert("SKU-A".to_string(), steady_history("SKU-A", 20, 10));
        // SKU-B 有配置但完全沒有歷史

        let suppliers = vec![
            SupplierConfig::new(
                "SKU-A".to_string(),
                5,
                Decimal::from(40),
                Decimal::from(100),
            ),
            SupplierConfig::new(
                "SKU-B".to_string(),
                3,
                Decimal::from(10),
                Decimal::from(50),
            ),
        ];
        let config = PolicyConfig::default();

        let result = recommend_batch(&histories, &suppliers, date(2025, 3, 21), &config);

        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendation_for("SKU-A").is_some());
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].0, "SKU-B");
        assert!(matches!(
            result.failures[0].1,
            ReorderError::InsufficientData(_)
        ));
    }

    #[test]
    fn test_recommend_batch_warns_on_short_history() {
        let mut histories = HashMap::new();
        histories.insert("SKU-A".to_string(), steady_history("SKU-A", 5, 10));

        let suppliers = vec![SupplierConfig::new(
            "SKU-A".to_string(),
            5,
            Decimal::from(40),
            Decimal::from(100),
        )];
        let config = PolicyConfig::default(); // 主視窗 14 天

        let result = recommend_batch(&histories, &suppliers, date(2025, 3, 6), &config);

        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].severity, crate::WarningSeverity::Info);
    }
}
