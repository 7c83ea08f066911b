//! 回測執行入口

use std::collections::HashMap;

use rayon::prelude::*;
use reorder_core::{PolicyConfig, ReorderError, Result, SalesHistory, SupplierConfig};

use crate::simulator::BacktestSimulator;
use crate::state::{BacktestDayRecord, BacktestSummary};
use crate::{BacktestRunResult, SkuBacktest};

/// 對單一 SKU 執行回測
pub fn run_backtest(
    history: &SalesHistory,
    supplier: &SupplierConfig,
    policy_config: &PolicyConfig,
) -> Result<(Vec<BacktestDayRecord>, BacktestSummary)> {
    BacktestSimulator::new(policy_config.clone()).run(history, supplier)
}

/// 對多個 SKU 平行執行回測
///
/// 各 SKU 的模擬互相獨立、無共享可變狀態，以 SKU 為單位分工；
/// 單一 SKU 的失敗被隔離並收集於結果中，不中斷其他 SKU。
pub fn run_backtest_batch(
    histories: &HashMap<String, SalesHistory>,
    suppliers: &[SupplierConfig],
    policy_config: &PolicyConfig,
) -> BacktestRunResult {
    tracing::info!("開始批次回測：{} 個 SKU", suppliers.len());
    let start_time = std::time::Instant::now();

    let simulator = BacktestSimulator::new(policy_config.clone());
    let outcomes: Vec<_> = suppliers
        .par_iter()
        .map(|supplier| {
            let outcome = match histories.get(&supplier.sku) {
                Some(history) => simulator.run(history, supplier),
                None => Err(ReorderError::InsufficientData(supplier.sku.clone())),
            };
            (supplier.sku.clone(), outcome)
        })
        .collect();

    let mut result = BacktestRunResult::empty();
    for (sku, outcome) in outcomes {
        match outcome {
            Ok((records, summary)) => {
                result.runs.push(SkuBacktest { summary, records });
            }
            Err(error) => {
                tracing::warn!("SKU {} 回測失敗: {}", sku, error);
                result.failures.push((sku, error));
            }
        }
    }

    result.calculation_time_ms = Some(start_time.elapsed().as_millis());
    tracing::info!(
        "批次回測完成：{} 個 SKU 成功，{} 個失敗，耗時 {:?}",
        result.runs.len(),
        result.failures.len(),
        start_time.elapsed()
    );
    result
}
