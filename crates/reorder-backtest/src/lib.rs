//! # Reorder Backtest
//!
//! 歷史回測模擬器：逐日重播補貨策略，量測服務水準與庫存成本

pub mod runner;
pub mod simulator;
pub mod state;

// Re-export 主要類型
pub use runner::{run_backtest, run_backtest_batch};
pub use simulator::BacktestSimulator;
pub use state::{BacktestDayRecord, BacktestState, BacktestSummary, PendingReplenishment};

/// 單一 SKU 的回測輸出（每日記錄 + 彙總）
#[derive(Debug, Clone)]
pub struct SkuBacktest {
    pub summary: BacktestSummary,
    pub records: Vec<BacktestDayRecord>,
}

/// 批次回測結果
#[derive(Debug)]
pub struct BacktestRunResult {
    /// 成功完成的各 SKU 回測
    pub runs: Vec<SkuBacktest>,

    /// 逐 SKU 收集的失敗（不中斷其他 SKU）
    pub failures: Vec<(String, reorder_core::ReorderError)>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl BacktestRunResult {
    /// 創建空的回測結果
    pub fn empty() -> Self {
        Self {
            runs: Vec::new(),
            failures: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 依 SKU 查找彙總
    pub fn summary_for(&self, sku: &str) -> Option<&BacktestSummary> {
        self.runs
            .iter()
            .map(|run| &run.summary)
            .find(|summary| summary.sku == sku)
    }
}
