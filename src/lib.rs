//! # Reorder
//!
//! 庫存補貨建議與回測引擎
//!
//! 由三個核心 crate 組成：
//! - `reorder-core`：資料模型、配置與錯誤類型
//! - `reorder-calc`：需求統計、整箱進位與補貨決策
//! - `reorder-backtest`：歷史回測模擬器
//!
//! 此 facade 另提供 CSV 載入/匯出與建議理由文字等外層輔助。

pub mod io;
pub mod rationale;

// Re-export 主要類型
pub use reorder_backtest::{
    run_backtest, run_backtest_batch, BacktestDayRecord, BacktestRunResult, BacktestSimulator,
    BacktestSummary, SkuBacktest,
};
pub use reorder_calc::{
    recommend_batch, recommend_for_sku, round_to_pack, BatchRecommendationResult,
    DemandStatsCalculator, ReorderPolicy, ReorderWarning, WarningSeverity,
};
pub use reorder_core::{
    DemandStats, MissingDayPolicy, PolicyConfig, ReorderError, ReorderRecommendation, Result,
    SalesHistory, SalesRecord, SupplierConfig, DEFAULT_WINDOW_DAYS, DEFAULT_Z_SCORE,
};
