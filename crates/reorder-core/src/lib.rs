//! # Reorder Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod recommendation;
pub mod sales;
pub mod stats;
pub mod supplier;

// Re-export 主要類型
pub use config::{MissingDayPolicy, PolicyConfig, DEFAULT_WINDOW_DAYS, DEFAULT_Z_SCORE};
pub use recommendation::ReorderRecommendation;
pub use sales::{SalesHistory, SalesRecord};
pub use stats::DemandStats;
pub use supplier::SupplierConfig;

/// 補貨引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ReorderError {
    /// 完整歷史中沒有任何銷售記錄（呼叫端可改用較寬視窗或跳過該 SKU）
    #[error("SKU {0} 沒有任何銷售歷史")]
    InsufficientData(String),

    /// 無效配置（負庫存、零整箱倍數等），計算前即拒絕
    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

pub type Result<T> = std::result::Result<T, ReorderError>;
