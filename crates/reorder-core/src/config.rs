//! 補貨策略配置
//!
//! 配置以明確參數傳入每次呼叫，引擎不讀取任何全域狀態。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ReorderError, Result};

/// 預設服務水準乘數（單側約 95% 服務水準對應的 z 值）
pub const DEFAULT_Z_SCORE: f64 = 1.65;

/// 預設主要作業視窗（天）
pub const DEFAULT_WINDOW_DAYS: u32 = 14;

/// 缺失銷售日的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingDayPolicy {
    /// 視為零銷售（預設）
    TreatAsZero,

    /// 自平均與變異數的分母中排除
    Exclude,
}

/// 補貨策略參數
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// 服務水準乘數 z
    pub z_score: f64,

    /// 主要作業視窗（天），決策以此視窗的統計為準
    pub primary_window_days: u32,

    /// 波動度交叉檢查視窗（天）
    pub volatility_check_windows: Vec<u32>,

    /// 缺失銷售日的處理方式
    pub missing_day_policy: MissingDayPolicy,

    /// 統計視窗是否包含評估日當天（預設不含，避免前視偏差）
    pub include_evaluation_date: bool,

    /// 近零需求門檻：平均日需求低於此值時信心折減
    pub near_zero_demand_threshold: Decimal,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            z_score: DEFAULT_Z_SCORE,
            primary_window_days: DEFAULT_WINDOW_DAYS,
            volatility_check_windows: vec![7, 28],
            missing_day_policy: MissingDayPolicy::TreatAsZero,
            include_evaluation_date: false,
            near_zero_demand_threshold: Decimal::new(1, 1), // 0.1
        }
    }
}

impl PolicyConfig {
    /// 建構器模式：設置服務水準乘數
    pub fn with_z_score(mut self, z_score: f64) -> Self {
        self.z_score = z_score;
        self
    }

    /// 建構器模式：設置主要視窗天數
    pub fn with_primary_window(mut self, window_days: u32) -> Self {
        self.primary_window_days = window_days;
        self
    }

    /// 建構器模式：設置交叉檢查視窗
    pub fn with_volatility_check_windows(mut self, windows: Vec<u32>) -> Self {
        self.volatility_check_windows = windows;
        self
    }

    /// 建構器模式：設置缺失日處理方式
    pub fn with_missing_day_policy(mut self, policy: MissingDayPolicy) -> Self {
        self.missing_day_policy = policy;
        self
    }

    /// 建構器模式：統計視窗包含評估日當天
    pub fn with_include_evaluation_date(mut self, include: bool) -> Self {
        self.include_evaluation_date = include;
        self
    }

    /// 建構器模式：設置近零需求門檻
    pub fn with_near_zero_demand_threshold(mut self, threshold: Decimal) -> Self {
        self.near_zero_demand_threshold = threshold;
        self
    }

    /// 檢查策略參數的不變量
    pub fn validate(&self) -> Result<()> {
        if !self.z_score.is_finite() || self.z_score < 0.0 {
            return Err(ReorderError::InvalidConfig(format!(
                "服務水準乘數無效: {}",
                self.z_score
            )));
        }
        if self.primary_window_days == 0 {
            return Err(ReorderError::InvalidConfig(
                "主要視窗天數必須至少為 1".to_string(),
            ));
        }
        if self.volatility_check_windows.iter().any(|&w| w == 0) {
            return Err(ReorderError::InvalidConfig(
                "交叉檢查視窗天數必須至少為 1".to_string(),
            ));
        }
        if self.near_zero_demand_threshold < Decimal::ZERO {
            return Err(ReorderError::InvalidConfig(format!(
                "近零需求門檻為負: {}",
                self.near_zero_demand_threshold
            )));
        }
        Ok(())
    }
}
