//! 需求統計計算

use chrono::{Duration, NaiveDate};
use reorder_core::{
    DemandStats, MissingDayPolicy, PolicyConfig, ReorderError, Result, SalesHistory,
};
use rust_decimal::Decimal;

/// 需求統計計算器
pub struct DemandStatsCalculator;

impl DemandStatsCalculator {
    /// 計算單一視窗的需求統計
    ///
    /// 視窗為評估日之前（或含評估日，依配置）的 `window_days` 天。
    /// 歷史不足整個視窗時使用所有可得天數，`days_available` 反映實際樣本數；
    /// 缺失日依 `missing_day_policy` 視為零或排除。
    /// 只讀取視窗結束日（含）以前的資料，不存在前視。
    pub fn calculate(
        history: &SalesHistory,
        evaluation_date: NaiveDate,
        window_days: u32,
        config: &PolicyConfig,
    ) -> Result<DemandStats> {
        if window_days == 0 {
            return Err(ReorderError::InvalidConfig(
                "統計視窗天數必須至少為 1".to_string(),
            ));
        }
        let Some(first_date) = history.first_date() else {
            return Err(ReorderError::InsufficientData(history.sku().to_string()));
        };

        let window_end = if config.include_evaluation_date {
            evaluation_date
        } else {
            evaluation_date.pred_opt().ok_or_else(|| {
                ReorderError::InvalidDate(format!("評估日 {evaluation_date} 無前一日"))
            })?
        };

        // 視窗起點不早於歷史首日
        let ideal_start = window_end
            .checked_sub_signed(Duration::days(i64::from(window_days) - 1))
            .ok_or_else(|| {
                ReorderError::InvalidDate(format!("視窗起點溢出（結束日 {window_end}）"))
            })?;
        let window_start = ideal_start.max(first_date);

        // 歷史完全在視窗之後：尚無任何可用樣本
        if window_end < window_start {
            return Ok(DemandStats::new(
                window_days,
                0,
                Decimal::ZERO,
                Decimal::ZERO,
            ));
        }

        let mut observations = Vec::new();
        let mut date = window_start;
        loop {
            match history.units_on(date) {
                Some(units) => observations.push(units),
                None => match config.missing_day_policy {
                    MissingDayPolicy::TreatAsZero => observations.push(Decimal::ZERO),
                    MissingDayPolicy::Exclude => {}
                },
            }
            if date == window_end {
                break;
            }
            date = date
                .succ_opt()
                .ok_or_else(|| ReorderError::InvalidDate(format!("日期 {date} 無後一日")))?;
        }

        if observations.is_empty() {
            return Ok(DemandStats::new(
                window_days,
                0,
                Decimal::ZERO,
                Decimal::ZERO,
            ));
        }

        let days_available = observations.len() as u32;
        let total: Decimal = observations.iter().copied().sum();
        let mean = total / Decimal::from(days_available);
        let sigma = Self::sample_std_dev(&observations, mean);

        Ok(DemandStats::new(window_days, days_available, mean, sigma))
    }

    /// 對多個視窗計算需求統計（主視窗 + 交叉檢查視窗）
    pub fn calculate_windows(
        history: &SalesHistory,
        evaluation_date: NaiveDate,
        windows: &[u32],
        config: &PolicyConfig,
    ) -> Result<Vec<DemandStats>> {
        windows
            .iter()
            .map(|&window| Self::calculate(history, evaluation_date, window, config))
            .collect()
    }

    /// 樣本標準差（n-1 分母）；樣本數少於 2 時為零
    fn sample_std_dev(observations: &[Decimal], mean: Decimal) -> Decimal {
        if observations.len() < 2 {
            return Decimal::ZERO;
        }

        let mut sum_sq = Decimal::ZERO;
        for &value in observations {
            let diff = value - mean;
            sum_sq += diff * diff;
        }
        let variance = sum_sq / Decimal::from(observations.len() as u32 - 1);

        // 使用 f64 計算平方根，然後轉回 Decimal
        let variance_f64 = variance.to_string().parse::<f64>().unwrap_or(0.0);
        Decimal::try_from(variance_f64.sqrt()).unwrap_or(Decimal::ZERO)
    }
}
