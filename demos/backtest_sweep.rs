//! 回測與服務水準參數掃描示例
//!
//! 產生合成銷售資料，執行批次回測並匯出每日記錄，
//! 再對不同 z 值比較各 SKU 的服務水準。

use std::collections::HashMap;

use chrono::NaiveDate;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use reorder::io::write_backtest_csv;
use reorder::{run_backtest_batch, PolicyConfig, SalesHistory, SupplierConfig};
use rust_decimal::Decimal;

/// 產生 90 天的合成銷售：常態需求加上偶發促銷尖峰
fn synthetic_history(
    rng: &mut StdRng,
    sku: &str,
    start: NaiveDate,
    mean: f64,
) -> anyhow::Result<SalesHistory> {
    let normal = Normal::new(mean, (mean * 0.35).max(1.0))?;
    let mut history = SalesHistory::new(sku.to_string());

    for offset in 0..90 {
        let date = start + chrono::Duration::days(offset);
        let base = normal.sample(rng).round().max(0.0) as i64;
        let units = if rng.gen_bool(0.03) {
            base + (base as f64 * rng.gen_range(2.0..5.0)) as i64
        } else {
            base
        };
        history.add(date, Decimal::from(units))?;
    }
    Ok(history)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 批次回測與 z 值掃描示例 ===\n");

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    // (SKU, 平均日需求, 交期, 期初庫存, 目標庫存, 整箱)
    let catalog: [(&str, f64, u32, i64, i64, u32); 3] = [
        ("SKU-A", 10.0, 7, 35, 150, 1),
        ("SKU-B", 3.0, 14, 10, 200, 12),
        ("SKU-C", 8.0, 3, 60, 120, 6),
    ];

    let mut histories = HashMap::new();
    let mut suppliers = Vec::new();
    for &(sku, mean, lead_time, current, target, pack) in &catalog {
        histories.insert(
            sku.to_string(),
            synthetic_history(&mut rng, sku, start, mean)?,
        );
        suppliers.push(
            SupplierConfig::new(
                sku.to_string(),
                lead_time,
                Decimal::from(current),
                Decimal::from(target),
            )
            .with_pack_size(pack),
        );
    }

    // 預設配置回測 + 匯出每日記錄
    let config = PolicyConfig::default();
    let result = run_backtest_batch(&histories, &suppliers, &config);

    println!("預設配置（z = {}）的彙總:", config.z_score);
    for run in &result.runs {
        println!("{}", serde_json::to_string_pretty(&run.summary)?);
    }
    for (sku, error) in &result.failures {
        println!("SKU {sku} 回測失敗: {error}");
    }

    let out_path = std::env::temp_dir().join("reorder_backtest_history.csv");
    write_backtest_csv(&out_path, &result.runs)?;
    println!("\n每日記錄已匯出至 {}\n", out_path.display());

    // z 值掃描：服務水準 vs 安全庫存的取捨
    println!("z 值掃描:");
    for z in [1.28, 1.65, 2.33] {
        let swept = run_backtest_batch(&histories, &suppliers, &config.clone().with_z_score(z));
        print!("  z = {z:.2} →");
        for run in &swept.runs {
            print!(
                "  {} 服務水準 {:.3} 平均庫存 {}",
                run.summary.sku,
                run.summary.service_level,
                run.summary.avg_inventory.round_dp(1)
            );
        }
        println!();
    }

    Ok(())
}
