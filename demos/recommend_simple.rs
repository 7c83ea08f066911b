//! 單一 SKU 補貨建議示例

use chrono::NaiveDate;
use reorder::rationale::{RationaleGenerator, TemplateRationale};
use reorder::{
    recommend_for_sku, DemandStatsCalculator, PolicyConfig, SalesHistory, SupplierConfig,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    println!("=== 單一 SKU 補貨建議示例 ===\n");

    // 28 天銷售歷史：平日約 10 件，週末約 16 件
    let start = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
    let mut history = SalesHistory::new("SKU-A".to_string());
    for offset in 0..28 {
        let date = start + chrono::Duration::days(offset);
        let units: i64 = if offset % 7 >= 5 { 16 } else { 10 };
        history.add(date, Decimal::from(units))?;
    }

    // 供應商參數：交期 5 天、整箱 6 件
    let supplier = SupplierConfig::new(
        "SKU-A".to_string(),
        5,
        Decimal::from(40),
        Decimal::from(150),
    )
    .with_pack_size(6);

    let config = PolicyConfig::default();
    let evaluation_date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    let recommendation = recommend_for_sku(&history, &supplier, evaluation_date, &config)?;

    println!("SKU:          {}", recommendation.sku);
    println!("評估日:       {}", recommendation.evaluation_date);
    println!("安全庫存:     {}", recommendation.safety_stock.round_dp(2));
    println!("再訂購點:     {}", recommendation.reorder_point.round_dp(2));
    println!("應否補貨:     {}", recommendation.should_reorder);
    println!("建議訂購量:   {}", recommendation.rounded_quantity);
    println!(
        "建議下單日:   {}",
        recommendation
            .reorder_by_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "無法預測（平均需求為零）".to_string())
    );
    println!("信心分數:     {:.2}", recommendation.confidence);

    // 理由文字（確定性模板）
    let stats = DemandStatsCalculator::calculate(
        &history,
        evaluation_date,
        config.primary_window_days,
        &config,
    )?;
    let rationale = TemplateRationale.generate_rationale(&recommendation, &stats, &supplier)?;
    println!("\n理由: {rationale}");

    Ok(())
}
