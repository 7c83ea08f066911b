//! CSV 資料載入與匯出
//!
//! 核心引擎只收受記憶體中的結構化資料；檔案格式屬於外層的事。
//! 這裡提供最常用的兩種輸入檔與回測輸出檔。

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reorder_core::{ReorderError, Result, SalesHistory, SalesRecord, SupplierConfig};
use reorder_backtest::SkuBacktest;

/// 銷售歷史 CSV 的一列（欄位：date, sku, qty_sold）
#[derive(Debug, Deserialize)]
struct SalesRow {
    date: NaiveDate,
    sku: String,
    qty_sold: Decimal,
}

/// 供應商 CSV 的一列
/// （欄位：sku, lead_time_days, current_stock, target_stock[, pack_size][, min_order_qty]）
#[derive(Debug, Deserialize)]
struct SupplierRow {
    sku: String,
    lead_time_days: u32,
    current_stock: Decimal,
    target_stock: Decimal,
    #[serde(default)]
    pack_size: Option<u32>,
    #[serde(default)]
    min_order_qty: Option<Decimal>,
}

/// 回測輸出 CSV 的一列（每 SKU 每日一列）
#[derive(Debug, Serialize)]
struct BacktestRow<'a> {
    sku: &'a str,
    date: NaiveDate,
    stock_before: Decimal,
    quantity_received: Decimal,
    demand: Decimal,
    stock_after: Decimal,
    stockout: bool,
    reorder_triggered: bool,
    quantity_ordered: Decimal,
}

/// 載入銷售歷史 CSV，依 SKU 分組（同日多筆記錄合併加總）
pub fn load_sales_csv(path: &Path) -> Result<HashMap<String, SalesHistory>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        ReorderError::InvalidConfig(format!("無法讀取銷售檔案 {}: {e}", path.display()))
    })?;

    let mut records = Vec::new();
    for row in reader.deserialize::<SalesRow>() {
        let row = row.map_err(|e| {
            ReorderError::InvalidConfig(format!("銷售檔案 {} 解析失敗: {e}", path.display()))
        })?;
        records.push(SalesRecord::new(row.sku, row.date, row.qty_sold));
    }

    tracing::debug!("載入 {} 筆銷售記錄自 {}", records.len(), path.display());
    SalesHistory::group_by_sku(records)
}

/// 載入供應商參數 CSV
pub fn load_suppliers_csv(path: &Path) -> Result<Vec<SupplierConfig>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        ReorderError::InvalidConfig(format!("無法讀取供應商檔案 {}: {e}", path.display()))
    })?;

    let mut suppliers = Vec::new();
    for row in reader.deserialize::<SupplierRow>() {
        let row = row.map_err(|e| {
            ReorderError::InvalidConfig(format!("供應商檔案 {} 解析失敗: {e}", path.display()))
        })?;

        let mut supplier = SupplierConfig::new(
            row.sku,
            row.lead_time_days,
            row.current_stock,
            row.target_stock,
        );
        if let Some(pack_size) = row.pack_size {
            supplier = supplier.with_pack_size(pack_size);
        }
        if let Some(min_qty) = row.min_order_qty {
            supplier = supplier.with_min_order_qty(min_qty);
        }
        supplier.validate()?;
        suppliers.push(supplier);
    }

    tracing::debug!("載入 {} 筆供應商配置自 {}", suppliers.len(), path.display());
    Ok(suppliers)
}

/// 將回測每日記錄寫成 CSV（每 SKU 每日一列）
pub fn write_backtest_csv(path: &Path, runs: &[SkuBacktest]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        ReorderError::InvalidConfig(format!("無法寫入回測檔案 {}: {e}", path.display()))
    })?;

    for run in runs {
        for record in &run.records {
            let row = BacktestRow {
                sku: &run.summary.sku,
                date: record.date,
                stock_before: record.stock_before,
                quantity_received: record.quantity_received,
                demand: record.demand,
                stock_after: record.stock_after,
                stockout: record.stockout,
                reorder_triggered: record.reorder_triggered,
                quantity_ordered: record.quantity_ordered,
            };
            writer.serialize(row).map_err(|e| {
                ReorderError::InvalidConfig(format!("回測記錄序列化失敗: {e}"))
            })?;
        }
    }

    writer.flush().map_err(|e| {
        ReorderError::InvalidConfig(format!("回測檔案 {} 寫入失敗: {e}", path.display()))
    })?;
    Ok(())
}
