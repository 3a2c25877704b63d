//! 生產建議儀表板示例
//!
//! 執行: RUST_LOG=debug cargo run --example production_dashboard

use prodplan::{
    CatalogStore, InMemoryCatalog, ItemType, MovementType, NewBomLine, NewProduct,
    NewRawMaterial, NewStockMovement, ProductionService,
};
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).init();

    println!("=== 生產建議儀表板 ===\n");

    let mut catalog = InMemoryCatalog::new();

    // 原物料
    let wood = catalog.create_raw_material(NewRawMaterial::new(
        "MP-WOOD".to_string(),
        "Madeira".to_string(),
        Decimal::from(100),
    ))?;
    let screw = catalog.create_raw_material(NewRawMaterial::new(
        "MP-SCREW".to_string(),
        "Parafuso".to_string(),
        Decimal::from(40),
    ))?;
    let varnish = catalog.create_raw_material(NewRawMaterial::new(
        "MP-VARNISH".to_string(),
        "Verniz (L)".to_string(),
        Decimal::new(35, 1),
    ))?;

    // 產品
    let chair = catalog.create_product(NewProduct::new(
        "PR-CHAIR".to_string(),
        "Cadeira".to_string(),
        Decimal::new(1050, 2),
    ))?;
    let table = catalog.create_product(NewProduct::new(
        "PR-TABLE".to_string(),
        "Mesa".to_string(),
        Decimal::new(8990, 2),
    ))?;
    catalog.create_product(NewProduct::new(
        "PR-LAMP".to_string(),
        "Luminária".to_string(),
        Decimal::from(35),
    ))?;

    // 配方（Luminária 沒有配方，不會出現在建議中）
    catalog.create_bom_line(NewBomLine::new(chair.id, wood.id, Decimal::from(4)))?;
    catalog.create_bom_line(NewBomLine::new(chair.id, screw.id, Decimal::from(8)))?;
    catalog.create_bom_line(NewBomLine::new(table.id, wood.id, Decimal::from(12)))?;
    catalog.create_bom_line(NewBomLine::new(table.id, varnish.id, Decimal::new(5, 1)))?;

    // 庫存異動：購入螺絲
    catalog.apply_stock_movement(
        NewStockMovement::new(ItemType::RawMaterial, screw.id, MovementType::In, Decimal::from(20))
            .with_reason("compra".to_string()),
    )?;

    println!("原物料庫存:");
    for material in catalog.list_raw_materials()? {
        println!("  - {} {}: {}", material.code, material.name, material.stock_quantity);
    }

    let service = ProductionService::new(catalog);
    let report = service.compute_production_suggestions()?;

    println!("\n生產建議:");
    for suggestion in &report.products {
        println!(
            "  - {} {}: {} 單位 × {} = {}",
            suggestion.product_code,
            suggestion.product_name,
            suggestion.quantity_possible,
            suggestion.unit_value,
            suggestion.total_value
        );
    }
    println!("\n總生產價值: {}", report.total_production_value);

    println!("\nJSON:");
    println!("{}", serde_json::to_string_pretty(&service.production_suggestions_json()?)?);

    Ok(())
}
