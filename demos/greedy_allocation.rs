//! 分配策略比較示例
//!
//! 兩個產品共用同一原物料：獨立計算會重複計入庫存，貪婪策略則依單價扣減。

use prodplan::{
    AllocationPolicy, BomLine, CatalogSnapshot, FeasibilityEngine, Product, RawMaterial,
    SuggestionConfig,
};
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let snapshot = CatalogSnapshot::new(
        vec![
            Product::new(1, "PR-STOOL".to_string(), "Banqueta".to_string(), Decimal::from(15)),
            Product::new(2, "PR-BENCH".to_string(), "Banco".to_string(), Decimal::from(60)),
        ],
        vec![RawMaterial::new(
            1,
            "MP-WOOD".to_string(),
            "Madeira".to_string(),
            Decimal::from(50),
        )],
        vec![
            BomLine::new(1, 1, 1, Decimal::from(3)),
            BomLine::new(2, 2, 1, Decimal::from(10)),
        ],
    );

    for policy in [AllocationPolicy::Independent, AllocationPolicy::GreedyByValue] {
        let engine = FeasibilityEngine::new(SuggestionConfig::new().with_allocation_policy(policy));
        let report = engine.calculate(&snapshot)?;

        println!("=== {:?} ===", policy);
        for suggestion in &report.products {
            println!(
                "  - {}: {} 單位, 價值 {}",
                suggestion.product_code, suggestion.quantity_possible, suggestion.total_value
            );
        }
        println!("  總價值: {}\n", report.total_production_value);
    }

    Ok(())
}
