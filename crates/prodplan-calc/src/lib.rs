//! # Production Feasibility Engine
//!
//! 生產可行性計算引擎：由庫存與 BOM 計算各產品可生產數量與價值

pub mod allocation;
pub mod bottleneck;
pub mod engine;
pub mod validation;

// Re-export 主要類型
pub use allocation::{Allocation, AllocationCalculator, Recipe};
pub use bottleneck::{Bottleneck, BottleneckCalculator};
pub use engine::FeasibilityEngine;
pub use validation::SnapshotValidator;

use prodplan_core::{BomLine, Product, ProductionReport, RawMaterial, SuggestionConfig};

/// 以預設配置計算生產建議
pub fn compute_production_suggestions(
    products: &[Product],
    raw_materials: &[RawMaterial],
    bom_lines: &[BomLine],
) -> prodplan_core::Result<ProductionReport> {
    FeasibilityEngine::new(SuggestionConfig::default()).calculate_from_parts(
        products,
        raw_materials,
        bom_lines,
    )
}
