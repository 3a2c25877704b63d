//! 生產可行性主計算器

use std::collections::BTreeMap;

use prodplan_core::{
    BomLine, CatalogSnapshot, EntityId, Product, ProductionReport, ProductionSuggestion,
    RawMaterial, SuggestionConfig,
};
use rust_decimal::Decimal;

use crate::allocation::{AllocationCalculator, Recipe};
use crate::validation::SnapshotValidator;

/// 生產可行性計算引擎
///
/// 無狀態：每次呼叫都從快照重新計算，不保留任何結果。
#[derive(Debug, Clone, Default)]
pub struct FeasibilityEngine {
    config: SuggestionConfig,
}

impl FeasibilityEngine {
    /// 創建新的計算引擎
    pub fn new(config: SuggestionConfig) -> Self {
        Self { config }
    }

    /// 主計算入口
    pub fn calculate(&self, snapshot: &CatalogSnapshot) -> prodplan_core::Result<ProductionReport> {
        tracing::info!(
            "開始生產建議計算：產品 {} 筆，原物料 {} 筆，BOM 行 {} 筆",
            snapshot.products.len(),
            snapshot.raw_materials.len(),
            snapshot.bom_lines.len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 快照一致性檢查（失敗即中止整次計算）
        tracing::debug!("Step 1: 快照驗證");
        SnapshotValidator::validate(snapshot)?;

        // Step 2: 依產品分組 BOM 行（只保留有配方的產品）
        tracing::debug!("Step 2: 配方分組");
        let recipes = self.build_recipes(&snapshot.products, &snapshot.bom_lines);
        tracing::debug!(
            "有配方的產品: {} / {}",
            recipes.len(),
            snapshot.products.len()
        );

        // Step 3: 依策略計算可生產數量
        tracing::debug!("Step 3: 分配計算 ({:?})", self.config.allocation_policy);
        let stock = self.create_stock_map(&snapshot.raw_materials);
        let allocations =
            AllocationCalculator::apply(self.config.allocation_policy, &recipes, &stock)?;

        // Step 4: 計算價值並組成報表
        tracing::debug!("Step 4: 價值計算");
        let mut suggestions = Vec::with_capacity(recipes.len());
        for (recipe, allocation) in recipes.iter().zip(allocations) {
            let total_value = self.total_value(recipe.product, allocation.quantity_possible)?;
            let suggestion =
                ProductionSuggestion::new(recipe.product, allocation.quantity_possible, total_value);

            if !suggestion.is_producible() && self.config.skip_unproducible {
                tracing::debug!("產品 {} 無法生產，略過", recipe.product.id);
                continue;
            }
            suggestions.push(suggestion);
        }

        let report = ProductionReport::from_suggestions(suggestions)?;

        tracing::info!("生產建議計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "建議產品數量: {}，總生產價值: {}",
            report.len(),
            report.total_production_value
        );

        Ok(report)
    }

    /// 以分開的集合計算（不需先組成快照）
    pub fn calculate_from_parts(
        &self,
        products: &[Product],
        raw_materials: &[RawMaterial],
        bom_lines: &[BomLine],
    ) -> prodplan_core::Result<ProductionReport> {
        let snapshot = CatalogSnapshot::new(
            products.to_vec(),
            raw_materials.to_vec(),
            bom_lines.to_vec(),
        );
        self.calculate(&snapshot)
    }

    /// 獲取配置引用
    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// 按產品分組 BOM 行，依產品ID遞增
    fn build_recipes<'a>(
        &self,
        products: &'a [Product],
        bom_lines: &'a [BomLine],
    ) -> Vec<Recipe<'a>> {
        let mut grouped: BTreeMap<EntityId, Vec<&'a BomLine>> = BTreeMap::new();
        for line in bom_lines {
            grouped.entry(line.product_id).or_default().push(line);
        }

        let mut recipes: Vec<Recipe<'a>> = products
            .iter()
            .filter_map(|product| {
                grouped.remove(&product.id).map(|mut lines| {
                    lines.sort_by_key(|l| l.id);
                    Recipe { product, lines }
                })
            })
            .collect();
        recipes.sort_by_key(|r| r.product.id);
        recipes
    }

    /// 創建庫存映射
    fn create_stock_map(&self, raw_materials: &[RawMaterial]) -> BTreeMap<EntityId, Decimal> {
        raw_materials
            .iter()
            .map(|m| (m.id, m.stock_quantity))
            .collect()
    }

    fn total_value(&self, product: &Product, quantity: u64) -> prodplan_core::Result<Decimal> {
        let total = product
            .value
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| {
                prodplan_core::ProductionError::Calculation(format!(
                    "產品 {} 總價值超出範圍",
                    product.id
                ))
            })?;
        Ok(self.config.round_value(total))
    }
}
