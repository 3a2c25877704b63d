//! 分配策略實現

use std::collections::BTreeMap;

use prodplan_core::{AllocationPolicy, BomLine, EntityId, Product, ProductionError};
use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::bottleneck::BottleneckCalculator;

/// 產品配方：產品及其所有 BOM 行
#[derive(Debug, Clone)]
pub struct Recipe<'a> {
    pub product: &'a Product,
    pub lines: Vec<&'a BomLine>,
}

/// 單一產品的分配結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub product_id: EntityId,
    pub quantity_possible: u64,
}

/// 分配計算器
pub struct AllocationCalculator;

impl AllocationCalculator {
    /// 依策略計算各產品可生產數量
    ///
    /// 回傳順序與 `recipes` 相同。
    pub fn apply(
        policy: AllocationPolicy,
        recipes: &[Recipe<'_>],
        stock: &BTreeMap<EntityId, Decimal>,
    ) -> prodplan_core::Result<Vec<Allocation>> {
        match policy {
            AllocationPolicy::Independent => Self::independent(recipes, stock),
            AllocationPolicy::GreedyByValue => Self::greedy_by_value(recipes, stock),
        }
    }

    /// 獨立計算：每個產品都以完整庫存計算瓶頸
    fn independent(
        recipes: &[Recipe<'_>],
        stock: &BTreeMap<EntityId, Decimal>,
    ) -> prodplan_core::Result<Vec<Allocation>> {
        recipes
            .par_iter()
            .map(|recipe| {
                let quantity_possible = BottleneckCalculator::find(&recipe.lines, stock)?
                    .map(|b| b.units)
                    .unwrap_or(0);
                Ok(Allocation {
                    product_id: recipe.product.id,
                    quantity_possible,
                })
            })
            .collect()
    }

    /// 貪婪策略：單價高者優先（同價時ID小者優先），逐一扣減剩餘庫存
    fn greedy_by_value(
        recipes: &[Recipe<'_>],
        stock: &BTreeMap<EntityId, Decimal>,
    ) -> prodplan_core::Result<Vec<Allocation>> {
        let mut remaining = stock.clone();

        let mut order: Vec<usize> = (0..recipes.len()).collect();
        order.sort_by(|&a, &b| {
            let (pa, pb) = (recipes[a].product, recipes[b].product);
            pb.value.cmp(&pa.value).then(pa.id.cmp(&pb.id))
        });

        let mut quantities = vec![0u64; recipes.len()];
        for index in order {
            let recipe = &recipes[index];
            let units = BottleneckCalculator::find(&recipe.lines, &remaining)?
                .map(|b| b.units)
                .unwrap_or(0);

            if units > 0 {
                for line in &recipe.lines {
                    let consumed = line
                        .quantity_required
                        .checked_mul(Decimal::from(units))
                        .ok_or_else(|| {
                            ProductionError::Calculation(format!(
                                "原物料 {} 消耗量超出範圍",
                                line.raw_material_id
                            ))
                        })?;
                    let entry = remaining.entry(line.raw_material_id).or_insert(Decimal::ZERO);
                    *entry -= consumed;
                }
            }

            tracing::debug!(
                "貪婪分配: 產品 {} (單價 {}) → {} 單位",
                recipe.product.id,
                recipe.product.value,
                units
            );
            quantities[index] = units;
        }

        Ok(recipes
            .iter()
            .zip(quantities)
            .map(|(recipe, quantity_possible)| Allocation {
                product_id: recipe.product.id,
                quantity_possible,
            })
            .collect())
    }
}
