//! 快照一致性檢查

use std::collections::HashSet;

use prodplan_core::{CatalogSnapshot, EntityId, EntityKind, ProductionError};

/// 快照驗證器
///
/// 任何不一致都會使整次計算中止，不產生部分結果。
pub struct SnapshotValidator;

impl SnapshotValidator {
    /// 驗證快照
    ///
    /// 檢查順序：重複 ID → 原物料庫存 → 產品單價 → BOM 行（依 ID 遞增）。
    /// BOM 行依序檢查產品引用、原物料引用、用量、(產品, 原物料) 唯一性。
    pub fn validate(snapshot: &CatalogSnapshot) -> prodplan_core::Result<()> {
        Self::check_unique_ids(
            EntityKind::Product,
            snapshot.products.iter().map(|p| p.id),
        )?;
        Self::check_unique_ids(
            EntityKind::RawMaterial,
            snapshot.raw_materials.iter().map(|m| m.id),
        )?;
        Self::check_unique_ids(
            EntityKind::BomLine,
            snapshot.bom_lines.iter().map(|l| l.id),
        )?;

        if let Some(material) = snapshot
            .raw_materials
            .iter()
            .filter(|m| !m.has_valid_stock())
            .min_by_key(|m| m.id)
        {
            return Err(ProductionError::InvalidStockState {
                raw_material_id: material.id,
                stock_quantity: material.stock_quantity,
            });
        }

        if let Some(product) = snapshot
            .products
            .iter()
            .filter(|p| !p.has_valid_value())
            .min_by_key(|p| p.id)
        {
            return Err(ProductionError::InvalidProductValue {
                product_id: product.id,
                value: product.value,
            });
        }

        let product_ids: HashSet<EntityId> = snapshot.products.iter().map(|p| p.id).collect();
        let material_ids: HashSet<EntityId> =
            snapshot.raw_materials.iter().map(|m| m.id).collect();

        let mut lines: Vec<_> = snapshot.bom_lines.iter().collect();
        lines.sort_by_key(|l| l.id);

        let mut seen_pairs = HashSet::new();
        for line in lines {
            if !product_ids.contains(&line.product_id) {
                return Err(ProductionError::ReferentialIntegrity {
                    bom_line_id: line.id,
                    entity: EntityKind::Product,
                    missing_id: line.product_id,
                });
            }

            if !material_ids.contains(&line.raw_material_id) {
                return Err(ProductionError::ReferentialIntegrity {
                    bom_line_id: line.id,
                    entity: EntityKind::RawMaterial,
                    missing_id: line.raw_material_id,
                });
            }

            if !line.has_valid_quantity() {
                return Err(ProductionError::InvalidBomLine {
                    product_id: line.product_id,
                    raw_material_id: line.raw_material_id,
                    reason: format!("用量必須大於 0，實際為 {}", line.quantity_required),
                });
            }

            if !seen_pairs.insert(line.pair()) {
                return Err(ProductionError::InvalidBomLine {
                    product_id: line.product_id,
                    raw_material_id: line.raw_material_id,
                    reason: "同一產品與原物料只能有一筆 BOM 行".to_string(),
                });
            }
        }

        Ok(())
    }

    fn check_unique_ids(
        entity: EntityKind,
        ids: impl Iterator<Item = EntityId>,
    ) -> prodplan_core::Result<()> {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(ProductionError::DuplicateEntity { entity, id });
            }
        }
        Ok(())
    }
}
