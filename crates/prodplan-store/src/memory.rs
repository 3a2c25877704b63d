//! 記憶體目錄

use std::collections::BTreeMap;

use prodplan_core::{
    BomLine, EntityId, EntityKind, ItemType, NewBomLine, NewProduct, NewRawMaterial,
    NewStockMovement, Product, ProductionError, RawMaterial, Result, StockMovement,
};
use rust_decimal::Decimal;

use crate::CatalogStore;

/// 記憶體目錄
///
/// 所有修改都經由 `&mut self`，因此透過 `&self` 讀取的快照必然一致。
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: BTreeMap<EntityId, Product>,
    raw_materials: BTreeMap<EntityId, RawMaterial>,
    bom_lines: BTreeMap<EntityId, BomLine>,
    movements: Vec<StockMovement>,
    next_product_id: EntityId,
    next_raw_material_id: EntityId,
    next_bom_line_id: EntityId,
}

impl InMemoryCatalog {
    /// 創建空的目錄
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // 產品
    // ------------------------------------------------------------------

    /// 新增產品
    pub fn create_product(&mut self, input: NewProduct) -> Result<Product> {
        Self::check_code(EntityKind::Product, &input.code)?;
        if self.products.values().any(|p| p.code == input.code) {
            tracing::warn!("產品代碼重複: {}", input.code);
            return Err(ProductionError::DuplicateCode {
                entity: EntityKind::Product,
                code: input.code,
            });
        }
        if input.value < Decimal::ZERO {
            return Err(ProductionError::Validation(format!(
                "產品單價不可為負: {}",
                input.value
            )));
        }

        self.next_product_id += 1;
        let product = input.into_product(self.next_product_id);
        self.products.insert(product.id, product.clone());

        tracing::debug!("新增產品 {} ({})", product.id, product.code);
        Ok(product)
    }

    /// 刪除產品（連同其 BOM 行）
    pub fn delete_product(&mut self, id: EntityId) -> Result<Product> {
        let product = self.products.remove(&id).ok_or(ProductionError::NotFound {
            entity: EntityKind::Product,
            id,
        })?;

        let removed = self.remove_bom_lines_where(|line| line.product_id == id);
        tracing::debug!("刪除產品 {}，連帶刪除 BOM 行 {} 筆", id, removed);
        Ok(product)
    }

    pub fn product(&self, id: EntityId) -> Option<&Product> {
        self.products.get(&id)
    }

    // ------------------------------------------------------------------
    // 原物料
    // ------------------------------------------------------------------

    /// 新增原物料
    pub fn create_raw_material(&mut self, input: NewRawMaterial) -> Result<RawMaterial> {
        Self::check_code(EntityKind::RawMaterial, &input.code)?;
        if self.raw_materials.values().any(|m| m.code == input.code) {
            tracing::warn!("原物料代碼重複: {}", input.code);
            return Err(ProductionError::DuplicateCode {
                entity: EntityKind::RawMaterial,
                code: input.code,
            });
        }
        if input.stock_quantity < Decimal::ZERO {
            return Err(ProductionError::Validation(format!(
                "原物料庫存不可為負: {}",
                input.stock_quantity
            )));
        }

        self.next_raw_material_id += 1;
        let material = input.into_raw_material(self.next_raw_material_id);
        self.raw_materials.insert(material.id, material.clone());

        tracing::debug!("新增原物料 {} ({})", material.id, material.code);
        Ok(material)
    }

    /// 刪除原物料（連同引用它的 BOM 行）
    pub fn delete_raw_material(&mut self, id: EntityId) -> Result<RawMaterial> {
        let material = self
            .raw_materials
            .remove(&id)
            .ok_or(ProductionError::NotFound {
                entity: EntityKind::RawMaterial,
                id,
            })?;

        let removed = self.remove_bom_lines_where(|line| line.raw_material_id == id);
        tracing::debug!("刪除原物料 {}，連帶刪除 BOM 行 {} 筆", id, removed);
        Ok(material)
    }

    pub fn raw_material(&self, id: EntityId) -> Option<&RawMaterial> {
        self.raw_materials.get(&id)
    }

    // ------------------------------------------------------------------
    // BOM
    // ------------------------------------------------------------------

    /// 新增 BOM 行
    pub fn create_bom_line(&mut self, input: NewBomLine) -> Result<BomLine> {
        if !self.products.contains_key(&input.product_id) {
            return Err(ProductionError::NotFound {
                entity: EntityKind::Product,
                id: input.product_id,
            });
        }
        if !self.raw_materials.contains_key(&input.raw_material_id) {
            return Err(ProductionError::NotFound {
                entity: EntityKind::RawMaterial,
                id: input.raw_material_id,
            });
        }
        if input.quantity_required <= Decimal::ZERO {
            return Err(ProductionError::InvalidBomLine {
                product_id: input.product_id,
                raw_material_id: input.raw_material_id,
                reason: format!("用量必須大於 0，實際為 {}", input.quantity_required),
            });
        }
        if self
            .bom_lines
            .values()
            .any(|l| l.pair() == (input.product_id, input.raw_material_id))
        {
            return Err(ProductionError::InvalidBomLine {
                product_id: input.product_id,
                raw_material_id: input.raw_material_id,
                reason: "同一產品與原物料只能有一筆 BOM 行".to_string(),
            });
        }

        self.next_bom_line_id += 1;
        let line = input.into_bom_line(self.next_bom_line_id);
        self.bom_lines.insert(line.id, line.clone());

        tracing::debug!(
            "新增 BOM 行 {}: 產品 {} ← 原物料 {} × {}",
            line.id,
            line.product_id,
            line.raw_material_id,
            line.quantity_required
        );
        Ok(line)
    }

    /// 刪除 BOM 行
    pub fn delete_bom_line(&mut self, id: EntityId) -> Result<BomLine> {
        self.bom_lines.remove(&id).ok_or(ProductionError::NotFound {
            entity: EntityKind::BomLine,
            id,
        })
    }

    // ------------------------------------------------------------------
    // 庫存異動
    // ------------------------------------------------------------------

    /// 所有異動，最新在前
    pub fn list_stock_movements(&self) -> Vec<StockMovement> {
        let mut movements: Vec<StockMovement> = self.movements.iter().rev().cloned().collect();
        movements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        movements
    }

    /// 套用庫存異動
    ///
    /// 失敗時不記錄異動，也不修改庫存。
    pub fn apply_stock_movement(&mut self, input: NewStockMovement) -> Result<StockMovement> {
        let stock = match input.item_type {
            ItemType::Product => self
                .products
                .get_mut(&input.item_id)
                .map(|p| &mut p.stock_quantity)
                .ok_or(ProductionError::NotFound {
                    entity: EntityKind::Product,
                    id: input.item_id,
                })?,
            ItemType::RawMaterial => self
                .raw_materials
                .get_mut(&input.item_id)
                .map(|m| &mut m.stock_quantity)
                .ok_or(ProductionError::NotFound {
                    entity: EntityKind::RawMaterial,
                    id: input.item_id,
                })?,
        };

        let new_quantity = match input.movement_type.apply(*stock, input.quantity) {
            Ok(quantity) => quantity,
            Err(err) => {
                tracing::warn!(
                    "庫存異動被拒絕: {:?} {} {:?} {} - {}",
                    input.item_type,
                    input.item_id,
                    input.movement_type,
                    input.quantity,
                    err
                );
                return Err(err);
            }
        };

        tracing::debug!(
            "庫存異動: {:?} {} {} → {}",
            input.item_type,
            input.item_id,
            stock,
            new_quantity
        );
        *stock = new_quantity;

        let movement = StockMovement::record(input);
        self.movements.push(movement.clone());
        Ok(movement)
    }

    fn check_code(entity: EntityKind, code: &str) -> Result<()> {
        if code.trim().is_empty() {
            return Err(ProductionError::Validation(format!("{}代碼不可為空", entity)));
        }
        Ok(())
    }

    fn remove_bom_lines_where(&mut self, predicate: impl Fn(&BomLine) -> bool) -> usize {
        let before = self.bom_lines.len();
        self.bom_lines.retain(|_, line| !predicate(line));
        before - self.bom_lines.len()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.values().cloned().collect())
    }

    fn list_raw_materials(&self) -> Result<Vec<RawMaterial>> {
        Ok(self.raw_materials.values().cloned().collect())
    }

    fn list_bom_lines(&self) -> Result<Vec<BomLine>> {
        Ok(self.bom_lines.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodplan_core::MovementType;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn catalog() -> (InMemoryCatalog, Product, RawMaterial) {
        let mut catalog = InMemoryCatalog::new();
        let product = catalog
            .create_product(NewProduct::new("CHAIR".to_string(), "Chair".to_string(), dec!(10.50)))
            .unwrap();
        let material = catalog
            .create_raw_material(NewRawMaterial::new(
                "WOOD".to_string(),
                "Wood".to_string(),
                dec!(100),
            ))
            .unwrap();
        (catalog, product, material)
    }

    #[test]
    fn test_ids_are_assigned_incrementally() {
        let (mut catalog, product, material) = catalog();
        assert_eq!(product.id, 1);
        assert_eq!(material.id, 1);

        let second = catalog
            .create_product(NewProduct::new("TABLE".to_string(), "Table".to_string(), dec!(40)))
            .unwrap();
        assert_eq!(second.id, 2);
    }

    #[rstest]
    #[case("CHAIR", true)]
    #[case("", false)]
    #[case("  ", false)]
    fn test_product_code_rejected(#[case] code: &str, #[case] duplicate: bool) {
        let (mut catalog, _, _) = catalog();

        let result = catalog.create_product(NewProduct::new(
            code.to_string(),
            "Other".to_string(),
            dec!(1),
        ));
        if duplicate {
            assert!(matches!(result, Err(ProductionError::DuplicateCode { .. })));
        } else {
            assert!(matches!(result, Err(ProductionError::Validation(_))));
        }
        assert_eq!(catalog.list_products().unwrap().len(), 1);
    }

    #[rstest]
    #[case("WOOD", true)]
    #[case("  ", false)]
    fn test_raw_material_code_rejected(#[case] code: &str, #[case] duplicate: bool) {
        let (mut catalog, _, _) = catalog();

        let result = catalog.create_raw_material(NewRawMaterial::new(
            code.to_string(),
            "Blank".to_string(),
            dec!(1),
        ));
        if duplicate {
            assert!(matches!(result, Err(ProductionError::DuplicateCode { .. })));
        } else {
            assert!(matches!(result, Err(ProductionError::Validation(_))));
        }
        assert_eq!(catalog.list_raw_materials().unwrap().len(), 1);
    }

    #[test]
    fn test_bom_line_rules() {
        let (mut catalog, product, material) = catalog();

        let line = catalog
            .create_bom_line(NewBomLine::new(product.id, material.id, dec!(4)))
            .unwrap();
        assert_eq!(line.id, 1);

        let duplicate = catalog.create_bom_line(NewBomLine::new(product.id, material.id, dec!(2)));
        assert!(matches!(duplicate, Err(ProductionError::InvalidBomLine { .. })));

        let missing = catalog.create_bom_line(NewBomLine::new(product.id, 99, dec!(2)));
        assert!(matches!(
            missing,
            Err(ProductionError::NotFound { entity: EntityKind::RawMaterial, id: 99 })
        ));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-1.5))]
    fn test_bom_line_quantity_rejected(#[case] quantity: Decimal) {
        let (mut catalog, product, material) = catalog();

        let result = catalog.create_bom_line(NewBomLine::new(product.id, material.id, quantity));
        assert!(matches!(result, Err(ProductionError::InvalidBomLine { .. })));
        assert!(catalog.list_bom_lines().unwrap().is_empty());
    }

    #[test]
    fn test_delete_cascades_bom_lines() {
        let (mut catalog, product, material) = catalog();
        catalog
            .create_bom_line(NewBomLine::new(product.id, material.id, dec!(4)))
            .unwrap();

        catalog.delete_raw_material(material.id).unwrap();
        assert!(catalog.list_bom_lines().unwrap().is_empty());
        assert!(catalog.snapshot().unwrap().raw_materials.is_empty());

        assert!(matches!(
            catalog.delete_raw_material(material.id),
            Err(ProductionError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_product_cascades() {
        let (mut catalog, product, material) = catalog();
        let line = catalog
            .create_bom_line(NewBomLine::new(product.id, material.id, dec!(4)))
            .unwrap();

        catalog.delete_product(product.id).unwrap();
        assert!(matches!(
            catalog.delete_bom_line(line.id),
            Err(ProductionError::NotFound { entity: EntityKind::BomLine, .. })
        ));
    }

    #[test]
    fn test_stock_movements_update_balances() {
        let (mut catalog, product, material) = catalog();

        catalog
            .apply_stock_movement(NewStockMovement::new(
                ItemType::RawMaterial,
                material.id,
                MovementType::Out,
                dec!(30),
            ))
            .unwrap();
        assert_eq!(catalog.raw_material(material.id).unwrap().stock_quantity, dec!(70));

        catalog
            .apply_stock_movement(
                NewStockMovement::new(ItemType::Product, product.id, MovementType::In, dec!(5))
                    .with_reason("produção".to_string()),
            )
            .unwrap();
        assert_eq!(catalog.product(product.id).unwrap().stock_quantity, dec!(5));

        catalog
            .apply_stock_movement(NewStockMovement::new(
                ItemType::RawMaterial,
                material.id,
                MovementType::Adjust,
                dec!(12.5),
            ))
            .unwrap();
        assert_eq!(catalog.raw_material(material.id).unwrap().stock_quantity, dec!(12.5));

        let movements = catalog.list_stock_movements();
        assert_eq!(movements.len(), 3);
        assert_eq!(movements[0].movement_type, MovementType::Adjust);
        assert_eq!(movements[2].movement_type, MovementType::Out);
    }

    #[test]
    fn test_rejected_movement_has_no_effect() {
        let (mut catalog, _, material) = catalog();

        let result = catalog.apply_stock_movement(NewStockMovement::new(
            ItemType::RawMaterial,
            material.id,
            MovementType::Out,
            dec!(100.001),
        ));
        assert!(matches!(result, Err(ProductionError::InsufficientStock { .. })));
        assert_eq!(catalog.raw_material(material.id).unwrap().stock_quantity, dec!(100));
        assert!(catalog.list_stock_movements().is_empty());

        let missing = catalog.apply_stock_movement(NewStockMovement::new(
            ItemType::Product,
            42,
            MovementType::In,
            dec!(1),
        ));
        assert!(matches!(
            missing,
            Err(ProductionError::NotFound { entity: EntityKind::Product, id: 42 })
        ));
    }

    #[test]
    fn test_inbound_overflow_leaves_stock_untouched() {
        let (mut catalog, _, material) = catalog();
        catalog
            .apply_stock_movement(NewStockMovement::new(
                ItemType::RawMaterial,
                material.id,
                MovementType::Adjust,
                Decimal::MAX,
            ))
            .unwrap();

        let result = catalog.apply_stock_movement(NewStockMovement::new(
            ItemType::RawMaterial,
            material.id,
            MovementType::In,
            dec!(1),
        ));

        assert!(matches!(result, Err(ProductionError::Calculation(_))));
        assert_eq!(catalog.raw_material(material.id).unwrap().stock_quantity, Decimal::MAX);
        let movements = catalog.list_stock_movements();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].movement_type, MovementType::Adjust);
    }
}
