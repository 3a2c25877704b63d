//! 目錄快照

use serde::{Deserialize, Serialize};

use crate::{BomLine, EntityId, Product, RawMaterial};

/// 某一時點一致的目錄讀取結果（產品、原物料、BOM 行）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub raw_materials: Vec<RawMaterial>,
    pub bom_lines: Vec<BomLine>,
}

impl CatalogSnapshot {
    pub fn new(
        products: Vec<Product>,
        raw_materials: Vec<RawMaterial>,
        bom_lines: Vec<BomLine>,
    ) -> Self {
        Self {
            products,
            raw_materials,
            bom_lines,
        }
    }

    /// 某產品的所有 BOM 行
    pub fn bom_lines_for(&self, product_id: EntityId) -> impl Iterator<Item = &BomLine> {
        self.bom_lines
            .iter()
            .filter(move |line| line.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.raw_materials.is_empty() && self.bom_lines.is_empty()
    }
}
