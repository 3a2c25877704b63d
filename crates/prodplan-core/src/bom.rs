//! BOM（物料清單）行模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// BOM 行：生產一單位產品所需的某原物料數量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    /// BOM 行ID
    pub id: EntityId,

    /// 產品ID
    pub product_id: EntityId,

    /// 原物料ID
    pub raw_material_id: EntityId,

    /// 單位用量（必須大於 0）
    pub quantity_required: Decimal,
}

impl BomLine {
    /// 創建新的 BOM 行
    pub fn new(
        id: EntityId,
        product_id: EntityId,
        raw_material_id: EntityId,
        quantity_required: Decimal,
    ) -> Self {
        Self {
            id,
            product_id,
            raw_material_id,
            quantity_required,
        }
    }

    /// 用量是否有效
    pub fn has_valid_quantity(&self) -> bool {
        self.quantity_required > Decimal::ZERO
    }

    /// (產品, 原物料) 唯一鍵
    pub fn pair(&self) -> (EntityId, EntityId) {
        (self.product_id, self.raw_material_id)
    }
}

/// 新增 BOM 行的輸入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBomLine {
    pub product_id: EntityId,
    pub raw_material_id: EntityId,
    pub quantity_required: Decimal,
}

impl NewBomLine {
    pub fn new(product_id: EntityId, raw_material_id: EntityId, quantity_required: Decimal) -> Self {
        Self {
            product_id,
            raw_material_id,
            quantity_required,
        }
    }

    pub fn into_bom_line(self, id: EntityId) -> BomLine {
        BomLine::new(id, self.product_id, self.raw_material_id, self.quantity_required)
    }
}
