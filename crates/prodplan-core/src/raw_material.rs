//! 原物料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// 原物料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterial {
    /// 原物料ID
    pub id: EntityId,

    /// 原物料代碼（唯一、非空）
    pub code: String,

    /// 原物料名稱
    pub name: String,

    /// 現有庫存（只能由庫存異動修改）
    pub stock_quantity: Decimal,
}

impl RawMaterial {
    /// 創建新的原物料
    pub fn new(id: EntityId, code: String, name: String, stock_quantity: Decimal) -> Self {
        Self {
            id,
            code,
            name,
            stock_quantity,
        }
    }

    /// 庫存是否為非負
    pub fn has_valid_stock(&self) -> bool {
        self.stock_quantity >= Decimal::ZERO
    }
}

/// 新增原物料的輸入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRawMaterial {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub stock_quantity: Decimal,
}

impl NewRawMaterial {
    pub fn new(code: String, name: String, stock_quantity: Decimal) -> Self {
        Self {
            code,
            name,
            stock_quantity,
        }
    }

    pub fn into_raw_material(self, id: EntityId) -> RawMaterial {
        RawMaterial::new(id, self.code, self.name, self.stock_quantity)
    }
}
