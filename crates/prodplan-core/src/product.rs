//! 產品模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// 產品（成品）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: EntityId,

    /// 產品代碼（唯一）
    pub code: String,

    /// 產品名稱
    pub name: String,

    /// 單位售價
    pub value: Decimal,

    /// 成品庫存
    #[serde(default)]
    pub stock_quantity: Decimal,
}

impl Product {
    /// 創建新的產品
    pub fn new(id: EntityId, code: String, name: String, value: Decimal) -> Self {
        Self {
            id,
            code,
            name,
            value,
            stock_quantity: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置成品庫存
    pub fn with_stock_quantity(mut self, stock_quantity: Decimal) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    /// 單價是否有效（不可為負）
    pub fn has_valid_value(&self) -> bool {
        self.value >= Decimal::ZERO
    }
}

/// 新增產品的輸入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub value: Decimal,
}

impl NewProduct {
    pub fn new(code: String, name: String, value: Decimal) -> Self {
        Self { code, name, value }
    }

    /// 指定 ID 建立產品
    pub fn into_product(self, id: EntityId) -> Product {
        Product::new(id, self.code, self.name, self.value)
    }
}
