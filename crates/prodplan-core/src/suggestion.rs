//! 生產建議模型（計算結果，不持久化）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EntityId, Product, ProductionError, Result};

/// 單一產品的生產建議
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionSuggestion {
    /// 產品ID
    pub product_id: EntityId,

    /// 產品代碼
    pub product_code: String,

    /// 產品名稱
    pub product_name: String,

    /// 可生產數量（瓶頸原物料決定）
    pub quantity_possible: u64,

    /// 單位售價
    pub unit_value: Decimal,

    /// 總價值 = 可生產數量 × 單位售價
    pub total_value: Decimal,
}

impl ProductionSuggestion {
    /// 由產品與可生產數量建立建議
    pub fn new(product: &Product, quantity_possible: u64, total_value: Decimal) -> Self {
        Self {
            product_id: product.id,
            product_code: product.code.clone(),
            product_name: product.name.clone(),
            quantity_possible,
            unit_value: product.value,
            total_value,
        }
    }

    pub fn is_producible(&self) -> bool {
        self.quantity_possible > 0
    }
}

/// 生產建議報表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionReport {
    /// 各產品建議（依產品ID遞增）
    pub products: Vec<ProductionSuggestion>,

    /// 總生產價值
    pub total_production_value: Decimal,
}

impl ProductionReport {
    /// 由建議列表建立報表，總價值為各建議總價值之和
    ///
    /// 加總超出 `Decimal` 範圍時回傳 `Calculation` 錯誤。
    pub fn from_suggestions(products: Vec<ProductionSuggestion>) -> Result<Self> {
        let total_production_value = products
            .iter()
            .try_fold(Decimal::ZERO, |total, s| total.checked_add(s.total_value))
            .ok_or_else(|| ProductionError::Calculation("總生產價值超出範圍".to_string()))?;

        Ok(Self {
            products,
            total_production_value,
        })
    }

    /// 查找某產品的建議
    pub fn find(&self, product_id: EntityId) -> Option<&ProductionSuggestion> {
        self.products.iter().find(|s| s.product_id == product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// 轉為 JSON 回應格式
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
