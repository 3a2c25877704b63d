//! # Production Planning Core
//!
//! 核心資料模型與類型定義

pub mod bom;
pub mod config;
pub mod movement;
pub mod product;
pub mod raw_material;
pub mod snapshot;
pub mod suggestion;

use std::fmt;

use rust_decimal::Decimal;

// Re-export 主要類型
pub use bom::{BomLine, NewBomLine};
pub use config::{AllocationPolicy, SuggestionConfig};
pub use movement::{ItemType, MovementType, NewStockMovement, StockMovement};
pub use product::{NewProduct, Product};
pub use raw_material::{NewRawMaterial, RawMaterial};
pub use snapshot::CatalogSnapshot;
pub use suggestion::{ProductionReport, ProductionSuggestion};

/// 實體 ID（由目錄儲存自動遞增分配）
pub type EntityId = u64;

/// 實體種類（用於錯誤訊息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    RawMaterial,
    BomLine,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Product => "產品",
            EntityKind::RawMaterial => "原物料",
            EntityKind::BomLine => "BOM 行",
        };
        f.write_str(label)
    }
}

/// 生產計劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ProductionError {
    #[error("參照完整性錯誤: BOM 行 {bom_line_id} 引用不存在的{entity} {missing_id}")]
    ReferentialIntegrity {
        bom_line_id: EntityId,
        entity: EntityKind,
        missing_id: EntityId,
    },

    #[error("無效的 BOM 行（產品 {product_id}, 原物料 {raw_material_id}）: {reason}")]
    InvalidBomLine {
        product_id: EntityId,
        raw_material_id: EntityId,
        reason: String,
    },

    #[error("無效的庫存狀態: 原物料 {raw_material_id} 庫存為 {stock_quantity}")]
    InvalidStockState {
        raw_material_id: EntityId,
        stock_quantity: Decimal,
    },

    #[error("無效的產品單價: 產品 {product_id} 單價為 {value}")]
    InvalidProductValue { product_id: EntityId, value: Decimal },

    #[error("重複的{entity} ID: {id}")]
    DuplicateEntity { entity: EntityKind, id: EntityId },

    #[error("找不到{entity}: {id}")]
    NotFound { entity: EntityKind, id: EntityId },

    #[error("重複的{entity}代碼: {code}")]
    DuplicateCode { entity: EntityKind, code: String },

    #[error("無效的異動數量: {0}（必須大於 0）")]
    InvalidQuantity(Decimal),

    #[error("庫存不足：需要 {requested}, 可用 {current}")]
    InsufficientStock { current: Decimal, requested: Decimal },

    #[error("驗證錯誤: {0}")]
    Validation(String),

    #[error("計算錯誤: {0}")]
    Calculation(String),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProductionError {
    /// 是否為快照一致性錯誤（計算會整體中止）
    pub fn is_snapshot_error(&self) -> bool {
        matches!(
            self,
            ProductionError::ReferentialIntegrity { .. }
                | ProductionError::InvalidBomLine { .. }
                | ProductionError::InvalidStockState { .. }
                | ProductionError::InvalidProductValue { .. }
                | ProductionError::DuplicateEntity { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ProductionError>;
