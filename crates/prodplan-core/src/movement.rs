//! 庫存異動模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EntityId, ProductionError, Result};

/// 異動對象類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// 成品
    Product,
    /// 原物料
    RawMaterial,
}

/// 異動類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// 入庫
    In,
    /// 出庫（不可低於 0）
    Out,
    /// 盤點調整（直接設定庫存）
    Adjust,
}

impl MovementType {
    /// 計算異動後的庫存
    pub fn apply(self, current: Decimal, quantity: Decimal) -> Result<Decimal> {
        if quantity <= Decimal::ZERO {
            return Err(ProductionError::InvalidQuantity(quantity));
        }

        match self {
            MovementType::In => current.checked_add(quantity).ok_or_else(|| {
                ProductionError::Calculation(format!(
                    "入庫後庫存超出範圍：現有 {}, 入庫 {}",
                    current, quantity
                ))
            }),
            MovementType::Out => {
                if current < quantity {
                    return Err(ProductionError::InsufficientStock {
                        current,
                        requested: quantity,
                    });
                }
                Ok(current - quantity)
            }
            MovementType::Adjust => Ok(quantity),
        }
    }
}

/// 新增庫存異動的輸入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStockMovement {
    pub item_type: ItemType,
    pub item_id: EntityId,
    pub movement_type: MovementType,
    /// 數量（恆為正，方向由異動類型決定）
    pub quantity: Decimal,
    /// 原因（如採購、銷售、生產、盤點）
    pub reason: Option<String>,
}

impl NewStockMovement {
    pub fn new(
        item_type: ItemType,
        item_id: EntityId,
        movement_type: MovementType,
        quantity: Decimal,
    ) -> Self {
        Self {
            item_type,
            item_id,
            movement_type,
            quantity,
            reason: None,
        }
    }

    /// 建構器模式：設置原因
    pub fn with_reason(mut self, reason: String) -> Self {
        self.reason = Some(reason);
        self
    }
}

/// 已記錄的庫存異動
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub item_type: ItemType,
    pub item_id: EntityId,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StockMovement {
    /// 以目前時間記錄異動
    pub fn record(input: NewStockMovement) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_type: input.item_type,
            item_id: input.item_id,
            movement_type: input.movement_type,
            quantity: input.quantity,
            reason: input.reason,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(MovementType::In, dec!(10), dec!(5), dec!(15))]
    #[case(MovementType::Out, dec!(10), dec!(4), dec!(6))]
    #[case(MovementType::Out, dec!(10), dec!(10), dec!(0))]
    #[case(MovementType::Adjust, dec!(10), dec!(3.5), dec!(3.5))]
    fn test_apply_movement(
        #[case] movement_type: MovementType,
        #[case] current: Decimal,
        #[case] quantity: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(movement_type.apply(current, quantity).unwrap(), expected);
    }

    #[rstest]
    #[case(Decimal::MAX, Decimal::ONE)]
    #[case(Decimal::MAX - dec!(5), dec!(6))]
    fn test_in_overflow_is_calculation_error(#[case] current: Decimal, #[case] quantity: Decimal) {
        assert!(matches!(
            MovementType::In.apply(current, quantity),
            Err(ProductionError::Calculation(_))
        ));
    }

    #[test]
    fn test_out_never_goes_negative() {
        let err = MovementType::Out.apply(dec!(2), dec!(3)).unwrap_err();
        assert!(matches!(
            err,
            ProductionError::InsufficientStock { current, requested }
                if current == dec!(2) && requested == dec!(3)
        ));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        assert!(matches!(
            MovementType::In.apply(dec!(2), Decimal::ZERO),
            Err(ProductionError::InvalidQuantity(_))
        ));
        assert!(matches!(
            MovementType::Adjust.apply(dec!(2), dec!(-1)),
            Err(ProductionError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_movement_wire_names() {
        let input: NewStockMovement = serde_json::from_str(
            r#"{"item_type":"raw_material","item_id":3,"movement_type":"out","quantity":"2.5","reason":"venda"}"#,
        )
        .unwrap();

        assert_eq!(input.item_type, ItemType::RawMaterial);
        assert_eq!(input.movement_type, MovementType::Out);

        let movement = StockMovement::record(input);
        assert_eq!(movement.quantity, dec!(2.5));
        assert_eq!(movement.movement_type, MovementType::Out);
    }
}
