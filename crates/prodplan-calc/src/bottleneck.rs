//! 瓶頸計算：最稀缺的原物料決定可生產數量

use std::collections::BTreeMap;

use prodplan_core::{BomLine, EntityId, ProductionError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 某產品的瓶頸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bottleneck {
    /// 瓶頸原物料ID
    pub raw_material_id: EntityId,
    /// 可生產數量
    pub units: u64,
}

/// 瓶頸計算器
pub struct BottleneckCalculator;

impl BottleneckCalculator {
    /// 單一 BOM 行可支撐的產品數量：floor(庫存 / 用量)
    ///
    /// 中間值保留完整小數精度，只對最終比值取整。
    pub fn units_from_line(stock: Decimal, required: Decimal) -> prodplan_core::Result<u64> {
        if required <= Decimal::ZERO {
            return Err(ProductionError::Calculation(format!(
                "用量必須大於 0，實際為 {}",
                required
            )));
        }

        let remainder = stock
            .checked_rem(required)
            .ok_or_else(|| Self::overflow(stock, required))?;
        let units = (stock - remainder)
            .checked_div(required)
            .ok_or_else(|| Self::overflow(stock, required))?
            .trunc();

        units.to_u64().ok_or_else(|| Self::overflow(stock, required))
    }

    /// 多個 BOM 行取最小值（瓶頸規則）
    ///
    /// `stock` 中找不到的原物料視為庫存 0。沒有 BOM 行時回傳 `None`。
    pub fn find(
        lines: &[&BomLine],
        stock: &BTreeMap<EntityId, Decimal>,
    ) -> prodplan_core::Result<Option<Bottleneck>> {
        let mut bottleneck: Option<Bottleneck> = None;

        for line in lines {
            let available = stock
                .get(&line.raw_material_id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let units = Self::units_from_line(available, line.quantity_required)?;

            let is_scarcer = match bottleneck {
                None => true,
                Some(current) => units < current.units,
            };
            if is_scarcer {
                bottleneck = Some(Bottleneck {
                    raw_material_id: line.raw_material_id,
                    units,
                });
            }
        }

        Ok(bottleneck)
    }

    fn overflow(stock: Decimal, required: Decimal) -> ProductionError {
        ProductionError::Calculation(format!(
            "可生產數量超出範圍：庫存 {}, 用量 {}",
            stock, required
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(100), dec!(4), 25)]
    #[case(dec!(10), dec!(3), 3)]
    #[case(dec!(2), dec!(3), 0)]
    #[case(dec!(0), dec!(1), 0)]
    #[case(dec!(0.9), dec!(0.3), 3)]
    #[case(dec!(1.999), dec!(0.5), 3)]
    #[case(dec!(7.5), dec!(2.5), 3)]
    #[case(dec!(1), dec!(0.333), 3)]
    fn test_units_from_line(#[case] stock: Decimal, #[case] required: Decimal, #[case] expected: u64) {
        assert_eq!(
            BottleneckCalculator::units_from_line(stock, required).unwrap(),
            expected
        );
    }

    #[test]
    fn test_units_from_line_rejects_zero_requirement() {
        assert!(BottleneckCalculator::units_from_line(dec!(10), Decimal::ZERO).is_err());
    }

    #[test]
    fn test_units_out_of_range() {
        let result = BottleneckCalculator::units_from_line(Decimal::MAX, dec!(0.0001));
        assert!(matches!(result, Err(ProductionError::Calculation(_))));
    }

    #[test]
    fn test_scarcest_material_caps_production() {
        let a = BomLine::new(1, 1, 100, dec!(4));
        let b = BomLine::new(2, 1, 101, dec!(3));
        let stock = BTreeMap::from([(100, dec!(100)), (101, dec!(10))]);

        let bottleneck = BottleneckCalculator::find(&[&a, &b], &stock).unwrap().unwrap();
        assert_eq!(
            bottleneck,
            Bottleneck {
                raw_material_id: 101,
                units: 3
            }
        );
    }

    #[test]
    fn test_missing_stock_counts_as_zero() {
        let a = BomLine::new(1, 1, 100, dec!(1));
        let stock = BTreeMap::new();

        let bottleneck = BottleneckCalculator::find(&[&a], &stock).unwrap().unwrap();
        assert_eq!(bottleneck.units, 0);
    }

    #[test]
    fn test_no_lines_no_bottleneck() {
        let stock = BTreeMap::from([(100, dec!(5))]);
        assert_eq!(BottleneckCalculator::find(&[], &stock).unwrap(), None);
    }
}
