//! 整箱進位

use reorder_core::{ReorderError, Result};
use rust_decimal::Decimal;

/// 將訂購量向上進位到整箱倍數
///
/// 回傳不小於 `quantity` 的最小 `pack_size` 倍數，
/// 即 `ceil(quantity / pack_size) * pack_size`；
/// 數量為零時恆為零，不受整箱倍數影響。
pub fn round_to_pack(quantity: Decimal, pack_size: u32) -> Result<Decimal> {
    if pack_size == 0 {
        return Err(ReorderError::InvalidConfig(
            "整箱倍數必須至少為 1".to_string(),
        ));
    }
    if quantity <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let pack = Decimal::from(pack_size);
    let remainder = quantity % pack;
    if remainder.is_zero() {
        Ok(quantity)
    } else {
        Ok(quantity - remainder + pack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::exact_multiple(60, 6, 60)]
    #[case::round_up(61, 6, 66)]
    #[case::just_below(59, 6, 60)]
    #[case::pack_one(17, 1, 17)]
    #[case::below_one_pack(1, 100, 100)]
    #[case::zero_stays_zero(0, 6, 0)]
    fn test_round_to_pack_cases(#[case] qty: i64, #[case] pack: u32, #[case] expected: i64) {
        assert_eq!(
            round_to_pack(Decimal::from(qty), pack).unwrap(),
            Decimal::from(expected)
        );
    }

    #[test]
    fn test_fractional_quantity_rounds_up() {
        // 4.5 之於整箱 1 → 5
        assert_eq!(
            round_to_pack(Decimal::new(45, 1), 1).unwrap(),
            Decimal::from(5)
        );
        // 10.2 之於整箱 6 → 12
        assert_eq!(
            round_to_pack(Decimal::new(102, 1), 6).unwrap(),
            Decimal::from(12)
        );
    }

    #[test]
    fn test_zero_pack_size_rejected() {
        assert!(matches!(
            round_to_pack(Decimal::from(10), 0),
            Err(ReorderError::InvalidConfig(_))
        ));
    }

    proptest! {
        /// 進位結果是整箱倍數、不小於原數量，且為滿足前兩者的最小值
        #[test]
        fn prop_round_to_pack_integral(qty in 0i64..100_000, pack in 1u32..500) {
            let quantity = Decimal::from(qty);
            let rounded = round_to_pack(quantity, pack).unwrap();
            let pack_dec = Decimal::from(pack);

            prop_assert!((rounded % pack_dec).is_zero());
            prop_assert!(rounded >= quantity);
            prop_assert!(rounded - pack_dec < quantity);
        }

        #[test]
        fn prop_round_to_pack_fractional(cents in 1i64..1_000_000, pack in 1u32..500) {
            let quantity = Decimal::new(cents, 2);
            let rounded = round_to_pack(quantity, pack).unwrap();
            let pack_dec = Decimal::from(pack);

            prop_assert!((rounded % pack_dec).is_zero());
            prop_assert!(rounded >= quantity);
            prop_assert!(rounded - pack_dec < quantity);
        }
    }
}
