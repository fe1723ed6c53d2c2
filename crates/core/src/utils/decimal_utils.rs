//! Fixed-point helpers for ledger amounts.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DECIMAL_PRECISION, PERCENTAGE_PRECISION};

/// Rounds a monetary amount to the ledger precision.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an allocation percentage to the stored precision, with the same
/// midpoint rule as money.
pub fn round_percentage(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PERCENTAGE_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// True when stored percentages add up to one, allowing half a unit of the
/// last stored digit per percentage.
pub fn covers_whole(percentages: &[Decimal]) -> bool {
    let half_unit = Decimal::new(5, PERCENTAGE_PRECISION + 1);
    let total: Decimal = percentages.iter().copied().sum();
    (total - Decimal::ONE).abs() <= half_unit * Decimal::from(percentages.len())
}

/// Pushes the rounding residue `target - sum(amounts)` onto the largest amount.
///
/// Shares are rounded independently, so their sum can drift from the amount
/// being split by a few units of the last digit. The largest share absorbs the
/// drift so the split sums to `target` exactly. Returns the index that was
/// adjusted, or `None` when there was nothing to settle.
pub fn settle_residual(target: Decimal, amounts: &mut [Decimal]) -> Option<usize> {
    let residual = target - amounts.iter().copied().sum::<Decimal>();
    if residual.is_zero() {
        return None;
    }
    let (index, _) = amounts
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))?;
    amounts[index] += residual;
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_five_digits() {
        assert_eq!(round_money(dec!(33.333333333)), dec!(33.33333));
        assert_eq!(round_money(dec!(0.000005)), dec!(0.00001));
        assert_eq!(round_money(dec!(-0.000005)), dec!(-0.00001));
    }

    #[test]
    fn test_round_percentage() {
        assert_eq!(round_percentage(dec!(1) / dec!(3)), dec!(0.3333333333));
        assert_eq!(round_percentage(dec!(0.6)), dec!(0.6));
        assert_eq!(round_percentage(dec!(0.00000000005)), dec!(0.0000000001));
        assert_eq!(round_percentage(dec!(0.00000000025)), dec!(0.0000000003));
    }

    #[test]
    fn test_covers_whole_allows_per_share_rounding_only() {
        let third = dec!(0.3333333333);
        assert!(covers_whole(&[third, third, third]));
        assert!(covers_whole(&[dec!(0.6), dec!(0.4)]));
        assert!(!covers_whole(&[dec!(0.9999993333)]));
        assert!(!covers_whole(&[dec!(0.4999999999), dec!(0.4999999999)]));
        assert!(!covers_whole(&[]));
    }

    #[test]
    fn test_settle_residual_adjusts_largest() {
        let mut amounts = vec![dec!(33.33333), dec!(33.33334), dec!(33.33332)];
        let adjusted = settle_residual(dec!(100), &mut amounts);
        assert_eq!(adjusted, Some(1));
        assert_eq!(amounts.iter().copied().sum::<Decimal>(), dec!(100));
        assert_eq!(amounts[1], dec!(33.33335));
    }

    #[test]
    fn test_settle_residual_prefers_first_on_tie() {
        let mut amounts = vec![dec!(33.33333), dec!(33.33333), dec!(33.33333)];
        assert_eq!(settle_residual(dec!(100), &mut amounts), Some(0));
        assert_eq!(amounts[0], dec!(33.33334));
    }

    #[test]
    fn test_settle_residual_noop() {
        let mut amounts = vec![dec!(60), dec!(40)];
        assert_eq!(settle_residual(dec!(100), &mut amounts), None);
        assert!(settle_residual(dec!(1), &mut []).is_none());
    }
}
