//! Money management: how many units an entry order buys or sells.

/// Share of the balance spread across all tracked instruments.
pub const DEFAULT_CAPITAL_FRACTION: f64 = 0.6;

/// Whole units affordable from an even split of `balance * fraction` across
/// `instrument_count` instruments at `price`.
///
/// `floor(balance * fraction / instrument_count / price)`. Zero is a valid
/// result. Returns `None` when the inputs leave the division undefined: no
/// instruments, or a price that is not finite and positive.
pub fn entry_quantity(
    balance: f64,
    fraction: f64,
    instrument_count: usize,
    price: f64,
) -> Option<f64> {
    if instrument_count == 0 || !price.is_finite() || price <= 0.0 {
        return None;
    }
    // Left to right: `fraction / count` first would round 0.6 / 3 below 0.2.
    let quantity = (balance * fraction / instrument_count as f64 / price).floor();
    Some(quantity.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_instrument() {
        assert_eq!(entry_quantity(10_000.0, 0.6, 1, 100.0), Some(60.0));
    }

    #[test]
    fn split_across_instruments() {
        // 10000 * 0.6 / 4 = 1500; 1500 / 33 = 45.45
        assert_eq!(entry_quantity(10_000.0, 0.6, 4, 33.0), Some(45.0));
    }

    #[test]
    fn exact_splits_keep_every_unit() {
        assert_eq!(entry_quantity(10_000.0, 0.6, 3, 20.0), Some(100.0));
        assert_eq!(entry_quantity(9_000.0, 0.6, 3, 50.0), Some(36.0));
    }

    #[test]
    fn small_balance_gives_zero() {
        assert_eq!(entry_quantity(100.0, 0.6, 10, 50.0), Some(0.0));
    }

    #[test]
    fn zero_balance_gives_zero() {
        assert_eq!(entry_quantity(0.0, 0.6, 1, 50.0), Some(0.0));
    }

    #[test]
    fn undefined_inputs() {
        assert_eq!(entry_quantity(1000.0, 0.6, 0, 50.0), None);
        assert_eq!(entry_quantity(1000.0, 0.6, 1, 0.0), None);
        assert_eq!(entry_quantity(1000.0, 0.6, 1, -1.0), None);
        assert_eq!(entry_quantity(1000.0, 0.6, 1, f64::NAN), None);
    }

    proptest! {
        #[test]
        fn quantity_is_whole_and_affordable(
            balance in 0.0f64..1_000_000.0,
            count in 1usize..50,
            price in 0.01f64..10_000.0,
        ) {
            let q = entry_quantity(balance, DEFAULT_CAPITAL_FRACTION, count, price).unwrap();
            prop_assert!(q >= 0.0);
            prop_assert_eq!(q, q.trunc());
            let budget = balance * DEFAULT_CAPITAL_FRACTION / count as f64;
            prop_assert!(q * price <= budget + 1e-6);
            prop_assert!((q + 1.0) * price > budget - 1e-6);
        }

        #[test]
        fn quantity_matches_formula(
            balance in 0.0f64..1_000_000.0,
            fraction in 0.01f64..=1.0,
            count in 1usize..50,
            price in 0.01f64..10_000.0,
        ) {
            prop_assert_eq!(
                entry_quantity(balance, fraction, count, price),
                Some((balance * fraction / count as f64 / price).floor())
            );
        }

        #[test]
        fn quantity_is_deterministic(
            balance in 0.0f64..1_000_000.0,
            count in 1usize..50,
            price in 0.01f64..10_000.0,
        ) {
            prop_assert_eq!(
                entry_quantity(balance, DEFAULT_CAPITAL_FRACTION, count, price),
                entry_quantity(balance, DEFAULT_CAPITAL_FRACTION, count, price)
            );
        }
    }
}
