use approx::assert_abs_diff_eq;
use primitive_types::U256;
use proptest::prelude::*;
use riskfx::word::{from_hex, q128, to_hex, Q64_F64};
use riskfx::{
    alpha_x, alpha_x_reserves, logistic_fee_hex, logistic_fee_x64, price_divergence, MathError,
    ReservePair,
};

const CLAMP: u64 = 18_446_744_073_709_552;

proptest! {
    #[test]
    fn divergence_is_symmetric(a in 1u128.., b in 1u128..) {
        let (a, b) = (U256::from(a), U256::from(b));
        prop_assert_eq!(price_divergence(a, b).unwrap(), price_divergence(b, a).unwrap());
    }

    #[test]
    fn divergence_of_equal_prices(a in 1u128..) {
        let a = U256::from(a);
        prop_assert_eq!(price_divergence(a, a).unwrap(), q128() - U256::one());
    }

    #[test]
    fn fee_is_non_increasing(x1 in 0u64..1_000_000, x2 in 0u64..1_000_000) {
        prop_assume!(x1 < x2);
        let f1 = logistic_fee_x64(U256::from(x1)).unwrap();
        let f2 = logistic_fee_x64(U256::from(x2)).unwrap();
        prop_assert!(f1 >= f2, "curve({x1})={f1} < curve({x2})={f2}");
    }

    #[test]
    fn fee_is_clamped_past_cap(x in 1_000_000u64..) {
        prop_assert_eq!(logistic_fee_x64(U256::from(x)).unwrap(), U256::from(CLAMP));
    }

    #[test]
    fn fee_word_round_trips(x in 0u64..2_000_000) {
        let v = logistic_fee_x64(U256::from(x)).unwrap();
        let h = logistic_fee_hex(U256::from(x)).unwrap();
        prop_assert_eq!(h.len(), 66);
        prop_assert!(h[2..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        prop_assert_eq!(from_hex(&h).unwrap(), v);
    }

    #[test]
    fn alpha_is_zero_without_movement(r0 in 1e-3f64..1e9, r1 in 1e-3f64..1e9) {
        let p = ReservePair::new(r0, r1);
        let a = alpha_x(p, p).unwrap();
        // numerator cancels up to rounding in k ≈ r0·r1
        assert_abs_diff_eq!(a, 0.0, epsilon = r0 * Q64_F64 * 1e-12);
    }

    #[test]
    fn alpha_is_non_negative_for_real_moves(
        r0 in 1.0f64..1e6,
        r1 in 1.0f64..1e6,
        shift in 0.01f64..10.0,
    ) {
        prop_assume!((shift - 1.0).abs() > 1e-6);
        let a = alpha_x_reserves(r0, r1, r0 * shift, r1).unwrap();
        prop_assert!(a > 0.0);
    }

    #[test]
    fn any_word_round_trips(hi in any::<u128>(), lo in any::<u128>()) {
        let v = (U256::from(hi) << 128) | U256::from(lo);
        prop_assert_eq!(from_hex(&to_hex(v)).unwrap(), v);
    }
}

#[test]
fn fee_at_zero_volume() {
    // trunc of binary64 0.005 * 2^64; the exact-real floor would be ...758
    assert_eq!(logistic_fee_x64(U256::zero()).unwrap(), U256::from(92_233_720_368_547_760u64));
}

#[test]
fn domain_errors_everywhere() {
    assert!(matches!(
        alpha_x_reserves(-1.0, 1.0, 1.0, 1.0),
        Err(MathError::InvalidDomainInput(_))
    ));
    assert!(matches!(
        alpha_x_reserves(1.0, 1.0, 0.0, 1.0),
        Err(MathError::InvalidDomainInput(_))
    ));
    assert!(matches!(
        price_divergence(U256::zero(), U256::from(5u64)),
        Err(MathError::InvalidDomainInput(_))
    ));
    assert!(matches!(
        riskfx::word::parse_uint("x", "-1"),
        Err(MathError::InvalidDomainInput(_))
    ));
}
