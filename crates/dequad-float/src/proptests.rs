//! Property-based tests for summation and the precision contexts.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{fsum_f64, BigFloatContext, F64Context, RealContext};

    fn finite_term() -> impl Strategy<Value = f64> {
        prop_oneof![-1e20f64..1e20f64, -1.0f64..1.0f64, -1e-20f64..1e-20f64]
    }

    proptest! {
        #[test]
        fn fsum_is_order_independent(mut terms in prop::collection::vec(finite_term(), 0..40)) {
            let forward = fsum_f64(terms.iter().copied());
            terms.reverse();
            let backward = fsum_f64(terms.iter().copied());
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn fsum_is_exact_for_cancelling_pairs(terms in prop::collection::vec(finite_term(), 1..20)) {
            let mut all: Vec<f64> = terms.clone();
            all.extend(terms.iter().map(|t| -t));
            prop_assert_eq!(fsum_f64(all), 0.0);
        }

        #[test]
        fn fsum_matches_naive_for_integers(terms in prop::collection::vec(-1000i32..1000, 0..50)) {
            let naive: i64 = terms.iter().map(|&t| i64::from(t)).sum();
            prop_assert_eq!(fsum_f64(terms.iter().map(|&t| f64::from(t))), naive as f64);
        }

        #[test]
        fn bigfloat_agrees_with_double(x in -5.0f64..5.0) {
            let big = BigFloatContext::with_digits(25);
            let double = F64Context::default();
            let bx = big.from_f64(x);
            let tol = 1e-14 * (1.0 + x.exp());
            prop_assert!((big.to_f64(&big.exp(&bx)) - double.exp(&x)).abs() < tol);
            prop_assert!((big.to_f64(&big.tanh(&bx)) - double.tanh(&x)).abs() < 1e-15);
        }

        #[test]
        fn bigfloat_sinh_cosh_identity(x in -3.0f64..3.0) {
            let ctx = BigFloatContext::with_digits(30);
            let bx = ctx.from_f64(x);
            let s = ctx.sinh(&bx);
            let c = ctx.cosh(&bx);
            let residual = c.clone() * c - s.clone() * s - ctx.one();
            prop_assert!(ctx.to_f64(&ctx.abs(&residual)) < 1e-25);
        }
    }
}
