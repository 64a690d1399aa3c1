//! Property-based tests for the Lambert W branches.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{lambert_w0, lambert_wm1};
    use dequad_float::F64Context;

    const INV_E: f64 = 0.367_879_441_171_442_3;

    proptest! {
        #[test]
        fn principal_inverts_w_exp_w(x in -INV_E + 1e-9..1e4f64) {
            let ctx = F64Context::default();
            let w = lambert_w0(&ctx, &x).unwrap();
            prop_assert!(w >= -1.0);
            prop_assert!((w * w.exp() - x).abs() <= 1e-13 * (1.0 + x.abs()));
        }

        #[test]
        fn lower_inverts_w_exp_w(t in 1e-9f64..1.0) {
            let ctx = F64Context::default();
            let x = -INV_E * t;
            let w = lambert_wm1(&ctx, &x).unwrap();
            prop_assert!(w <= -1.0);
            prop_assert!((w * w.exp() - x).abs() <= 1e-15);
        }

        #[test]
        fn branches_are_ordered(t in 1e-6f64..1.0) {
            let ctx = F64Context::default();
            let x = -INV_E * t;
            let lower = lambert_wm1(&ctx, &x).unwrap();
            let upper = lambert_w0(&ctx, &x).unwrap();
            prop_assert!(lower <= -1.0 && -1.0 <= upper);
        }

        #[test]
        fn lower_is_decreasing_towards_zero(a in 1e-12f64..0.3, b in 1e-12f64..0.3) {
            prop_assume!(a < b);
            let ctx = F64Context::default();
            // -a is closer to 0⁻ than -b
            let wa = lambert_wm1(&ctx, &-a).unwrap();
            let wb = lambert_wm1(&ctx, &-b).unwrap();
            prop_assert!(wa <= wb);
        }
    }
}
