//! Property-based tests for tanh-sinh integration.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{tanh_sinh, DEFAULT_MAX_STEPS};

    fn coefficient() -> impl Strategy<Value = f64> {
        -5.0f64..5.0
    }

    // (a, b) with a < b
    fn interval() -> impl Strategy<Value = (f64, f64)> {
        (-3.0f64..3.0, 0.1f64..4.0).prop_map(|(a, width)| (a, a + width))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn cubic_matches_antiderivative(
            c0 in coefficient(),
            c1 in coefficient(),
            c2 in coefficient(),
            c3 in coefficient(),
            (a, b) in interval(),
        ) {
            let f = |x: f64| ((c3 * x + c2) * x + c1) * x + c0;
            let antiderivative = |x: f64| ((c3 / 4.0 * x + c2 / 3.0) * x + c1 / 2.0) * x * x + c0 * x;

            let result = tanh_sinh(f, a, b, 1e-10, DEFAULT_MAX_STEPS).unwrap();
            let exact = antiderivative(b) - antiderivative(a);
            let scale = 1.0
                + (c0.abs() + c1.abs() + c2.abs() + c3.abs()) * a.abs().max(b.abs()).max(1.0).powi(3) * (b - a);
            prop_assert!((result.value - exact).abs() <= 1e-10 * scale);
        }

        #[test]
        fn integration_is_linear(
            alpha in coefficient(),
            beta in coefficient(),
            (a, b) in interval(),
        ) {
            let sin = tanh_sinh(f64::sin, a, b, 1e-10, DEFAULT_MAX_STEPS).unwrap().value;
            let exp = tanh_sinh(f64::exp, a, b, 1e-10, DEFAULT_MAX_STEPS).unwrap().value;
            let combined = tanh_sinh(|x| alpha * x.sin() + beta * x.exp(), a, b, 1e-10, DEFAULT_MAX_STEPS)
                .unwrap()
                .value;

            let tolerance = 1e-10 * (1.0 + alpha.abs() + beta.abs()) * b.exp();
            prop_assert!((combined - (alpha * sin + beta * exp)).abs() <= tolerance);
        }

        #[test]
        fn error_estimate_below_tolerance(eps_exp in 6i32..13, (a, b) in interval()) {
            let eps = 10f64.powi(-eps_exp);
            let result = tanh_sinh(|x| x.cos(), a, b, eps, DEFAULT_MAX_STEPS).unwrap();
            prop_assert!(result.error < eps * (b - a));
            prop_assert!((result.value - (b.sin() - a.sin())).abs() < 10.0 * eps * (b - a));
        }
    }
}
