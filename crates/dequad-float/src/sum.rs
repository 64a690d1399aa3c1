//! Correctly rounded floating point summation.
//!
//! Shewchuk's algorithm: the running sum is kept as a list of
//! non-overlapping partials whose exact sum equals the exact sum of the
//! inputs seen so far. Only the final step rounds.

/// Sums doubles with a single final rounding.
///
/// The result does not depend on the order of the inputs. If any input or
/// intermediate partial is not finite, the naive sum is returned instead.
///
/// ```
/// use dequad_float::fsum_f64;
///
/// let xs = [0.1; 10];
/// assert_eq!(fsum_f64(xs), 1.0);
/// ```
pub fn fsum_f64<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut partials: Vec<f64> = Vec::new();
    let mut naive = 0.0;
    let mut exact = true;

    for value in values {
        naive += value;
        if !exact {
            continue;
        }
        if !value.is_finite() {
            exact = false;
            continue;
        }

        let mut x = value;
        let mut kept = 0;
        for j in 0..partials.len() {
            let mut y = partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        if !x.is_finite() {
            exact = false;
            continue;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    if exact {
        round_partials(&partials)
    } else {
        naive
    }
}

/// Adds the partials from the top, correcting the last bit for
/// round-half-even ties across the remaining partials.
fn round_partials(partials: &[f64]) -> f64 {
    let Some((&top, rest)) = partials.split_last() else {
        return 0.0;
    };

    let mut hi = top;
    let mut lo = 0.0;
    let mut n = rest.len();
    while n > 0 {
        n -= 1;
        let x = hi;
        let y = rest[n];
        hi = x + y;
        let y_rounded = hi - x;
        lo = y - y_rounded;
        if lo != 0.0 {
            break;
        }
    }

    if n > 0 && ((lo < 0.0 && rest[n - 1] < 0.0) || (lo > 0.0 && rest[n - 1] > 0.0)) {
        let y = lo * 2.0;
        let x = hi + y;
        if y == x - hi {
            hi = x;
        }
    }

    hi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(fsum_f64(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_cancellation() {
        assert_eq!(fsum_f64([1.0, 1e100, 1.0, -1e100]), 2.0);
    }

    #[test]
    fn test_tenths() {
        let naive: f64 = [0.1; 10].iter().sum();
        assert_ne!(naive, 1.0);
        assert_eq!(fsum_f64([0.1; 10]), 1.0);
    }

    #[test]
    fn test_half_even_tie() {
        // 1 + 2^-53 + 2^-106 rounds up only because of the tiny tail
        let tiny = 2f64.powi(-53);
        let tail = 2f64.powi(-106);
        assert_eq!(fsum_f64([1.0, tiny, tail]), 1.0 + 2.0 * tiny);
    }

    #[test]
    fn test_non_finite_falls_back() {
        assert!(fsum_f64([1.0, f64::INFINITY]).is_infinite());
        assert!(fsum_f64([1.0, f64::NAN]).is_nan());
    }
}
