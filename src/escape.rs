// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iteration.  This is where a render spends nearly
//! all of its time, so the loop does nothing but square, add and
//! compare.

use num::Complex;

/// Once |z| passes 2 the orbit is guaranteed to run off to infinity.
/// Compared squared, so the loop never takes a square root.
pub const BAILOUT_SQUARED: f64 = 4.0;

/// What became of a point after iterating it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Escape {
    /// The orbit passed the bailout radius.
    Escaped {
        /// The step (counting from 1) on which the orbit escaped.
        iterations: u32,
        /// |z| at that step; always greater than 2.
        magnitude: f64,
    },
    /// The orbit stayed inside the bailout radius for the whole budget.
    Bounded,
}

/// Iterates `z = z² + c` from `z = 0` for up to `max_iterations`
/// steps.  A budget of zero is trivially `Bounded`.
#[inline]
pub fn evaluate(c: Complex<f64>, max_iterations: u32) -> Escape {
    let mut z = Complex::new(0.0_f64, 0.0_f64);
    for i in 1..=max_iterations {
        z = z * z + c;
        if z.norm_sqr() > BAILOUT_SQUARED {
            // norm_sqr overflows for components past ~1e154; hypot doesn't.
            return Escape::Escaped {
                iterations: i,
                magnitude: z.norm(),
            };
        }
    }
    Escape::Bounded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for &n in &[1, 2, 10, 1000, 100_000] {
            assert_eq!(evaluate(Complex::new(0.0, 0.0), n), Escape::Bounded);
        }
    }

    #[test]
    fn minus_one_cycles_forever() {
        for &n in &[1, 2, 3, 500, 100_000] {
            assert_eq!(evaluate(Complex::new(-1.0, 0.0), n), Escape::Bounded);
        }
    }

    #[test]
    fn points_outside_radius_two_escape_on_the_first_step() {
        for &c in &[
            Complex::new(2.5, 0.0),
            Complex::new(0.0, -2.01),
            Complex::new(-3.0, 4.0),
            Complex::new(1.5, 1.5),
        ] {
            match evaluate(c, 100) {
                Escape::Escaped {
                    iterations,
                    magnitude,
                } => {
                    assert_eq!(iterations, 1);
                    assert!((magnitude - c.norm()).abs() < 1e-12);
                }
                Escape::Bounded => panic!("{} should have escaped", c),
            }
        }
    }

    #[test]
    fn zero_budget_is_bounded() {
        assert_eq!(evaluate(Complex::new(10.0, 10.0), 0), Escape::Bounded);
    }

    #[test]
    fn escape_magnitude_is_past_the_bailout() {
        // c = 1: 1, 2, 5.  |2| is not past the radius, |5| is.
        assert_eq!(
            evaluate(Complex::new(1.0, 0.0), 10),
            Escape::Escaped {
                iterations: 3,
                magnitude: 5.0
            }
        );
        assert_eq!(evaluate(Complex::new(1.0, 0.0), 2), Escape::Bounded);
    }

    #[test]
    fn huge_points_escape_with_a_finite_magnitude() {
        match evaluate(Complex::new(1e300, 1e300), 10) {
            Escape::Escaped {
                iterations,
                magnitude,
            } => {
                assert_eq!(iterations, 1);
                assert!(magnitude.is_finite());
                assert!((magnitude / 1e300 - 2.0_f64.sqrt()).abs() < 1e-12);
            }
            Escape::Bounded => panic!("should have escaped"),
        }
    }

    #[test]
    fn known_interior_points_stay_bounded() {
        assert_eq!(evaluate(Complex::new(-0.5, 0.0), 10_000), Escape::Bounded);
        assert_eq!(evaluate(Complex::new(0.25, 0.0), 10_000), Escape::Bounded);
    }
}
