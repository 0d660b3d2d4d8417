// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The roots of `x^d - 1`.
//!
//! The d roots all sit on the unit circle, but the order in which we
//! enumerate them matters: the root index is what picks a pixel's
//! colour, so the same degree must always produce the same table.
//! Degrees with real roots only at 1 (odd d) list the rest as
//! alternating-sign powers of -1; even degrees list 1 and -1 first,
//! then each conjugate-ish pair with the negated member leading.

use num::Complex;
use std::f64::consts::PI;
use std::ops::Index;

use crate::errors::NewtonError;

/// The largest supported polynomial degree.
pub const MAX_DEGREE: usize = 9;

/// `(-1)^(n/m)`, the principal value, as a point on the unit circle.
fn unit_power(n: u32, m: u32) -> Complex<f64> {
    Complex::from_polar(&1.0, &(PI * f64::from(n) / f64::from(m)))
}

/// The ordered roots of `x^d - 1` for a single degree.  Immutable
/// once built, and shared read-only by every worker.
#[derive(Clone, Debug)]
pub struct RootTable {
    degree: usize,
    roots: Vec<Complex<f64>>,
}

impl RootTable {
    /// Build the table for degree `d`.  Anything outside 1..=9 is a
    /// configuration error.
    pub fn new(degree: usize) -> Result<RootTable, NewtonError> {
        let one = Complex::new(1.0, 0.0);
        let i = Complex::new(0.0, 1.0);
        let p = unit_power;

        let roots = match degree {
            1 => vec![one],
            2 => vec![one, -one],
            3 => vec![one, -p(1, 3), p(2, 3)],
            4 => vec![one, -one, -i, i],
            5 => vec![one, -p(1, 5), p(2, 5), -p(3, 5), p(4, 5)],
            6 => vec![one, -one, -p(1, 3), p(1, 3), -p(2, 3), p(2, 3)],
            7 => vec![
                one,
                -p(1, 7),
                p(2, 7),
                -p(3, 7),
                p(4, 7),
                -p(5, 7),
                p(6, 7),
            ],
            8 => vec![one, -one, -p(1, 4), p(1, 4), -i, i, -p(3, 4), p(3, 4)],
            9 => vec![
                one,
                -p(1, 9),
                p(2, 9),
                -p(3, 9),
                p(4, 9),
                -p(5, 9),
                p(6, 9),
                -p(7, 9),
                p(8, 9),
            ],
            _ => return Err(NewtonError::UnsupportedDegree(degree)),
        };

        Ok(RootTable { degree, roots })
    }

    /// The polynomial degree this table was built for.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of roots; always equal to the degree.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// True if the table holds no roots; never the case for a built table.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// The roots, in table order.
    pub fn iter(&self) -> std::slice::Iter<Complex<f64>> {
        self.roots.iter()
    }
}

impl Index<usize> for RootTable {
    type Output = Complex<f64>;

    fn index(&self, index: usize) -> &Complex<f64> {
        &self.roots[index]
    }
}
