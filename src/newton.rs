// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Newton's method for `f(x) = x^d - 1`.
//!
//! Each step replaces x with `x - f(x) / f'(x)`.  Both f and f' share
//! the factor `x^(d-1)`, so it is computed once per step.  Before
//! every step the current x is classified: it has run off towards
//! infinity, it has fallen into the neighbourhood of the origin
//! (where f' vanishes and the next step is meaningless), or it has
//! come close enough to one of the roots to call it captured.

use num::Complex;

use crate::roots::RootTable;

/// Iteration counts are reported, and rendered, up to this value.
pub const MAX_ITERATIONS: u32 = 50;

/// Squared distance under which x counts as sitting on a root, or on
/// the origin.
pub const ERROR_MARGIN_SQUARED: f64 = 1e-6;

/// Either component above this, or the squared magnitude above its
/// square, counts as divergence.  Iterates that start near the origin
/// jump far out before settling onto a root, so the bound is loose.
pub const OUT_OF_BOUNDS: f64 = 1e10;

/// No sample is iterated more often than this.  Points on basin
/// boundaries can wander for a long time; they are reported as not
/// converged.
pub const ITERATION_CEILING: u32 = 128;

/// The classification of a single pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelResult {
    /// The index into the root table of the captured root, or `None`
    /// if the iteration diverged, hit the origin, or ran out of steps.
    pub root: Option<u8>,
    /// Steps taken, clamped to `MAX_ITERATIONS`.
    pub iterations: u8,
}

impl PixelResult {
    fn new(root: Option<usize>, steps: u32) -> PixelResult {
        PixelResult {
            root: root.map(|r| r as u8),
            iterations: steps.min(MAX_ITERATIONS) as u8,
        }
    }

    /// True if a root captured this pixel.
    pub fn converged(&self) -> bool {
        self.root.is_some()
    }
}

/// Runs the iteration for one polynomial degree against its root
/// table.  Holds no mutable state; one solver is shared by every
/// worker.
#[derive(Clone, Debug)]
pub struct NewtonSolver {
    roots: RootTable,
    degree: usize,
    scale: f64,
}

impl NewtonSolver {
    /// Build a solver for the degree of the given root table.
    pub fn new(roots: RootTable) -> NewtonSolver {
        let degree = roots.degree();
        NewtonSolver {
            roots,
            degree,
            scale: degree as f64,
        }
    }

    /// The root table pixels are classified against.
    pub fn roots(&self) -> &RootTable {
        &self.roots
    }

    /// The degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// One Newton step, `x - (x^d - 1) / (d * x^(d-1))`.
    #[inline]
    pub fn step(&self, x: Complex<f64>) -> Complex<f64> {
        let partial = num::pow(x, self.degree - 1);
        let value = partial * x - 1.0;
        let slope = partial * self.scale;
        x - value / slope
    }

    /// The index of the first root within the error margin of x.
    #[inline]
    fn nearby_root(&self, x: Complex<f64>) -> Option<usize> {
        self.roots
            .iter()
            .position(|root| (x - root).norm_sqr() < ERROR_MARGIN_SQUARED)
    }

    /// Run the iteration from `x` until it is classified.
    pub fn solve(&self, mut x: Complex<f64>) -> PixelResult {
        // A linear polynomial is solved exactly by its first step, from
        // anywhere; the whole plane belongs to the single root.
        if self.degree == 1 {
            return PixelResult::new(Some(0), 0);
        }

        for steps in 0..ITERATION_CEILING {
            if illegal_value(x) {
                return PixelResult::new(None, steps);
            }
            if let Some(root) = self.nearby_root(x) {
                return PixelResult::new(Some(root), steps);
            }
            x = self.step(x);
        }
        PixelResult::new(None, ITERATION_CEILING)
    }
}

/// True once x has escaped, become non-finite, or come too close to
/// the origin.
#[inline]
fn illegal_value(x: Complex<f64>) -> bool {
    let norm = x.norm_sqr();
    !norm.is_finite()
        || norm > OUT_OF_BOUNDS * OUT_OF_BOUNDS
        || x.re.abs() > OUT_OF_BOUNDS
        || x.im.abs() > OUT_OF_BOUNDS
        || norm < ERROR_MARGIN_SQUARED
}
