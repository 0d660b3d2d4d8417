// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rows are the unit of work.  A `RowComputer` fills one row of
//! `PixelResult`s at a time, and the `ResultMatrix` is the single
//! contiguous allocation those rows are copied into.

use std::slice::ChunksMut;

use crate::errors::NewtonError;
use crate::newton::{NewtonSolver, PixelResult};
use crate::planes::{Pixel, PlaneMapper};

/// Maps a row of the raster onto the complex plane and classifies
/// every pixel in it.
pub struct RowComputer<'s> {
    plane: PlaneMapper,
    solver: &'s NewtonSolver,
}

impl<'s> RowComputer<'s> {
    /// A computer for rows of `plane`.
    pub fn new(plane: PlaneMapper, solver: &'s NewtonSolver) -> Self {
        RowComputer { plane, solver }
    }

    /// Fill `buffer`, which must be exactly one row wide, with the
    /// classification of every pixel in `row`.
    pub fn compute_row(&self, row: usize, buffer: &mut [PixelResult]) {
        assert!(buffer.len() == self.plane.size);
        for (column, result) in buffer.iter_mut().enumerate() {
            let point = self.plane.pixel_to_point(&Pixel(column, row));
            *result = self.solver.solve(point);
        }
    }
}

/// `size` x `size` results, row-major, allocated once.
pub struct ResultMatrix {
    size: usize,
    pixels: Vec<PixelResult>,
}

impl ResultMatrix {
    /// Reserve the whole matrix up front.  Failure to get the memory
    /// is reported rather than aborting the process.
    pub fn allocate(size: usize) -> Result<ResultMatrix, NewtonError> {
        let len = size
            .checked_mul(size)
            .ok_or(NewtonError::Allocation(usize::max_value()))?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| NewtonError::Allocation(len))?;
        pixels.resize(len, PixelResult::default());
        Ok(ResultMatrix { size, pixels })
    }

    /// Side length of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// A single row, read-only.
    pub fn row(&self, row: usize) -> &[PixelResult] {
        &self.pixels[row * self.size..(row + 1) * self.size]
    }

    /// Every row as its own mutable slice, in order.  Handing these out
    /// is what lets workers write without a lock.
    pub fn rows_mut(&mut self) -> ChunksMut<PixelResult> {
        self.pixels.chunks_mut(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roots::RootTable;

    #[test]
    fn matrix_rows_are_disjoint_and_ordered() {
        let mut matrix = ResultMatrix::allocate(3).unwrap();
        for (r, row) in matrix.rows_mut().enumerate() {
            assert_eq!(row.len(), 3);
            row[0].iterations = r as u8;
        }
        assert_eq!(matrix.row(2)[0].iterations, 2);
        assert_eq!(matrix.row(1)[1].iterations, 0);
    }

    #[test]
    fn absurd_matrix_is_an_allocation_error() {
        match ResultMatrix::allocate(usize::max_value()) {
            Err(NewtonError::Allocation(_)) => {}
            _ => panic!("expected an allocation error"),
        }
    }

    #[test]
    fn degree_two_row_splits_at_the_imaginary_axis() {
        let solver = NewtonSolver::new(RootTable::new(2).unwrap());
        let computer = RowComputer::new(PlaneMapper::standard(4).unwrap(), &solver);
        let mut buffer = vec![PixelResult::default(); 4];
        // Row 2 is the real axis: -2, -1, 0, 1.
        computer.compute_row(2, &mut buffer);
        let roots: Vec<Option<u8>> = buffer.iter().map(|p| p.root).collect();
        assert_eq!(roots, vec![Some(1), Some(1), None, Some(0)]);
        assert_eq!(buffer[3].iterations, 0);
        assert_eq!(buffer[2].iterations, 0);
    }
}
