// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The worker pool.
//!
//! Worker k of n owns rows k, k + n, k + 2n, ... of the result matrix.
//! Each worker computes one of its rows into a buffer of its own,
//! copies that into its row of the matrix, and publishes the row to
//! the ReadinessTracker.  A separate writer thread drains published
//! rows to the output streams in raster order as they appear.
//!
//! The rows are handed out as disjoint mutable slices before any
//! thread starts, so writing the matrix needs no lock; publishing a
//! row gives up the mutable slice in exchange for a shared one.

use log::{debug, info};
use std::io::Write;
use std::time::Instant;

use crate::errors::NewtonError;
use crate::newton::{NewtonSolver, PixelResult};
use crate::palette::Palette;
use crate::planes::PlaneMapper;
use crate::readiness::{AbandonOnPanic, ReadinessTracker};
use crate::roots::RootTable;
use crate::rows::{ResultMatrix, RowComputer};
use crate::writer::StreamingWriter;

type Assignment<'m> = Vec<(usize, &'m mut [PixelResult])>;

/// Renders the Newton fractal of `x^d - 1` over the `[-2, 2]²` square.
/// Once built, this object is not mutated; one renderer can be used
/// for any number of runs.
pub struct Renderer {
    plane: PlaneMapper,
    solver: NewtonSolver,
    palette: Palette,
}

impl Renderer {
    /// Requires the side length of the square raster and the degree of
    /// the polynomial.
    pub fn new(size: usize, degree: usize) -> Result<Self, NewtonError> {
        let roots = RootTable::new(degree)?;
        let plane = PlaneMapper::standard(size)?;
        Ok(Renderer {
            plane,
            solver: NewtonSolver::new(roots),
            palette: Palette::new(),
        })
    }

    /// Side length of the raster.
    pub fn size(&self) -> usize {
        self.plane.size
    }

    /// Degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.solver.degree()
    }

    /// Split the matrix rows between `threads` workers, round robin.
    fn assign_rows(matrix: &mut ResultMatrix, threads: usize) -> Vec<Assignment> {
        let mut assignments: Vec<Assignment> = (0..threads).map(|_| Vec::new()).collect();
        for (row, slice) in matrix.rows_mut().enumerate() {
            assignments[row % threads].push((row, slice));
        }
        assignments
    }

    /// The body of a single worker.  Returns the number of rows it
    /// computed.
    fn work<'m, F>(
        &self,
        worker: usize,
        rows: Assignment<'m>,
        tracker: &ReadinessTracker<'m>,
        compute: &F,
    ) -> usize
    where
        F: Fn(&RowComputer, usize, &mut [PixelResult]),
    {
        let _guard = AbandonOnPanic(tracker);
        let computer = RowComputer::new(self.plane, &self.solver);
        let mut buffer = vec![PixelResult::default(); self.plane.size];
        let count = rows.len();
        for (row, slice) in rows {
            compute(&computer, row, &mut buffer);
            slice.copy_from_slice(&buffer);
            tracker.mark_ready(row, slice);
        }
        debug!("worker {} finished {} rows", worker, count);
        count
    }

    /// Render the whole raster with `threads` workers, streaming the
    /// attractor pixmap into `attractors` and the convergence greymap
    /// into `convergence`.
    pub fn render<A, C>(
        &self,
        threads: usize,
        attractors: &mut A,
        convergence: &mut C,
    ) -> Result<(), NewtonError>
    where
        A: Write + Send,
        C: Write + Send,
    {
        self.render_rows(threads, attractors, convergence, |computer, row, buffer| {
            computer.compute_row(row, buffer)
        })
    }

    /// `render`, with the per-row computation supplied by the caller.
    /// A panic in `compute` takes down its worker and fails the run
    /// with `WorkerPanicked`.
    fn render_rows<A, C, F>(
        &self,
        threads: usize,
        attractors: &mut A,
        convergence: &mut C,
        compute: F,
    ) -> Result<(), NewtonError>
    where
        A: Write + Send,
        C: Write + Send,
        F: Fn(&RowComputer, usize, &mut [PixelResult]) + Sync,
    {
        if threads == 0 {
            return Err(NewtonError::InvalidThreads(threads));
        }
        info!(
            "rendering degree {} at {}x{} with {} threads",
            self.degree(),
            self.size(),
            self.size(),
            threads
        );
        let start = Instant::now();

        let mut matrix = ResultMatrix::allocate(self.plane.size)?;
        let tracker = ReadinessTracker::new(self.plane.size);
        let assignments = Renderer::assign_rows(&mut matrix, threads);

        let outcome = crossbeam::scope(|spawner| {
            let tracker = &tracker;
            let compute = &compute;
            let workers: Vec<_> = assignments
                .into_iter()
                .enumerate()
                .map(|(worker, rows)| {
                    spawner.spawn(move |_| self.work(worker, rows, tracker, compute))
                })
                .collect();

            let palette = &self.palette;
            let size = self.plane.size;
            let writer = spawner.spawn(move |_| {
                StreamingWriter::new(palette, size, attractors, convergence).stream(tracker)
            });

            let panicked = workers
                .into_iter()
                .map(|handle| handle.join())
                .filter(Result::is_err)
                .count();
            let written = writer.join();

            if panicked > 0 {
                return Err(NewtonError::WorkerPanicked(panicked));
            }
            match written {
                Ok(result) => result,
                Err(_) => Err(NewtonError::WriterPanicked),
            }
        });

        match outcome {
            Ok(result) => result?,
            Err(_) => return Err(NewtonError::WriterPanicked),
        }

        info!("render finished in {:?}", start.elapsed());
        Ok(())
    }
}
