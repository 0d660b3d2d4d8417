// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The streaming writer drains finished rows, strictly in raster
//! order, into the two output rasters: a colour pixmap of which root
//! each pixel was captured by and a greymap of how many steps that
//! took.  Rows are written as soon as every row before them is
//! written, while the workers carry on with the rest.

use log::trace;
use std::io::Write;

use crate::errors::NewtonError;
use crate::newton::{PixelResult, MAX_ITERATIONS};
use crate::palette::Palette;
use crate::readiness::ReadinessTracker;

/// Hands every row the tracker knows of to `emit` as it becomes
/// ready, one contiguous run at a time, together with the index of
/// the run's first row.  `emit` never sees row r before row r - 1.
pub fn drain_in_order<'a, F>(tracker: &ReadinessTracker<'a>, mut emit: F) -> Result<(), NewtonError>
where
    F: FnMut(usize, &[&'a [PixelResult]]) -> Result<(), NewtonError>,
{
    let rows = tracker.len();
    let mut cursor = 0;
    while cursor < rows {
        let run = tracker.wait_for_run(cursor)?;
        trace!("draining rows {}..{}", cursor, cursor + run.len());
        emit(cursor, &run)?;
        cursor += run.len();
    }
    Ok(())
}

/// Encodes rows into the attractor pixmap and the convergence greymap.
pub struct StreamingWriter<'p, A: Write, C: Write> {
    palette: &'p Palette,
    size: usize,
    attractors: A,
    convergence: C,
    line: Vec<u8>,
}

impl<'p, A: Write, C: Write> StreamingWriter<'p, A, C> {
    /// Wrap the two output streams.
    pub fn new(palette: &'p Palette, size: usize, attractors: A, convergence: C) -> Self {
        StreamingWriter {
            palette,
            size,
            attractors,
            convergence,
            line: Vec::with_capacity(size * 12 + 1),
        }
    }

    /// The plain-text portable pixmap and greymap headers.
    pub fn write_headers(&mut self) -> Result<(), NewtonError> {
        write!(self.attractors, "P3\n{} {}\n255\n", self.size, self.size)?;
        write!(
            self.convergence,
            "P2\n{} {}\n{}\n",
            self.size, self.size, MAX_ITERATIONS
        )?;
        Ok(())
    }

    /// Append one row to both rasters.
    pub fn write_row(&mut self, row: &[PixelResult]) -> Result<(), NewtonError> {
        self.line.clear();
        for pixel in row {
            self.line
                .extend_from_slice(self.palette.attractor(pixel).as_bytes());
        }
        self.line.push(b'\n');
        self.attractors.write_all(&self.line)?;

        self.line.clear();
        for pixel in row {
            self.line
                .extend_from_slice(self.palette.convergence(pixel).as_bytes());
        }
        self.line.push(b'\n');
        self.convergence.write_all(&self.line)?;
        Ok(())
    }

    /// Flush both output streams.
    pub fn flush(&mut self) -> Result<(), NewtonError> {
        self.attractors.flush()?;
        self.convergence.flush()?;
        Ok(())
    }

    /// Write the headers, then every row as it becomes ready.  Output
    /// is flushed at the end of each run of ready rows so the files
    /// grow while the render is still going.  The tracker must cover
    /// exactly the rows the headers declare.
    pub fn stream(&mut self, tracker: &ReadinessTracker) -> Result<(), NewtonError> {
        assert_eq!(tracker.len(), self.size, "tracker and raster heights differ");
        self.write_headers()?;
        self.flush()?;
        drain_in_order(tracker, |_, run| {
            for row in run {
                self.write_row(row)?;
            }
            self.flush()
        })
    }

    /// Give back the underlying streams.
    pub fn into_inner(self) -> (A, C) {
        (self.attractors, self.convergence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(root: Option<u8>, iterations: u8) -> PixelResult {
        PixelResult { root, iterations }
    }

    #[test]
    fn headers_declare_size_and_range() {
        let palette = Palette::new();
        let mut writer = StreamingWriter::new(&palette, 7, Vec::<u8>::new(), Vec::<u8>::new());
        writer.write_headers().unwrap();
        let (attractors, convergence) = writer.into_inner();
        assert_eq!(String::from_utf8(attractors).unwrap(), "P3\n7 7\n255\n");
        assert_eq!(String::from_utf8(convergence).unwrap(), "P2\n7 7\n50\n");
    }

    #[test]
    fn rows_encode_as_fixed_width_tokens() {
        let palette = Palette::new();
        let mut writer = StreamingWriter::new(&palette, 2, Vec::<u8>::new(), Vec::<u8>::new());
        writer
            .write_row(&[pixel(Some(0), 3), pixel(None, 50)])
            .unwrap();
        let (attractors, convergence) = writer.into_inner();
        assert_eq!(
            String::from_utf8(attractors).unwrap(),
            "230 025 075 127 127 127 \n"
        );
        assert_eq!(String::from_utf8(convergence).unwrap(), "003 050 \n");
    }

    #[test]
    fn drain_stops_after_the_last_tracked_row() {
        let rows = vec![vec![pixel(None, 0)], vec![pixel(None, 1)], vec![pixel(None, 2)]];
        let tracker = ReadinessTracker::new(rows.len());
        for (r, row) in rows.iter().enumerate().rev() {
            tracker.mark_ready(r, row);
        }
        let mut seen = Vec::new();
        drain_in_order(&tracker, |start, run| {
            seen.extend(start..start + run.len());
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "heights differ")]
    fn stream_refuses_a_mismatched_tracker() {
        let palette = Palette::new();
        let tracker = ReadinessTracker::new(3);
        let mut writer = StreamingWriter::new(&palette, 2, Vec::<u8>::new(), Vec::<u8>::new());
        let _ = writer.stream(&tracker);
    }

    #[test]
    fn stream_writes_rows_in_order() {
        let palette = Palette::new();
        let first = vec![pixel(Some(0), 1), pixel(Some(1), 4)];
        let second = vec![pixel(None, 2), pixel(Some(0), 0)];
        let tracker = ReadinessTracker::new(2);
        tracker.mark_ready(1, &second);
        tracker.mark_ready(0, &first);

        let mut writer = StreamingWriter::new(&palette, 2, Vec::<u8>::new(), Vec::<u8>::new());
        writer.stream(&tracker).unwrap();
        let (_, convergence) = writer.into_inner();
        assert_eq!(
            String::from_utf8(convergence).unwrap(),
            "P2\n2 2\n50\n001 004 \n002 000 \n"
        );
    }
}
