// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single error type for the renderer.  Every one of these is
//! fatal: there is no partial-result recovery, so callers are
//! expected to report the error and stop.

use std::io;

/// Everything that can stop a render.
#[derive(Debug, Fail)]
pub enum NewtonError {
    /// Only `x^d - 1` for 1 <= d <= 9 has a root table.
    #[fail(display = "unsupported polynomial degree {} (must be between 1 and 9)", _0)]
    UnsupportedDegree(usize),

    /// The picture must have at least one row.
    #[fail(display = "invalid picture size {} (must be at least 1)", _0)]
    InvalidSize(usize),

    /// The pool must have at least one worker.
    #[fail(display = "invalid thread count {} (must be at least 1)", _0)]
    InvalidThreads(usize),

    /// The result matrix could not be reserved.
    #[fail(display = "could not allocate a result matrix of {} pixels", _0)]
    Allocation(usize),

    /// Opening or appending to an output stream failed.
    #[fail(display = "output error: {}", _0)]
    Io(#[cause] io::Error),

    /// The given number of workers panicked during the render.
    #[fail(display = "{} worker thread(s) panicked", _0)]
    WorkerPanicked(usize),

    /// The streaming writer thread panicked.
    #[fail(display = "the writer thread panicked")]
    WriterPanicked,

    /// The writer was waiting for a row that will never be published.
    #[fail(display = "row {} was abandoned by its worker", _0)]
    Abandoned(usize),
}

impl From<io::Error> for NewtonError {
    fn from(err: io::Error) -> Self {
        NewtonError::Io(err)
    }
}
