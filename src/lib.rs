#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Newton fractal renderer
//!
//! Newton's method finds a root of a polynomial by repeatedly sliding
//! down its tangent line.  Which root it finds depends, sometimes
//! wildly, on where it starts.  Colouring every point of the complex
//! plane by the root Newton's method reaches from there, for the
//! polynomial `x^d - 1`, gives the Newton fractal: d smooth basins
//! around the roots of unity separated by endlessly braided borders.
//!
//! This crate renders that picture for a square region of the plane,
//! along with a second picture of how many steps each point needed.
//! Rows are computed by a pool of threads in whatever order they
//! finish and written out, strictly top to bottom, by one more thread
//! as soon as they are available.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate log;
extern crate num;

pub mod config;
pub mod errors;
pub mod newton;
pub mod palette;
pub mod planes;
pub mod readiness;
pub mod renderer;
pub mod roots;
pub mod rows;
pub mod writer;

pub use config::{render_files, RenderConfig};
pub use errors::NewtonError;
pub use newton::{PixelResult, MAX_ITERATIONS};
pub use renderer::Renderer;
