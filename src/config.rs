// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Run parameters, and the one-call entry point that renders them to
//! a pair of files.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::errors::NewtonError;
use crate::renderer::Renderer;
use crate::roots::MAX_DEGREE;

/// A validated set of run parameters.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Number of worker threads.
    pub threads: usize,
    /// Side length of the square raster.
    pub size: usize,
    /// Degree of the polynomial.
    pub degree: usize,
    /// Directory both output files are created in.
    pub output_dir: PathBuf,
}

impl RenderConfig {
    /// Checks every parameter up front, so that a bad configuration is
    /// reported before anything is allocated or spawned.
    pub fn new<P: AsRef<Path>>(
        threads: usize,
        size: usize,
        degree: usize,
        output_dir: P,
    ) -> Result<Self, NewtonError> {
        if degree < 1 || degree > MAX_DEGREE {
            return Err(NewtonError::UnsupportedDegree(degree));
        }
        if size == 0 {
            return Err(NewtonError::InvalidSize(size));
        }
        if threads == 0 {
            return Err(NewtonError::InvalidThreads(threads));
        }
        Ok(RenderConfig {
            threads,
            size,
            degree,
            output_dir: output_dir.as_ref().to_path_buf(),
        })
    }

    /// Where the colour pixmap of attractors goes.
    pub fn attractors_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("newton_attractors_x{}.ppm", self.degree))
    }

    /// Where the greymap of iteration counts goes.
    pub fn convergence_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("newton_convergence_x{}.pgm", self.degree))
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, NewtonError> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Render the configured fractal into its two files, returning their
/// paths.
pub fn render_files(config: &RenderConfig) -> Result<(PathBuf, PathBuf), NewtonError> {
    let renderer = Renderer::new(config.size, config.degree)?;
    let attractors_path = config.attractors_path();
    let convergence_path = config.convergence_path();
    let mut attractors = create(&attractors_path)?;
    let mut convergence = create(&convergence_path)?;
    renderer.render(config.threads, &mut attractors, &mut convergence)?;
    Ok((attractors_path, convergence_path))
}
