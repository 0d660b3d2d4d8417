//! Contains the PlaneMapper struct, which describes a relationship
//! between the square raster of pixels, with an origin at 0,0, and
//! the square region of the complex plane being rendered.  Rows run
//! along the imaginary axis and columns along the real axis.
use num::Complex;

use crate::errors::NewtonError;

/// The lower bound of both axes of the rendered region.
pub const X_MIN: f64 = -2.0;

/// The upper bound of both axes of the rendered region.
pub const X_MAX: f64 = 2.0;

/// Describes the column, row of a pixel in the raster.  The same
/// x, y order as a complex number's re, im.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a `size` x `size` raster onto `[min, max]²`.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The side length of the raster, in pixels.
    pub size: usize,
    // Lower-left corner value shared by both axes.
    min: f64,
    // The width of a single pixel on the complex plane.
    step: f64,
}

impl PlaneMapper where {
    /// Constructor.  Takes the side length of the raster and the bounds
    /// of the square complex region it covers.
    pub fn new(size: usize, min: f64, max: f64) -> Result<PlaneMapper, NewtonError> {
        if size == 0 {
            return Err(NewtonError::InvalidSize(size));
        }
        Ok(PlaneMapper {
            size,
            min,
            step: (max - min) / (size as f64),
        })
    }

    /// The fixed `[-2, 2]²` region.
    pub fn standard(size: usize) -> Result<PlaneMapper, NewtonError> {
        PlaneMapper::new(size, X_MIN, X_MAX)
    }

    /// The total number of pixels in the raster.  Used to calculate
    /// memory needs.
    pub fn len(&self) -> usize {
        self.size * self.size
    }

    /// True if the raster has no pixels; `new` refuses that size.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Given a pixel on the raster, return the complex number at the
    /// equivalent location: `min + column * step` for the real part,
    /// `min + row * step` for the imaginary part.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.min + (pixel.0 as f64) * self.step,
            self.min + (pixel.1 as f64) * self.step,
        )
    }
}
