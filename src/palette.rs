// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lookup tables from pixel classifications to the text tokens the
//! two output rasters are made of.  Every token is fixed width, so a
//! row always encodes to the same number of bytes.

use image::{Luma, Rgb};

use crate::newton::{PixelResult, MAX_ITERATIONS};

/// Slot 0 is for pixels that did not converge; slot `k + 1` is root k.
pub const ATTRACTOR_COLOURS: [Rgb<u8>; 10] = [
    Rgb([127, 127, 127]),
    Rgb([230, 25, 75]),
    Rgb([60, 180, 75]),
    Rgb([0, 130, 200]),
    Rgb([255, 225, 25]),
    Rgb([145, 30, 180]),
    Rgb([70, 240, 240]),
    Rgb([245, 130, 48]),
    Rgb([240, 50, 230]),
    Rgb([128, 64, 0]),
];

fn colour_token(colour: &Rgb<u8>) -> String {
    let Rgb([r, g, b]) = *colour;
    format!("{:03} {:03} {:03} ", r, g, b)
}

fn grey_token(level: &Luma<u8>) -> String {
    format!("{:03} ", level.0[0])
}

/// The pre-encoded tokens for both rasters.  Built once per run and
/// shared read-only with the writer.
#[derive(Clone, Debug)]
pub struct Palette {
    attractors: Vec<String>,
    convergence: Vec<String>,
}

impl Palette {
    /// Encode every token once.
    pub fn new() -> Palette {
        Palette {
            attractors: ATTRACTOR_COLOURS.iter().map(colour_token).collect(),
            convergence: (0..=MAX_ITERATIONS)
                .map(|level| grey_token(&Luma([level as u8])))
                .collect(),
        }
    }

    /// The `"RRR GGG BBB "` token for a pixel.
    pub fn attractor(&self, pixel: &PixelResult) -> &str {
        let slot = pixel.root.map_or(0, |root| root as usize + 1);
        &self.attractors[slot]
    }

    /// The `"NNN "` token for a pixel.
    pub fn convergence(&self, pixel: &PixelResult) -> &str {
        let level = u32::from(pixel.iterations).min(MAX_ITERATIONS);
        &self.convergence[level as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new()
    }
}
