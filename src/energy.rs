// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a picture
//!
//! The energy of a pixel is the dual-gradient of its four orthogonal
//! neighbours: the color gradient between its left and right
//! neighbours, plus the one between the pixels above and below it.
//! Neighbours are *logical*: they are looked up through the pixel
//! index map, so a pixel's neighbours change as seams are carved away
//! around it, while the picture itself never does.

use crate::cq;
use crate::error::{CarveError, Result};
use crate::pixelpairs::gradient_of_pair;
use crate::twodmap::{EnergyGrid, PixelIndexMap};
use image::{Rgb, RgbImage};

/// The energy of every pixel on the edge of the picture.  It is much
/// larger than any interior energy is likely to be, which discourages
/// carving along the border without forbidding it outright.
pub const BORDER_ENERGY: f64 = 1000.0;

// Resolve a logical pixel to the original pixel it shows.
#[inline]
fn color_at<'a>(picture: &'a RgbImage, pixels: &PixelIndexMap, x: u32, y: u32) -> &'a Rgb<u8> {
    let index = pixels[(x, y)];
    picture.get_pixel(index % picture.width(), index / picture.width())
}

// The unchecked energy calculation.  Callers are responsible for
// keeping (x, y) inside the map.
pub(crate) fn energy_at(picture: &RgbImage, pixels: &PixelIndexMap, x: u32, y: u32) -> f64 {
    let (mw, mh) = (pixels.width - 1, pixels.height - 1);
    if x == 0 || x == mw || y == 0 || y == mh {
        return BORDER_ENERGY;
    }

    let (leftpixel, rightpixel, uppixel, downpixel) = (
        color_at(picture, pixels, x - 1, y),
        color_at(picture, pixels, x + 1, y),
        color_at(picture, pixels, x, y - 1),
        color_at(picture, pixels, x, y + 1),
    );
    let gradient =
        gradient_of_pair(leftpixel, rightpixel) + gradient_of_pair(uppixel, downpixel);
    f64::from(gradient).sqrt()
}

/// The energy of a single logical pixel, given the current state of
/// the index map.
pub fn pixel_energy(picture: &RgbImage, pixels: &PixelIndexMap, col: u32, row: u32) -> Result<f64> {
    let (width, height) = (pixels.width, pixels.height);
    cq!(
        col < width && row < height,
        Ok(energy_at(picture, pixels, col, row)),
        Err(CarveError::OutOfRange {
            col,
            row,
            width,
            height
        })
    )
}

/// Compute the energy of every pixel in the map.  No energy depends on
/// any other, so the cells can be evaluated in any order.
#[cfg(not(feature = "threaded"))]
pub fn calculate_energy(picture: &RgbImage, pixels: &PixelIndexMap) -> EnergyGrid {
    use itertools::iproduct;

    let (width, height) = (pixels.width, pixels.height);
    let mut emap = EnergyGrid::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        emap[(x, y)] = energy_at(picture, pixels, x, y);
    }
    emap
}

/// Compute the energy of every pixel in the map, splitting the rows
/// into one band per CPU and filling each band on its own thread.
#[cfg(feature = "threaded")]
pub fn calculate_energy(picture: &RgbImage, pixels: &PixelIndexMap) -> EnergyGrid {
    let (width, height) = (pixels.width as usize, pixels.height as usize);
    let cpus = num_cpus::get().max(1);
    let band_size = ((height + cpus - 1) / cpus) * width;
    let mut emap = EnergyGrid::new(pixels.width, pixels.height);

    let bands = emap.storage_mut().chunks_mut(band_size);
    crossbeam::scope(|s| {
        for (band, cells) in bands.enumerate() {
            let first = band * band_size;
            s.spawn(move |_| {
                for (offset, cell) in cells.iter_mut().enumerate() {
                    let i = first + offset;
                    *cell = energy_at(picture, pixels, (i % width) as u32, (i / width) as u32);
                }
            });
        }
    })
    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
    emap
}
