// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render the energy of a picture as a greyscale image, scaled so the
//! most energetic pixel is white.  Useful for seeing where the seams
//! are going to go.

use crate::seamcarver::SeamCarver;
use image::{GrayImage, ImageBuffer, Luma};
use itertools::iproduct;
use num_traits::clamp;

pub fn energy_to_image(carver: &SeamCarver) -> GrayImage {
    let (width, height) = (carver.width(), carver.height());
    let energy = |x, y| carver.energy(x, y).unwrap_or(0.0);
    let factor = iproduct!(0..height, 0..width)
        .map(|(y, x)| energy(x, y))
        .fold(0.0f64, f64::max);

    ImageBuffer::from_fn(width, height, |x, y| {
        let c = if factor > 0.0 { energy(x, y) * 255.0 / factor } else { 0.0 };
        Luma([clamp(c.round(), 0.0, 255.0) as u8])
    })
}
