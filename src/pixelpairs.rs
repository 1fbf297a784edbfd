// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the gradient across a pixel pair
//!
//! Given the two pixels on either side of a target pixel, the gradient
//! between them is the squared distance between the colors that make
//! them up, summed over the red, green and blue channels.

use image::{Pixel, Rgb};
use num_traits::pow;
use std::iter::zip;

/// (Pixel, Pixel) -> squared gradient
///
/// This is the rusty expression of:
///
/// ```text
/// |Δ|² = (Δr)² + (Δg)² + (Δb)²
/// ```
#[inline]
pub fn gradient_of_pair(p1: &Rgb<u8>, p2: &Rgb<u8>) -> u32 {
    zip(p1.channels(), p2.channels())
        .map(|(c1, c2)| pow(i32::from(*c1) - i32::from(*c2), 2) as u32)
        .sum()
}
