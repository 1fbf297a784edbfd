// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Remove a vertical seam
//!
//! Removal never touches the picture.  Each row of the pixel index map
//! and of the energy grid slides left over the removed cell, the
//! rightmost column is retired, and the only energies recalculated are
//! the two on either side of the seam in each row: the dual-gradient
//! reads just the four orthogonal neighbours of a pixel, and since a
//! seam moves at most one column per row, those two cells are the only
//! ones whose neighbours have changed.

use crate::energy::energy_at;
use crate::error::{CarveError, Result, SeamFault};
use crate::twodmap::{EnergyGrid, PixelIndexMap};
use image::RgbImage;
use std::convert::TryFrom;
use tracing::debug;

/// Check that a seam can be removed from a `width` x `height` grid.
pub fn validate_seam(seam: &[u32], width: u32, height: u32) -> Result<()> {
    if seam.is_empty() {
        return Err(CarveError::MissingSeam);
    }
    if width <= 1 {
        return Err(SeamFault::Exhausted { width }.into());
    }
    let found = u32::try_from(seam.len()).unwrap_or(u32::max_value());
    if found != height {
        return Err(SeamFault::WrongLength {
            expected: height,
            found,
        }
        .into());
    }
    if let Some((index, &column)) = seam.iter().enumerate().find(|&(_, &c)| c >= width) {
        return Err(SeamFault::OutOfBounds {
            index: index as u32,
            column,
            width,
        }
        .into());
    }
    if let Some(index) = seam
        .windows(2)
        .position(|pair| pair[0].max(pair[1]) - pair[0].min(pair[1]) > 1)
    {
        return Err(SeamFault::Disjoint {
            index: index as u32,
            next: index as u32 + 1,
        }
        .into());
    }
    Ok(())
}

/// Remove a vertical seam from the index map and the energy grid,
/// which must describe the same grid.  Nothing is changed unless the
/// seam is valid.
pub fn remove_seam(
    picture: &RgbImage,
    pixels: &mut PixelIndexMap,
    energies: &mut EnergyGrid,
    seam: &[u32],
) -> Result<()> {
    validate_seam(seam, pixels.width, pixels.height)?;

    // Every row of the index map has to be compacted before any
    // energy is recalculated, as each energy reads the rows above and
    // below it.
    for (y, &x) in seam.iter().enumerate() {
        pixels.remove_at(x, y as u32);
        energies.remove_at(x, y as u32);
    }
    pixels.narrow();
    energies.narrow();

    let width = pixels.width;
    for (y, &x) in seam.iter().enumerate() {
        let y = y as u32;
        if x > 0 {
            energies[(x - 1, y)] = energy_at(picture, pixels, x - 1, y);
        }
        if x < width {
            energies[(x, y)] = energy_at(picture, pixels, x, y);
        }
    }

    debug!(width, height = pixels.height, "removed seam");
    Ok(())
}
