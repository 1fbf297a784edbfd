// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through an energy grid
//!
//! The seam digraph has an edge from every pixel to each of the (up to
//! three) pixels touching it in the row below, and the cheapest seam
//! is the shortest top-to-bottom path through it.  Since the graph is
//! layered, the shortest path falls out of a single top-to-bottom
//! sweep: the cheapest way to reach a pixel is its own energy plus the
//! cheapest way to reach any of its parents.
//!
//! Only vertical seams are found here.  Horizontal seams are vertical
//! seams of the transposed grid; see `orientation`.

use crate::cq;
use crate::twodmap::EnergyGrid;
use tracing::trace;

/// This trait defines how we will return seams from a picture.  The
/// finder may need to re-lay its own state out to answer, hence the
/// mutable receiver, but the picture it reports on never changes.
pub trait SeamFinder {
    /// Request a left-to-right seam: one row index per column.
    fn find_horizontal_seam(&mut self) -> Vec<u32>;

    /// Request a top-to-bottom seam: one column index per row.
    fn find_vertical_seam(&mut self) -> Vec<u32>;
}

/// A seam, together with the total energy along it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeamPath {
    pub columns: Vec<u32>,
    pub cost: f64,
}

// The index of the cheapest entry, preferring the leftmost on a tie.
#[inline]
fn cheapest(costs: &[f64]) -> usize {
    (1..costs.len()).fold(0, |best, i| cq!(costs[i] < costs[best], i, best))
}

/// Given an energy grid, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the seam to be removed.
pub fn find_seam(energy: &EnergyGrid) -> Vec<u32> {
    trace_seam(energy).columns
}

/// Trace the cheapest vertical seam.
///
/// The cumulative costs are kept for just two rows at a time, in a
/// single buffer of `2 * width` that the rows alternate between.  The
/// back-pointers have to survive until the sweep is over, so those are
/// kept for every cell, indexed `row * width + col`.
pub fn trace_seam(energy: &EnergyGrid) -> SeamPath {
    let (width, height) = (energy.width as usize, energy.height as usize);
    let mut cumulative = vec![0.0f64; 2 * width];
    let mut from = vec![0u32; width * height];

    // Populate the first row with their native energies.
    cumulative[..width].copy_from_slice(energy.row(0));

    // For every subsequent row, populate each cell with its own energy
    // plus the *lowest adjacent upper cumulative cost*, and remember
    // which column that came from.
    for y in 1..height {
        let (current, previous) = ((y % 2) * width, ((y - 1) % 2) * width);
        let row = energy.row(y as u32);
        for x in 0..width {
            let first = cq!(x == 0, 0, x - 1);
            let last = cq!(x + 1 == width, x, x + 1);
            let parent = first + cheapest(&cumulative[previous + first..=previous + last]);
            cumulative[current + x] = row[x] + cumulative[previous + parent];
            from[y * width + x] = parent as u32;
        }
    }

    // Find the x coordinate of the bottommost cell with the least
    // cumulative cost.
    let last = ((height - 1) % 2) * width;
    let bottom = cheapest(&cumulative[last..last + width]);
    let cost = cumulative[last + bottom];

    // Working backwards, generate a vec of x coordinates that map to
    // the seam, reverse and return.
    let mut seam_col = bottom as u32;
    let columns: Vec<u32> = (0..height)
        .rev()
        .fold(Vec::<u32>::with_capacity(height), |mut acc, y| {
            acc.push(seam_col);
            seam_col = from[y * width + seam_col as usize];
            acc
        })
        .into_iter()
        .rev()
        .collect();

    trace!(width, height, cost, "traced seam");
    SeamPath { columns, cost }
}
