// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Picture orientation
//!
//! The carver only ever finds and removes *vertical* seams.  To carve
//! a horizontal seam it lays its state out transposed, with every x
//! mapped to y and vice versa, so that each column of the picture
//! becomes a contiguous row and a horizontal seam becomes a vertical
//! one.
//!
//! The caller never sees any of this: widths, heights and coordinates
//! are always reported in the picture's own frame, and these helpers
//! translate between that frame and whichever layout is current.

/// Which way the carver's internal state is currently laid out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// Rows of the internal state are rows of the picture.
    Upright,
    /// Rows of the internal state are columns of the picture.
    Transposed,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Upright
    }
}

impl Orientation {
    /// The other orientation.
    pub fn turn(self) -> Self {
        match self {
            Orientation::Upright => Orientation::Transposed,
            Orientation::Transposed => Orientation::Upright,
        }
    }

    /// Map a (col, row) address to the other frame.  The mapping is
    /// its own inverse, so it serves in both directions.
    pub fn frame(self, col: u32, row: u32) -> (u32, u32) {
        match self {
            Orientation::Upright => (col, row),
            Orientation::Transposed => (row, col),
        }
    }

    /// Map a (width, height) pair to the other frame.
    pub fn dimensions(self, width: u32, height: u32) -> (u32, u32) {
        self.frame(width, height)
    }
}
