// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong when carving.
//!
//! All of these are reported at the point of the offending call, and
//! none of them leave the carver in a partially-modified state: the
//! mutating operations validate completely before they touch anything.

use failure::Fail;

/// The ways in which a seam can be unfit for removal.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum SeamFault {
    /// The picture is already a single pixel across; there is nothing
    /// left to carve in this direction.
    #[fail(display = "cannot remove a seam from a picture {} pixel across", width)]
    Exhausted { width: u32 },

    #[fail(display = "seam has {} entries, expected {}", found, expected)]
    WrongLength { expected: u32, found: u32 },

    #[fail(display = "seam[{}] is {}, but the picture is only {} wide", index, column, width)]
    OutOfBounds { index: u32, column: u32, width: u32 },

    /// Two successive entries are more than one column apart.
    #[fail(display = "seam[{}] and seam[{}] are not adjacent", index, next)]
    Disjoint { index: u32, next: u32 },
}

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum CarveError {
    /// No picture, or a picture with no pixels in it.
    #[fail(display = "no picture to carve")]
    MissingPicture,

    /// An empty seam was handed to one of the removal operations.
    #[fail(display = "no seam to remove")]
    MissingSeam,

    #[fail(
        display = "({}, {}) is outside of the {}x{} picture",
        col, row, width, height
    )]
    OutOfRange {
        col: u32,
        row: u32,
        width: u32,
        height: u32,
    },

    #[fail(display = "invalid seam: {}", _0)]
    InvalidSeam(#[cause] SeamFault),

    /// Carving can only shrink a picture, and never to nothing.
    #[fail(
        display = "cannot carve a {}x{} picture to {}x{}",
        width, height, target_width, target_height
    )]
    InvalidTarget {
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    },
}

impl From<SeamFault> for CarveError {
    fn from(fault: SeamFault) -> Self {
        CarveError::InvalidSeam(fault)
    }
}

pub type Result<T> = std::result::Result<T, CarveError>;
