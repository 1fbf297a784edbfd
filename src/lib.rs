// #![deny(missing_docs)]

//! Content-aware image resizing by seam carving.
//!
//! A [`SeamCarver`] holds a picture and shrinks it one seam at a time,
//! always taking the connected row or column of pixels whose removal
//! disturbs the least energy.

extern crate image;

pub mod ternary;

pub mod error;
pub use error::{CarveError, Result, SeamFault};

pub mod twodmap;
pub mod pixelpairs;

pub mod energy;
pub use energy::BORDER_ENERGY;

pub mod seamfinder;
pub use seamfinder::SeamFinder;

pub mod remover;
pub mod orientation;

pub mod seamcarver;
pub use seamcarver::SeamCarver;

pub mod dump;
pub use dump::energy_to_image;
