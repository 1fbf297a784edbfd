// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SeamCarver - the carving engine
//!
//! Holds a private snapshot of the picture, a map from each surviving
//! logical pixel to the original pixel it shows, and a cache of the
//! energy of each logical pixel.  Seams are found in, and removed
//! from, the map and the cache; the snapshot itself is never changed,
//! and a fresh picture is only assembled on request.

use crate::energy::calculate_energy;
use crate::error::{CarveError, Result};
use crate::orientation::Orientation;
use crate::remover::remove_seam;
use crate::seamfinder::{find_seam, SeamFinder};
use crate::twodmap::{EnergyGrid, PixelIndexMap};
use image::{ImageBuffer, RgbImage};
use tracing::{debug, info};

// This is silly and basically a reimplementation of `bool` and `not`,
// but it makes it much clearer in the carve loop what I'm doing.
#[derive(PartialEq, Copy, Clone)]
enum Carve {
    Width,
    Height,
}

impl Carve {
    fn turn(self) -> Self {
        if self == Carve::Width {
            Carve::Height
        } else {
            Carve::Width
        }
    }
}

/// A picture being carved.
#[derive(Debug, Clone)]
pub struct SeamCarver {
    picture: RgbImage,
    pixels: PixelIndexMap,
    energies: EnergyGrid,
    orientation: Orientation,
}

impl SeamCarver {
    /// Creates a new SeamCarver with a copy of the picture to be
    /// carved.  Later changes to the caller's picture have no effect.
    pub fn new(picture: &RgbImage) -> Result<Self> {
        let (width, height) = picture.dimensions();
        if width == 0 || height == 0 {
            return Err(CarveError::MissingPicture);
        }
        let pixels = PixelIndexMap::from_fn(width, height, |x, y| y * width + x);
        let energies = calculate_energy(picture, &pixels);
        debug!(width, height, "loaded picture");
        Ok(SeamCarver {
            picture: picture.clone(),
            pixels,
            energies,
            orientation: Orientation::Upright,
        })
    }

    /// The current width of the picture.
    pub fn width(&self) -> u32 {
        self.orientation.dimensions(self.pixels.width, self.pixels.height).0
    }

    /// The current height of the picture.
    pub fn height(&self) -> u32 {
        self.orientation.dimensions(self.pixels.width, self.pixels.height).1
    }

    /// The energy of the pixel at (col, row) in the current picture.
    pub fn energy(&self, col: u32, row: u32) -> Result<f64> {
        if col >= self.width() || row >= self.height() {
            return Err(CarveError::OutOfRange {
                col,
                row,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(self.energies[self.orientation.frame(col, row)])
    }

    /// Assemble the current picture, with every removal so far applied.
    pub fn picture(&mut self) -> RgbImage {
        self.orient(Orientation::Upright);
        let (picture, pixels) = (&self.picture, &self.pixels);
        let stride = picture.width();
        ImageBuffer::from_fn(pixels.width, pixels.height, |x, y| {
            let index = pixels[(x, y)];
            *picture.get_pixel(index % stride, index / stride)
        })
    }

    /// Remove a top-to-bottom seam, one column index per row.
    pub fn remove_vertical_seam(&mut self, seam: &[u32]) -> Result<()> {
        self.orient(Orientation::Upright);
        remove_seam(&self.picture, &mut self.pixels, &mut self.energies, seam)
    }

    /// Remove a left-to-right seam, one row index per column.
    pub fn remove_horizontal_seam(&mut self, seam: &[u32]) -> Result<()> {
        self.orient(Orientation::Transposed);
        remove_seam(&self.picture, &mut self.pixels, &mut self.energies, seam)
    }

    /// Given a desired new width and height, repeatedly carve seams out
    /// of the picture, alternating directions while both dimensions
    /// still need shrinking, and return the result.
    pub fn carve(&mut self, newwidth: u32, newheight: u32) -> Result<RgbImage> {
        let (width, height) = (self.width(), self.height());
        if newwidth == 0 || newheight == 0 || newwidth > width || newheight > height {
            return Err(CarveError::InvalidTarget {
                width,
                height,
                target_width: newwidth,
                target_height: newheight,
            });
        }

        let mut direction = Carve::Width;
        while self.width() > newwidth && self.height() > newheight {
            self.carve_once(direction)?;
            direction = direction.turn();
            info!(width = self.width(), height = self.height(), "carved both ways");
        }
        while self.width() > newwidth {
            self.carve_once(Carve::Width)?;
            info!(width = self.width(), height = self.height(), "carved width");
        }
        while self.height() > newheight {
            self.carve_once(Carve::Height)?;
            info!(width = self.width(), height = self.height(), "carved height");
        }
        Ok(self.picture())
    }

    fn carve_once(&mut self, direction: Carve) -> Result<()> {
        match direction {
            Carve::Width => {
                let seam = self.find_vertical_seam();
                self.remove_vertical_seam(&seam)
            }
            Carve::Height => {
                let seam = self.find_horizontal_seam();
                self.remove_horizontal_seam(&seam)
            }
        }
    }

    // Lay the internal state out the requested way.
    fn orient(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.toggle();
        }
    }

    // Swap rows for columns in both the index map and the energy grid.
    // Energies are symmetric under transposition, so the cache stays
    // valid as it is.
    fn toggle(&mut self) {
        self.pixels = self.pixels.transposed();
        self.energies = self.energies.transposed();
        self.orientation = self.orientation.turn();
        debug!(orientation = ?self.orientation, "transposed");
    }
}

impl SeamFinder for SeamCarver {
    fn find_horizontal_seam(&mut self) -> Vec<u32> {
        self.orient(Orientation::Transposed);
        find_seam(&self.energies)
    }

    fn find_vertical_seam(&mut self) -> Vec<u32> {
        self.orient(Orientation::Upright);
        find_seam(&self.energies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeamFault;
    use image::Rgb;
    use itertools::iproduct;

    const PICTURE: [[u8; 3]; 12] = [
        [255, 101, 51], [255, 101, 153], [255, 101, 255],
        [255, 153, 51], [255, 153, 153], [255, 153, 255],
        [255, 203, 51], [255, 204, 153], [255, 205, 255],
        [255, 255, 51], [255, 255, 153], [255, 255, 255],
    ];

    fn three_by_four() -> RgbImage {
        ImageBuffer::from_fn(3, 4, |x, y| Rgb(PICTURE[(y * 3 + x) as usize]))
    }

    fn white(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_pixel(width, height, Rgb([255, 255, 255]))
    }

    fn noisy(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            let v = (x * 131 + y * 71 + (x ^ y) * 29) % 256;
            Rgb([v as u8, (v * 7 % 256) as u8, ((v + x) % 256) as u8])
        })
    }

    fn energies(carver: &SeamCarver) -> Vec<f64> {
        iproduct!(0..carver.height(), 0..carver.width())
            .map(|(row, col)| carver.energy(col, row).unwrap())
            .collect()
    }

    #[test]
    fn empty_pictures_are_refused() {
        assert_eq!(
            SeamCarver::new(&RgbImage::new(0, 4)).unwrap_err(),
            CarveError::MissingPicture
        );
    }

    #[test]
    fn border_pixels_have_border_energy() {
        let carver = SeamCarver::new(&noisy(6, 5)).unwrap();
        for (col, row) in iproduct!(0..6, 0..5) {
            if col == 0 || col == 5 || row == 0 || row == 4 {
                assert_eq!(carver.energy(col, row).unwrap(), 1000.0);
            }
        }
    }

    #[test]
    fn solid_white_has_no_interior_energy() {
        let carver = SeamCarver::new(&white(3, 4)).unwrap();
        assert_eq!(
            energies(&carver),
            [
                1000.0, 1000.0, 1000.0, 1000.0, 0.0, 1000.0, 1000.0, 0.0, 1000.0, 1000.0,
                1000.0, 1000.0
            ]
        );
    }

    #[test]
    fn solid_white_seams_prefer_the_left() {
        // [1, 1, 1, 1] costs the same as [0, 1, 1, 0]; the tie goes to
        // the smaller column in the first and last rows.
        let mut carver = SeamCarver::new(&white(3, 4)).unwrap();
        assert_eq!(carver.find_vertical_seam(), [0, 1, 1, 0]);
    }

    #[test]
    fn finds_the_seams_of_the_three_by_four() {
        let mut carver = SeamCarver::new(&three_by_four()).unwrap();
        assert_eq!(carver.energy(1, 1).unwrap(), 52225f64.sqrt());
        assert_eq!(carver.energy(1, 2).unwrap(), 52024f64.sqrt());
        assert_eq!(carver.find_vertical_seam(), [0, 1, 1, 0]);
        assert_eq!(carver.find_horizontal_seam(), [1, 2, 1]);
    }

    #[test]
    fn finding_seams_changes_nothing_visible() {
        let mut carver = SeamCarver::new(&noisy(7, 5)).unwrap();
        let before = energies(&carver);
        let horizontal = carver.find_horizontal_seam();
        assert_eq!((carver.width(), carver.height()), (7, 5));
        assert_eq!(energies(&carver), before);
        let vertical = carver.find_vertical_seam();
        assert_eq!(energies(&carver), before);
        assert_eq!(vertical.len(), 5);
        assert_eq!(horizontal.len(), 7);
        assert!(horizontal.iter().all(|&r| r < 5));
        assert_eq!(carver.find_horizontal_seam(), horizontal);
    }

    #[test]
    fn energy_reports_in_the_callers_frame() {
        let mut carver = SeamCarver::new(&noisy(5, 3)).unwrap();
        let upright = energies(&carver);
        carver.find_horizontal_seam();
        assert_eq!(carver.orientation, Orientation::Transposed);
        assert_eq!(energies(&carver), upright);
        assert!(carver.energy(4, 2).is_ok());
        assert_eq!(
            carver.energy(2, 4),
            Err(CarveError::OutOfRange {
                col: 2,
                row: 4,
                width: 5,
                height: 3
            })
        );
    }

    #[test]
    fn toggling_twice_restores_the_layout() {
        let mut carver = SeamCarver::new(&noisy(6, 4)).unwrap();
        let (pixels, energies) = (carver.pixels.clone(), carver.energies.clone());
        carver.toggle();
        assert_eq!((carver.pixels.width, carver.pixels.height), (4, 6));
        carver.toggle();
        assert_eq!(carver.orientation, Orientation::Upright);
        assert_eq!(carver.pixels, pixels);
        assert_eq!(carver.energies, energies);
    }

    #[test]
    fn removal_shrinks_one_dimension() {
        let mut carver = SeamCarver::new(&noisy(6, 5)).unwrap();
        let seam = carver.find_vertical_seam();
        carver.remove_vertical_seam(&seam).unwrap();
        assert_eq!((carver.width(), carver.height()), (5, 5));
        let seam = carver.find_horizontal_seam();
        carver.remove_horizontal_seam(&seam).unwrap();
        assert_eq!((carver.width(), carver.height()), (5, 4));
        assert_eq!(carver.picture().dimensions(), (5, 4));
    }

    #[test]
    fn three_by_four_carves_down_to_one_column() {
        let mut carver = SeamCarver::new(&three_by_four()).unwrap();
        let seam = carver.find_vertical_seam();
        carver.remove_vertical_seam(&seam).unwrap();
        assert_eq!(carver.picture().dimensions(), (2, 4));
        let seam = carver.find_vertical_seam();
        carver.remove_vertical_seam(&seam).unwrap();
        assert_eq!(carver.width(), 1);
        let seam = carver.find_vertical_seam();
        assert_eq!(seam, [0, 0, 0, 0]);
        assert_eq!(
            carver.remove_vertical_seam(&seam),
            Err(CarveError::InvalidSeam(SeamFault::Exhausted { width: 1 }))
        );
    }

    #[test]
    fn removal_keeps_the_right_pixels() {
        let original = three_by_four();
        let mut carver = SeamCarver::new(&original).unwrap();
        carver.remove_vertical_seam(&[0, 1, 1, 0]).unwrap();
        let picture = carver.picture();
        assert_eq!(picture.get_pixel(0, 0), original.get_pixel(1, 0));
        assert_eq!(picture.get_pixel(0, 1), original.get_pixel(0, 1));
        assert_eq!(picture.get_pixel(1, 2), original.get_pixel(2, 2));
        assert_eq!(picture.get_pixel(1, 3), original.get_pixel(2, 3));

        carver.remove_horizontal_seam(&[3, 2]).unwrap();
        let picture = carver.picture();
        assert_eq!(picture.dimensions(), (2, 3));
        assert_eq!(picture.get_pixel(0, 2), original.get_pixel(0, 2));
        assert_eq!(picture.get_pixel(1, 2), original.get_pixel(2, 3));
    }

    #[test]
    fn bad_seams_leave_the_carver_alone() {
        let mut carver = SeamCarver::new(&noisy(5, 4)).unwrap();
        let before = energies(&carver);
        assert_eq!(carver.remove_vertical_seam(&[]), Err(CarveError::MissingSeam));
        assert!(matches!(
            carver.remove_vertical_seam(&[1, 1, 1]),
            Err(CarveError::InvalidSeam(SeamFault::WrongLength { .. }))
        ));
        assert!(matches!(
            carver.remove_horizontal_seam(&[0, 2, 1, 1, 1]),
            Err(CarveError::InvalidSeam(SeamFault::Disjoint { .. }))
        ));
        assert!(matches!(
            carver.remove_horizontal_seam(&[0, 1, 2, 3, 4]),
            Err(CarveError::InvalidSeam(SeamFault::OutOfBounds { .. }))
        ));
        assert_eq!((carver.width(), carver.height()), (5, 4));
        assert_eq!(energies(&carver), before);
    }

    #[test]
    fn cache_matches_a_fresh_carver() {
        let mut carver = SeamCarver::new(&noisy(9, 7)).unwrap();
        for i in 0..6 {
            if i % 2 == 0 {
                let seam = carver.find_vertical_seam();
                carver.remove_vertical_seam(&seam).unwrap();
            } else {
                let seam = carver.find_horizontal_seam();
                carver.remove_horizontal_seam(&seam).unwrap();
            }
            let fresh = SeamCarver::new(&carver.picture()).unwrap();
            assert_eq!(energies(&carver), energies(&fresh));
        }
        assert_eq!((carver.width(), carver.height()), (6, 4));
    }

    #[test]
    fn the_callers_picture_is_copied() {
        let mut original = white(4, 4);
        let mut carver = SeamCarver::new(&original).unwrap();
        original.put_pixel(1, 1, Rgb([0, 0, 0]));
        assert_eq!(carver.picture(), white(4, 4));
    }

    #[test]
    fn carve_reaches_the_target() {
        let mut carver = SeamCarver::new(&noisy(10, 8)).unwrap();
        let carved = carver.carve(6, 7).unwrap();
        assert_eq!(carved.dimensions(), (6, 7));
        assert_eq!((carver.width(), carver.height()), (6, 7));
    }

    #[test]
    fn carve_will_not_upscale() {
        let mut carver = SeamCarver::new(&noisy(4, 4)).unwrap();
        assert_eq!(
            carver.carve(5, 4),
            Err(CarveError::InvalidTarget {
                width: 4,
                height: 4,
                target_width: 5,
                target_height: 4
            })
        );
        assert!(carver.carve(4, 0).is_err());
        assert_eq!(carver.carve(4, 4).unwrap().dimensions(), (4, 4));
    }
}
