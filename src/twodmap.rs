use std::ops::{Index, IndexMut};

/// Defines the basic two-dimensional map: an addressable field of
/// cells, one per *logical* pixel of the picture being carved.  It
/// holds either the original-pixel index for each surviving pixel, or
/// that pixel's cached energy.
///
/// The map distinguishes its logical `width` from its `stride`, the
/// length of a row in the underlying storage.  Removing a seam
/// compacts each row leftward inside its stride and then narrows the
/// width by one; nothing is reallocated until the map is transposed.
#[derive(Debug, Clone)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub width: u32,
    pub height: u32,
    stride: u32,
    cells: Vec<P>,
}

/// Maps each logical pixel to the flat index (`y * width + x`) of the
/// original pixel it shows.
pub type PixelIndexMap = TwoDimensionalMap<u32>;

/// The cached energy of each logical pixel.
pub type EnergyGrid = TwoDimensionalMap<f64>;

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map with every cell set to the default value.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            stride: width,
            cells: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Define a new map, populating each cell from its (x, y) address.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        let mut map = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                map[(x, y)] = f(x, y);
            }
        }
        map
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.stride as usize) + (x as usize)
    }

    /// The live cells of a single row.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.cells[start..start + self.width as usize]
    }

    /// Every live cell in row-major order, skipping the dead slots at
    /// the end of each compacted row.
    pub fn cells(&self) -> impl Iterator<Item = &P> + '_ {
        (0..self.height).flat_map(move |y| self.row(y).iter())
    }

    /// The raw storage, for splitting into row bands.  Only meaningful
    /// while the map is compact, i.e. before any seam removal.
    #[cfg(feature = "threaded")]
    pub(crate) fn storage_mut(&mut self) -> &mut [P] {
        debug_assert_eq!(self.stride, self.width);
        &mut self.cells
    }

    /// Drop the cell at (x, y) by sliding the rest of the row one slot
    /// to the left.  The logical width is untouched; call `narrow`
    /// once every row has been compacted.
    pub fn remove_at(&mut self, x: u32, y: u32) {
        let (cell, end) = (self.get_index(x, y), self.get_index(self.width, y));
        self.cells.copy_within(cell + 1..end, cell);
    }

    /// Retire the rightmost column, which every row has compacted away.
    pub fn narrow(&mut self) {
        debug_assert!(self.width > 0);
        self.width -= 1;
    }

    /// Re-lay the live cells out with rows and columns swapped, so that
    /// new[(y, x)] == old[(x, y)].  The result is compact.
    pub fn transposed(&self) -> Self {
        TwoDimensionalMap::from_fn(self.height, self.width, |x, y| self[(y, x)])
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.cells[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.cells[index]
    }
}

impl<P: Default + Copy + PartialEq> PartialEq for TwoDimensionalMap<P> {
    /// Two maps are equal when their live cells are, whatever the
    /// state of their storage.
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells().eq(other.cells())
    }
}
