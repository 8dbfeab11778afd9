//! Sample access functions
//!
//! Getting and setting individual samples, row views, and element-wise
//! mapping. Coordinates are `(x, y)` with `x` the column and `y` the row.

use super::Image;
use crate::error::{Error, Result};

impl<T: Copy> Image<T> {
    /// Get the sample at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.offset(x, y)])
    }

    /// Get the sample at (x, y) without returning an `Option`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> T {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        self.data[self.offset(x, y)]
    }

    /// Set the sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, val: T) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.offset(x, y);
        self.data[idx] = val;
        Ok(())
    }

    /// Apply `f` to every sample, producing a new image of the same shape.
    pub fn map<U, F>(&self, f: F) -> Image<U>
    where
        F: FnMut(T) -> U,
    {
        Image {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Copy the samples out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T> Image<T> {
    /// Get row `y` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Iterate over rows, top to bottom.
    ///
    /// Yields nothing for a zero-area image.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact rejects a zero chunk size; an empty buffer yields no rows either way
        self.data.chunks_exact(self.width.max(1) as usize)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
