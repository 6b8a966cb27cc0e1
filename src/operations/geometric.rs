//! Mirrors and flips.
//!
//! Mirrors overwrite one half of the image with the reflection of the other
//! half and lose the overwritten pixels. Flips swap pixels and keep them all.

use std::ops::Range;

use crate::error::Error;
use crate::image::PixelBuffer;

impl PixelBuffer {
    /// Mirrors about the vertical midline, the right half is overwritten by the mirrored left half.
    ///
    /// ```text
    ///old image     new image
    ///┌─────────┐   ┌─────────┐
    ///│a b c d e│   │a b c b a│
    ///│f g h i j│   │f g h g f│
    ///└─────────┘   └─────────┘
    /// ```
    pub fn mirror_vertical(&mut self) {
        let width = self.width();
        for y in 0..self.height() {
            let row = self.row_mut(y);
            for column in 0..width / 2 {
                row[width - 1 - column] = row[column];
            }
        }
    }

    /// Mirrors about the vertical midline, the left half is overwritten by the mirrored right half.
    ///
    /// ```text
    ///old image     new image
    ///┌─────────┐   ┌─────────┐
    ///│a b c d e│   │e d c d e│
    ///│f g h i j│   │j i h i j│
    ///└─────────┘   └─────────┘
    /// ```
    pub fn mirror_right_to_left(&mut self) {
        let width = self.width();
        for y in 0..self.height() {
            let row = self.row_mut(y);
            for column in 0..width / 2 {
                row[column] = row[width - 1 - column];
            }
        }
    }

    /// Mirrors about the horizontal midline, the bottom half is overwritten by the mirrored top half.
    ///
    /// ```text
    ///old image     new image
    ///┌─────────┐   ┌─────────┐
    ///│a b c d e│   │a b c d e│
    ///│f g h i j│   │a b c d e│
    ///└─────────┘   └─────────┘
    /// ```
    pub fn mirror_horizontal(&mut self) {
        let width = self.width();
        let half = width * (self.height() / 2);
        let (top, bottom) = self.pixels_mut().split_at_mut(half);
        for (source, target) in top
            .chunks_exact(width)
            .zip(bottom.rchunks_exact_mut(width))
        {
            target.copy_from_slice(source);
        }
    }

    /// Turns the image upside down by swapping rows.
    ///
    /// ```text
    ///old image     new image
    ///┌─────────┐   ┌─────────┐
    ///│a b c d e│   │f g h i j│
    ///│f g h i j│   │a b c d e│
    ///└─────────┘   └─────────┘
    /// ```
    pub fn vertical_flip(&mut self) {
        let width = self.width();
        let half = width * (self.height() / 2);
        let (top, bottom) = self.pixels_mut().split_at_mut(half);
        for (upper, lower) in top
            .chunks_exact_mut(width)
            .zip(bottom.rchunks_exact_mut(width))
        {
            upper.swap_with_slice(lower);
        }
    }

    /// Reflects part of the image about the column `mirror_column`.
    ///
    /// For each row in `rows`, the pixels in `[first_column, mirror_column)`
    /// are copied onto the matching columns right of the mirror column. This
    /// repairs a damaged, symmetric object from its intact half.
    pub fn mirror_about_column(
        &mut self,
        mirror_column: usize,
        rows: Range<usize>,
        first_column: usize,
    ) -> crate::Result<()> {
        if first_column > mirror_column {
            return Err(Error::InvalidArgument(
                "first_column",
                format!(
                    "must not be right of the mirror column {}, but was {}",
                    mirror_column, first_column
                ),
            ));
        }
        if rows.is_empty() || first_column == mirror_column {
            return Ok(());
        }
        // a mirror column inside the image cannot overflow when doubled
        self.check_bounds(mirror_column, rows.end - 1)?;
        self.check_bounds(2 * mirror_column - first_column, rows.end - 1)?;
        log::debug!(
            "Mirroring rows {:?} about column {} starting at column {}",
            rows,
            mirror_column,
            first_column
        );
        for y in rows {
            let row = self.row_mut(y);
            for column in first_column..mirror_column {
                row[2 * mirror_column - column] = row[column];
            }
        }
        Ok(())
    }
}
