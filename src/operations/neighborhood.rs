//! Algorithms that combine each pixel with its neighbors.
//!
//! All of them read from an unmodified copy of the input, so results never
//! depend on the order in which pixels are visited.

use nanorand::{Rng, WyRand};

use crate::color::Pixel;
use crate::error::Error;
use crate::image::PixelBuffer;

impl PixelBuffer {
    /// Marks edges between horizontally adjacent pixels.
    ///
    /// A pixel turns black when its distance to the right neighbor exceeds
    /// `threshold` and white otherwise. The last column has no right
    /// neighbor and keeps its color.
    pub fn edge_detection(&mut self, threshold: u32) {
        let threshold = f64::from(threshold);
        log::debug!("Detecting edges with threshold {}", threshold);
        for y in 0..self.height() {
            let original = self.row(y).to_vec();
            let row = self.row_mut(y);
            for (pixel, pair) in row.iter_mut().zip(original.windows(2)) {
                *pixel = if pair[0].color_distance(&pair[1]) > threshold {
                    Pixel::BLACK
                } else {
                    Pixel::WHITE
                };
            }
        }
    }

    /// Averages every inner pixel with its four direct neighbors, the border is copied as is.
    pub fn simple_blur(&self) -> PixelBuffer {
        let mut output = self.clone();
        for y in 1..self.height() - 1 {
            for x in 1..self.width() - 1 {
                let neighborhood = [
                    self.dot(x, y),
                    self.dot(x, y - 1),
                    self.dot(x, y + 1),
                    self.dot(x - 1, y),
                    self.dot(x + 1, y),
                ];
                *output.dot_mut(x, y) = average(&neighborhood);
            }
        }
        output
    }

    /// Box blur over a square window of side `2 * radius`.
    ///
    /// The window covers the offsets `[-radius, radius)` on both axes, so it
    /// is not centered on the pixel. Only pixels at least `radius` away from
    /// every edge are recomputed, all others are copied.
    pub fn blur(&self, radius: usize) -> crate::Result<PixelBuffer> {
        if radius == 0 {
            log::warn!("Rejected blur radius of 0");
            return Err(Error::InvalidArgument(
                "radius",
                String::from("must be at least 1"),
            ));
        }
        log::debug!("Blurring with radius {}", radius);
        let mut output = self.clone();
        if radius >= self.width().div_ceil(2) || radius >= self.height().div_ceil(2) {
            return Ok(output);
        }
        let mut window = Vec::with_capacity(4 * radius * radius);
        for y in radius..self.height().saturating_sub(radius) {
            for x in radius..self.width().saturating_sub(radius) {
                window.clear();
                for window_y in y - radius..y + radius {
                    window.extend_from_slice(&self.row(window_y)[x - radius..x + radius]);
                }
                *output.dot_mut(x, y) = average(&window);
            }
        }
        Ok(output)
    }

    /// Simulates looking at the image through a pane of frosted glass.
    ///
    /// Every output pixel is a copy of a randomly chosen input pixel at most
    /// `distance` away on each axis, clipped to the image.
    pub fn glass_filter(&self, distance: usize, rng: &mut WyRand) -> PixelBuffer {
        let mut output = self.clone();
        if distance == 0 {
            return output;
        }
        log::debug!("Applying glass filter with distance {}", distance);
        let last_column = self.width() - 1;
        let last_row = self.height() - 1;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let source_x = rng.generate_range(
                    x.saturating_sub(distance)..=x.saturating_add(distance).min(last_column),
                );
                let source_y = rng.generate_range(
                    y.saturating_sub(distance)..=y.saturating_add(distance).min(last_row),
                );
                *output.dot_mut(x, y) = self.dot(source_x, source_y);
            }
        }
        output
    }
}

/// Channel-wise floor average.
fn average(pixels: &[Pixel]) -> Pixel {
    let count = pixels.len() as u32;
    let (red, green, blue) = pixels.iter().fold((0_u32, 0_u32, 0_u32), |acc, p| {
        (
            acc.0 + u32::from(p.red),
            acc.1 + u32::from(p.green),
            acc.2 + u32::from(p.blue),
        )
    });
    Pixel::new(
        (red / count) as u8,
        (green / count) as u8,
        (blue / count) as u8,
    )
}

#[cfg(test)]
mod test {
    use nanorand::WyRand;

    use crate::color::Pixel;
    use crate::error::Error;
    use crate::image::PixelBuffer;
    use crate::operations::test_images::patterned;

    fn p(value: u8) -> Pixel {
        Pixel::new(value, value, value)
    }

    #[test]
    fn edge_detection_on_uniform_image() {
        let color = Pixel::new(12, 34, 56);
        let mut image = PixelBuffer::filled(4, 5, color).unwrap();
        image.edge_detection(0);
        for row in image.rows() {
            assert!(row[..4].iter().all(|&pixel| pixel == Pixel::WHITE));
            assert_eq!(row[4], color);
        }
    }

    #[test]
    fn edge_detection_marks_strong_differences() {
        let mut image = PixelBuffer::from_grid(&[vec![p(0), p(20), p(40), p(40)]]).unwrap();
        image.edge_detection(30);
        assert_eq!(
            image.to_grid()[0],
            vec![Pixel::BLACK, Pixel::BLACK, Pixel::WHITE, p(40)]
        );
    }

    #[test]
    fn edge_detection_threshold_is_exclusive() {
        // distance between (0,0,0) and (3,4,0) is exactly 5
        let right = Pixel::new(3, 4, 0);
        let mut at_threshold = PixelBuffer::from_grid(&[vec![Pixel::BLACK, right]]).unwrap();
        at_threshold.edge_detection(5);
        assert_eq!(at_threshold.get(0, 0).unwrap(), Pixel::WHITE);

        let mut below_threshold = PixelBuffer::from_grid(&[vec![Pixel::BLACK, right]]).unwrap();
        below_threshold.edge_detection(4);
        assert_eq!(below_threshold.get(0, 0).unwrap(), Pixel::BLACK);
    }

    #[test]
    fn simple_blur_averages_cross_neighborhood() {
        let image = PixelBuffer::from_grid(&[
            vec![p(0), p(10), p(0)],
            vec![p(20), p(50), p(30)],
            vec![p(0), p(41), p(0)],
        ])
        .unwrap();
        let blurred = image.simple_blur();
        // (50 + 10 + 41 + 20 + 30) / 5 = 30.2
        assert_eq!(blurred.get(1, 1).unwrap(), p(30));
        assert_eq!(blurred.get(0, 1).unwrap(), p(20));
        assert_eq!(blurred.get(1, 2).unwrap(), p(41));
    }

    #[test]
    fn simple_blur_reads_original_values() {
        let image = PixelBuffer::from_grid(&[
            vec![p(0), p(0), p(0), p(0)],
            vec![p(0), p(100), p(0), p(0)],
            vec![p(0), p(0), p(0), p(0)],
        ])
        .unwrap();
        let blurred = image.simple_blur();
        assert_eq!(blurred.get(1, 1).unwrap(), p(20));
        assert_eq!(blurred.get(2, 1).unwrap(), p(20));
        assert_eq!(image.get(1, 1).unwrap(), p(100), "source must stay untouched");
    }

    #[test]
    fn simple_blur_on_thin_images_copies() {
        let image = patterned(2, 7);
        assert_eq!(image.simple_blur(), image);
        let image = patterned(1, 1);
        assert_eq!(image.simple_blur(), image);
    }

    #[test]
    fn blur_of_uniform_image_is_identity() {
        let image = PixelBuffer::filled(5, 5, Pixel::new(90, 17, 203)).unwrap();
        assert_eq!(image.blur(1).unwrap(), image);
    }

    #[test]
    fn blur_window_excludes_positive_radius_offset() {
        let mut grid = vec![vec![p(0); 4]; 4];
        grid[2][2] = p(100);
        grid[0][0] = p(40);
        let image = PixelBuffer::from_grid(&grid).unwrap();
        let blurred = image.blur(1).unwrap();
        // window of (1,1) covers (0..2, 0..2) and never sees (2,2)
        assert_eq!(blurred.get(1, 1).unwrap(), p(10));
        // window of (2,2) covers (1..3, 1..3)
        assert_eq!(blurred.get(2, 2).unwrap(), p(25));
        assert_eq!(blurred.get(3, 3).unwrap(), p(0));
        assert_eq!(blurred.get(0, 0).unwrap(), p(40));
    }

    #[test]
    fn blur_with_large_radius_copies() {
        let image = patterned(3, 3);
        assert_eq!(image.blur(2).unwrap(), image);
        assert_eq!(image.blur(1 << 30).unwrap(), image);
        assert_eq!(image.blur(usize::MAX).unwrap(), image);
    }

    #[test]
    fn blur_needs_room_on_both_axes() {
        let image = patterned(9, 4);
        assert_eq!(image.blur(2).unwrap(), image);
        assert_ne!(image.blur(1).unwrap(), image);
    }

    #[test]
    fn blur_rejects_zero_radius() {
        let image = patterned(3, 3);
        assert!(matches!(
            image.blur(0),
            Err(Error::InvalidArgument("radius", _))
        ));
    }

    #[test]
    fn glass_filter_is_reproducible_with_seed() {
        let image = patterned(6, 8);
        let first = image.glass_filter(2, &mut WyRand::new_seed(42));
        let second = image.glass_filter(2, &mut WyRand::new_seed(42));
        assert_eq!(first, second);
    }

    #[test]
    fn glass_filter_picks_pixels_from_window() {
        let image = patterned(6, 8);
        let glass = image.glass_filter(1, &mut WyRand::new_seed(7));
        for y in 0..6 {
            for x in 0..8 {
                let picked = glass.get(x, y).unwrap();
                let found = (y.saturating_sub(1)..=(y + 1).min(5)).any(|sy| {
                    (x.saturating_sub(1)..=(x + 1).min(7))
                        .any(|sx| image.get(sx, sy).unwrap() == picked)
                });
                assert!(found, "pixel at ({}, {}) was not taken from its window", x, y);
            }
        }
    }

    #[test]
    fn glass_filter_with_zero_distance_copies() {
        let image = patterned(4, 4);
        assert_eq!(image.glass_filter(0, &mut WyRand::new_seed(1)), image);
    }

    #[test]
    fn glass_filter_with_huge_distance_stays_inside_image() {
        let image = patterned(3, 5);
        let glass = image.glass_filter(usize::MAX, &mut WyRand::new_seed(3));
        assert_eq!((glass.width(), glass.height()), (5, 3));
        for picked in glass.rows().flatten() {
            assert!(image.rows().flatten().any(|p| p == picked));
        }
    }
}
