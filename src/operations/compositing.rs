use crate::color::Pixel;
use crate::image::PixelBuffer;

impl PixelBuffer {
    /// Green screen composite.
    ///
    /// Every pixel of `self` within `threshold` of `background` is replaced
    /// by the pixel of `source` at the same position. Only the area covered
    /// by both images is visited.
    pub fn chromakey(&mut self, source: &PixelBuffer, background: Pixel, threshold: u32) {
        let threshold = f64::from(threshold);
        let width = self.width().min(source.width());
        let height = self.height().min(source.height());
        log::debug!(
            "Chromakey of background {} within {} over {}x{}",
            background,
            threshold,
            width,
            height
        );
        for y in 0..height {
            let source_row = &source.row(y)[..width];
            let row = &mut self.row_mut(y)[..width];
            for (pixel, &replacement) in row.iter_mut().zip(source_row) {
                if pixel.color_distance(&background) <= threshold {
                    *pixel = replacement;
                }
            }
        }
    }
}
