//! Hides a black and white message in the least significant bit of the red channel.

use crate::color::Pixel;
use crate::error::Error;
use crate::image::PixelBuffer;

/// Message pixels at most this far from black count as set.
const MESSAGE_BLACK_DISTANCE: f64 = 10.0;

const PAYLOAD_BIT: u8 = 0b0000_0001;

impl PixelBuffer {
    /// Embeds `message` into this carrier image.
    ///
    /// The red channel of every carrier pixel is made even first. Then it is
    /// made odd wherever the message pixel at the same position is close to
    /// black. The message must be at least as large as the carrier.
    pub fn encode(&mut self, message: &PixelBuffer) -> crate::Result<()> {
        if message.width() < self.width() || message.height() < self.height() {
            log::warn!(
                "Message of {}x{} is smaller than carrier of {}x{}",
                message.width(),
                message.height(),
                self.width(),
                self.height()
            );
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (message.width(), message.height()),
            });
        }
        self.map_pixels(|p| Pixel {
            red: p.red & !PAYLOAD_BIT,
            ..p
        });
        let mut hidden_pixels = 0_usize;
        for y in 0..self.height() {
            for x in 0..self.width() {
                if message.dot(x, y).color_distance(&Pixel::BLACK) <= MESSAGE_BLACK_DISTANCE {
                    self.dot_mut(x, y).red |= PAYLOAD_BIT;
                    hidden_pixels += 1;
                }
            }
        }
        log::debug!("Encoded {} message pixels", hidden_pixels);
        Ok(())
    }

    /// Extracts the hidden message: odd red channels become black, all others white.
    pub fn decode(&self) -> PixelBuffer {
        let mut message = self.clone();
        message.map_pixels(|p| {
            if p.red & PAYLOAD_BIT == PAYLOAD_BIT {
                Pixel::BLACK
            } else {
                Pixel::WHITE
            }
        });
        message
    }
}
