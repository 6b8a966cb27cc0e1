//! Transforms where every output pixel depends on the input pixel at the same position only.

use crate::color::Pixel;
use crate::error::Error;
use crate::image::PixelBuffer;

impl PixelBuffer {
    pub(crate) fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn(Pixel) -> Pixel,
    {
        for pixel in self.pixels_mut() {
            *pixel = f(*pixel);
        }
    }

    /// Removes all blue from the image.
    pub fn zero_blue(&mut self) {
        self.map_pixels(|p| Pixel { blue: 0, ..p });
    }

    /// Removes everything but blue from the image.
    pub fn keep_only_blue(&mut self) {
        self.map_pixels(|p| Pixel::new(0, 0, p.blue));
    }

    pub fn negate(&mut self) {
        self.map_pixels(|p| p.map_channels(|c| u8::MAX - c));
    }

    /// Inverts every channel whose value is below `threshold`, channel by channel.
    pub fn solarize(&mut self, threshold: u16) {
        log::debug!("Solarizing with threshold {}", threshold);
        self.map_pixels(|p| {
            p.map_channels(|c| {
                if u16::from(c) < threshold {
                    u8::MAX - c
                } else {
                    c
                }
            })
        });
    }

    pub fn grayscale(&mut self) {
        self.map_pixels(|p| {
            let average = (p.channel_sum() / 3) as u8;
            Pixel::new(average, average, average)
        });
    }

    /// Scales every channel by its factor, saturating at 255.
    pub fn tint(
        &mut self,
        red_factor: f64,
        green_factor: f64,
        blue_factor: f64,
    ) -> crate::Result<()> {
        check_factor("red_factor", red_factor)?;
        check_factor("green_factor", green_factor)?;
        check_factor("blue_factor", blue_factor)?;
        log::debug!(
            "Tinting with factors ({}, {}, {})",
            red_factor,
            green_factor,
            blue_factor
        );
        self.map_pixels(|p| {
            Pixel::clamped(
                scale_channel(p.red, red_factor),
                scale_channel(p.green, green_factor),
                scale_channel(p.blue, blue_factor),
            )
        });
        Ok(())
    }

    /// Quantizes every channel down to a multiple of `span`.
    pub fn posterize(&mut self, span: u16) -> crate::Result<()> {
        if span == 0 {
            log::warn!("Rejected posterize span of 0");
            return Err(Error::InvalidArgument(
                "span",
                String::from("must be at least 1"),
            ));
        }
        log::debug!("Posterizing with span {}", span);
        self.map_pixels(|p| p.map_channels(|c| (u16::from(c) / span * span) as u8));
        Ok(())
    }
}

fn check_factor(name: &'static str, factor: f64) -> crate::Result<()> {
    if !factor.is_finite() || factor < 0.0 {
        log::warn!("Rejected tint factor {} = {}", name, factor);
        return Err(Error::InvalidArgument(
            name,
            format!("must be a finite, non-negative number, but was {}", factor),
        ));
    }
    Ok(())
}

/// Floored product, saturating at the bounds of `i32`.
fn scale_channel(channel: u8, factor: f64) -> i32 {
    (f64::from(channel) * factor).floor() as i32
}
