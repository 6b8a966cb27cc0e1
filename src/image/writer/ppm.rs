use std::io::Write;

use super::super::{ImageWriter, PixelBuffer};
use crate::Error;

const MAX_VALUE: u8 = u8::MAX;

/// Writes plain text (`P3`) portable pixmaps, one text line per image row.
pub struct PPMImageWriter<'a, T: Write> {
    writer: T,
    image: &'a PixelBuffer,
}

impl<'a, T: Write> PPMImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a PixelBuffer) -> Self {
        Self { writer, image }
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", self.image.width(), self.image.height())?;
        writeln!(self.writer, "{}", MAX_VALUE)
    }

    fn write_rows(&mut self) -> std::io::Result<()> {
        for row in self.image.rows() {
            let line = row
                .iter()
                .map(|p| format!("{} {} {}", p.red, p.green, p.blue))
                .collect::<Vec<String>>()
                .join("  ");
            writeln!(self.writer, "{}", line)?;
        }
        Ok(())
    }
}

impl<T: Write> ImageWriter for PPMImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        self.write_header().map_err(Error::FailedToWriteImage)?;
        self.write_rows().map_err(Error::FailedToWriteImage)?;
        self.writer.flush().map_err(Error::FailedToWriteImage)?;
        log::debug!(
            "Wrote PPM image of {}x{}",
            self.image.width(),
            self.image.height()
        );
        Ok(())
    }
}
