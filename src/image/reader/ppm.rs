use std::io::{ErrorKind, Read};

use super::super::ImageReader;
use super::super::PixelBuffer;
use crate::color::{Pixel, RangeColorFormat};
use crate::Error;

/// Reads plain text (`P3`) portable pixmaps.
pub struct PPMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PPMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PPMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<PixelBuffer> {
        let mut tokenizer = PPMTokenizer::new(&mut self.reader);
        let mut parser = PPMParser::new(&mut tokenizer);
        parser.parse_tokens()
    }
}

struct PPMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> PPMTokenizer<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        PPMTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: Read> Iterator for PPMTokenizer<'_, R> {
    type Item = crate::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut byte = [0; 1];
        let mut in_comment = false;

        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {}
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => return Some(Err(Error::FailedToReadImage(error))),
            }
            if in_comment {
                if byte[0] == b'\n' {
                    in_comment = false;
                }
                continue;
            }
            if byte[0] == b'#' {
                in_comment = true;
                continue;
            }
            if byte[0].is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte[0]);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        // invalid bytes end up as a token that fails to parse
        Some(Ok(String::from_utf8_lossy(&self.buffer).into_owned()))
    }
}

const P3_HEADER_TOKEN_NAME: &str = "P3 Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

#[derive(Clone, Copy)]
struct Dot {
    buffer: [u16; 3],
    index: usize,
}

impl Dot {
    fn new() -> Self {
        Self {
            buffer: [u16::default(); 3],
            index: 0,
        }
    }

    fn red(&self) -> u16 {
        self.buffer[0]
    }

    fn green(&self) -> u16 {
        self.buffer[1]
    }

    fn blue(&self) -> u16 {
        self.buffer[2]
    }

    fn push_color_component(&mut self, component: u16) {
        if self.is_complete() {
            return;
        }
        self.buffer[self.index] = component;
        self.index += 1;
    }

    fn is_complete(&self) -> bool {
        self.index == 3
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }
}

struct PPMParser<'a, T> {
    tokenizer: &'a mut T,
}

impl<'a, T> PPMParser<'a, T>
where
    T: Iterator<Item = crate::Result<String>>,
{
    fn new(tokenizer: &'a mut T) -> Self {
        Self { tokenizer }
    }

    fn next_token(&mut self) -> crate::Result<Option<String>> {
        self.tokenizer.next().transpose()
    }

    fn require_token(&mut self, token_name: &'static str) -> crate::Result<String> {
        self.next_token()?
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(token_name))
    }

    fn parse_tokens(&mut self) -> crate::Result<PixelBuffer> {
        let header = self.parse_header()?;
        Self::check_header_version(&header)?;
        let width = self.parse_dimension(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.parse_dimension(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_value = self.parse_max_value()?;
        let dots = self.parse_all_dots()?;
        Self::check_parsed_dots_length_match_header_information(&dots, width, height)?;
        let pixels = dots
            .into_iter()
            .map(|d| RangeColorFormat::new(max_value, d.red(), d.green(), d.blue()))
            .map(|color| color.map(Pixel::from))
            .collect::<crate::Result<Vec<Pixel>>>()?;
        log::debug!(
            "Parsed PPM image of {}x{} with max value {}",
            width,
            height,
            max_value
        );
        PixelBuffer::from_pixels(height, width, pixels)
    }

    fn check_parsed_dots_length_match_header_information(
        dots: &[Dot],
        width: usize,
        height: usize,
    ) -> crate::Result<()> {
        match width.checked_mul(height) {
            Some(expected_number_of_dots) if dots.len() == expected_number_of_dots => Ok(()),
            _ => Err(Error::MismatchOfSizeBetweenHeaderAndValues),
        }
    }

    fn check_header_version(header: &str) -> crate::Result<()> {
        if header != "P3" {
            return Err(Error::PPMFileDoesNotContainRequiredToken(
                P3_HEADER_TOKEN_NAME,
            ));
        }
        Ok(())
    }

    fn parse_header(&mut self) -> crate::Result<String> {
        self.require_token(P3_HEADER_TOKEN_NAME)
    }

    fn parse_dimension(&mut self, token_name: &'static str) -> crate::Result<usize> {
        self.require_token(token_name)?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(token_name))
    }

    fn parse_max_value(&mut self) -> crate::Result<u16> {
        self.require_token(MAX_VALUE_HEADER_TOKEN_NAME)?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME))
    }

    fn parse_all_dots(&mut self) -> crate::Result<Vec<Dot>> {
        let mut current_dot = Dot::new();
        let mut dots = Vec::new();
        while let Some(token) = self.next_token()? {
            let component = Self::parse_color_value(&token)?;
            current_dot.push_color_component(component);
            if current_dot.is_complete() {
                dots.push(current_dot);
                current_dot.reset();
            }
        }
        Self::check_pixel_was_complete(&current_dot)?;
        Ok(dots)
    }

    fn check_pixel_was_complete(dot: &Dot) -> crate::Result<()> {
        if !dot.is_empty() {
            return Err(Error::IncompletePixelParsed(dot.index));
        }
        Ok(())
    }

    fn parse_color_value(token: &str) -> crate::Result<u16> {
        token
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(COLOR_COMPONENT_VALUE_TOKEN_NAME))
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, Read};

    use crate::{color::Pixel, error::Error, image::ImageReader, image::PixelBuffer, Result};

    use super::{PPMImageReader, PPMParser, PPMTokenizer};

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection lost"))
        }
    }

    fn parse_ppm_tokens(token_string: &str) -> Result<PixelBuffer> {
        let mut bytes = token_string.as_bytes();
        let mut tokenizer = PPMTokenizer::new(&mut bytes);
        let mut parser = PPMParser::new(&mut tokenizer);
        parser.parse_tokens()
    }

    #[test]
    fn read_string() {
        let string = "P3\n# Example PPM image string\n3 2\n255\n255 0 0   0 255 0   0 0 255\n255 255 0  255 0 255  0 255 255";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.height(), 2);
        assert_eq!(image.width(), 3);
        assert_eq!(image.get(2, 0).unwrap(), Pixel::new(0, 0, 255));
        assert_eq!(image.get(0, 1).unwrap(), Pixel::new(255, 255, 0));
    }

    #[test]
    fn read_continuous_string() {
        let string = "P3 3 2 255 255 0 0   0 255 0   0 0 255 255 255 0  255 0 255  0 255 255";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn read_newline_string() {
        let string = "P3\n# Example PPM image newlines\n3\n2\n255\n255\n0\n0\n0\n255\n0\n0\n0\n255\n255\n255\n0\n255\n0\n255\n0\n255\n255";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn rescale_to_eight_bits() {
        let string = "P3 2 1 15 15 0 5  2 15 0";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.get(0, 0).unwrap(), Pixel::new(255, 0, 85));
        assert_eq!(image.get(1, 0).unwrap(), Pixel::new(34, 255, 0));
    }

    #[test]
    fn incomplete_pixel() {
        let string = "P3\n3 2 255 0 0 255 0 0";
        if let Err(Error::IncompletePixelParsed(n)) = parse_ppm_tokens(string) {
            if n != 2 {
                panic!("Number of parsed pixels should be 2, but was {}", n);
            }
            return;
        };
        panic!("Incomplete pixel not detected");
    }

    #[test]
    fn wrong_size() {
        let string = "P3\n3 2 255 0 0 255";
        if let Err(Error::MismatchOfSizeBetweenHeaderAndValues) = parse_ppm_tokens(string) {
            return;
        };
        panic!("Mismatch of size in header and actual pixels was not detected!");
    }

    #[test]
    fn wrong_magic_number() {
        let result = parse_ppm_tokens("P6 1 1 255 0 0 0");
        assert!(matches!(
            result,
            Err(Error::PPMFileDoesNotContainRequiredToken(_))
        ));
    }

    #[test]
    fn component_above_max_value() {
        let result = parse_ppm_tokens("P3 1 1 100 0 101 0");
        assert!(matches!(
            result,
            Err(Error::ColorComponentOutOfRange(101, 100))
        ));
    }

    #[test]
    fn empty_image() {
        let result = parse_ppm_tokens("P3 0 0 255");
        assert!(matches!(result, Err(Error::InvalidDimensions(0, 0))));
    }

    #[test]
    fn header_size_overflow_is_reported() {
        let result = parse_ppm_tokens("P3 4294967296 4294967296 255 0 0 0");
        assert!(matches!(
            result,
            Err(Error::MismatchOfSizeBetweenHeaderAndValues)
        ));
        let result = parse_ppm_tokens(&format!("P3 {} 2 255 0 0 0", usize::MAX));
        assert!(matches!(
            result,
            Err(Error::MismatchOfSizeBetweenHeaderAndValues)
        ));
    }

    #[test]
    fn read_error_is_not_mistaken_for_end_of_file() {
        let reader = "P3 1 1 255 0 ".as_bytes().chain(BrokenPipe);
        let result = PPMImageReader::new(reader).read_image();
        assert!(matches!(result, Err(Error::FailedToReadImage(_))));
    }
}
