use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidDimensions(usize, usize),
    EmptyImage,
    NonRectangular(usize),
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    InvalidArgument(&'static str, String),
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    IncompletePixelParsed(usize),
    MismatchOfSizeBetweenHeaderAndValues,
    ColorComponentOutOfRange(u16, u16),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadImage(std::io::Error),
    FailedToWriteImage(std::io::Error),
    MissingSecondaryImage(&'static str),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions(height, width) => {
                write!(
                    f,
                    "Image dimensions must be positive, but were {}x{} (height x width)",
                    height, width
                )
            }
            Self::EmptyImage => write!(f, "Can't have an empty image"),
            Self::NonRectangular(row) => {
                write!(
                    f,
                    "Pictures must be rectangles. Row {} differs in length from row 0",
                    row
                )
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "No pixel at ({}, {}) in an image of width {} and height {}",
                    x, y, width, height
                )
            }
            Self::InvalidArgument(name, reason) => {
                write!(f, "Invalid argument '{}': {}", name, reason)
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Image of at least {}x{} required, but got {}x{} (width x height)",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::IncompletePixelParsed(number_of_tokens_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Expected 3 components, but got {}.",
                    number_of_tokens_parsed
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels does not match the size provided in header"
                )
            }
            Self::ColorComponentOutOfRange(value, max) => {
                write!(
                    f,
                    "Color component {} is out of range for max value {}",
                    value, max
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadImage(error) => write!(f, "Failed to read image: {}", error),
            Self::FailedToWriteImage(error) => write!(f, "Failed to write image: {}", error),
            Self::MissingSecondaryImage(filter) => {
                write!(f, "Filter '{}' requires a secondary image", filter)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::FailedToReadImage(error)
            | Self::FailedToWriteImage(error) => Some(error),
            _ => None,
        }
    }
}
