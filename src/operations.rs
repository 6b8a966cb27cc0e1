use clap::builder::PossibleValue;
use clap::ValueEnum;
use nanorand::WyRand;

use crate::color::Pixel;
use crate::error::Error;
use crate::image::PixelBuffer;

mod compositing;
mod geometric;
mod neighborhood;
mod per_pixel;
mod steganography;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    ZeroBlue,
    KeepOnlyBlue,
    Negate,
    Solarize,
    Grayscale,
    Tint,
    Posterize,
    MirrorVertical,
    MirrorRightToLeft,
    MirrorHorizontal,
    VerticalFlip,
    EdgeDetection,
    SimpleBlur,
    Blur,
    Glass,
    Chromakey,
    Encode,
    Decode,
}

impl ValueEnum for Filter {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::ZeroBlue,
            Self::KeepOnlyBlue,
            Self::Negate,
            Self::Solarize,
            Self::Grayscale,
            Self::Tint,
            Self::Posterize,
            Self::MirrorVertical,
            Self::MirrorRightToLeft,
            Self::MirrorHorizontal,
            Self::VerticalFlip,
            Self::EdgeDetection,
            Self::SimpleBlur,
            Self::Blur,
            Self::Glass,
            Self::Chromakey,
            Self::Encode,
            Self::Decode,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.name()))
    }
}

impl Filter {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ZeroBlue => "zero-blue",
            Self::KeepOnlyBlue => "keep-only-blue",
            Self::Negate => "negate",
            Self::Solarize => "solarize",
            Self::Grayscale => "grayscale",
            Self::Tint => "tint",
            Self::Posterize => "posterize",
            Self::MirrorVertical => "mirror-vertical",
            Self::MirrorRightToLeft => "mirror-right-to-left",
            Self::MirrorHorizontal => "mirror-horizontal",
            Self::VerticalFlip => "vertical-flip",
            Self::EdgeDetection => "edge-detection",
            Self::SimpleBlur => "simple-blur",
            Self::Blur => "blur",
            Self::Glass => "glass",
            Self::Chromakey => "chromakey",
            Self::Encode => "encode",
            Self::Decode => "decode",
        }
    }

    pub fn needs_secondary_image(&self) -> bool {
        matches!(self, Self::Chromakey | Self::Encode)
    }

    /// Runs the filter, returning the filtered image.
    pub fn apply(
        &self,
        mut image: PixelBuffer,
        parameters: &FilterParameters,
        secondary: Option<&PixelBuffer>,
    ) -> crate::Result<PixelBuffer> {
        log::info!(
            "Applying {} to image of {}x{}",
            self.name(),
            image.width(),
            image.height()
        );
        match self {
            Self::ZeroBlue => image.zero_blue(),
            Self::KeepOnlyBlue => image.keep_only_blue(),
            Self::Negate => image.negate(),
            Self::Solarize => {
                image.solarize(u16::try_from(parameters.threshold).unwrap_or(u16::MAX))
            }
            Self::Grayscale => image.grayscale(),
            Self::Tint => {
                let (red, green, blue) = parameters.tint;
                image.tint(red, green, blue)?
            }
            Self::Posterize => image.posterize(parameters.span)?,
            Self::MirrorVertical => image.mirror_vertical(),
            Self::MirrorRightToLeft => image.mirror_right_to_left(),
            Self::MirrorHorizontal => image.mirror_horizontal(),
            Self::VerticalFlip => image.vertical_flip(),
            Self::EdgeDetection => image.edge_detection(parameters.threshold),
            Self::SimpleBlur => return Ok(image.simple_blur()),
            Self::Blur => return image.blur(parameters.radius),
            Self::Glass => {
                let mut rng = WyRand::new_seed(parameters.seed);
                return Ok(image.glass_filter(parameters.radius, &mut rng));
            }
            Self::Chromakey => {
                let source = secondary.ok_or(Error::MissingSecondaryImage(self.name()))?;
                image.chromakey(source, parameters.background, parameters.threshold)
            }
            Self::Encode => {
                let message = secondary.ok_or(Error::MissingSecondaryImage(self.name()))?;
                image.encode(message)?
            }
            Self::Decode => return Ok(image.decode()),
        }
        Ok(image)
    }
}

/// Numeric settings shared by all filters, each filter reads the ones it needs.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParameters {
    /// solarize, edge detection and chromakey threshold
    pub threshold: u32,
    /// posterize step size
    pub span: u16,
    /// blur radius and glass filter distance
    pub radius: usize,
    /// red, green and blue tint factors
    pub tint: (f64, f64, f64),
    /// chromakey background color
    pub background: Pixel,
    /// glass filter seed
    pub seed: u64,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            threshold: 120,
            span: 64,
            radius: 2,
            tint: (1.0, 1.0, 1.0),
            background: Pixel::new(0, 255, 0),
            seed: 0,
        }
    }
}
