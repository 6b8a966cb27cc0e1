use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use color::Pixel;
pub use error::Error;
pub use image::{
    reader::PPMImageReader, writer::PPMImageWriter, ImageReader, ImageWriter, PixelBuffer,
};
pub use operations::{Filter, FilterParameters};

mod cli;
mod color;
mod error;
mod image;
mod logger;
mod operations;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    secondary_file: Option<PathBuf>,
    filter: Filter,
    filter_parameters: FilterParameters,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

fn read_image_file(file_path: &Path) -> Result<PixelBuffer> {
    let input_file = open_input_file(file_path)?;
    let mut reader = PPMImageReader::new(BufReader::new(&input_file));
    let image = reader.read_image()?;
    log::info!(
        "Read {}x{} image from '{}'",
        image.width(),
        image.height(),
        file_path.display()
    );
    Ok(image)
}

/// Reads the input image, applies the selected filter and writes the result.
pub fn process_image(arguments: &Arguments) -> Result<()> {
    let image = read_image_file(&arguments.input_file)?;
    let secondary = match &arguments.secondary_file {
        Some(path) => Some(read_image_file(path)?),
        None => None,
    };
    if secondary.is_some() && !arguments.filter.needs_secondary_image() {
        log::warn!(
            "Secondary image is ignored by filter '{}'",
            arguments.filter.name()
        );
    }
    let output_image =
        arguments
            .filter
            .apply(image, &arguments.filter_parameters, secondary.as_ref())?;
    let output_file = open_output_file(&arguments.output_file)?;
    let mut writer = PPMImageWriter::new(BufWriter::new(&output_file), &output_image);
    writer.write_image()?;
    log::info!("Wrote result to '{}'", arguments.output_file.display());
    Ok(())
}
