pub mod ppm;

pub use ppm::PPMImageReader;
