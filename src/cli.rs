use crate::color::Pixel;
use crate::operations::{Filter, FilterParameters};
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_filter_argument(command);
        let command = Self::register_secondary_file_argument(command);
        let command = Self::register_threshold_argument(command);
        let command = Self::register_span_argument(command);
        let command = Self::register_radius_argument(command);
        let command = Self::register_tint_argument(command);
        let command = Self::register_background_argument(command);
        Self::register_seed_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_filter_argument(command: Command) -> Command {
        command.arg(Self::create_filter_argument())
    }

    fn register_secondary_file_argument(command: Command) -> Command {
        command.arg(Self::create_secondary_file_argument())
    }

    fn register_threshold_argument(command: Command) -> Command {
        command.arg(Self::create_threshold_argument())
    }

    fn register_span_argument(command: Command) -> Command {
        command.arg(Self::create_span_argument())
    }

    fn register_radius_argument(command: Command) -> Command {
        command.arg(Self::create_radius_argument())
    }

    fn register_tint_argument(command: Command) -> Command {
        command.arg(Self::create_tint_argument())
    }

    fn register_background_argument(command: Command) -> Command {
        command.arg(Self::create_background_argument())
    }

    fn register_seed_argument(command: Command) -> Command {
        command.arg(Self::create_seed_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to PPM input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to PPM output file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_filter_argument() -> Arg {
        arg!(-f --filter <FILTER> "Filter to apply")
            .default_value("grayscale")
            .value_parser(value_parser!(Filter))
    }

    fn create_secondary_file_argument() -> Arg {
        arg!(-s --secondary <FILE> "PPM image used as chromakey source or as message to encode")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_threshold_argument() -> Arg {
        arg!(--threshold <THRESHOLD> "Threshold for solarize, edge detection and chromakey")
            .default_value("120")
            .value_parser(value_parser!(u32))
    }

    fn create_span_argument() -> Arg {
        arg!(--span <SPAN> "Step size for posterize")
            .default_value("64")
            .value_parser(value_parser!(u16).range(1..))
    }

    fn create_radius_argument() -> Arg {
        arg!(-r --radius <RADIUS> "Radius for blur and distance for the glass filter")
            .default_value("2")
            .value_parser(value_parser!(usize))
    }

    fn create_tint_argument() -> Arg {
        arg!(--tint <FACTORS> "Red, green and blue tint factors, comma separated")
            .default_value("1.0,1.0,1.0")
            .value_parser(parse_tint_factors)
    }

    fn create_background_argument() -> Arg {
        arg!(--background <COLOR> "Chromakey background color as r,g,b")
            .default_value("0,255,0")
            .value_parser(parse_color)
    }

    fn create_seed_argument() -> Arg {
        arg!(--seed <SEED> "Seed for the glass filter")
            .default_value("0")
            .value_parser(value_parser!(u64))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            secondary_file: Self::extract_secondary_file_argument(matches),
            filter: Self::extract_filter_argument(matches),
            filter_parameters: Self::extract_filter_parameters(matches),
        }
    }

    fn extract_filter_parameters(matches: &ArgMatches) -> FilterParameters {
        FilterParameters {
            threshold: Self::extract_threshold_argument(matches),
            span: Self::extract_span_argument(matches),
            radius: Self::extract_radius_argument(matches),
            tint: Self::extract_tint_argument(matches),
            background: Self::extract_background_argument(matches),
            seed: Self::extract_seed_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_secondary_file_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("secondary").cloned()
    }

    fn extract_filter_argument(matches: &ArgMatches) -> Filter {
        matches
            .get_one::<Filter>("filter")
            .expect("Filter must be provided, but was unset.")
            .to_owned()
    }

    fn extract_threshold_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("threshold")
            .expect("Threshold must be provided, but was unset.")
            .to_owned()
    }

    fn extract_span_argument(matches: &ArgMatches) -> u16 {
        matches
            .get_one::<u16>("span")
            .expect("Span must be provided, but was unset.")
            .to_owned()
    }

    fn extract_radius_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("radius")
            .expect("Radius must be provided, but was unset.")
            .to_owned()
    }

    fn extract_tint_argument(matches: &ArgMatches) -> (f64, f64, f64) {
        matches
            .get_one::<(f64, f64, f64)>("tint")
            .expect("Tint factors must be provided, but were unset.")
            .to_owned()
    }

    fn extract_background_argument(matches: &ArgMatches) -> Pixel {
        matches
            .get_one::<Pixel>("background")
            .expect("Background color must be provided, but was unset.")
            .to_owned()
    }

    fn extract_seed_argument(matches: &ArgMatches) -> u64 {
        matches
            .get_one::<u64>("seed")
            .expect("Seed must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_tint_factors(value: &str) -> Result<(f64, f64, f64), String> {
    let factors = value
        .split(',')
        .map(|factor| factor.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| format!("invalid tint factor in '{}': {}", value, e))?;
    match factors.as_slice() {
        &[red, green, blue] if factors.iter().all(|f| f.is_finite() && *f >= 0.0) => {
            Ok((red, green, blue))
        }
        &[_, _, _] => Err(String::from("tint factors must be non-negative numbers")),
        _ => Err(format!(
            "expected three comma separated factors, but got {}",
            factors.len()
        )),
    }
}

fn parse_color(value: &str) -> Result<Pixel, String> {
    value.parse()
}
