use std::env::args_os;
use std::process::ExitCode;

use pixel_lab::{process_image, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match process_image(&arguments) {
        Ok(_) => {
            println!("Image processed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Processing failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
