use std::env::args_os;

use directional_blur::{blur_ppm_file, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match blur_ppm_file(&arguments) {
        Ok(_) => println!("Blur successful"),
        Err(e) => {
            eprintln!("Blur failed because of: {}", e);
            std::process::exit(1);
        }
    }
}
