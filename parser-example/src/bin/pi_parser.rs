//! Parses a pi-calculus process.
//!
//! ```text
//! pi-parser 'new(a) new(b) end || 0'
//! ```

use parser_example::pi::PiParser;
use parser_example::{command, read_input};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let matches = command("pi-parser", "Parses a pi-calculus process").get_matches();
    let input = match read_input(&matches) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: cannot read input: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let parser = match PiParser::new() {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match parser.parse_process(&input) {
        Ok(process) => {
            println!("Parsing: '{}'", input.trim_end());
            println!("Gives: {}", process);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.report(&input));
            ExitCode::FAILURE
        }
    }
}
