//! Parses a lambda term and prints its structure.
//!
//! ```text
//! lambda-parser '(λx:Bool. x:Bool y:Bool)'
//! ```

use parser_example::lambda::LambdaParser;
use parser_example::{command, read_input};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let matches = command("lambda-parser", "Parses a lambda term and prints its structure").get_matches();
    let input = match read_input(&matches) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: cannot read input: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let parser = match LambdaParser::new() {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let parsed = parser.parse(&input).and_then(|result| {
        let span = result.span;
        result.into_value().map(|term| (term, span))
    });
    match parsed {
        Ok((term, span)) => {
            println!("{}\n==> {:?} at {}", input.trim(), term, span);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.report(&input));
            ExitCode::FAILURE
        }
    }
}
