//! Evaluates an arithmetic expression given as arguments or on stdin.
//!
//! ```text
//! calc-parser '3 + 4 × -6'
//! echo '(3 × 6) / (2 × 3)' | calc-parser
//! ```

use parser_example::calculator::Calculator;
use parser_example::{command, read_input};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let matches = command("calc-parser", "Evaluates an arithmetic expression").get_matches();
    let input = match read_input(&matches) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: cannot read input: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let calculator = match Calculator::new() {
        Ok(calculator) => calculator,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match calculator.evaluate(&input) {
        Ok(value) => {
            println!("{} = {}", input.trim(), value);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.report(&input));
            ExitCode::FAILURE
        }
    }
}
