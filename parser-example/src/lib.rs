//! Grammars built on `parser-framework`.
//!
//! - [`calculator`]: arithmetic evaluated while parsing
//! - [`lambda`]: simply-typed lambda terms
//! - [`pi`]: pi-calculus processes

pub mod calculator;
pub mod lambda;
pub mod pi;

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{self, Read};

/// The command line shared by the example binaries: an optional `INPUT...`
/// whose words are joined by spaces.
pub fn command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .version(env!("CARGO_PKG_VERSION"))
        .about(about)
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Text to parse; read from stdin when omitted")
                .num_args(1..)
                .action(ArgAction::Append)
                .allow_hyphen_values(true)
                .index(1),
        )
}

/// The text given on the command line, if any.
pub fn input_argument(matches: &ArgMatches) -> Option<String> {
    let words: Vec<&str> = matches
        .get_many::<String>("input")?
        .map(String::as_str)
        .collect();
    Some(words.join(" "))
}

/// Reads the text to parse: the command-line input, or all of stdin when
/// there is none.
pub fn read_input(matches: &ArgMatches) -> io::Result<String> {
    if let Some(input) = input_argument(matches) {
        return Ok(input);
    }
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}
