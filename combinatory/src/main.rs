use anyhow::Result;
use util::repl;

use crate::{env::Environment, eval::reductions, parser::Command};

mod env;
mod eval;
mod parser;
mod term;

#[derive(Default)]
struct Repl {
    env: Environment,
}

impl Repl {
    fn execute(&mut self, line: &str) -> Result<(), parser::ParseError> {
        match parser::parse_command(&self.env, line)? {
            Command::Term(term) => {
                for term in reductions(term) {
                    println!("{term}");
                }
            }
            Command::Alias(name, term) => {
                let term = reductions(term).into_normal_form();
                println!("{name}={term}");
                self.env.define(name, term);
            }
        }
        Ok(())
    }
}

impl repl::Repl for Repl {
    type Error = anyhow::Error;
    const PROMPT: &'static str = "> ";
    const HISTORY: Option<&'static str> = Some("/tmp/combinatory.history");

    fn evaluate(&mut self, input: String) -> Result<(), Self::Error> {
        let line = input.split_whitespace().collect::<String>();
        if line.is_empty() {
            return Ok(());
        }
        if let Err(e) = self.execute(&line) {
            eprintln!("Error while parsing: {e}");
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("Hi, this is a combinatory logic REPL.");
    println!();
    repl::start_repl(Repl::default())?;
    Ok(())
}
