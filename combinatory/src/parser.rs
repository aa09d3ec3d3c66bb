use chumsky::prelude::*;
use thiserror::Error;

use crate::{
    env::Environment,
    term::{Term, TermRef},
};

pub trait SimpleParser<I: Clone + std::hash::Hash, O>: Parser<I, O, Error = Simple<I>> {}
impl<I: Clone + std::hash::Hash, O, T> SimpleParser<I, O> for T where
    T: Parser<I, O, Error = Simple<I>>
{
}

#[derive(Error, PartialEq, Eq, Debug)]
pub enum ParseError {
    #[error("Mismatched brackets")]
    MismatchedBrackets,
    #[error("Stray '=' in expression")]
    StrayAssignment,
    #[error("Invalid left hand of assignment")]
    InvalidLhs,
}

/// One input line: either a term to evaluate or a single-letter alias.
#[derive(Clone, derive_more::Display, Debug)]
pub enum Command {
    #[display(fmt = "{_0}")]
    Term(TermRef),
    #[display(fmt = "{_0}={_1}")]
    Alias(char, TermRef),
}

fn term_parser(env: &Environment) -> impl SimpleParser<char, TermRef> + '_ {
    recursive(move |term| {
        let atom = filter(|&c: &char| !matches!(c, '(' | ')' | '='))
            .map(move |name| env.resolve(name))
            .labelled("atom");
        let item = choice((atom, term.delimited_by(just('('), just(')')))).labelled("item");
        item.clone()
            .then(item.repeated())
            .foldl(|lhs, rhs| Term::Apply(lhs, rhs).into())
    })
    .labelled("term")
}

/// Parses one whitespace-free expression, resolving each atom against `env`
/// as it is read.
pub fn parse_term(env: &Environment, src: &str) -> Result<TermRef, ParseError> {
    term_parser(env)
        .then_ignore(end())
        .parse(src)
        .map_err(|_| ParseError::MismatchedBrackets)
}

/// Splits a line on `=` before any bracket parsing, so `=` never reaches the
/// expression grammar. The left hand is validated before the right hand is
/// parsed.
pub fn parse_command(env: &Environment, line: &str) -> Result<Command, ParseError> {
    let parts = line.split('=').collect::<Vec<_>>();
    match parts[..] {
        [expr] => Ok(Command::Term(parse_term(env, expr)?)),
        [lhs, rhs] => {
            let mut names = lhs.chars();
            match (names.next(), names.next()) {
                (Some(name), None) => Ok(Command::Alias(name, parse_term(env, rhs)?)),
                _ => Err(ParseError::InvalidLhs),
            }
        }
        _ => Err(ParseError::StrayAssignment),
    }
}
