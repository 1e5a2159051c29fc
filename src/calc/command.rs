use std::str::FromStr;

use crate::util::{is_space, parse_signed, parse_unsigned};

use super::CalcError;

/// Calculator command
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Command {
    /// Push the zero polynomial
    Zero,
    /// Print whether the top is a constant
    IsCoeff,
    /// Print whether the top is zero
    IsZero,
    /// Push a copy of the top
    Clone,
    Add,
    Mul,
    Neg,
    /// Replace the two topmost polynomials by top minus second
    Sub,
    /// Print whether the two topmost polynomials are equal
    IsEq,
    /// Print the total degree of the top
    Deg,
    /// Print the degree of the top in the given variable
    DegBy(u64),
    /// Replace the top by its value at the given point
    At(i64),
    Print,
    Pop,
    /// Substitute the polynomials below the top for its variables
    Compose(u64),
}

impl FromStr for Command {
    type Err = CalcError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        use Command::*;
        let cmd = match line {
            "ZERO" => Zero,
            "IS_COEFF" => IsCoeff,
            "IS_ZERO" => IsZero,
            "CLONE" => Clone,
            "ADD" => Add,
            "MUL" => Mul,
            "NEG" => Neg,
            "SUB" => Sub,
            "IS_EQ" => IsEq,
            "DEG" => Deg,
            "PRINT" => Print,
            "POP" => Pop,
            _ => {
                if let Some(arg) = line.strip_prefix("DEG_BY") {
                    DegBy(parse_arg(arg, parse_unsigned, CalcError::DegByWrongVariable)?)
                } else if let Some(arg) = line.strip_prefix("AT") {
                    At(parse_arg(arg, parse_signed, CalcError::AtWrongValue)?)
                } else if let Some(arg) = line.strip_prefix("COMPOSE") {
                    Compose(parse_arg(
                        arg,
                        parse_unsigned,
                        CalcError::ComposeWrongParameter,
                    )?)
                } else {
                    return Err(CalcError::WrongCommand);
                }
            }
        };
        Ok(cmd)
    }
}

// argument following a command keyword, separated by exactly one space
fn parse_arg<T>(
    arg: &str,
    parse: impl Fn(&str) -> Option<T>,
    err: CalcError,
) -> Result<T, CalcError> {
    match arg.as_bytes().first() {
        None => Err(err),
        Some(&b) if !is_space(b) => Err(CalcError::WrongCommand),
        Some(b' ') => parse(&arg[1..]).ok_or(err),
        Some(_) => Err(err),
    }
}
