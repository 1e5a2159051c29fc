//! Stack-based calculator in reverse polish notation
//!
//! Each input line is either a polynomial, which is pushed onto the
//! stack, or a command operating on the stack. Lines starting with `#`
//! and empty lines are ignored. Errors are reported per line as
//! `ERROR <line> <message>`.
mod command;
mod stack;

pub use command::Command;
pub use stack::PolyStack;

use std::{
    borrow::Cow,
    fmt::{self, Display},
    io::{self, BufRead, Write},
};

use log::{debug, trace};
use num_traits::Zero;
use thiserror::Error;

use crate::algebra::poly::{ParseError, Poly};

#[derive(Clone, Debug, Error, Eq, PartialEq, Hash)]
pub enum CalcError {
    #[error("WRONG COMMAND")]
    WrongCommand,
    #[error("WRONG POLY")]
    WrongPoly(#[source] ParseError),
    #[error("STACK UNDERFLOW")]
    StackUnderflow,
    #[error("DEG BY WRONG VARIABLE")]
    DegByWrongVariable,
    #[error("AT WRONG VALUE")]
    AtWrongValue,
    #[error("COMPOSE WRONG PARAMETER")]
    ComposeWrongParameter,
}

/// Result of a command that is printed
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Output<'a> {
    Flag(bool),
    Degree(i64),
    Poly(&'a Poly),
}

impl Display for Output<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Output::Flag(b) => write!(f, "{}", u8::from(*b)),
            Output::Degree(d) => write!(f, "{d}"),
            Output::Poly(p) => write!(f, "{p}"),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Calculator {
    stack: PolyStack,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(&self) -> &PolyStack {
        &self.stack
    }

    /// Process all lines of `input`
    ///
    /// Results are written to `out`, errors to `err`.
    pub fn run(
        &mut self,
        mut input: impl BufRead,
        mut out: impl Write,
        mut err: impl Write,
    ) -> io::Result<()> {
        let mut line = Vec::new();
        let mut line_nr = 0usize;
        loop {
            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line_nr += 1;
            match self.exec_line(&line) {
                Ok(Some(res)) => writeln!(out, "{res}")?,
                Ok(None) => {}
                Err(e) => {
                    debug!("Line {line_nr}: {e:?}");
                    writeln!(err, "ERROR {line_nr} {e}")?
                }
            }
        }
        out.flush()?;
        err.flush()
    }

    /// Process a single line, with or without the terminating newline
    pub fn exec_line(&mut self, line: &[u8]) -> Result<Option<Output<'_>>, CalcError> {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        match line.first() {
            None | Some(b'#') => Ok(None),
            Some(b) if b.is_ascii_alphabetic() => {
                if line.contains(&0) {
                    return Err(CalcError::WrongCommand);
                }
                let cmd: Command = decode(line).parse()?;
                self.exec(cmd)
            }
            Some(_) => {
                let poly: Poly = decode(line).parse().map_err(CalcError::WrongPoly)?;
                trace!("Push {poly}");
                self.stack.push(poly);
                Ok(None)
            }
        }
    }

    pub fn exec(&mut self, cmd: Command) -> Result<Option<Output<'_>>, CalcError> {
        trace!("Execute {cmd:?}");
        let stack = &mut self.stack;
        let res = match cmd {
            Command::Zero => {
                stack.push(Poly::zero());
                None
            }
            Command::IsCoeff => Some(Output::Flag(stack.top()?.is_coeff())),
            Command::IsZero => Some(Output::Flag(stack.top()?.is_zero())),
            Command::Clone => {
                let top = stack.top()?.clone();
                stack.push(top);
                None
            }
            Command::Add => {
                let (top, second) = stack.pop_two()?;
                stack.push(top + second);
                None
            }
            Command::Mul => {
                let (top, second) = stack.pop_two()?;
                stack.push(top * second);
                None
            }
            Command::Neg => {
                let top = stack.pop()?;
                stack.push(-top);
                None
            }
            Command::Sub => {
                let (top, second) = stack.pop_two()?;
                stack.push(top - second);
                None
            }
            Command::IsEq => {
                let (top, second) = stack.top_two()?;
                Some(Output::Flag(top == second))
            }
            Command::Deg => Some(Output::Degree(stack.top()?.degree())),
            Command::DegBy(var) => Some(Output::Degree(stack.top()?.degree_by(var))),
            Command::At(x) => {
                let top = stack.pop()?;
                stack.push(top.at(x));
                None
            }
            Command::Print => Some(Output::Poly(stack.top()?)),
            Command::Pop => {
                stack.pop()?;
                None
            }
            Command::Compose(k) => {
                stack.compose(k)?;
                None
            }
        };
        Ok(res)
    }
}

// invalid UTF-8 never matches the grammar, so a lossy conversion suffices
fn decode(line: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(line)
}
