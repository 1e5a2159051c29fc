use std::str::FromStr;

use thiserror::Error;

use crate::util::{parse_signed, parse_unsigned};

use super::nested::{Mono, Poly};

#[derive(Clone, Debug, Error, Eq, PartialEq, Hash)]
pub enum ParseError {
    #[error("Unexpected end of input, expected {expected}")]
    End { expected: &'static str },
    #[error("Unexpected '{found}' at position {pos}, expected {expected}")]
    Char {
        found: char,
        pos: usize,
        expected: &'static str,
    },
    #[error("Coefficient {0} out of range")]
    Coeff(String),
    #[error("Exponent {0} out of range")]
    Exp(String),
}

/// Parse a polynomial
///
/// The grammar is
/// ```text
/// poly := coeff | mono ('+' mono)*
/// mono := '(' poly ',' exp ')'
/// ```
/// where `coeff` is a signed 64-bit integer and `exp` an unsigned 32-bit
/// integer. No whitespace is allowed anywhere.
impl FromStr for Poly {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { src: s, pos: 0 };
        let poly = parser.poly()?;
        if parser.pos < s.len() {
            return Err(parser.unexpected("end of input"));
        }
        Ok(poly)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        // `pos` only ever advances past ASCII characters
        match self.src[self.pos..].chars().next() {
            Some(found) => ParseError::Char {
                found,
                pos: self.pos,
                expected,
            },
            None => ParseError::End { expected },
        }
    }

    fn expect(&mut self, c: u8, expected: &'static str) -> Result<(), ParseError> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn poly(&mut self) -> Result<Poly, ParseError> {
        if self.peek() != Some(b'(') {
            return self.coeff().map(Poly::from_coeff);
        }
        let mut monos = vec![self.mono()?];
        while self.peek() == Some(b'+') {
            self.pos += 1;
            monos.push(self.mono()?);
        }
        Ok(Poly::from_monos(monos))
    }

    fn mono(&mut self) -> Result<Mono, ParseError> {
        self.expect(b'(', "'('")?;
        let poly = self.poly()?;
        self.expect(b',', "','")?;
        let exp = self.exp()?;
        self.expect(b')', "')'")?;
        Ok(Mono::new(poly, exp))
    }

    fn coeff(&mut self) -> Result<i64, ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        self.digits("coefficient")?;
        let coeff = &self.src[start..self.pos];
        parse_signed(coeff).ok_or_else(|| ParseError::Coeff(coeff.to_owned()))
    }

    fn exp(&mut self) -> Result<u32, ParseError> {
        let start = self.pos;
        self.digits("exponent")?;
        let exp = &self.src[start..self.pos];
        parse_unsigned(exp)
            .and_then(|e| u32::try_from(e).ok())
            .ok_or_else(|| ParseError::Exp(exp.to_owned()))
    }

    fn digits(&mut self, expected: &'static str) -> Result<(), ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.pos == start {
            Err(self.unexpected(expected))
        } else {
            Ok(())
        }
    }
}
