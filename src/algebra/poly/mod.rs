mod compose;
mod eval;
mod nested;
mod parse;

pub use nested::{FmtPoly, Mono, Poly};
pub use parse::ParseError;
