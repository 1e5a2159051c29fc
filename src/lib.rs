/// Utilities for tests and benchmarks
#[doc(hidden)]
pub mod _test_util;
pub mod traits;
mod util;

/// Polynomial algebra
pub mod algebra;

#[cfg(feature = "calc")]
pub mod calc;

pub use algebra::poly::{Mono, ParseError, Poly};
