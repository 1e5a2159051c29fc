/// Sparse multivariate polynomials
pub mod poly;
