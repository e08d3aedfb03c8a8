//! Numerical kernel: special functions, the normal distribution and root finders.
//!
//! - `special`: erf/erfc, gamma, factorial, binomial, permutation and checked variants
//! - `distributions`: Standard normal CDF, PDF and quantile
//! - `solvers`: Newton-Raphson and bisection

pub mod distributions;
pub mod solvers;
pub mod special;
