//! A sparse univariate polynomial library with exact integer coefficients.
//!
//! Polynomials are kept in canonical form at all times: a sequence of
//! non-zero terms with pairwise distinct exponents, sorted by descending
//! exponent. Construction, term insertion, addition, evaluation and the
//! round-trippable text format all preserve that form.
//!
//! For example:
//!
//! ```
//! use unipoly::poly::polynomial::Polynomial;
//!
//! let p = Polynomial::parse("3x^2 -2x^1 -4").unwrap();
//! let q = Polynomial::parse("2x^2 +2x^1 +4").unwrap();
//!
//! assert_eq!((&p + &q).to_string(), "5x^2");
//! ```

pub mod integer;
pub mod parser;
pub mod poly;
