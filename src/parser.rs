//! Construction of polynomials from their textual term format.
//!
//! The input is a sequence of terms separated by single spaces. Each term is
//! either a bare integer constant or `<coefficient>x^<exponent>`; a
//! coefficient of magnitude one may be left implicit (`x^2`, `-x^2`), which
//! makes the canonical rendering of a polynomial parse back to an equal
//! polynomial. Terms may come in any order and may repeat: they are merged
//! into canonical form as they are read.

use std::{fmt, str::FromStr};

use rug::{Complete, Integer as ArbitraryPrecisionInteger};

use crate::integer::Integer;
use crate::poly::polynomial::{ExponentError, Polynomial};

/// Error raised when the textual term format cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A coefficient or exponent substring is not a valid integer.
    Number { token: String },
    /// A parsed exponent is outside the supported range.
    Exponent(ExponentError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Number { token } => write!(f, "Could not parse number: {}", token),
            ParseError::Exponent(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Number { .. } => None,
            ParseError::Exponent(e) => Some(e),
        }
    }
}

impl From<ExponentError> for ParseError {
    fn from(e: ExponentError) -> ParseError {
        ParseError::Exponent(e)
    }
}

/// Parses the space-separated term format and builds the polynomial by
/// merging each term in reading order.
pub fn parse(input: &str) -> Result<Polynomial, ParseError> {
    let mut poly = Polynomial::new();

    for term in input.split(' ') {
        let (coefficient, exponent) = match term.split_once("x^") {
            Some((c, e)) => (parse_coefficient(c)?, parse_exponent(e)?),
            None => (parse_integer(term)?, 0),
        };

        poly.add_term(coefficient, exponent)?;
    }

    Ok(poly)
}

/// The coefficient in front of a power of `x`. Magnitude-one coefficients
/// print without the digit, so the bare sign forms stand for 1 and -1.
fn parse_coefficient(token: &str) -> Result<Integer, ParseError> {
    match token {
        "" | "+" => Ok(Integer::one()),
        "-" => Ok(-Integer::one()),
        _ => parse_integer(token),
    }
}

fn parse_integer(token: &str) -> Result<Integer, ParseError> {
    if let Ok(n) = token.parse::<i64>() {
        return Ok(Integer::new(n));
    }

    match ArbitraryPrecisionInteger::parse(token) {
        Ok(x) => Ok(Integer::from_large(x.complete())),
        Err(_) => Err(ParseError::Number {
            token: token.to_owned(),
        }),
    }
}

fn parse_exponent(token: &str) -> Result<i64, ParseError> {
    token.parse::<i64>().map_err(|_| ParseError::Number {
        token: token.to_owned(),
    })
}

impl FromStr for Polynomial {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod test {
    use crate::integer::Integer;
    use crate::poly::polynomial::{ExponentError, Polynomial};

    use super::ParseError;

    #[test]
    fn constants_and_powers() {
        let p = Polynomial::parse("-4x^3 +3x^1 -5").unwrap();
        assert_eq!(p.degree(), 3);
        assert_eq!(p.coefficient(1), Integer::new(3));
        assert_eq!(p.coefficient(0), Integer::new(-5));
        assert_eq!(p.evaluate(2.0), -31.0);
    }

    #[test]
    fn input_order_does_not_matter() {
        let p = Polynomial::parse("3 2x^1").unwrap();
        assert_eq!(p.to_string(), "2x^1 +3");

        let q = Polynomial::parse("2x^1 3").unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn repeated_exponents_merge() {
        let p = Polynomial::parse("1x^2 1x^2").unwrap();
        assert_eq!(p.to_string(), "2x^2");

        let q = Polynomial::parse("5x^3 -5x^3").unwrap();
        assert!(q.is_zero());
    }

    #[test]
    fn implicit_unit_coefficients() {
        let p = Polynomial::parse("x^2 -x^1 +1").unwrap();
        assert_eq!(p.coefficient(2), Integer::one());
        assert_eq!(p.coefficient(1), Integer::new(-1));
        assert_eq!(p.to_string(), "x^2 -x^1 +1");
    }

    #[test]
    fn malformed_input_is_rejected() {
        for input in ["", " ", "3  4", "ax^2", "3x^b", "3x^", "1.5", "3x^2y^3"] {
            assert!(
                matches!(Polynomial::parse(input), Err(ParseError::Number { .. })),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn negative_exponent_in_source_text() {
        assert_eq!(
            Polynomial::parse("4x^-1"),
            Err(ParseError::Exponent(ExponentError::Negative(-1)))
        );
    }

    #[test]
    fn coefficients_beyond_i64() {
        let p = Polynomial::parse("123456789012345678901234567890x^2 -1").unwrap();
        assert!(matches!(p.coefficient(2), Integer::Large(_)));
        assert_eq!(
            p.to_string(),
            "123456789012345678901234567890x^2 -1"
        );
    }

    #[test]
    fn display_round_trip() {
        let cases = [
            "0",
            "-5x^3 +3x^2 +2x^1 -4",
            "x^2 -x^1 +1",
            "-9223372036854775809x^7 +42",
        ];

        for s in cases {
            let p = Polynomial::parse(s).unwrap();
            assert_eq!(Polynomial::parse(&p.to_string()).unwrap(), p);
            assert_eq!(p.to_string(), s);
        }
    }

    #[test]
    fn from_str() {
        let p: Polynomial = "5x^2 +4x^1 -2".parse().unwrap();
        assert_eq!(p.evaluate(2.0), 26.0);
    }
}
