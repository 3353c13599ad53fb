use std::{
    fmt,
    io::{self, Read, Write},
    ops::{Add, Neg, Sub},
};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use bytes::{Buf, BufMut};
use smallvec::{smallvec, SmallVec};

use crate::integer::Integer;
use crate::parser::ParseError;

use super::{Exponent, Term, INLINED_TERMS};

/// Error for a term exponent outside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExponentError {
    Negative(i64),
    TooLarge(i64),
}

impl fmt::Display for ExponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExponentError::Negative(e) => write!(f, "Exponent {} is negative", e),
            ExponentError::TooLarge(e) => write!(f, "Exponent {} does not fit in 32 bits", e),
        }
    }
}

impl std::error::Error for ExponentError {}

/// A sparse univariate polynomial with integer coefficients.
///
/// The term sequence is canonical: sorted by strictly descending exponent,
/// exponents pairwise distinct, no zero coefficients. The empty sequence is
/// the zero polynomial. Every public operation re-establishes this form
/// before returning.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Polynomial {
    terms: SmallVec<[Term; INLINED_TERMS]>,
}

impl Polynomial {
    /// Constructs the zero polynomial.
    #[inline]
    pub fn new() -> Self {
        Polynomial {
            terms: SmallVec::new(),
        }
    }

    /// Constructs a constant polynomial. A zero constant yields the zero
    /// polynomial.
    pub fn constant(coeff: Integer) -> Self {
        if coeff.is_zero() {
            return Self::new();
        }

        Polynomial {
            terms: smallvec![Term {
                coefficient: coeff,
                exponent: 0,
            }],
        }
    }

    /// Constructs a polynomial with a single term.
    pub fn monomial(coeff: Integer, exponent: Exponent) -> Self {
        if coeff.is_zero() {
            return Self::new();
        }

        Polynomial {
            terms: smallvec![Term {
                coefficient: coeff,
                exponent,
            }],
        }
    }

    /// Parse a polynomial from the space-separated term format, where each
    /// term is `<int>` or `<int>x^<int>`. See [`crate::parser`].
    pub fn parse(input: &str) -> Result<Polynomial, ParseError> {
        crate::parser::parse(input)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if the polynomial is constant, including zero.
    #[inline]
    pub fn is_constant(&self) -> bool {
        match self.terms.as_slice() {
            [] => true,
            [t] => t.exponent == 0,
            _ => false,
        }
    }

    #[inline]
    pub fn nterms(&self) -> usize {
        self.terms.len()
    }

    /// Returns the stored terms, highest exponent first.
    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The exponent of the highest stored term. The zero polynomial reports
    /// degree 0, indistinguishable from a constant.
    pub fn degree(&self) -> Exponent {
        if self.is_zero() {
            return 0; // TODO: return None?
        }

        self.terms[0].exponent
    }

    /// Get the leading coefficient.
    pub fn lcoeff(&self) -> Integer {
        self.terms
            .first()
            .map(|t| t.coefficient.clone())
            .unwrap_or_else(Integer::zero)
    }

    /// Returns the coefficient of the term with the given exponent, or zero
    /// if no such term is stored.
    pub fn coefficient(&self, exponent: Exponent) -> Integer {
        match self.find(exponent) {
            Ok(i) => self.terms[i].coefficient.clone(),
            Err(_) => Integer::zero(),
        }
    }

    /// Incorporates one term into the polynomial.
    ///
    /// A zero coefficient leaves the polynomial untouched. If a term with
    /// the same exponent exists, the coefficients are merged; a merge that
    /// cancels to zero removes the term. A negative exponent, or one beyond
    /// the storage width, is an error and the polynomial is not modified.
    pub fn add_term(&mut self, coefficient: Integer, exponent: i64) -> Result<(), ExponentError> {
        if exponent < 0 {
            return Err(ExponentError::Negative(exponent));
        }
        let e = Exponent::try_from(exponent).map_err(|_| ExponentError::TooLarge(exponent))?;

        self.merge_term(coefficient, e);
        Ok(())
    }

    /// Insert-or-merge on the sorted sequence. The caller guarantees a
    /// representable exponent.
    fn merge_term(&mut self, coefficient: Integer, exponent: Exponent) {
        if coefficient.is_zero() {
            return;
        }

        // appending at one of the ends is the common case
        if self.terms.last().map_or(true, |t| exponent < t.exponent) {
            self.terms.push(Term {
                coefficient,
                exponent,
            });
            return;
        }

        if exponent > self.terms[0].exponent {
            self.terms.insert(
                0,
                Term {
                    coefficient,
                    exponent,
                },
            );
            return;
        }

        match self.find(exponent) {
            Ok(i) => {
                self.terms[i].coefficient += &coefficient;
                if self.terms[i].coefficient.is_zero() {
                    self.terms.remove(i);
                }
            }
            Err(i) => self.terms.insert(
                i,
                Term {
                    coefficient,
                    exponent,
                },
            ),
        }
    }

    /// Binary search on the descending exponent order.
    #[inline]
    fn find(&self, exponent: Exponent) -> Result<usize, usize> {
        self.terms
            .binary_search_by(|t| t.exponent.cmp(&exponent).reverse())
    }

    /// Evaluates the polynomial at `x` using real exponentiation. The zero
    /// polynomial evaluates to 0.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.terms
            .iter()
            .map(|t| t.coefficient.to_f64() * x.powf(f64::from(t.exponent)))
            .sum()
    }

    /// Write to a binary stream. The format is the byte-length first,
    /// followed by the term data.
    pub fn write<W: Write>(&self, mut dest: W) -> Result<(), io::Error> {
        let mut payload = Vec::new();
        payload.put_u64_le(self.terms.len() as u64);
        for t in &self.terms {
            t.coefficient.write_packed(&mut payload);
            payload.put_u32_le(t.exponent);
        }

        dest.write_u64::<LittleEndian>(payload.len() as u64)?;
        dest.write_all(&payload)
    }

    /// Read a polynomial written with [`write`](Self::write) from a binary
    /// stream. The stored term sequence must satisfy the canonical-form
    /// invariants; anything else is reported as invalid data.
    pub fn read<R: Read>(mut source: R) -> Result<Polynomial, io::Error> {
        fn invalid(msg: &str) -> io::Error {
            io::Error::new(io::ErrorKind::InvalidData, msg.to_owned())
        }

        let size = source.read_u64::<LittleEndian>()?;
        let mut payload = vec![0; size as usize];
        source.read_exact(&mut payload)?;

        let mut data = payload.as_slice();
        if data.remaining() < 8 {
            return Err(invalid("Missing term count"));
        }
        let nterms = data.get_u64_le();

        let mut poly = Polynomial::new();
        for _ in 0..nterms {
            let coefficient = Integer::read_packed(&mut data)?;
            if data.remaining() < 4 {
                return Err(invalid("Missing exponent"));
            }
            let exponent = data.get_u32_le();

            if coefficient.is_zero() {
                return Err(invalid("Zero coefficient in term stream"));
            }
            if poly.terms.last().map_or(false, |t| t.exponent <= exponent) {
                return Err(invalid("Term stream not sorted by descending exponent"));
            }

            poly.terms.push(Term {
                coefficient,
                exponent,
            });
        }

        if data.has_remaining() {
            return Err(invalid("Trailing data after term stream"));
        }

        Ok(poly)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for t in &self.terms {
            if first {
                first = false;
                if t.coefficient.is_negative() {
                    write!(f, "-")?;
                }
            } else if t.coefficient.is_negative() {
                write!(f, " -")?;
            } else {
                write!(f, " +")?;
            }

            let magnitude = t.coefficient.abs();
            if t.exponent == 0 || !magnitude.is_one() {
                write!(f, "{}", magnitude)?;
            }

            if t.exponent > 0 {
                write!(f, "x^{}", t.exponent)?;
            }
        }

        Ok(())
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, other: Polynomial) -> Polynomial {
        let mut result = Polynomial::new();
        for t in self.terms {
            result.merge_term(t.coefficient, t.exponent);
        }
        for t in other.terms {
            result.merge_term(t.coefficient, t.exponent);
        }
        result
    }
}

impl<'a, 'b> Add<&'a Polynomial> for &'b Polynomial {
    type Output = Polynomial;

    fn add(self, other: &'a Polynomial) -> Polynomial {
        self.clone().add(other.clone())
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, other: Polynomial) -> Polynomial {
        self.add(other.neg())
    }
}

impl<'a, 'b> Sub<&'a Polynomial> for &'b Polynomial {
    type Output = Polynomial;

    fn sub(self, other: &'a Polynomial) -> Polynomial {
        self.clone().add(other.clone().neg())
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(mut self) -> Polynomial {
        // Negate coefficients of all terms.
        for t in &mut self.terms {
            t.coefficient = -&t.coefficient;
        }
        self
    }
}
