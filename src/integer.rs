use std::{
    fmt::{Display, Formatter},
    io,
    ops::{Add, AddAssign, Neg},
};

use bytes::{Buf, BufMut};
use rug::{integer::Order, Integer as ArbitraryPrecisionInteger};

const NATURAL_ID: u8 = 1;
const LARGE_ID: u8 = 2;

/// An integer coefficient that stores machine-sized values inline and spills
/// to an arbitrary-precision integer when `i64` overflows.
///
/// Canonical form: a `Large` value never fits in `i64`. Every operation
/// downgrades results that fit, so derived equality and hashing are exact.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Integer {
    Natural(i64),
    Large(ArbitraryPrecisionInteger),
}

impl Integer {
    #[inline]
    pub fn new(num: i64) -> Integer {
        Integer::Natural(num)
    }

    /// Wrap an arbitrary-precision integer, downgrading it when it fits in
    /// the machine-sized variant.
    pub fn from_large(r: ArbitraryPrecisionInteger) -> Integer {
        if let Some(n) = r.to_i64() {
            Integer::Natural(n)
        } else {
            Integer::Large(r)
        }
    }

    #[inline]
    pub fn zero() -> Integer {
        Integer::Natural(0)
    }

    #[inline]
    pub fn one() -> Integer {
        Integer::Natural(1)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        // a Large value is out of the i64 range and cannot be zero
        matches!(self, Integer::Natural(0))
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        matches!(self, Integer::Natural(1))
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Large(r) => r.cmp0() == std::cmp::Ordering::Less,
        }
    }

    pub fn abs(&self) -> Integer {
        match self {
            Integer::Natural(n) => {
                if *n == i64::MIN {
                    Integer::Large(ArbitraryPrecisionInteger::from(*n).abs())
                } else {
                    Integer::Natural(n.abs())
                }
            }
            Integer::Large(r) => Integer::Large(r.clone().abs()),
        }
    }

    /// Convert to the nearest representable `f64`.
    pub fn to_f64(&self) -> f64 {
        match self {
            Integer::Natural(n) => *n as f64,
            Integer::Large(r) => r.to_f64(),
        }
    }

    /// Append the packed byte form to `dest`: a tag byte followed by either
    /// the little-endian `i64` or a sign/length-prefixed digit string.
    pub fn write_packed(&self, dest: &mut Vec<u8>) {
        match self {
            Integer::Natural(n) => {
                dest.put_u8(NATURAL_ID);
                dest.put_i64_le(*n);
            }
            Integer::Large(r) => {
                let digits = r.to_digits::<u8>(Order::Lsf);
                dest.put_u8(LARGE_ID);
                dest.put_u8(if r.cmp0() == std::cmp::Ordering::Less { 1 } else { 0 });
                dest.put_u32_le(digits.len() as u32);
                dest.put_slice(&digits);
            }
        }
    }

    /// Read one packed integer from `source`.
    pub fn read_packed<B: Buf>(source: &mut B) -> Result<Integer, io::Error> {
        fn eof() -> io::Error {
            io::Error::new(io::ErrorKind::UnexpectedEof, "Packed integer cut short")
        }

        if source.remaining() < 1 {
            return Err(eof());
        }

        match source.get_u8() {
            NATURAL_ID => {
                if source.remaining() < 8 {
                    return Err(eof());
                }
                Ok(Integer::Natural(source.get_i64_le()))
            }
            LARGE_ID => {
                if source.remaining() < 5 {
                    return Err(eof());
                }
                let negative = source.get_u8() != 0;
                let len = source.get_u32_le() as usize;
                if source.remaining() < len {
                    return Err(eof());
                }
                let mut digits = vec![0; len];
                source.copy_to_slice(&mut digits);

                let mut r = ArbitraryPrecisionInteger::from_digits(&digits, Order::Lsf);
                if negative {
                    r = -r;
                }
                Ok(Integer::from_large(r))
            }
            id => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown coefficient tag {}", id),
            )),
        }
    }
}

impl From<i64> for Integer {
    fn from(num: i64) -> Integer {
        Integer::Natural(num)
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Integer::Natural(n) => n.fmt(f),
            Integer::Large(r) => r.fmt(f),
        }
    }
}

impl<'a, 'b> Add<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn add(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_add(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(
                        ArbitraryPrecisionInteger::from(*n1) + ArbitraryPrecisionInteger::from(*n2),
                    )
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => {
                Integer::from_large(ArbitraryPrecisionInteger::from(*n1) + r2)
            }
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from_large((r1 + r2).into()),
        }
    }
}

impl AddAssign<&Integer> for Integer {
    fn add_assign(&mut self, rhs: &Integer) {
        *self = &*self + rhs;
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        match self {
            Integer::Natural(n) => {
                if let Some(num) = n.checked_neg() {
                    Integer::Natural(num)
                } else {
                    Integer::Large(-ArbitraryPrecisionInteger::from(*n))
                }
            }
            // negating the magnitude 2^63 lands back on i64::MIN
            Integer::Large(r) => Integer::from_large(ArbitraryPrecisionInteger::from(-r)),
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        -&self
    }
}
