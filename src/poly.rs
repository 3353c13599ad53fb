pub mod polynomial;

use crate::integer::Integer;

/// Exponent of a stored term. Public mutation takes an `i64` and validates
/// the range, so a negative exponent is reportable to the caller.
pub type Exponent = u32;

/// Number of terms stored inline before the sequence spills to the heap.
pub const INLINED_TERMS: usize = 6;

/// One monomial summand: a coefficient and the exponent of `x`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Term {
    pub coefficient: Integer,
    pub exponent: Exponent,
}
