// File:    shift.rs
// Author:  apezoo
// Date:    2025-08-06
//
// Description: The Caesar shift cipher.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Caesar cipher: every letter moves `k` places along the alphabet.

use std::fmt;
use std::num::NonZeroUsize;

use crate::alphabet::ALPHABET_LEN;
use crate::error::Result;
use crate::pipeline::{Grouping, Pipeline, Value};
use crate::steps;

/// Shift cipher parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftCipher {
    shift: i64,
}

impl ShiftCipher {
    /// A cipher shifting by `shift` (negative values shift backwards).
    #[must_use]
    pub const fn new(shift: i64) -> Self {
        Self { shift }
    }

    /// The shift amount.
    #[must_use]
    pub const fn shift(&self) -> i64 {
        self.shift
    }

    /// Lowercase, one character per group, encoded to and from symbols.
    #[must_use]
    pub fn pipeline() -> Pipeline {
        Pipeline::new(Grouping::Fixed(NonZeroUsize::MIN))
            .raw(steps::lowercase())
            .pre(steps::numeric())
            .post(steps::character())
    }

    /// Shifts one symbol; sentinels pass through.
    ///
    /// # Errors
    ///
    /// Fails if the group is not a single symbol.
    pub fn transform(&self, group: Value) -> Result<Value> {
        let symbol = group.into_symbol("encrypt")?;
        Ok(Value::Symbol(symbol.shifted(self.shift)))
    }

    /// The same cipher shifting by `-k`, reduced modulo 26 first.
    #[must_use]
    pub const fn inverse(&self) -> Self {
        Self::new(-self.shift.rem_euclid(ALPHABET_LEN as i64))
    }
}

impl fmt::Display for ShiftCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShiftCipher({})", self.shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Symbol;

    #[test]
    fn test_transform_wraps() {
        let cipher = ShiftCipher::new(5);
        let out = cipher.transform(Value::Symbol(Symbol::Letter(23))).unwrap();
        assert_eq!(out, Value::Symbol(Symbol::Letter(2)));
    }

    #[test]
    fn test_transform_passes_space_through() {
        let cipher = ShiftCipher::new(5);
        let out = cipher.transform(Value::Symbol(Symbol::Other(' '))).unwrap();
        assert_eq!(out, Value::Symbol(Symbol::Other(' ')));
    }

    #[test]
    fn test_inverse_negates_shift() {
        assert_eq!(ShiftCipher::new(5).inverse().shift(), -5);
        assert_eq!(ShiftCipher::new(-3).inverse().shift(), -23);
        assert_eq!(ShiftCipher::new(i64::MIN).inverse().shift(), -(i64::MIN.rem_euclid(26)));
    }
}
