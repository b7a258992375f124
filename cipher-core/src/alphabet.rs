// File:    alphabet.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: Maps characters to their position in the 26-letter alphabet and back.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The character codec every letter-based cipher works on.
//!
//! Letters `'a'..='z'` become [`Symbol::Letter`] values `0..=25`. Anything
//! else becomes [`Symbol::Other`], a pass-through sentinel that shift and
//! polyalphabetic transforms leave untouched, so word boundaries survive a
//! round trip.

use std::fmt;

/// Number of letters in the working alphabet.
pub const ALPHABET_LEN: u8 = 26;

const BASE: char = 'a';

/// A character as seen by the ciphers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A lowercase letter, `0` for `'a'` through `25` for `'z'`.
    Letter(u8),
    /// Any character outside the alphabet, carried through unchanged.
    Other(char),
}

impl Symbol {
    /// Returns `true` for the out-of-alphabet sentinel.
    #[must_use]
    pub const fn is_passthrough(self) -> bool {
        matches!(self, Self::Other(_))
    }

    /// Shifts a letter by `k` positions modulo 26. Sentinels are returned as is.
    #[must_use]
    pub fn shifted(self, k: i64) -> Self {
        match self {
            Self::Letter(p) => {
                let len = i64::from(ALPHABET_LEN);
                let q = (i64::from(p) + k.rem_euclid(len)).rem_euclid(len);
                Self::Letter(u8::try_from(q).unwrap_or_default())
            }
            Self::Other(_) => self,
        }
    }

    /// The raw code-point offset of the character from `'a'`.
    ///
    /// Letters land in `0..=25`; every other character lands outside that
    /// range (a space is `-65`).
    #[must_use]
    pub fn offset(self) -> i64 {
        i64::from(u32::from(to_char(self))) - i64::from(u32::from(BASE))
    }

    /// Inverse of [`Symbol::offset`]. Returns `None` when the offset does not
    /// name a Unicode scalar value.
    #[must_use]
    pub fn from_offset(offset: i64) -> Option<Self> {
        let code = u32::try_from(i64::from(u32::from(BASE)).checked_add(offset)?).ok()?;
        char::from_u32(code).map(to_numeric)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(p) => write!(f, "{p}"),
            Self::Other(c) => write!(f, "{c}"),
        }
    }
}

/// Maps a character to its alphabet position, or to the sentinel.
#[must_use]
pub const fn to_numeric(c: char) -> Symbol {
    if c.is_ascii_lowercase() {
        Symbol::Letter(c as u8 - b'a')
    } else {
        Symbol::Other(c)
    }
}

/// Exact inverse of [`to_numeric`].
#[must_use]
pub const fn to_char(symbol: Symbol) -> char {
    match symbol {
        Symbol::Letter(p) => (b'a' + p % ALPHABET_LEN) as char,
        Symbol::Other(c) => c,
    }
}

/// Converts a whole string, keeping sentinels in place.
#[must_use]
pub fn to_symbols(s: &str) -> Vec<Symbol> {
    s.chars().map(to_numeric).collect()
}

/// Converts symbols back into a string.
#[must_use]
pub fn to_string(symbols: &[Symbol]) -> String {
    symbols.iter().copied().map(to_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_round_trip() {
        for (i, c) in ('a'..='z').enumerate() {
            let symbol = to_numeric(c);
            assert_eq!(symbol, Symbol::Letter(u8::try_from(i).unwrap()));
            assert_eq!(to_char(symbol), c);
        }
    }

    #[test]
    fn test_space_is_sentinel() {
        let space = to_numeric(' ');
        assert!(space.is_passthrough());
        assert_eq!(space.offset(), -65);
        assert_eq!(to_char(space), ' ');
    }

    #[test]
    fn test_offset_round_trip_for_other_symbols() {
        for c in [' ', '?', 'A', '7', '!'] {
            let symbol = to_numeric(c);
            assert_eq!(Symbol::from_offset(symbol.offset()), Some(symbol));
        }
        assert_eq!(Symbol::from_offset(3), Some(Symbol::Letter(3)));
    }

    #[test]
    fn test_shift_wraps_and_skips_sentinel() {
        assert_eq!(Symbol::Letter(24).shifted(5), Symbol::Letter(3));
        assert_eq!(Symbol::Letter(2).shifted(-5), Symbol::Letter(23));
        assert_eq!(Symbol::Other(' ').shifted(5), Symbol::Other(' '));
    }
}
