// File:    vigenere.rs
// Author:  apezoo
// Date:    2025-08-08
//
// Description: The Vigenère polyalphabetic substitution cipher.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Vigenère cipher. The whole input is a single group so the key can be
//! cycled over global positions; sentinels keep their slot and consume a key
//! digit like any other position.

use std::fmt;

use crate::alphabet::{self, ALPHABET_LEN, Symbol};
use crate::error::{CipherError, Result};
use crate::pipeline::{Grouping, Pipeline, Value};
use crate::steps;

/// Polyalphabetic cipher parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VigenereCipher {
    key: Vec<Symbol>,
}

impl VigenereCipher {
    /// Builds a cipher from a key string, lowercased before encoding.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::EmptyKey`] for an empty key.
    pub fn new(key: &str) -> Result<Self> {
        Self::from_symbols(alphabet::to_symbols(&key.to_lowercase()))
    }

    /// Builds a cipher from an already encoded key.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::EmptyKey`] for an empty key.
    pub fn from_symbols(key: Vec<Symbol>) -> Result<Self> {
        if key.is_empty() {
            return Err(CipherError::EmptyKey);
        }
        Ok(Self { key })
    }

    /// The encoded key.
    #[must_use]
    pub fn key(&self) -> &[Symbol] {
        &self.key
    }

    /// Lowercase, whole input as one group, encoded to and from a symbol
    /// sequence.
    #[must_use]
    pub fn pipeline() -> Pipeline {
        Pipeline::new(Grouping::Whole)
            .raw(steps::lowercase())
            .pre(steps::numeric_sequence())
            .post(steps::characters())
    }

    /// Adds `key[i mod len]` to every letter at position `i`.
    ///
    /// # Errors
    ///
    /// Fails if the group is not a symbol sequence.
    pub fn transform(&self, group: Value) -> Result<Value> {
        let symbols = group.into_symbols("encrypt")?;
        let out = symbols
            .into_iter()
            .zip(self.key.iter().cycle())
            .map(|(symbol, k)| match k {
                Symbol::Letter(shift) => symbol.shifted(i64::from(*shift)),
                Symbol::Other(_) => symbol,
            })
            .collect();
        Ok(Value::Symbols(out))
    }

    /// The key with every digit replaced by `(26 - k) mod 26`.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let key = self
            .key
            .iter()
            .map(|k| match k {
                Symbol::Letter(shift) => Symbol::Letter((ALPHABET_LEN - shift) % ALPHABET_LEN),
                other => *other,
            })
            .collect();
        Self { key }
    }
}

impl fmt::Display for VigenereCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VigenereCipher({})", alphabet::to_string(&self.key))
    }
}
