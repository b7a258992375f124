// File:    cipher.rs
// Author:  apezoo
// Date:    2025-08-12
//
// Description: The cipher front end: dispatch over the variants, encryption, memoised decryption and traces.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! A configured cipher ready to encrypt and decrypt.
//!
//! Encryption always runs the variant's pipeline. Decryption runs the
//! pipeline of the decryption cipher, which is derived from the variant's
//! inversion rule on first use and cached inside the instance.

use std::fmt;

use log::debug;
use once_cell::sync::OnceCell;

use crate::compound::CompoundCipher;
use crate::error::Result;
use crate::pipeline::{Pipeline, Row, Tracer, Value};
use crate::rsa::RsaCipher;
use crate::shift::ShiftCipher;
use crate::table::Trace;
use crate::transposition::TranspositionCipher;
use crate::vigenere::VigenereCipher;

/// The closed set of cipher variants.
#[derive(Debug, Clone)]
pub enum CipherKind {
    /// Caesar shift.
    Shift(ShiftCipher),
    /// Block transposition.
    Transposition(TranspositionCipher),
    /// Vigenère polyalphabetic substitution.
    Vigenere(VigenereCipher),
    /// Textbook RSA.
    Rsa(RsaCipher),
    /// A chain of other ciphers.
    Compound(CompoundCipher),
}

impl CipherKind {
    /// The variant's stage configuration.
    #[must_use]
    pub fn pipeline(&self) -> Pipeline {
        match self {
            Self::Shift(_) => ShiftCipher::pipeline(),
            Self::Transposition(c) => c.pipeline(),
            Self::Vigenere(_) => VigenereCipher::pipeline(),
            Self::Rsa(c) => c.pipeline(),
            Self::Compound(c) => c.pipeline(),
        }
    }

    /// The variant's core transform, applied to one group.
    ///
    /// # Errors
    ///
    /// Propagates the variant's failure.
    pub fn transform(&self, group: Value) -> Result<Value> {
        match self {
            Self::Shift(c) => c.transform(group),
            Self::Transposition(c) => c.transform(group),
            Self::Vigenere(c) => c.transform(group),
            Self::Rsa(c) => c.transform(group),
            Self::Compound(c) => c.transform(group),
        }
    }

    /// The variant's inversion rule.
    ///
    /// # Errors
    ///
    /// Fails when the variant cannot be inverted, such as RSA without primes.
    pub fn inverse(&self) -> Result<Self> {
        Ok(match self {
            Self::Shift(c) => Self::Shift(c.inverse()),
            Self::Transposition(c) => Self::Transposition(c.inverse()?),
            Self::Vigenere(c) => Self::Vigenere(c.inverse()),
            Self::Rsa(c) => Self::Rsa(c.inverse()?),
            Self::Compound(c) => Self::Compound(c.inverse()?),
        })
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shift(c) => c.fmt(f),
            Self::Transposition(c) => c.fmt(f),
            Self::Vigenere(c) => c.fmt(f),
            Self::Rsa(c) => c.fmt(f),
            Self::Compound(c) => c.fmt(f),
        }
    }
}

/// A cipher instance: its variant, its pipeline, and the lazily derived
/// decryption cipher.
#[derive(Debug, Clone)]
pub struct Cipher {
    kind: CipherKind,
    pipeline: Pipeline,
    decryption: OnceCell<Box<Cipher>>,
    is_decryption: bool,
}

impl Cipher {
    /// Wraps a variant, building its pipeline.
    #[must_use]
    pub fn new(kind: CipherKind) -> Self {
        let pipeline = kind.pipeline();
        Self {
            kind,
            pipeline,
            decryption: OnceCell::new(),
            is_decryption: false,
        }
    }

    /// A Caesar cipher shifting by `shift`.
    #[must_use]
    pub fn shift(shift: i64) -> Self {
        ShiftCipher::new(shift).into()
    }

    /// A transposition cipher over the explicit permutation `sigma`.
    ///
    /// # Errors
    ///
    /// See [`TranspositionCipher::new`].
    pub fn transposition(sigma: Vec<usize>) -> Result<Self> {
        TranspositionCipher::from_sigma(sigma).map(Into::into)
    }

    /// A Vigenère cipher with `key`.
    ///
    /// # Errors
    ///
    /// See [`VigenereCipher::new`].
    pub fn vigenere(key: &str) -> Result<Self> {
        VigenereCipher::new(key).map(Into::into)
    }

    /// An RSA cipher for `(n, e)` with optional primes.
    ///
    /// # Errors
    ///
    /// See [`RsaCipher::new`].
    pub fn rsa(n: u64, e: u64, primes: Option<(u64, u64)>) -> Result<Self> {
        RsaCipher::new(n, e, primes).map(Into::into)
    }

    /// A chain of `stages`, run in order.
    #[must_use]
    pub fn compound(stages: Vec<Self>) -> Self {
        CompoundCipher::new(stages).into()
    }

    /// The variant and its parameters.
    #[must_use]
    pub const fn kind(&self) -> &CipherKind {
        &self.kind
    }

    /// The stage configuration.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Whether this instance was derived as another cipher's decryption
    /// cipher.
    #[must_use]
    pub const fn is_decryption(&self) -> bool {
        self.is_decryption
    }

    /// Runs the pipeline over `input`.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure.
    pub fn encrypt(&self, input: &str) -> Result<String> {
        debug!("{self} processing {} chars", input.chars().count());
        self.pipeline
            .run(input, |group| self.kind.transform(group), None)
    }

    /// Encrypts `input` with the decryption cipher.
    ///
    /// # Errors
    ///
    /// Fails when no decryption cipher can be derived, or with the first stage
    /// failure.
    pub fn decrypt(&self, input: &str) -> Result<String> {
        self.decryption_cipher()?.encrypt(input)
    }

    /// The decryption cipher, derived on first call and cached afterwards.
    ///
    /// # Errors
    ///
    /// Fails when the variant cannot be inverted. Nothing is cached then, so a
    /// later call runs the inversion again.
    pub fn decryption_cipher(&self) -> Result<&Self> {
        self.decryption
            .get_or_try_init(|| -> Result<Box<Self>> {
                debug!("deriving decryption cipher for {self}");
                let mut inverse = Self::new(self.kind.inverse()?);
                inverse.is_decryption = true;
                Ok(Box::new(inverse))
            })
            .map(|inverse| &**inverse)
    }

    /// Runs `input` through the cipher and records every stage.
    ///
    /// Intermediate steps are recorded only when `show_steps` is set; the
    /// input, transform and output rows are always present. A compound cipher
    /// records each stage's rows prefixed with `E<index>::`.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure.
    pub fn trace(&self, input: &str, show_steps: bool) -> Result<Trace> {
        let label = if self.is_decryption { "decrypt" } else { "encrypt" };
        let mut tracer = Tracer::new(show_steps, label);
        tracer.always(Row::scalar("input", Value::Text(input.to_owned())));

        let output = match &self.kind {
            CipherKind::Compound(compound) => {
                let mut text = self.pipeline.preprocess(input, Some(&mut tracer))?;
                for (i, stage) in compound.stages().iter().enumerate() {
                    let inner = stage.trace(&text, show_steps)?;
                    for row in inner.rows {
                        tracer.always(Row {
                            name: format!("E{i}::{}", row.name),
                            cells: row.cells,
                        });
                    }
                    text = inner.output;
                }
                text
            }
            kind => self
                .pipeline
                .run(input, |group| kind.transform(group), Some(&mut tracer))?,
        };

        tracer.always(Row::scalar("output", Value::Text(output.clone())));
        let heading = if self.is_decryption { "Decryption" } else { "Encryption" };
        Ok(Trace {
            title: format!("{heading} Table - {self}({input}):"),
            rows: tracer.into_rows(),
            output,
        })
    }

    /// [`Cipher::trace`] of the decryption cipher.
    ///
    /// # Errors
    ///
    /// Fails when no decryption cipher can be derived, or with the first stage
    /// failure.
    pub fn decryption_trace(&self, input: &str, show_steps: bool) -> Result<Trace> {
        self.decryption_cipher()?.trace(input, show_steps)
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl From<CipherKind> for Cipher {
    fn from(kind: CipherKind) -> Self {
        Self::new(kind)
    }
}

impl From<ShiftCipher> for Cipher {
    fn from(cipher: ShiftCipher) -> Self {
        Self::new(CipherKind::Shift(cipher))
    }
}

impl From<TranspositionCipher> for Cipher {
    fn from(cipher: TranspositionCipher) -> Self {
        Self::new(CipherKind::Transposition(cipher))
    }
}

impl From<VigenereCipher> for Cipher {
    fn from(cipher: VigenereCipher) -> Self {
        Self::new(CipherKind::Vigenere(cipher))
    }
}

impl From<RsaCipher> for Cipher {
    fn from(cipher: RsaCipher) -> Self {
        Self::new(CipherKind::Rsa(cipher))
    }
}

impl From<CompoundCipher> for Cipher {
    fn from(cipher: CompoundCipher) -> Self {
        Self::new(CipherKind::Compound(cipher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CipherError;

    #[test]
    fn test_decryption_cipher_is_memoised() {
        let cipher = Cipher::shift(3);
        let first: *const Cipher = cipher.decryption_cipher().unwrap();
        let second: *const Cipher = cipher.decryption_cipher().unwrap();
        assert_eq!(first, second);
        assert!(cipher.decryption_cipher().unwrap().is_decryption());
        assert!(!cipher.is_decryption());
    }

    #[test]
    fn test_failed_inversion_is_not_cached() {
        let cipher = Cipher::rsa(2537, 13, None).unwrap();
        assert!(matches!(cipher.decrypt("0000").unwrap_err(), CipherError::MissingPrimes));
        assert!(matches!(
            cipher.decryption_cipher().unwrap_err(),
            CipherError::MissingPrimes
        ));
    }

    #[test]
    fn test_display_uses_variant_label() {
        assert_eq!(Cipher::shift(5).to_string(), "ShiftCipher(5)");
        let chain = Cipher::compound(vec![Cipher::shift(1), Cipher::vigenere("ab").unwrap()]);
        assert_eq!(
            chain.to_string(),
            "CompoundCipher(ShiftCipher(1)==>VigenereCipher(ab))"
        );
    }

    #[test]
    fn test_trace_rows_without_steps() {
        let trace = Cipher::shift(1).trace("ab", false).unwrap();
        let names: Vec<_> = trace.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["input", "encrypt", "output"]);
        assert_eq!(trace.output, "bc");
        assert_eq!(trace.title, "Encryption Table - ShiftCipher(1)(ab):");
    }

    #[test]
    fn test_trace_rows_with_steps() {
        let trace = Cipher::shift(1).trace("Ab", true).unwrap();
        let names: Vec<_> = trace.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["input", "lowercase", "group", "numeric", "encrypt", "character", "output"]
        );
    }

    #[test]
    fn test_compound_trace_prefixes_stage_rows() {
        let chain = Cipher::compound(vec![Cipher::shift(1), Cipher::shift(2)]);
        let trace = chain.trace("a", false).unwrap();
        let names: Vec<_> = trace.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "input",
                "E0::input",
                "E0::encrypt",
                "E0::output",
                "E1::input",
                "E1::encrypt",
                "E1::output",
                "output",
            ]
        );
        assert_eq!(trace.output, "d");
    }

    #[test]
    fn test_compound_trace_shows_raw_rows_first() {
        let stages = vec![Cipher::shift(1)];
        let chain = Cipher::from(CompoundCipher::new(stages).raw(crate::steps::lowercase()));
        let trace = chain.trace("AB", true).unwrap();
        let names: Vec<_> = trace.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(&names[..3], &["input", "lowercase", "E0::input"]);
        assert_eq!(trace.rows[1].cells, vec![Value::Text("ab".into())]);
        assert_eq!(trace.output, "bc");
    }

    #[test]
    fn test_decryption_trace_is_labelled() {
        let trace = Cipher::shift(1).decryption_trace("b", false).unwrap();
        assert!(trace.title.starts_with("Decryption Table - ShiftCipher(-1)"));
        assert!(trace.rows.iter().any(|r| r.name == "decrypt"));
        assert_eq!(trace.output, "a");
    }
}
