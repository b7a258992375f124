// File:    error.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: The error type shared by every cipher, the pipeline and the configuration loader.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Errors raised while building or running a cipher.

use thiserror::Error;

/// Every failure the library can report.
///
/// Configuration problems surface from constructors, precondition problems
/// from the operation that needed them. Pipeline stages abort on the first
/// error they hit.
#[derive(Error, Debug)]
pub enum CipherError {
    /// RSA primes that do not multiply to the modulus.
    #[error("n ({n}) must equal p * q ({p} * {q})")]
    ModulusMismatch {
        /// The declared modulus.
        n: u64,
        /// The first prime.
        p: u64,
        /// The second prime.
        q: u64,
    },

    /// RSA public exponent outside `[1, phi)`.
    #[error("public exponent {e} must lie in [1, {phi})")]
    ExponentOutOfRange {
        /// The public exponent.
        e: u64,
        /// The totient of the modulus.
        phi: u64,
    },

    /// RSA public exponent shares a factor with the totient.
    #[error("public exponent {e} has no inverse modulo {phi}")]
    NotInvertible {
        /// The public exponent.
        e: u64,
        /// The totient of the modulus.
        phi: u64,
    },

    /// RSA modulus that cannot hold even a single two-digit character code.
    #[error("modulus {0} is too small to hold a single character block")]
    ModulusTooSmall(u64),

    /// Transposition sigma whose length disagrees with the block size.
    #[error("sigma has {found} entries but the block size is {expected}")]
    SigmaLengthMismatch {
        /// The declared block size.
        expected: usize,
        /// The number of entries in sigma.
        found: usize,
    },

    /// Transposition sigma that is not a permutation of `0..n`.
    #[error("sigma is not a permutation of 0..{0}")]
    InvalidPermutation(usize),

    /// Transposition with a block size of zero.
    #[error("block size must be positive")]
    ZeroBlockSize,

    /// Transposition sigma given as a function without a block size.
    #[error("a generated sigma needs an explicit block size")]
    MissingBlockSize,

    /// Polyalphabetic cipher with an empty key.
    #[error("key must not be empty")]
    EmptyKey,

    /// Decryption requested from an RSA cipher without its factorisation.
    #[error("cannot derive a decryption cipher without the primes p and q")]
    MissingPrimes,

    /// Configured raw step name that no step answers to.
    #[error("unknown raw step '{0}'")]
    UnknownStep(String),

    /// Character outside the alphabet reaching the RSA digit encoding.
    #[error("'{0}' cannot be encoded as a two-digit character code")]
    UnencodableSymbol(char),

    /// Digit block that cannot be parsed or decoded.
    #[error("invalid numeric block '{0}'")]
    InvalidBlock(String),

    /// Group value of the wrong shape handed to a stage.
    #[error("{step} expected {expected} but received {found}")]
    GroupShape {
        /// Name of the stage that rejected the value.
        step: &'static str,
        /// Shape the stage accepts.
        expected: &'static str,
        /// Shape it was given.
        found: &'static str,
    },

    /// Fixed-width group whose length disagrees with the block size.
    #[error("expected a block of {expected} symbols but received {found}")]
    BlockLength {
        /// The block size.
        expected: usize,
        /// The received group length.
        found: usize,
    },

    /// Cipher configuration file could not be read.
    #[error("failed to read cipher config: {0}")]
    Io(#[from] std::io::Error),

    /// Cipher configuration could not be parsed or serialised.
    #[error("invalid cipher config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CipherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_modulus_mismatch() {
        let err = CipherError::ModulusMismatch { n: 10, p: 3, q: 5 };
        assert_eq!(err.to_string(), "n (10) must equal p * q (3 * 5)");
    }

    #[test]
    fn test_display_missing_primes() {
        assert_eq!(
            CipherError::MissingPrimes.to_string(),
            "cannot derive a decryption cipher without the primes p and q"
        );
    }

    #[test]
    fn test_display_group_shape() {
        let err = CipherError::GroupShape {
            step: "numeric",
            expected: "text",
            found: "number",
        };
        assert_eq!(err.to_string(), "numeric expected text but received number");
    }
}
