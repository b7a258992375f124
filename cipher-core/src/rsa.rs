// File:    rsa.rs
// Author:  apezoo
// Date:    2025-08-10
//
// Description: Textbook RSA over two-digit character codes, plus trial-division key recovery.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Textbook RSA on decimal blocks.
//!
//! Encryption lowercases the input, drops spaces, writes each letter as a
//! two-digit code (`a` = `00` … `z` = `25`) and right-pads the digit string
//! with the filler code `26` up to a whole number of plaintext blocks. Every
//! block `m` becomes `m^e mod n`, written with a fixed, even number of digits
//! so the ciphertext can be split again by the decryption cipher.
//!
//! None of this is secure. Moduli are meant to be small enough to factor by
//! hand, and [`recover_primes`] does exactly that.

use std::fmt;
use std::num::NonZeroUsize;

use log::{debug, info, warn};

use crate::error::{CipherError, Result};
use crate::numtheory::{digit_count, gcd, mod_inverse, mod_inverse_slow, pow_mod};
use crate::pipeline::{Grouping, Pipeline, Value};
use crate::steps::{self, FILLER_CODE};

/// Public exponent used when none is given.
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// Which way a cipher instance runs its blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext letters in, fixed-width cipher blocks out.
    Encrypt,
    /// Fixed-width cipher blocks in, plaintext letters out.
    Decrypt,
}

/// RSA cipher parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaCipher {
    modulus: u64,
    exponent: u64,
    primes: Option<(u64, u64)>,
    private_exponent: Option<u64>,
    block_size: usize,
    direction: Direction,
}

impl RsaCipher {
    /// Builds an encrypting cipher for modulus `n` and public exponent `e`.
    ///
    /// With `primes = Some((p, q))` the private exponent is derived so the
    /// cipher can produce its decryption cipher.
    ///
    /// # Errors
    ///
    /// * [`CipherError::ModulusTooSmall`] when `n` cannot hold one character.
    /// * [`CipherError::ModulusMismatch`] when `p * q != n`.
    /// * [`CipherError::ExponentOutOfRange`] unless `1 <= e < phi`.
    /// * [`CipherError::NotInvertible`] when `e` has no inverse modulo `phi`.
    pub fn new(n: u64, e: u64, primes: Option<(u64, u64)>) -> Result<Self> {
        let block_size = block_size(n)?;
        let private_exponent = match primes {
            Some((p, q)) => {
                if p.checked_mul(q) != Some(n) {
                    return Err(CipherError::ModulusMismatch { n, p, q });
                }
                let phi = totient(p, q);
                if e < 1 || e >= phi {
                    return Err(CipherError::ExponentOutOfRange { e, phi });
                }
                Some(private_exponent(e, phi)?)
            }
            None => None,
        };
        Ok(Self {
            modulus: n,
            exponent: e,
            primes,
            private_exponent,
            block_size,
            direction: Direction::Encrypt,
        })
    }

    /// Builds a cipher from its two primes, with `n = p * q`.
    ///
    /// # Errors
    ///
    /// Same as [`RsaCipher::new`]; a product overflowing `u64` is reported as
    /// [`CipherError::ModulusMismatch`].
    pub fn from_primes(p: u64, q: u64, e: u64) -> Result<Self> {
        let n = p
            .checked_mul(q)
            .ok_or(CipherError::ModulusMismatch { n: 0, p, q })?;
        Self::new(n, e, Some((p, q)))
    }

    /// Builds a cipher from the public key alone, factoring `n` by trial
    /// division to recover the primes.
    ///
    /// When no factorisation is found the cipher still encrypts, but asking
    /// for its decryption cipher fails with [`CipherError::MissingPrimes`].
    ///
    /// # Errors
    ///
    /// Same as [`RsaCipher::new`].
    pub fn with_recovery(n: u64, e: u64) -> Result<Self> {
        let primes = recover_primes(n, e);
        Self::new(n, e, primes)
    }

    /// The modulus `n`.
    #[must_use]
    pub const fn modulus(&self) -> u64 {
        self.modulus
    }

    /// The exponent this instance raises blocks to.
    #[must_use]
    pub const fn exponent(&self) -> u64 {
        self.exponent
    }

    /// The primes, when known.
    #[must_use]
    pub const fn primes(&self) -> Option<(u64, u64)> {
        self.primes
    }

    /// The private exponent `d`, when the primes are known.
    #[must_use]
    pub const fn private_exponent(&self) -> Option<u64> {
        self.private_exponent
    }

    /// The totient `(p - 1) * (q - 1)`, when the primes are known.
    #[must_use]
    pub fn phi(&self) -> Option<u64> {
        self.primes.map(|(p, q)| totient(p, q))
    }

    /// Direction of this instance.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Digits per plaintext block.
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Digits per ciphertext block: the digit count of `n - 1`, rounded up to
    /// an even number.
    #[must_use]
    pub const fn cipher_block_size(&self) -> usize {
        let digits = digit_count(self.modulus.saturating_sub(1));
        digits + digits % 2
    }

    /// Builds the stage configuration for this instance's direction.
    #[must_use]
    pub fn pipeline(&self) -> Pipeline {
        let (group_width, out_width) = match self.direction {
            Direction::Encrypt => (self.block_size, self.cipher_block_size()),
            Direction::Decrypt => (self.cipher_block_size(), self.block_size),
        };
        let grouping = NonZeroUsize::new(group_width).map_or(Grouping::Whole, Grouping::Fixed);
        let pipeline = match self.direction {
            Direction::Encrypt => Pipeline::new(grouping)
                .raw(steps::lowercase())
                .raw(steps::remove_spaces())
                .raw(steps::two_digit_codes())
                .raw(steps::pad_final_block(self.block_size)),
            Direction::Decrypt => Pipeline::new(grouping),
        };
        let pipeline = pipeline
            .pre(steps::parse_int())
            .post(steps::pad_numeric(out_width));
        match self.direction {
            Direction::Encrypt => pipeline,
            Direction::Decrypt => pipeline.post(steps::decode_pairs()),
        }
    }

    /// Raises one block to this instance's exponent modulo `n`.
    ///
    /// # Errors
    ///
    /// Fails if the group is not a number.
    pub fn transform(&self, group: Value) -> Result<Value> {
        let block = group.into_number(match self.direction {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        })?;
        Ok(Value::Number(pow_mod(block, self.exponent, self.modulus)))
    }

    /// A decrypting instance using the private exponent. It carries no primes,
    /// so it has no inverse of its own.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::MissingPrimes`] when the primes are unknown.
    pub fn inverse(&self) -> Result<Self> {
        let d = self.private_exponent.ok_or(CipherError::MissingPrimes)?;
        Ok(Self {
            modulus: self.modulus,
            exponent: d,
            primes: None,
            private_exponent: None,
            block_size: self.block_size,
            direction: Direction::Decrypt,
        })
    }
}

impl fmt::Display for RsaCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.direction {
            Direction::Encrypt => "e",
            Direction::Decrypt => "d",
        };
        write!(f, "RSA(n={}, {name}={})", self.modulus, self.exponent)
    }
}

fn totient(p: u64, q: u64) -> u64 {
    p.saturating_sub(1).saturating_mul(q.saturating_sub(1))
}

/// Digits per plaintext block for modulus `n`.
///
/// This is `2c`, with `c` the largest character count for which every
/// possible block stays below `n`. The largest block is a `25` followed by
/// `c - 1` filler codes.
///
/// # Errors
///
/// Returns [`CipherError::ModulusTooSmall`] when even a single character
/// code can reach `n`.
pub fn block_size(n: u64) -> Result<usize> {
    let modulus = u128::from(n);
    let mut largest: u128 = 25;
    if largest >= modulus {
        return Err(CipherError::ModulusTooSmall(n));
    }
    let mut chars = 1;
    loop {
        let next = largest * 100 + u128::from(FILLER_CODE);
        if next >= modulus {
            return Ok(chars * 2);
        }
        largest = next;
        chars += 1;
    }
}

/// The inverse of `e` modulo `phi`. Uses the extended Euclidean algorithm
/// and falls back to a linear search only for a coprime pair.
///
/// # Errors
///
/// Returns [`CipherError::NotInvertible`] when `gcd(e, phi) != 1`.
pub fn private_exponent(e: u64, phi: u64) -> Result<u64> {
    let not_invertible = CipherError::NotInvertible { e, phi };
    if gcd(e, phi) != 1 {
        return Err(not_invertible);
    }
    mod_inverse(e, phi)
        .or_else(|| mod_inverse_slow(e, phi))
        .ok_or(not_invertible)
}

/// Recovers `(p, q)` from the public key by trial division.
///
/// Tries every `f` from `2` up to `n` and returns the first divisor for which
/// `e` is invertible modulo `(f - 1) * (n / f - 1)`. Runs in time linear in
/// `n`. Returns `None` once the range is exhausted.
#[must_use]
pub fn recover_primes(n: u64, e: u64) -> Option<(u64, u64)> {
    debug!("recovering primes of n={n} by trial division");
    let found = (2..=n)
        .filter(|f| n % f == 0)
        .map(|f| (f, n / f))
        .find(|&(p, q)| mod_inverse(e, totient(p, q)).is_some());
    match found {
        Some((p, q)) => info!("recovered p={p}, q={q} for n={n}"),
        None => warn!("no usable factorisation found for n={n}, e={e}"),
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size() {
        assert_eq!(block_size(2537).unwrap(), 4);
        assert_eq!(block_size(26).unwrap(), 2);
        assert_eq!(block_size(2526).unwrap(), 2);
        assert_eq!(block_size(2527).unwrap(), 4);
        assert!(matches!(
            block_size(25).unwrap_err(),
            CipherError::ModulusTooSmall(25)
        ));
        assert!(block_size(u64::MAX).unwrap() >= 18);
    }

    #[test]
    fn test_cipher_block_size_is_even() {
        let cipher = RsaCipher::new(2537, 13, None).unwrap();
        assert_eq!(cipher.cipher_block_size(), 4);
        let cipher = RsaCipher::new(30_000, 7, None).unwrap();
        assert_eq!(cipher.cipher_block_size(), 6);
    }

    #[test]
    fn test_private_exponent_for_textbook_key() {
        let cipher = RsaCipher::from_primes(43, 59, 13).unwrap();
        assert_eq!(cipher.modulus(), 2537);
        assert_eq!(cipher.phi(), Some(2436));
        assert_eq!(cipher.private_exponent(), Some(937));
    }

    #[test]
    fn test_inverse_drops_primes() {
        let cipher = RsaCipher::from_primes(43, 59, 13).unwrap();
        let inverse = cipher.inverse().unwrap();
        assert_eq!(inverse.direction(), Direction::Decrypt);
        assert_eq!(inverse.exponent(), 937);
        assert!(matches!(inverse.inverse().unwrap_err(), CipherError::MissingPrimes));
    }

    #[test]
    fn test_non_invertible_exponent_fails_fast() {
        let started = std::time::Instant::now();
        let err = RsaCipher::from_primes(1_000_003, 1_000_033, 2).unwrap_err();
        assert!(matches!(err, CipherError::NotInvertible { e: 2, .. }));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
        assert!(matches!(
            private_exponent(6, 2436).unwrap_err(),
            CipherError::NotInvertible { e: 6, phi: 2436 }
        ));
    }

    #[test]
    fn test_recover_primes_skips_unusable_factor() {
        // 3 divides 33 but phi = 2 * 10 shares a factor with e = 5.
        assert_eq!(recover_primes(3 * 11, 5), None);
        assert_eq!(recover_primes(3 * 11, 3), Some((3, 11)));
    }
}
