// File:    numtheory.rs
// Author:  apezoo
// Date:    2025-08-05
//
// Description: Modular arithmetic used by the RSA cipher.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Modular exponentiation and inverses over `u64`, with `u128` intermediates.

/// Computes `base^exp mod modulus` by square-and-multiply.
///
/// A modulus of `0` or `1` yields `0`.
#[must_use]
pub fn pow_mod(base: u64, exp: u64, modulus: u64) -> u64 {
    if modulus <= 1 {
        return 0;
    }
    let m = u128::from(modulus);
    let mut result: u128 = 1;
    let mut base = u128::from(base) % m;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    u64::try_from(result).unwrap_or_default()
}

/// Greatest common divisor by Euclid's algorithm.
#[must_use]
pub const fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Inverse of `a` modulo `m` via the extended Euclidean algorithm.
///
/// Returns `None` when `gcd(a, m) != 1` or `m < 2`.
#[must_use]
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m < 2 {
        return None;
    }
    let modulus = i128::from(m);
    let mut mn = (modulus, i128::from(a) % modulus);
    let mut xy: (i128, i128) = (0, 1);

    while mn.1 != 0 {
        let quotient = mn.0 / mn.1;
        xy = (xy.1, xy.0 - quotient * xy.1);
        mn = (mn.1, mn.0 % mn.1);
    }

    if mn.0 == 1 {
        u64::try_from(xy.0.rem_euclid(modulus)).ok()
    } else {
        None
    }
}

/// Linear search for `d` in `[0, m)` with `a * d mod m == 1`.
#[must_use]
pub fn mod_inverse_slow(a: u64, m: u64) -> Option<u64> {
    let modulus = u128::from(m);
    (0..m).find(|&d| u128::from(a) * u128::from(d) % modulus == 1)
}

/// Number of decimal digits in `n` (`1` for zero).
#[must_use]
pub const fn digit_count(n: u64) -> usize {
    let mut count = 1;
    let mut rest = n / 10;
    while rest > 0 {
        count += 1;
        rest /= 10;
    }
    count
}
