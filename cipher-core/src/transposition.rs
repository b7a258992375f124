// File:    transposition.rs
// Author:  apezoo
// Date:    2025-08-07
//
// Description: The block transposition cipher.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Block transposition: within each block of `n` symbols, the symbol at
//! position `i` moves to position `sigma[i]`.

use std::fmt;
use std::num::NonZeroUsize;

use rand::seq::SliceRandom;

use crate::error::{CipherError, Result};
use crate::pipeline::{Grouping, Pipeline, TextStep, Value};

/// Symbol appended to fill the last block.
pub const FILLER: char = '?';

/// How a permutation is supplied.
pub enum Sigma {
    /// The images of `0..n`, in order.
    Explicit(Vec<usize>),
    /// A function evaluated over `0..n`; needs an explicit block size.
    Generated(Box<dyn Fn(usize) -> usize>),
}

impl fmt::Debug for Sigma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(sigma) => f.debug_tuple("Explicit").field(sigma).finish(),
            Self::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

impl From<Vec<usize>> for Sigma {
    fn from(sigma: Vec<usize>) -> Self {
        Self::Explicit(sigma)
    }
}

/// Transposition cipher parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspositionCipher {
    sigma: Vec<usize>,
}

impl TranspositionCipher {
    /// Builds a cipher from `sigma`.
    ///
    /// `block_size` defaults to the length of an explicit sigma.
    ///
    /// # Errors
    ///
    /// * [`CipherError::MissingBlockSize`] for a generated sigma without a
    ///   block size.
    /// * [`CipherError::SigmaLengthMismatch`] when the block size disagrees
    ///   with an explicit sigma.
    /// * [`CipherError::ZeroBlockSize`] for an empty permutation.
    /// * [`CipherError::InvalidPermutation`] when sigma is not a permutation
    ///   of `0..n`.
    pub fn new(sigma: Sigma, block_size: Option<usize>) -> Result<Self> {
        let sigma = match (sigma, block_size) {
            (Sigma::Generated(_), None) => return Err(CipherError::MissingBlockSize),
            (Sigma::Generated(f), Some(n)) => (0..n).map(f).collect(),
            (Sigma::Explicit(sigma), Some(n)) if n != sigma.len() => {
                return Err(CipherError::SigmaLengthMismatch {
                    expected: n,
                    found: sigma.len(),
                });
            }
            (Sigma::Explicit(sigma), _) => sigma,
        };
        Self::validate(&sigma)?;
        Ok(Self { sigma })
    }

    /// Shorthand for an explicit sigma whose length is the block size.
    ///
    /// # Errors
    ///
    /// See [`TranspositionCipher::new`].
    pub fn from_sigma(sigma: Vec<usize>) -> Result<Self> {
        Self::new(Sigma::Explicit(sigma), None)
    }

    /// A cipher with a uniformly random permutation of `0..n`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::ZeroBlockSize`] when `n` is zero.
    pub fn random(n: usize) -> Result<Self> {
        let mut sigma: Vec<usize> = (0..n).collect();
        sigma.shuffle(&mut rand::rng());
        Self::from_sigma(sigma)
    }

    fn validate(sigma: &[usize]) -> Result<()> {
        let n = sigma.len();
        if n == 0 {
            return Err(CipherError::ZeroBlockSize);
        }
        let mut seen = vec![false; n];
        for &target in sigma {
            match seen.get_mut(target) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(CipherError::InvalidPermutation(n)),
            }
        }
        Ok(())
    }

    /// The permutation.
    #[must_use]
    pub fn sigma(&self) -> &[usize] {
        &self.sigma
    }

    /// The block size `n`.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.sigma.len()
    }

    /// Pads to a multiple of `n`, then groups by `n`.
    #[must_use]
    pub fn pipeline(&self) -> Pipeline {
        let n = self.block_size();
        let grouping = NonZeroUsize::new(n).map_or(Grouping::Whole, Grouping::Fixed);
        Pipeline::new(grouping).raw(pad(n))
    }

    /// Permutes one block: `output[sigma[i]] = input[i]`.
    ///
    /// # Errors
    ///
    /// Fails if the group is not text of exactly `n` symbols.
    pub fn transform(&self, group: Value) -> Result<Value> {
        let block: Vec<char> = group.into_text("encrypt")?.chars().collect();
        if block.len() != self.block_size() {
            return Err(CipherError::BlockLength {
                expected: self.block_size(),
                found: block.len(),
            });
        }
        let mut out = vec![FILLER; block.len()];
        for (&target, &c) in self.sigma.iter().zip(&block) {
            out[target] = c;
        }
        Ok(Value::Text(out.into_iter().collect()))
    }

    /// The positional inverse: `inverse[sigma[i]] = i`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidPermutation`] if some target index has
    /// no source, which construction already rules out.
    pub fn inverse(&self) -> Result<Self> {
        let n = self.block_size();
        let inverse = (0..n)
            .map(|target| {
                self.sigma
                    .iter()
                    .position(|&s| s == target)
                    .ok_or(CipherError::InvalidPermutation(n))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { sigma: inverse })
    }
}

/// Appends `n - ((len - 1) mod n) - 1` filler symbols.
fn pad(n: usize) -> TextStep {
    TextStep::new("pad", move |s| {
        let len = s.chars().count();
        let fill = match len {
            0 => 0,
            len => n - (len - 1) % n - 1,
        };
        let mut padded = s.to_owned();
        padded.extend(std::iter::repeat_n(FILLER, fill));
        Ok(padded)
    })
}

impl fmt::Display for TranspositionCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrows: Vec<String> = self
            .sigma
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{i}->{s}"))
            .collect();
        write!(f, "TranspositionCipher[{}]", arrows.join("; "))
    }
}
