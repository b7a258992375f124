// File:    compound.rs
// Author:  apezoo
// Date:    2025-08-12
//
// Description: Chains several configured ciphers into one.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! A chain of ciphers run one after another over the whole input, after an
//! optional shared raw preprocessing pass.

use std::fmt;

use crate::cipher::Cipher;
use crate::error::Result;
use crate::pipeline::{Grouping, Pipeline, TextStep, Value};

/// Compound cipher parameters: the shared raw steps and the stages, in
/// encryption order.
#[derive(Debug, Clone)]
pub struct CompoundCipher {
    raw: Vec<TextStep>,
    stages: Vec<Cipher>,
}

impl CompoundCipher {
    /// Chains `stages` in the given order.
    #[must_use]
    pub const fn new(stages: Vec<Cipher>) -> Self {
        Self {
            raw: Vec::new(),
            stages,
        }
    }

    /// Appends a raw step run over the whole input before the first stage.
    #[must_use]
    pub fn raw(mut self, step: TextStep) -> Self {
        self.raw.push(step);
        self
    }

    /// The shared raw steps.
    #[must_use]
    pub fn raw_steps(&self) -> &[TextStep] {
        &self.raw
    }

    /// The stages, in encryption order.
    #[must_use]
    pub fn stages(&self) -> &[Cipher] {
        &self.stages
    }

    /// The raw steps, then the whole text as one group handed to the first
    /// stage.
    #[must_use]
    pub fn pipeline(&self) -> Pipeline {
        self.raw
            .iter()
            .cloned()
            .fold(Pipeline::new(Grouping::Whole), Pipeline::raw)
    }

    /// Feeds the group through every stage's `encrypt`.
    ///
    /// # Errors
    ///
    /// Fails if the group is not text, or with the first stage failure.
    pub fn transform(&self, group: Value) -> Result<Value> {
        let mut text = group.into_text("encrypt")?;
        for stage in &self.stages {
            text = stage.encrypt(&text)?;
        }
        Ok(Value::Text(text))
    }

    /// Every stage's decryption cipher, in reverse order. The raw steps are
    /// not carried over.
    ///
    /// # Errors
    ///
    /// Fails if any stage cannot produce its decryption cipher.
    pub fn inverse(&self) -> Result<Self> {
        let stages = self
            .stages
            .iter()
            .rev()
            .map(|stage| stage.decryption_cipher().cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(stages))
    }
}

impl fmt::Display for CompoundCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.stages.iter().map(ToString::to_string).collect();
        write!(f, "CompoundCipher({})", names.join("==>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps;

    fn swap_pairs() -> CompoundCipher {
        let stages = vec![Cipher::transposition(vec![1, 0]).unwrap()];
        CompoundCipher::new(stages).raw(steps::lowercase())
    }

    #[test]
    fn test_raw_steps_run_before_first_stage() {
        let cipher = Cipher::from(swap_pairs());
        assert_eq!(cipher.encrypt("ABcd").unwrap(), "badc");
        assert_eq!(cipher.decrypt("badc").unwrap(), "abcd");
    }

    #[test]
    fn test_inverse_drops_raw_steps() {
        let chain = swap_pairs();
        assert_eq!(chain.raw_steps().len(), 1);
        assert_eq!(chain.pipeline().raw_steps()[0].name(), "lowercase");

        let inverse = chain.inverse().unwrap();
        assert!(inverse.raw_steps().is_empty());
        assert!(inverse.pipeline().raw_steps().is_empty());
    }
}
