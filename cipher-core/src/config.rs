// File:    config.rs
// Author:  apezoo
// Date:    2025-08-14
//
// Description: JSON description of a cipher, or a chain of ciphers.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Cipher configuration files.
//!
//! ```json
//! {
//!   "cipher": "compound",
//!   "stages": [
//!     { "cipher": "shift", "shift": 5 },
//!     { "cipher": "transposition", "sigma": [3, 2, 1, 0, 4] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cipher::Cipher;
use crate::compound::CompoundCipher;
use crate::error::{CipherError, Result};
use crate::rsa::{DEFAULT_PUBLIC_EXPONENT, RsaCipher};
use crate::steps;
use crate::transposition::TranspositionCipher;
use crate::vigenere::VigenereCipher;

const fn default_exponent() -> u64 {
    DEFAULT_PUBLIC_EXPONENT
}

/// A cipher described as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cipher", rename_all = "lowercase")]
pub enum CipherConfig {
    /// Caesar shift.
    Shift {
        /// Distance each letter moves.
        shift: i64,
    },
    /// Block transposition.
    Transposition {
        /// `sigma[i]` is where position `i` of each block goes.
        sigma: Vec<usize>,
    },
    /// Vigenère substitution.
    Vigenere {
        /// The key word.
        key: String,
    },
    /// Textbook RSA.
    Rsa {
        /// Modulus; defaults to `p * q`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        n: Option<u64>,
        /// Public exponent.
        #[serde(default = "default_exponent")]
        e: u64,
        /// First prime.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        p: Option<u64>,
        /// Second prime.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        q: Option<u64>,
        /// Factor `n` when the primes are missing.
        #[serde(default)]
        recover: bool,
    },
    /// Stages run in order.
    Compound {
        /// Labels of raw steps run over the whole input first, such as
        /// `lowercase`.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        raw: Vec<String>,
        /// The chained ciphers.
        stages: Vec<CipherConfig>,
    },
}

impl CipherConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Json`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Io`] if the file cannot be read, or
    /// [`CipherError::Json`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading cipher config from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialises the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Json`] if serialisation fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the described cipher.
    ///
    /// # Errors
    ///
    /// Returns the constructor failure of any described cipher, or
    /// [`CipherError::MissingPrimes`] for an RSA entry with neither `n` nor
    /// both primes.
    pub fn build(&self) -> Result<Cipher> {
        Ok(match self {
            Self::Shift { shift } => Cipher::shift(*shift),
            Self::Transposition { sigma } => TranspositionCipher::from_sigma(sigma.clone())?.into(),
            Self::Vigenere { key } => VigenereCipher::new(key)?.into(),
            Self::Rsa { n, e, p, q, recover } => {
                let primes = p.zip(*q);
                let rsa = match (n, primes) {
                    (Some(n), Some(primes)) => RsaCipher::new(*n, *e, Some(primes))?,
                    (None, Some((p, q))) => RsaCipher::from_primes(p, q, *e)?,
                    (Some(n), None) if *recover => RsaCipher::with_recovery(*n, *e)?,
                    (Some(n), None) => RsaCipher::new(*n, *e, None)?,
                    (None, None) => return Err(CipherError::MissingPrimes),
                };
                rsa.into()
            }
            Self::Compound { raw, stages } => {
                let stages = stages.iter().map(Self::build).collect::<Result<Vec<_>>>()?;
                raw.iter()
                    .try_fold(CompoundCipher::new(stages), |chain, name| {
                        steps::text_step(name)
                            .map(|step| chain.raw(step))
                            .ok_or_else(|| CipherError::UnknownStep(name.clone()))
                    })?
                    .into()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsa_defaults() {
        let config = CipherConfig::from_json(r#"{"cipher": "rsa", "p": 43, "q": 59}"#).unwrap();
        assert_eq!(
            config,
            CipherConfig::Rsa {
                n: None,
                e: DEFAULT_PUBLIC_EXPONENT,
                p: Some(43),
                q: Some(59),
                recover: false,
            }
        );
    }

    #[test]
    fn test_rsa_without_modulus_or_primes() {
        let config = CipherConfig::from_json(r#"{"cipher": "rsa", "e": 13}"#).unwrap();
        assert!(matches!(config.build().unwrap_err(), CipherError::MissingPrimes));
    }

    #[test]
    fn test_unknown_cipher_is_rejected() {
        let err = CipherConfig::from_json(r#"{"cipher": "enigma"}"#).unwrap_err();
        assert!(matches!(err, CipherError::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = CipherConfig::Compound {
            raw: vec!["lowercase".into()],
            stages: vec![
                CipherConfig::Shift { shift: 5 },
                CipherConfig::Vigenere { key: "key".into() },
            ],
        };
        let json = config.to_json().unwrap();
        assert!(json.contains(r#""cipher": "compound""#));
        assert_eq!(CipherConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_compound_raw_steps() {
        let config = CipherConfig::from_json(
            r#"{"cipher": "compound", "raw": ["lowercase"], "stages": [{"cipher": "transposition", "sigma": [1, 0]}]}"#,
        )
        .unwrap();
        assert_eq!(config.build().unwrap().encrypt("AB").unwrap(), "ba");

        let config = CipherConfig::from_json(
            r#"{"cipher": "compound", "raw": ["shout"], "stages": []}"#,
        )
        .unwrap();
        assert!(matches!(config.build().unwrap_err(), CipherError::UnknownStep(name) if name == "shout"));
    }

    #[test]
    fn test_build_uses_recovery_when_asked() {
        let config = CipherConfig::Rsa {
            n: Some(2537),
            e: 13,
            p: None,
            q: None,
            recover: true,
        };
        let cipher = config.build().unwrap();
        assert_eq!(cipher.decrypt(&cipher.encrypt("hi").unwrap()).unwrap(), "hi");
    }
}
