// File:    lib.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: The main library crate for cipher-core, exposing the pipeline engine and the cipher variants.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # Cipher Core Library
//!
//! Didactic ciphers built on one shared processing pipeline: Caesar shift,
//! block transposition, Vigenère, textbook RSA, and chains of those.
//!
//! ```
//! use cipher_core::Cipher;
//!
//! let cipher = Cipher::shift(5);
//! let ciphertext = cipher.encrypt("abc").unwrap();
//! assert_eq!(ciphertext, "fgh");
//! assert_eq!(cipher.decrypt(&ciphertext).unwrap(), "abc");
//! ```
//!
//! None of these ciphers is secure.

/// Conversion between characters and alphabet indices.
pub mod alphabet;
/// The cipher front end and variant dispatch.
pub mod cipher;
/// Chains of ciphers.
pub mod compound;
/// JSON cipher configuration.
pub mod config;
/// The crate error type.
pub mod error;
/// Modular arithmetic helpers.
pub mod numtheory;
/// The five-stage processing pipeline.
pub mod pipeline;
/// Textbook RSA and key recovery.
pub mod rsa;
/// The Caesar shift cipher.
pub mod shift;
/// Reusable pipeline steps.
pub mod steps;
/// Fixed-width trace tables.
pub mod table;
/// The block transposition cipher.
pub mod transposition;
/// The Vigenère cipher.
pub mod vigenere;

pub use cipher::{Cipher, CipherKind};
pub use compound::CompoundCipher;
pub use config::CipherConfig;
pub use error::{CipherError, Result};
pub use rsa::{RsaCipher, recover_primes};
pub use shift::ShiftCipher;
pub use table::Trace;
pub use transposition::{Sigma, TranspositionCipher};
pub use vigenere::VigenereCipher;
