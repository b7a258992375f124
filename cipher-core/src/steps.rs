// File:    steps.rs
// Author:  apezoo
// Date:    2025-08-03
//
// Description: Reusable pipeline steps shared by several ciphers.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Named pipeline steps shared between ciphers.

use crate::alphabet::{self, Symbol, to_char, to_numeric};
use crate::error::CipherError;
use crate::pipeline::{GroupStep, TextStep, Value};

/// Two-digit code that marks padding inside an RSA digit string.
pub const FILLER_CODE: u8 = 26;

/// Lowercases the input.
#[must_use]
pub fn lowercase() -> TextStep {
    TextStep::new("lowercase", |s| Ok(s.to_lowercase()))
}

/// Drops every space.
#[must_use]
pub fn remove_spaces() -> TextStep {
    TextStep::new("remove_spaces", |s| Ok(s.replace(' ', "")))
}

/// Looks up a whole-text step by its label, for steps named in configuration.
#[must_use]
pub fn text_step(name: &str) -> Option<TextStep> {
    match name {
        "lowercase" => Some(lowercase()),
        "remove_spaces" => Some(remove_spaces()),
        _ => None,
    }
}

/// Encodes a one-character text group as a [`Symbol`].
#[must_use]
pub fn numeric() -> GroupStep {
    GroupStep::new("numeric", |group| {
        let text = group.into_text("numeric")?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Value::Symbol(to_numeric(c))),
            _ => Err(CipherError::BlockLength {
                expected: 1,
                found: text.chars().count(),
            }),
        }
    })
}

/// Decodes a [`Symbol`] back into a one-character text group.
#[must_use]
pub fn character() -> GroupStep {
    GroupStep::new("character", |group| {
        let symbol = group.into_symbol("character")?;
        Ok(Value::Text(to_char(symbol).to_string()))
    })
}

/// Encodes a whole text group as a symbol sequence.
#[must_use]
pub fn numeric_sequence() -> GroupStep {
    GroupStep::new("numeric", |group| {
        let text = group.into_text("numeric")?;
        Ok(Value::Symbols(alphabet::to_symbols(&text)))
    })
}

/// Decodes a symbol sequence back into text.
#[must_use]
pub fn characters() -> GroupStep {
    GroupStep::new("characters", |group| {
        let symbols = group.into_symbols("characters")?;
        Ok(Value::Text(alphabet::to_string(&symbols)))
    })
}

/// Replaces each letter with its zero-padded two-digit code.
#[must_use]
pub fn two_digit_codes() -> TextStep {
    TextStep::new("rsa_format", |s| {
        s.chars()
            .map(|c| match to_numeric(c) {
                Symbol::Letter(p) => Ok(format!("{p:02}")),
                Symbol::Other(other) => Err(CipherError::UnencodableSymbol(other)),
            })
            .collect()
    })
}

/// Right-pads a digit string with [`FILLER_CODE`] pairs up to a multiple of
/// `width` digits.
#[must_use]
pub fn pad_final_block(width: usize) -> TextStep {
    TextStep::new("pad_block", move |s| {
        let mut padded = s.to_owned();
        while width > 0 && padded.len() % width != 0 {
            padded.push_str(&FILLER_CODE.to_string());
        }
        Ok(padded)
    })
}

/// Parses a digit group into a number.
#[must_use]
pub fn parse_int() -> GroupStep {
    GroupStep::new("parse_int", |group| {
        let digits = group.into_text("parse_int")?;
        digits
            .parse::<u64>()
            .map(Value::Number)
            .map_err(|_| CipherError::InvalidBlock(digits))
    })
}

/// Formats a number zero-padded to `width` digits.
#[must_use]
pub fn pad_numeric(width: usize) -> GroupStep {
    GroupStep::new("pad_numeric", move |group| {
        let n = group.into_number("pad_numeric")?;
        Ok(Value::Text(format!("{n:0width$}")))
    })
}

/// Splits a digit group into two-digit codes and maps them back to letters,
/// skipping filler codes.
#[must_use]
pub fn decode_pairs() -> GroupStep {
    GroupStep::new("decode_pairs", |group| {
        let digits = group.into_text("decode_pairs")?;
        if digits.len() % 2 != 0 {
            return Err(CipherError::InvalidBlock(digits));
        }
        let mut text = String::with_capacity(digits.len() / 2);
        for pair in digits.as_bytes().chunks(2) {
            let code = std::str::from_utf8(pair)
                .ok()
                .and_then(|p| p.parse::<u8>().ok())
                .ok_or_else(|| CipherError::InvalidBlock(digits.clone()))?;
            match code {
                c if c < alphabet::ALPHABET_LEN => text.push(to_char(Symbol::Letter(c))),
                FILLER_CODE => {}
                _ => return Err(CipherError::InvalidBlock(digits.clone())),
            }
        }
        Ok(Value::Text(text))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_step_lookup() {
        assert_eq!(text_step("lowercase").unwrap().apply("AbC").unwrap(), "abc");
        assert_eq!(text_step("remove_spaces").unwrap().name(), "remove_spaces");
        assert!(text_step("reverse").is_none());
    }

    #[test]
    fn test_two_digit_codes() {
        assert_eq!(two_digit_codes().apply("hello").unwrap(), "0704111114");
        assert!(matches!(
            two_digit_codes().apply("a1").unwrap_err(),
            CipherError::UnencodableSymbol('1')
        ));
    }

    #[test]
    fn test_pad_final_block() {
        assert_eq!(pad_final_block(4).apply("070411").unwrap(), "07041126");
        assert_eq!(pad_final_block(4).apply("0704").unwrap(), "0704");
        assert_eq!(pad_final_block(4).apply("").unwrap(), "");
    }

    #[test]
    fn test_decode_pairs_skips_filler() {
        let out = decode_pairs().apply(Value::Text("0026".into())).unwrap();
        assert_eq!(out, Value::Text("a".into()));
        assert!(decode_pairs().apply(Value::Text("0730".into())).is_err());
        assert!(decode_pairs().apply(Value::Text("070".into())).is_err());
    }

    #[test]
    fn test_pad_numeric_keeps_leading_zeros() {
        let out = pad_numeric(4).apply(Value::Number(11)).unwrap();
        assert_eq!(out, Value::Text("0011".into()));
    }

    #[test]
    fn test_numeric_rejects_multi_char_group() {
        assert!(numeric().apply(Value::Text("ab".into())).is_err());
        assert_eq!(
            numeric().apply(Value::Text(" ".into())).unwrap(),
            Value::Symbol(Symbol::Other(' '))
        );
    }
}
