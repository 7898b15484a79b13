use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Outcome of validating a search input as an ENS name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub is_eth: bool,
    /// Normalised form of the input. Best effort when `is_valid` is false.
    pub name: String,
}

pub trait NameValidator: Send + Sync {
    fn validate(&self, input: &str) -> Validation;
}

impl<F> NameValidator for F
where
    F: Fn(&str) -> Validation + Send + Sync,
{
    fn validate(&self, input: &str) -> Validation {
        self(input)
    }
}

/// Label checks covering the common ENS normalisation failures: case folding
/// and NFC are applied, then empty labels, whitespace, control characters,
/// stray punctuation, misplaced underscores and `xn--` style hyphens are
/// rejected. Emoji and non-Latin scripts pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnsNameValidator;

impl NameValidator for EnsNameValidator {
    fn validate(&self, input: &str) -> Validation {
        let name: String = input.to_lowercase().nfc().collect();
        let is_eth = name.rsplit('.').next() == Some("eth");
        let is_valid = !name.is_empty() && name.split('.').all(label_ok);
        Validation {
            is_valid,
            is_eth,
            name,
        }
    }
}

fn label_ok(label: &str) -> bool {
    if label.is_empty() {
        return false;
    }
    let bad_char = label.chars().any(|c| {
        c.is_whitespace() || c.is_control() || (c.is_ascii_punctuation() && c != '-' && c != '_')
    });
    if bad_char {
        return false;
    }
    if label.trim_start_matches('_').contains('_') {
        return false;
    }
    if label.is_ascii() && label.len() >= 4 && &label[2..4] == "--" {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Validation {
        EnsNameValidator.validate(s)
    }

    #[test]
    fn lowercases_and_flags_eth() {
        let r = v("JeffLau.ETH");
        assert!(r.is_valid);
        assert!(r.is_eth);
        assert_eq!(r.name, "jefflau.eth");
    }

    #[test]
    fn bare_label_is_valid_but_not_eth() {
        let r = v("jefflau");
        assert!(r.is_valid);
        assert!(!r.is_eth);
        // a bare "eth" is its own tld
        assert!(v("eth").is_eth);
    }

    #[test]
    fn applies_nfc() {
        // "e" followed by a combining acute accent
        let r = v("cafe\u{0301}");
        assert_eq!(r.name, "caf\u{e9}");
        assert!(r.is_valid);
    }

    #[test]
    fn rejects_malformed_labels() {
        for bad in ["", ".eth", "a..eth", "a.", "hello world", "a/b", "a_b", "ab--cd", "tab\t"] {
            assert!(!v(bad).is_valid, "{bad:?}");
        }
        assert!(v("_dmarc.example.com").is_valid);
        assert!(v("my-name.eth").is_valid);
        assert!(v("🦊.eth").is_valid);
    }
}
