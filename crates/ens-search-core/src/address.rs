//! Account address recognition (20-byte hex, EIP-55 checksum aware).

use once_cell::sync::Lazy;
use regex::Regex;
use sha3::{Digest, Keccak256};

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address regex"));

/// True when `input` is a `0x`-prefixed 40 digit hex address.
///
/// All-lowercase digits are accepted as-is. Any other casing must match the
/// EIP-55 checksum exactly, so a mistyped mixed-case address is rejected.
pub fn is_address(input: &str) -> bool {
    if !ADDRESS_RE.is_match(input) {
        return false;
    }
    let digits = &input[2..];
    if digits.bytes().all(|b| !b.is_ascii_uppercase()) {
        return true;
    }
    to_checksum_address(input).as_deref() == Some(input)
}

/// EIP-55 encoding of a hex address, or `None` if the input is not 40 hex
/// digits behind `0x`.
pub fn to_checksum_address(input: &str) -> Option<String> {
    if !ADDRESS_RE.is_match(input) {
        return None;
    }
    let lower = input[2..].to_ascii_lowercase();
    let hash = hex::encode(Keccak256::digest(lower.as_bytes()));
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (c, h) in lower.chars().zip(hash.chars()) {
        // nibble >= 8 means uppercase
        if c.is_ascii_alphabetic() && matches!(h, '8'..='9' | 'a'..='f') {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    Some(out)
}
