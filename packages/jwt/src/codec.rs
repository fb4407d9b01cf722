//! Base64url codec for token segments (RFC 7515 §2, unpadded)

use crate::error::{JwtError, JwtResult};
use base64::{
    Engine as _, alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig, general_purpose::STANDARD},
};

/// Standard-alphabet decoder that ignores the unused low bits of the final
/// character; only the alphabet and the length can make input undecodable.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Encode bytes as unpadded, URL-safe base64.
///
/// Never fails; the empty input encodes to the empty string.
#[must_use]
pub fn encode(input: &[u8]) -> String {
    let mut encoded = STANDARD.encode(input);
    while encoded.ends_with('=') {
        encoded.pop();
    }
    encoded
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Decode unpadded, URL-safe base64.
///
/// The alphabet substitutions are reversed and `(4 - len % 4) % 4` padding
/// characters restored before handing the input to the standard decoder.
///
/// # Errors
/// Returns `JwtError::MalformedEncoding` if the input contains characters
/// outside the base64url alphabet (padding included) or has a length that no
/// amount of padding can make valid. Set bits past the last encoded byte are
/// ignored, so distinct strings may decode to the same bytes.
pub fn decode(input: &str) -> JwtResult<Vec<u8>> {
    if let Some(bad) = input
        .bytes()
        .find(|b| !(b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_'))
    {
        return Err(JwtError::MalformedEncoding(format!(
            "byte 0x{bad:02x} is outside the base64url alphabet"
        )));
    }

    let pad = (4 - input.len() % 4) % 4;
    if pad == 3 {
        return Err(JwtError::MalformedEncoding(format!(
            "length {} cannot be padded to a multiple of 4",
            input.len()
        )));
    }

    let mut restored = String::with_capacity(input.len() + pad);
    restored.extend(input.chars().map(|c| match c {
        '-' => '+',
        '_' => '/',
        other => other,
    }));
    restored.extend(std::iter::repeat('=').take(pad));

    LENIENT
        .decode(restored)
        .map_err(|e| JwtError::MalformedEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_url_safe_alphabet_without_padding() {
        // 0xfb 0xff encodes to "+/8=" in standard base64
        assert_eq!(encode(&[0xfb, 0xff]), "-_8");
        assert_eq!(decode("-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn restores_each_padding_length() {
        assert_eq!(decode("").unwrap(), b"");
        assert_eq!(decode("Zg").unwrap(), b"f");
        assert_eq!(decode("Zm8").unwrap(), b"fo");
        assert_eq!(decode("Zm9v").unwrap(), b"foo");
    }

    #[test]
    fn rejects_impossible_lengths() {
        assert!(matches!(decode("Z"), Err(JwtError::MalformedEncoding(_))));
        assert!(matches!(decode("Zm9vY"), Err(JwtError::MalformedEncoding(_))));
    }

    #[test]
    fn rejects_standard_alphabet_and_padding() {
        assert!(matches!(decode("+/8"), Err(JwtError::MalformedEncoding(_))));
        assert!(matches!(decode("Zg=="), Err(JwtError::MalformedEncoding(_))));
        assert!(matches!(decode("Zm 9v"), Err(JwtError::MalformedEncoding(_))));
    }

    #[test]
    fn ignores_trailing_bits() {
        // "Zh" carries set bits past the single encoded byte
        assert_eq!(decode("Zh").unwrap(), b"f");
        assert_eq!(decode("Zm9"), decode("Zm8"));
        assert_ne!(encode(&decode("Zh").unwrap()), "Zh");
    }
}
