//! EMV tag/length/value field encoding.

use crate::error::{PixError, Result};

/// Largest value length expressible with a two-digit length prefix.
pub const MAX_VALUE_LEN: usize = 99;

/// Replaces line breaks with spaces and trims surrounding whitespace.
///
/// A stray `\n` or `\r` inside a value would shift every following field
/// for a reader that trusts the length prefix.
pub fn sanitize(value: &str) -> String {
    value.replace(['\n', '\r'], " ").trim().to_string()
}

/// Encodes one field as `<id><len><value>`.
///
/// The value is sanitized first and the length prefix is computed on the
/// sanitized text, zero-padded to two digits.
///
/// # Examples
///
/// ```
/// use pix_brcode::encode_field;
///
/// assert_eq!(encode_field("58", "BR").unwrap(), "5802BR");
/// assert_eq!(encode_field("05", "AB\nCD").unwrap(), "0505AB CD");
/// ```
pub fn encode_field(id: &str, value: &str) -> Result<String> {
    if id.len() != 2 || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PixError::InvalidFieldId(id.to_string()));
    }

    let value = sanitize(value);
    let len = value.chars().count();
    if len > MAX_VALUE_LEN {
        return Err(PixError::FieldTooLong {
            id: id.to_string(),
            len,
        });
    }

    Ok(format!("{}{:02}{}", id, len, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_line_breaks() {
        assert_eq!(sanitize("AB\nCD"), "AB CD");
        assert_eq!(sanitize("AB\r\nCD"), "AB  CD");
        assert_eq!(sanitize("  \nLoja\r  "), "Loja");
    }

    #[test]
    fn test_length_is_zero_padded() {
        assert_eq!(encode_field("00", "01").unwrap(), "000201");
        assert_eq!(encode_field("53", "986").unwrap(), "5303986");
        assert_eq!(encode_field("62", "").unwrap(), "6200");
    }

    #[test]
    fn test_length_counts_sanitized_value() {
        assert_eq!(encode_field("05", "  ABC123 \n").unwrap(), "0506ABC123");
    }

    #[test]
    fn test_accepts_exactly_99() {
        let value = "x".repeat(99);
        let encoded = encode_field("26", &value).unwrap();
        assert!(encoded.starts_with("2699"));
        assert_eq!(encoded.len(), 103);
    }

    #[test]
    fn test_rejects_overflowing_length() {
        let value = "x".repeat(100);
        match encode_field("26", &value) {
            Err(PixError::FieldTooLong { id, len }) => {
                assert_eq!(id, "26");
                assert_eq!(len, 100);
            }
            other => panic!("Expected FieldTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_identifier() {
        assert!(matches!(
            encode_field("5", "BR"),
            Err(PixError::InvalidFieldId(_))
        ));
        assert!(matches!(
            encode_field("5A", "BR"),
            Err(PixError::InvalidFieldId(_))
        ));
    }
}
