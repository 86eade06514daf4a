//! Reading BR-Code strings back into fields.
//!
//! Used to validate a "copia e cola" string before it is shown to a buyer.

use crate::crc16::checksum_hex;
use crate::error::{PixError, Result};
use crate::payload::ids;

/// One top-level `<id><len><value>` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvField {
    pub id: String,
    pub value: String,
}

impl TlvField {
    /// Parses this field's value as a nested run of fields (ids `26`, `62`).
    pub fn sub_fields(&self) -> Result<Vec<TlvField>> {
        parse_fields(&self.value)
    }
}

/// Splits a string into consecutive TLV fields.
///
/// The whole input must be consumed; a truncated header, a non-numeric
/// length or a value running past the end is an error.
pub fn parse_fields(input: &str) -> Result<Vec<TlvField>> {
    if !input.is_ascii() {
        return Err(PixError::MalformedPayload {
            offset: input.find(|c: char| !c.is_ascii()).unwrap_or(0),
            message: "non-ASCII character".to_string(),
        });
    }

    let mut fields = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let rest = &input[offset..];
        if rest.len() < 4 {
            return Err(PixError::MalformedPayload {
                offset,
                message: format!("truncated field header {:?}", rest),
            });
        }

        let id = &rest[..2];
        let len_digits = &rest[2..4];
        if !len_digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PixError::MalformedPayload {
                offset,
                message: format!("invalid length {:?} for field {}", len_digits, id),
            });
        }
        let len: usize = len_digits
            .parse()
            .map_err(|_| PixError::MalformedPayload {
                offset,
                message: format!("invalid length {:?} for field {}", len_digits, id),
            })?;

        if rest.len() < 4 + len {
            return Err(PixError::MalformedPayload {
                offset,
                message: format!(
                    "field {} declares {} characters but only {} remain",
                    id,
                    len,
                    rest.len() - 4
                ),
            });
        }

        fields.push(TlvField {
            id: id.to_string(),
            value: rest[4..4 + len].to_string(),
        });
        offset += 4 + len;
    }

    Ok(fields)
}

/// Returns `true` if the payload ends in a `63` field whose value is the
/// CRC of everything before it.
pub fn verify_checksum(payload: &str) -> bool {
    if !payload.is_ascii() || payload.len() < 8 {
        return false;
    }

    let (body, found) = payload.split_at(payload.len() - 4);
    if !body.ends_with(&format!("{}04", ids::CRC16)) {
        return false;
    }

    checksum_hex(body).eq_ignore_ascii_case(found)
}

/// Parses a payload and checks its CRC.
pub fn decode_payload(payload: &str) -> Result<Vec<TlvField>> {
    let fields = parse_fields(payload)?;

    let last = fields.last().ok_or_else(|| PixError::MalformedPayload {
        offset: 0,
        message: "empty payload".to_string(),
    })?;
    if last.id != ids::CRC16 || last.value.len() != 4 {
        return Err(PixError::MalformedPayload {
            offset: payload.len().saturating_sub(last.value.len() + 4),
            message: "payload does not end with a CRC field".to_string(),
        });
    }

    let expected = checksum_hex(&payload[..payload.len() - 4]);
    if !expected.eq_ignore_ascii_case(&last.value) {
        return Err(PixError::ChecksumMismatch {
            expected,
            found: last.value.clone(),
        });
    }

    Ok(fields)
}
