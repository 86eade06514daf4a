//! Static BR-Code payload assembly.
//!
//! A payload is a flat run of TLV fields in the order fixed by the BR-Code
//! manual, terminated by field `63` whose value is the CRC of everything
//! before it (including the `6304` header of field `63` itself).

use crate::amount::Amount;
use crate::crc16::checksum_hex;
use crate::error::{PixError, Result};
use crate::field::{encode_field, sanitize};
use log::debug;
use serde::Deserialize;

/// Globally unique identifier of the PIX arrangement.
pub const PIX_GUI: &str = "BR.GOV.BCB.PIX";

/// Maximum merchant name length, in characters.
pub const MERCHANT_NAME_MAX: usize = 25;

/// Maximum merchant city length, in characters.
pub const MERCHANT_CITY_MAX: usize = 15;

/// Reference used when the merchant supplies no txid.
pub const EMPTY_TXID: &str = "***";

/// Header of the CRC field; the 4 hex digits follow it.
pub const CRC_FIELD_HEADER: &str = "6304";

/// Top-level field identifiers.
pub mod ids {
    pub const PAYLOAD_FORMAT_INDICATOR: &str = "00";
    pub const POINT_OF_INITIATION_METHOD: &str = "01";
    pub const MERCHANT_ACCOUNT_INFORMATION: &str = "26";
    pub const MERCHANT_CATEGORY_CODE: &str = "52";
    pub const TRANSACTION_CURRENCY: &str = "53";
    pub const TRANSACTION_AMOUNT: &str = "54";
    pub const COUNTRY_CODE: &str = "58";
    pub const MERCHANT_NAME: &str = "59";
    pub const MERCHANT_CITY: &str = "60";
    pub const ADDITIONAL_DATA_FIELD: &str = "62";
    pub const CRC16: &str = "63";

    /// Sub-fields of `26`.
    pub const GUI: &str = "00";
    pub const PIX_KEY: &str = "01";

    /// Sub-field of `62`.
    pub const REFERENCE_LABEL: &str = "05";
}

/// Everything needed to build one static PIX payment code.
#[derive(Debug, Clone, Deserialize)]
pub struct PixPayloadRequest {
    /// Receiver's PIX address (email, phone, random key or tax ID)
    pub pix_key: String,

    /// Receiver's display name, truncated to 25 characters
    pub merchant_name: String,

    /// Receiver's city, truncated to 15 characters
    pub merchant_city: String,

    /// Amount in reais
    pub amount: Amount,

    /// Merchant-assigned transaction reference
    pub txid: String,
}

impl PixPayloadRequest {
    pub fn new(
        pix_key: impl Into<String>,
        merchant_name: impl Into<String>,
        merchant_city: impl Into<String>,
        amount: Amount,
        txid: impl Into<String>,
    ) -> Self {
        PixPayloadRequest {
            pix_key: pix_key.into(),
            merchant_name: merchant_name.into(),
            merchant_city: merchant_city.into(),
            amount,
            txid: txid.into(),
        }
    }
}

/// Builds the payload up to and including `6304`, without the CRC digits.
pub fn assemble(request: &PixPayloadRequest) -> Result<String> {
    let pix_key = required_text("pix_key", &request.pix_key, None)?;
    let merchant_name = required_text(
        "merchant_name",
        &request.merchant_name,
        Some(MERCHANT_NAME_MAX),
    )?;
    let merchant_city = required_text(
        "merchant_city",
        &request.merchant_city,
        Some(MERCHANT_CITY_MAX),
    )?;

    let mut txid = text("txid", &request.txid, None)?;
    if txid.is_empty() {
        txid = EMPTY_TXID.to_string();
    }

    let account_info = [
        encode_field(ids::GUI, PIX_GUI)?,
        field("pix_key", ids::PIX_KEY, &pix_key)?,
    ]
    .concat();
    let additional_data = field("txid", ids::REFERENCE_LABEL, &txid)?;

    let mut payload = String::with_capacity(160);
    payload.push_str(&encode_field(ids::PAYLOAD_FORMAT_INDICATOR, "01")?);
    payload.push_str(&encode_field(ids::POINT_OF_INITIATION_METHOD, "11")?);
    payload.push_str(&field("pix_key", ids::MERCHANT_ACCOUNT_INFORMATION, &account_info)?);
    payload.push_str(&encode_field(ids::MERCHANT_CATEGORY_CODE, "0000")?);
    payload.push_str(&encode_field(ids::TRANSACTION_CURRENCY, "986")?);
    payload.push_str(&encode_field(ids::TRANSACTION_AMOUNT, &request.amount.to_string())?);
    payload.push_str(&encode_field(ids::COUNTRY_CODE, "BR")?);
    payload.push_str(&field("merchant_name", ids::MERCHANT_NAME, &merchant_name)?);
    payload.push_str(&field("merchant_city", ids::MERCHANT_CITY, &merchant_city)?);
    payload.push_str(&field("txid", ids::ADDITIONAL_DATA_FIELD, &additional_data)?);
    payload.push_str(CRC_FIELD_HEADER);

    Ok(payload)
}

/// Builds the complete BR-Code "copia e cola" string for a request.
///
/// # Examples
///
/// ```
/// use pix_brcode::{generate_pix_emv_payload, Amount, PixPayloadRequest};
///
/// let request = PixPayloadRequest::new(
///     "11999999999",
///     "Loja Exemplo",
///     "Sao Paulo",
///     Amount::from_f64(10.0).unwrap(),
///     "ABC123",
/// );
/// let payload = generate_pix_emv_payload(&request).unwrap();
/// assert!(payload.starts_with("000201010211"));
/// assert!(payload.ends_with("63044DC2"));
/// ```
pub fn generate_pix_emv_payload(request: &PixPayloadRequest) -> Result<String> {
    let mut payload = assemble(request)?;
    let crc = checksum_hex(&payload);
    payload.push_str(&crc);

    debug!("Generated payload for txid {:?} with CRC {}", request.txid, crc);

    Ok(payload)
}

/// Sanitizes a request value, optionally truncates it, and rejects text
/// the CRC and length prefix cannot represent consistently.
fn text(name: &'static str, value: &str, max_chars: Option<usize>) -> Result<String> {
    let mut clean = sanitize(value);

    if let Some(bad) = clean.chars().find(|c| !c.is_ascii() || c.is_ascii_control()) {
        return Err(PixError::InvalidField {
            field: name,
            message: format!("unsupported character {:?}", bad),
        });
    }

    if let Some(max) = max_chars {
        clean.truncate(max);
        clean = sanitize(&clean);
    }

    Ok(clean)
}

fn required_text(name: &'static str, value: &str, max_chars: Option<usize>) -> Result<String> {
    let clean = text(name, value, max_chars)?;
    if clean.is_empty() {
        return Err(PixError::InvalidField {
            field: name,
            message: "must not be empty".to_string(),
        });
    }
    Ok(clean)
}

/// Encodes a field and reports length overflow against the request field.
fn field(name: &'static str, id: &str, value: &str) -> Result<String> {
    encode_field(id, value).map_err(|e| match e {
        PixError::FieldTooLong { id, len } => PixError::InvalidField {
            field: name,
            message: format!("field {} would be {} characters long (max 99)", id, len),
        },
        other => other,
    })
}
