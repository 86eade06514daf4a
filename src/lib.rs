//! # PIX BR-Code
//!
//! Encoder for static PIX payment codes: the EMV QR "copia e cola" string
//! a buyer scans or pastes into their banking app at checkout.
//!
//! ## Design Principles
//!
//! - **Fixed-point amounts**: 2 decimal places via `rust_decimal`
//! - **Sanitized TLV fields**: line breaks removed before length-prefixing
//! - **Hard limits**: values that overflow a two-digit length are rejected
//! - **Deterministic output**: no timestamps or randomness in a payload
//!
//! ## Example
//!
//! ```
//! use pix_brcode::{decode_payload, generate_pix_emv_payload, Amount, PixPayloadRequest};
//! use std::str::FromStr;
//!
//! let request = PixPayloadRequest::new(
//!     "joias@example.com",
//!     "Joalheria Brilho Eterno",
//!     "Rio de Janeiro",
//!     Amount::from_str("249.90").unwrap(),
//!     "PEDIDO42",
//! );
//! let payload = generate_pix_emv_payload(&request).unwrap();
//! assert!(decode_payload(&payload).is_ok());
//! ```

pub mod amount;
pub mod batch;
pub mod crc16;
pub mod decode;
pub mod error;
pub mod field;
pub mod payload;

pub use amount::Amount;
pub use batch::{GeneratedPayload, PayloadBatch};
pub use crc16::{checksum_hex, crc16_ccitt_false};
pub use decode::{decode_payload, parse_fields, verify_checksum, TlvField};
pub use error::{PixError, Result};
pub use field::{encode_field, sanitize};
pub use payload::{assemble, generate_pix_emv_payload, PixPayloadRequest};
