//! Check-in proof image decoding.
//!
//! Clients send proof photos base64-encoded, sometimes wrapped in a
//! `data:` URI. The declared MIME type always wins over anything
//! embedded in the URI; absent both, `image/jpeg` is recorded.

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;

use crate::error::CoreError;

pub const DATA_URI_PATTERN: &str = r"^data:[^;]+;base64,";

static DATA_URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATA_URI_PATTERN).expect("valid regex"));

/// MIME type recorded when the client does not declare one.
pub const DEFAULT_PROOF_MIME: &str = "image/jpeg";

/// Decoded proof payload ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofImage {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub size: i64,
}

/// Decodes a base64 proof image, tolerating a data-URI wrapper.
/// Rejects payloads that do not decode or decode to zero bytes.
pub fn decode_proof_image(
    encoded: &str,
    mime_type: Option<&str>,
) -> Result<ProofImage, CoreError> {
    let stripped = DATA_URI_RE.replace(encoded, "");
    let data = STANDARD
        .decode(stripped.as_bytes())
        .map_err(|_| CoreError::Validation("Invalid base64 image".to_string()))?;
    if data.is_empty() {
        return Err(CoreError::Validation("Invalid base64 image".to_string()));
    }
    Ok(ProofImage {
        size: data.len() as i64,
        mime_type: mime_type.unwrap_or(DEFAULT_PROOF_MIME).to_string(),
        data,
    })
}
