//! One-time code domain rules: purposes, code generation, and the
//! masking applied to mobile numbers in issuance acknowledgments.

use rand::Rng;

/// Purposes a one-time code can be issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Register,
    Login,
}

impl OtpPurpose {
    /// Storage representation, also the wire value clients send.
    pub fn as_str(self) -> &'static str {
        match self {
            OtpPurpose::Register => "register",
            OtpPurpose::Login => "login",
        }
    }

    /// Parses a client-supplied purpose. Unknown values are rejected at
    /// the request boundary, so this returns `None` rather than an error.
    pub fn parse(value: &str) -> Option<OtpPurpose> {
        match value {
            "register" => Some(OtpPurpose::Register),
            "login" => Some(OtpPurpose::Login),
            _ => None,
        }
    }
}

/// Generates a 6-digit one-time code in [100000, 999999].
pub fn generate_code() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

/// Masks every character except the last four with `x`.
///
/// Short inputs (four characters or fewer) pass through unmasked,
/// matching how the acknowledgment treats truncated numbers.
pub fn mask_mobile(mobile: &str) -> String {
    let chars: Vec<char> = mobile.chars().collect();
    let keep_from = chars.len().saturating_sub(4);
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < keep_from { 'x' } else { *c })
        .collect()
}
