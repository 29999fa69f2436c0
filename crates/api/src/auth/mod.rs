//! Authentication primitives.
//!
//! - [`jwt`] -- JWT session-token generation and validation.
//! - [`otp`] -- one-time-code issuance and verification flows.

pub mod jwt;
pub mod otp;
