//! Domain logic shared by the fieldops crates: the error taxonomy, role
//! classification, credential generation, and proof decoding. Nothing
//! here performs I/O.

pub mod codes;
pub mod error;
pub mod otp;
pub mod proof;
pub mod roles;
pub mod types;
