//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Plain create DTOs for inserts where the table has a writer

pub mod address;
pub mod check_in;
pub mod city;
pub mod otp_code;
pub mod user;
pub mod user_type;
