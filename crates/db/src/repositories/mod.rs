//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod address_repo;
pub mod check_in_repo;
pub mod city_repo;
pub mod otp_repo;
pub mod user_repo;
pub mod user_type_repo;
