//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod check_ins;
pub mod dev;
pub mod users;
