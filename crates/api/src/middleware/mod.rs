//! Request middleware: session gate and role extractors.
//!
//! - [`gate::session_gate`] -- Router-wide layer that resolves the caller
//!   on every non-public route and attaches it to the request.
//! - [`current_user::CurrentUser`] -- Extracts the user the gate attached.
//! - [`rbac::RequireAdmin`] -- Requires the `Admin` role.
//! - [`rbac::RequireSalesperson`] -- Requires a salesperson-type role.

pub mod current_user;
pub mod gate;
pub mod rbac;
