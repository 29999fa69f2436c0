//! Role-name classification.
//!
//! Role names live in the `user_types` table and arrive from clients in
//! arbitrary casing ("Salesperson", "salesman", "SALES"). Every role
//! check in the system goes through the matchers here so the casing and
//! synonym rules stay in one place.

use std::sync::LazyLock;

use regex::Regex;

/// Canonical role names. These must match the seed data in
/// `20260822000001_create_user_types_table.sql`.
pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_DISTRIBUTOR: &str = "Distributor";
pub const ROLE_DEALER: &str = "Dealer";
pub const ROLE_SALESPERSON: &str = "Salesperson";

pub const ADMIN_PATTERN: &str = r"(?i)^admin$";
pub const DISTRIBUTOR_PATTERN: &str = r"(?i)^distributor$";
pub const DEALER_PATTERN: &str = r"(?i)^dealer$";
/// Field teams type "Salesperson", "Salesman", and plain "Sales"
/// interchangeably; all three classify as the salesperson role.
pub const SALESPERSON_PATTERN: &str = r"(?i)^(sales(person)?|salesman)$";

static ADMIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ADMIN_PATTERN).expect("valid regex"));
static DISTRIBUTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DISTRIBUTOR_PATTERN).expect("valid regex"));
static DEALER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEALER_PATTERN).expect("valid regex"));
static SALESPERSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SALESPERSON_PATTERN).expect("valid regex"));

pub fn is_admin_name(name: &str) -> bool {
    ADMIN_RE.is_match(name)
}

pub fn is_distributor_name(name: &str) -> bool {
    DISTRIBUTOR_RE.is_match(name)
}

pub fn is_dealer_name(name: &str) -> bool {
    DEALER_RE.is_match(name)
}

pub fn is_salesperson_name(name: &str) -> bool {
    SALESPERSON_RE.is_match(name)
}

/// Role families the hierarchy and check-in workflows gate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Admin,
    Distributor,
    Dealer,
    Salesperson,
}

impl RoleKind {
    /// Label used when an error message names the expected role.
    pub fn label(self) -> &'static str {
        match self {
            RoleKind::Admin => ROLE_ADMIN,
            RoleKind::Distributor => ROLE_DISTRIBUTOR,
            RoleKind::Dealer => ROLE_DEALER,
            RoleKind::Salesperson => ROLE_SALESPERSON,
        }
    }

    /// Whether `name` classifies as this role family.
    pub fn matches(self, name: &str) -> bool {
        match self {
            RoleKind::Admin => is_admin_name(name),
            RoleKind::Distributor => is_distributor_name(name),
            RoleKind::Dealer => is_dealer_name(name),
            RoleKind::Salesperson => is_salesperson_name(name),
        }
    }
}
