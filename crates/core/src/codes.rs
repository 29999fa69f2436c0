//! Role-patterned unique user codes.
//!
//! Every network member carries an externally visible code whose shape
//! encodes the role: dealers get a `99` prefix, salespeople `11`,
//! distributors a bare 6-digit number, anything else 12 digits.

use rand::Rng;

use crate::roles;

/// Attempts against existing codes before registration gives up.
pub const UNIQUE_CODE_MAX_ATTEMPTS: usize = 10;

fn random_digits(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Builds one candidate code for a user of the given role. Collision
/// checking against stored codes is the caller's job.
pub fn generate_unique_code(type_name: &str) -> String {
    if roles::is_dealer_name(type_name) {
        format!("99{}", random_digits(14))
    } else if roles::is_salesperson_name(type_name) {
        format!("11{}", random_digits(14))
    } else if roles::is_distributor_name(type_name) {
        rand::rng().random_range(100_000..1_000_000).to_string()
    } else {
        random_digits(12)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn all_digits(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn dealer_codes_are_99_prefixed_sixteen_digits() {
        let code = generate_unique_code("Dealer");
        assert_eq!(code.len(), 16);
        assert!(code.starts_with("99"));
        assert!(all_digits(&code));
    }

    #[test]
    fn salesperson_codes_are_11_prefixed_sixteen_digits() {
        for name in ["Salesperson", "salesman", "Sales"] {
            let code = generate_unique_code(name);
            assert_eq!(code.len(), 16);
            assert!(code.starts_with("11"));
            assert!(all_digits(&code));
        }
    }

    #[test]
    fn distributor_codes_are_six_digit_numbers() {
        let code = generate_unique_code("distributor");
        let value: u32 = code.parse().unwrap();
        assert!((100_000..=999_999).contains(&value));
    }

    #[test]
    fn other_roles_get_twelve_digits() {
        let code = generate_unique_code("Admin");
        assert_eq!(code.len(), 12);
        assert!(all_digits(&code));
    }

    #[test]
    fn a_thousand_dealer_codes_are_distinct() {
        let codes: HashSet<String> = (0..1000)
            .map(|_| generate_unique_code("Dealer"))
            .collect();
        assert_eq!(codes.len(), 1000);
        assert!(codes.iter().all(|c| c.len() == 16 && c.starts_with("99")));
    }
}
