//! Field paths: dot/array-indexed addresses into the form record.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::FormError;

/// Number of fixed phone slots (`phoneNumbers.0`, `phoneNumbers.1`).
pub const FIXED_PHONE_SLOTS: usize = 2;

/// Address of one value within the form record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    Username,
    Email,
    Channel,
    Twitter,
    Facebook,
    /// One of the two fixed slots; always `< FIXED_PHONE_SLOTS`.
    PhoneNumber(usize),
    /// The `number` of the dynamic list entry at this index.
    PhNumber(usize),
    Age,
    Dob,
}

impl FieldPath {
    /// Every path outside the dynamic list, in form order.
    pub fn static_paths() -> [FieldPath; 9] {
        [
            FieldPath::Username,
            FieldPath::Email,
            FieldPath::Channel,
            FieldPath::Twitter,
            FieldPath::Facebook,
            FieldPath::PhoneNumber(0),
            FieldPath::PhoneNumber(1),
            FieldPath::Age,
            FieldPath::Dob,
        ]
    }

    pub fn parse(s: &str) -> Result<Self, FormError> {
        let unknown = || FormError::UnknownField(s.to_string());
        let path = match s {
            "username" => FieldPath::Username,
            "email" => FieldPath::Email,
            "channel" => FieldPath::Channel,
            "social.twitter" => FieldPath::Twitter,
            "social.facebook" => FieldPath::Facebook,
            "age" => FieldPath::Age,
            "dob" => FieldPath::Dob,
            _ => {
                if let Some(rest) = s.strip_prefix("phoneNumbers.") {
                    let index = parse_index(rest).ok_or_else(unknown)?;
                    if index >= FIXED_PHONE_SLOTS {
                        return Err(unknown());
                    }
                    FieldPath::PhoneNumber(index)
                } else if let Some(rest) = s.strip_prefix("phNumbers.") {
                    let index = rest
                        .strip_suffix(".number")
                        .and_then(parse_index)
                        .ok_or_else(unknown)?;
                    FieldPath::PhNumber(index)
                } else {
                    return Err(unknown());
                }
            }
        };
        Ok(path)
    }

    pub fn is_list_entry(&self) -> bool {
        matches!(self, FieldPath::PhNumber(_))
    }
}

/// Only the canonical decimal form is accepted, so `+1` and `01` are rejected.
fn parse_index(s: &str) -> Option<usize> {
    s.parse::<usize>().ok().filter(|index| index.to_string() == s)
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Username => write!(f, "username"),
            FieldPath::Email => write!(f, "email"),
            FieldPath::Channel => write!(f, "channel"),
            FieldPath::Twitter => write!(f, "social.twitter"),
            FieldPath::Facebook => write!(f, "social.facebook"),
            FieldPath::PhoneNumber(i) => write!(f, "phoneNumbers.{i}"),
            FieldPath::PhNumber(i) => write!(f, "phNumbers.{i}.number"),
            FieldPath::Age => write!(f, "age"),
            FieldPath::Dob => write!(f, "dob"),
        }
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_and_indexed_paths() {
        assert_eq!(FieldPath::parse("social.twitter").unwrap(), FieldPath::Twitter);
        assert_eq!(FieldPath::parse("phoneNumbers.1").unwrap(), FieldPath::PhoneNumber(1));
        assert_eq!(FieldPath::parse("phNumbers.3.number").unwrap(), FieldPath::PhNumber(3));
    }

    #[test]
    fn display_matches_parse_notation() {
        for path in FieldPath::static_paths() {
            assert_eq!(FieldPath::parse(&path.to_string()).unwrap(), path);
        }
        assert_eq!(FieldPath::PhNumber(0).to_string(), "phNumbers.0.number");
    }

    #[test]
    fn fixed_phone_slot_out_of_range_is_unknown() {
        let err = FieldPath::parse("phoneNumbers.2").unwrap_err();
        assert_eq!(err, FormError::UnknownField("phoneNumbers.2".to_string()));
    }

    #[test]
    fn non_canonical_indices_are_rejected() {
        for bad in ["phoneNumbers.+1", "phoneNumbers.01", "phNumbers.01.number", "phNumbers.+2.number"] {
            assert!(FieldPath::parse(bad).is_err(), "{bad} should be rejected");
        }
        assert_eq!(FieldPath::parse("phNumbers.10.number").unwrap(), FieldPath::PhNumber(10));
    }

    #[test]
    fn malformed_paths_are_rejected() {
        for bad in ["", "social", "phNumbers.x.number", "phNumbers.0", "userName"] {
            assert!(FieldPath::parse(bad).is_err(), "{bad} should be rejected");
        }
    }
}
