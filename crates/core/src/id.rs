//! Strongly-typed identifiers issued by the backend.
//!
//! The backend uses opaque string keys (e.g. `"10010"`, `"hotwax.user"`).
//! Wrapping them keeps a party id from being passed where a login id is
//! expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a party (person or party group).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

/// Identifier of a user login (the username).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserLoginId(String);

/// Identifier of a contact mechanism (email address, telecom number, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactMechId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a backend key, rejecting blank or whitespace-padded values.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                if value.trim() != value {
                    return Err(DomainError::invalid_id(format!(
                        "{}: surrounding whitespace in {:?}",
                        $name, value
                    )));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_string_newtype!(PartyId, "PartyId");
impl_string_newtype!(UserLoginId, "UserLoginId");
impl_string_newtype!(ContactMechId, "ContactMechId");

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_identifier() {
        let err = PartyId::new("").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.starts_with("PartyId")));
    }

    #[test]
    fn rejects_padded_identifier() {
        assert!(UserLoginId::from_str(" admin").is_err());
        assert!(UserLoginId::from_str("admin\n").is_err());
    }

    #[test]
    fn serializes_as_bare_string() {
        let id = ContactMechId::new("10040").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"10040\"");

        let back: ContactMechId = serde_json::from_str("\"10040\"").unwrap();
        assert_eq!(back, id);
    }

    proptest! {
        #[test]
        fn accepts_any_trimmed_key(key in "[A-Za-z0-9_.@-]{1,40}") {
            let id = PartyId::new(key.clone()).unwrap();
            prop_assert_eq!(id.as_str(), key.as_str());
            prop_assert_eq!(id.to_string(), key);
        }
    }
}
