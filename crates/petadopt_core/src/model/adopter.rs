//! Adopter domain model with its owned address.

use crate::model::key::KeyParseError;
use serde::{Deserialize, Serialize};

/// Store-generated adopter identifier.
pub type AdopterId = i64;

/// Postal address owned by exactly one adopter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub number: String,
    pub neighborhood: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Persisted adopter record.
///
/// Loaded and saved together with its address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Adopter {
    pub id: AdopterId,
    pub name: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    pub photo: Option<String>,
    pub address: Option<Address>,
}

/// Insert shape for an adopter that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdopter {
    pub name: String,
    pub password_hash: String,
    pub phone: String,
    pub photo: Option<String>,
    pub address: Option<Address>,
}

/// Closed set of adopter fields that support exact-match lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdopterKey {
    Name(String),
    Phone(String),
}

impl AdopterKey {
    /// Builds a typed key from a field name; the value is matched verbatim.
    pub fn parse(key: &str, value: &str) -> Result<Self, KeyParseError> {
        let value = value.to_string();
        match key.trim() {
            "name" => Ok(Self::Name(value)),
            "phone" => Ok(Self::Phone(value)),
            other => Err(KeyParseError::UnknownKey(other.to_string())),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Phone(_) => "phone",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AdopterKey, KeyParseError};

    #[test]
    fn parse_accepts_name_and_phone() {
        assert_eq!(
            AdopterKey::parse("name", "Ana").unwrap(),
            AdopterKey::Name("Ana".to_string())
        );
        assert_eq!(
            AdopterKey::parse(" phone ", " 555-0100").unwrap(),
            AdopterKey::Phone(" 555-0100".to_string())
        );
        assert_eq!(AdopterKey::parse("phone", "x").unwrap().column(), "phone");
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        assert_eq!(
            AdopterKey::parse("password", "hunter2").unwrap_err(),
            KeyParseError::UnknownKey("password".to_string())
        );
        assert!(matches!(
            AdopterKey::parse("address", "Rua A"),
            Err(KeyParseError::UnknownKey(key)) if key == "address"
        ));
    }
}
