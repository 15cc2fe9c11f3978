//! Pet domain model and typed lookup keys.

use crate::model::adopter::AdopterId;
use crate::model::key::KeyParseError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-generated pet identifier.
pub type PetId = i64;

/// Coarse size class of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    /// Stable lowercase label used in storage and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Parses a label case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

/// Persisted pet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    /// Same wire name as `PetDto`, so listed pets can be sent back as input.
    #[serde(rename = "specie", alias = "species")]
    pub species: String,
    pub date_of_birth: NaiveDate,
    pub adopted: bool,
    pub size: Size,
    /// Set by the adoption use-case; `None` while the pet is in the shelter.
    pub adopter_id: Option<AdopterId>,
}

impl Pet {
    /// Whether `adopted` agrees with the presence of an adopter reference.
    pub fn adoption_is_consistent(&self) -> bool {
        self.adopted == self.adopter_id.is_some()
    }
}

/// Insert shape for a pet that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub name: String,
    pub species: String,
    pub date_of_birth: NaiveDate,
    pub adopted: bool,
    pub size: Size,
}

/// Closed set of pet fields that support exact-match lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetKey {
    Name(String),
    Species(String),
    DateOfBirth(NaiveDate),
    Adopted(bool),
    Size(Size),
    AdopterId(AdopterId),
}

impl PetKey {
    /// Builds a typed key from a field name and its textual value.
    ///
    /// Accepts both `camelCase` and `snake_case` field names, plus the legacy
    /// `specie` spelling. Text values are matched verbatim; typed values
    /// tolerate surrounding whitespace.
    pub fn parse(key: &str, value: &str) -> Result<Self, KeyParseError> {
        let typed = value.trim();
        match key.trim() {
            "name" => Ok(Self::Name(value.to_string())),
            "species" | "specie" => Ok(Self::Species(value.to_string())),
            "dateOfBirth" | "date_of_birth" => NaiveDate::parse_from_str(typed, "%Y-%m-%d")
                .map(Self::DateOfBirth)
                .map_err(|_| invalid("date_of_birth", typed)),
            "adopted" => match typed.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Self::Adopted(true)),
                "false" | "0" => Ok(Self::Adopted(false)),
                _ => Err(invalid("adopted", typed)),
            },
            "size" => Size::parse(typed)
                .map(Self::Size)
                .ok_or_else(|| invalid("size", typed)),
            "adopter" | "adopterId" | "adopter_id" => typed
                .parse::<AdopterId>()
                .map(Self::AdopterId)
                .map_err(|_| invalid("adopter_id", typed)),
            other => Err(KeyParseError::UnknownKey(other.to_string())),
        }
    }

    /// Column backing this key.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Species(_) => "species",
            Self::DateOfBirth(_) => "date_of_birth",
            Self::Adopted(_) => "adopted",
            Self::Size(_) => "size",
            Self::AdopterId(_) => "adopter_id",
        }
    }
}

fn invalid(key: &'static str, value: &str) -> KeyParseError {
    KeyParseError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyParseError, PetKey, Size};
    use chrono::NaiveDate;

    #[test]
    fn parse_accepts_legacy_and_snake_case_names() {
        assert_eq!(
            PetKey::parse("specie", "dog").unwrap(),
            PetKey::Species("dog".to_string())
        );
        assert_eq!(
            PetKey::parse("date_of_birth", "2021-03-04").unwrap(),
            PetKey::DateOfBirth(NaiveDate::from_ymd_opt(2021, 3, 4).unwrap())
        );
        assert_eq!(PetKey::parse("size", "LARGE").unwrap(), PetKey::Size(Size::Large));
        assert_eq!(PetKey::parse("adopted", "1").unwrap(), PetKey::Adopted(true));
        assert_eq!(
            PetKey::parse(" adopterId ", " 7 ").unwrap(),
            PetKey::AdopterId(7)
        );
    }

    #[test]
    fn parse_keeps_text_values_verbatim() {
        assert_eq!(
            PetKey::parse("name", " Rex ").unwrap(),
            PetKey::Name(" Rex ".to_string())
        );
        assert_eq!(
            PetKey::parse(" species", "dog ").unwrap(),
            PetKey::Species("dog ".to_string())
        );
    }

    #[test]
    fn parse_rejects_unknown_field_and_bad_values() {
        assert_eq!(
            PetKey::parse("password", "x").unwrap_err(),
            KeyParseError::UnknownKey("password".to_string())
        );
        assert!(matches!(
            PetKey::parse("size", "huge"),
            Err(KeyParseError::InvalidValue { key: "size", .. })
        ));
        assert!(matches!(
            PetKey::parse("adopterId", "abc"),
            Err(KeyParseError::InvalidValue { key: "adopter_id", .. })
        ));
    }
}
