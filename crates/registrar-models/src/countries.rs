//! Countries and the nationality selector value.

use crate::ids::CountryId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder option shown before a nationality is chosen.
pub const UNSELECTED_NATIONALITY: &str = "Select nationality";

/// A country as returned by `GET /students/countries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "_id")]
    pub id: CountryId,
    #[serde(rename = "countryName", alias = "name")]
    pub name: String,
}

/// Value of a nationality selector.
///
/// `Unselected` is the sentinel that distinguishes "no choice made" from any
/// real country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Nationality {
    #[default]
    Unselected,
    Country(CountryId),
}

impl Nationality {
    /// Interpret a raw selector value. Empty input and the placeholder are `Unselected`.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == UNSELECTED_NATIONALITY {
            Nationality::Unselected
        } else {
            Nationality::Country(CountryId::new(value))
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Nationality::Country(_))
    }

    pub fn country_id(&self) -> Option<&CountryId> {
        match self {
            Nationality::Unselected => None,
            Nationality::Country(id) => Some(id),
        }
    }
}

impl From<CountryId> for Nationality {
    fn from(id: CountryId) -> Self {
        Nationality::Country(id)
    }
}

impl From<Option<CountryId>> for Nationality {
    fn from(id: Option<CountryId>) -> Self {
        id.map_or(Nationality::Unselected, Nationality::Country)
    }
}

impl Serialize for Nationality {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Nationality::Unselected => serializer.serialize_none(),
            Nationality::Country(id) => serializer.serialize_str(id.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for Nationality {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        Ok(opt.map_or(Nationality::Unselected, |s| Nationality::parse(&s)))
    }
}
