//! Reference data for selectors.

use registrar_models::{Country, CountryId, Nationality};

/// Countries offered by the nationality selectors, loaded once per screen activation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryDirectory {
    countries: Vec<Country>,
}

impl CountryDirectory {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn all(&self) -> &[Country] {
        &self.countries
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn find(&self, id: &CountryId) -> Option<&Country> {
        self.countries.iter().find(|country| &country.id == id)
    }

    /// Display name for a selector value; empty when unselected or unknown.
    pub fn name_of(&self, nationality: &Nationality) -> &str {
        nationality
            .country_id()
            .and_then(|id| self.find(id))
            .map(|country| country.name.as_str())
            .unwrap_or("")
    }
}
