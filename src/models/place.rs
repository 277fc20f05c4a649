// src/models/place.rs
// DOCUMENTATION: Core data structures for prospecting
// PURPOSE: Defines the search query and the exported place record

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::ProspectorError;

/// Search parameters for a prospecting run
/// DOCUMENTATION: Built from CLI arguments
/// The text field carries the company name (razão social) and is required
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    /// Company name or razão social - required field
    #[validate(length(min = 1, message = "search text must not be empty"))]
    pub text: String,

    /// Optional city filter
    pub city: Option<String>,

    /// Optional state filter
    pub state: Option<String>,

    /// Optional search radius in meters around the city center
    pub radius_meters: Option<u32>,
}

impl SearchQuery {
    /// Validate the query before any request is issued
    pub fn ensure_valid(&self) -> Result<(), ProspectorError> {
        self.validate()
            .map_err(|e| ProspectorError::InvalidInput(e.to_string()))
    }

    /// Compose the text-search query string
    /// DOCUMENTATION: Appends city and state the way the Places API expects
    /// them in free text: "<name> in <city>, <state>"
    pub fn query_string(&self) -> String {
        let mut query = self.text.clone();

        if let Some(city) = &self.city {
            query.push_str(&format!(" in {}", city));
        }
        if let Some(state) = &self.state {
            query.push_str(&format!(", {}", state));
        }

        query
    }
}

/// A single matched place, ready for export
/// DOCUMENTATION: Immutable once built; discarded after export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Google's unique place identifier
    pub place_id: String,

    /// Place name
    pub name: String,

    /// Formatted street address
    pub address: Option<String>,

    /// Phone number (usually only available from Place Details)
    pub phone: Option<String>,

    /// Website URL (usually only available from Place Details)
    pub website: Option<String>,
}

impl PlaceResult {
    /// Whether a Place Details lookup could still add information
    pub fn needs_details(&self) -> bool {
        self.phone.is_none() || self.website.is_none()
    }
}

/// Ordered collection of results, in API return order
pub type ResultSet = Vec<PlaceResult>;

#[cfg(test)]
mod tests {
    use super::*;

    fn query(text: &str) -> SearchQuery {
        SearchQuery {
            text: text.to_string(),
            city: None,
            state: None,
            radius_meters: None,
        }
    }

    #[test]
    fn test_query_string_text_only() {
        assert_eq!(query("Padaria Ideal").query_string(), "Padaria Ideal");
    }

    #[test]
    fn test_query_string_with_city_and_state() {
        let mut q = query("Padaria Ideal");
        q.city = Some("São Paulo".to_string());
        q.state = Some("SP".to_string());

        assert_eq!(q.query_string(), "Padaria Ideal in São Paulo, SP");
    }

    #[test]
    fn test_query_string_with_state_only() {
        let mut q = query("Padaria Ideal");
        q.state = Some("SP".to_string());

        assert_eq!(q.query_string(), "Padaria Ideal, SP");
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let q = query("");
        assert!(matches!(
            q.ensure_valid(),
            Err(ProspectorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_needs_details() {
        let mut result = PlaceResult {
            place_id: "ChIJ123".to_string(),
            name: "Padaria Ideal".to_string(),
            address: Some("Rua Augusta 100".to_string()),
            phone: None,
            website: None,
        };
        assert!(result.needs_details());

        result.phone = Some("+55 11 1234-5678".to_string());
        assert!(result.needs_details());

        result.website = Some("https://padariaideal.com.br".to_string());
        assert!(!result.needs_details());
    }
}
