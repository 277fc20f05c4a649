// src/services/places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Handle communication with the Places, Place Details and Geocoding endpoints

use crate::errors::ProspectorError;
use crate::models::PlaceResult;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Google Places API client
/// DOCUMENTATION: Handles authentication and API calls to Google Maps services
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Maps API key
    api_key: String,
    /// Base URL for the Google Maps APIs
    base_url: String,
}

/// Response from a Places Text Search page
/// DOCUMENTATION: Parsed response envelope from the Places API
#[derive(Debug, Deserialize)]
pub struct PlacesSearchResponse {
    /// Results array from API
    #[serde(default)]
    pub results: Vec<PlaceSummary>,
    /// Status of the API call
    pub status: String,
    /// Next page token (if more results available)
    pub next_page_token: Option<String>,
    /// Error message (if status is not OK)
    pub error_message: Option<String>,
}

/// Individual place entry from a Text Search response
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    /// Google's unique place identifier
    #[serde(default)]
    pub place_id: String,
    /// Place name
    pub name: String,
    /// Formatted address (detailed form)
    pub formatted_address: Option<String>,
    /// Vicinity (short address form)
    pub vicinity: Option<String>,
}

impl From<PlaceSummary> for PlaceResult {
    fn from(item: PlaceSummary) -> Self {
        PlaceResult {
            place_id: item.place_id,
            name: item.name,
            // Prefer formatted_address over vicinity (more detailed)
            address: item.formatted_address.or(item.vicinity),
            phone: None,
            website: None,
        }
    }
}

/// Contact information from the Place Details endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    /// Registered name (razão social as Google knows it)
    pub name: Option<String>,
    /// Phone number (formatted for local use)
    pub formatted_phone_number: Option<String>,
    /// Website URL
    pub website: Option<String>,
}

/// Coordinates from the Geocoding endpoint
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl GooglePlacesClient {
    /// Create new client pointed at the production Google Maps APIs
    /// DOCUMENTATION: Fails with MissingApiKey when the key is empty, so no
    /// request can ever be issued without credentials
    #[allow(dead_code)]
    pub fn new(api_key: String, timeout_secs: u64) -> Result<Self, ProspectorError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Create new client with a custom base URL (for testing with a mock server)
    pub fn with_base_url(
        api_key: String,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProspectorError> {
        if api_key.is_empty() {
            return Err(ProspectorError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                ProspectorError::ExternalApi(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one page of Text Search results
    /// DOCUMENTATION: Searches for places matching a free-text query
    ///
    /// # Arguments
    /// * `query` - Free-text query ("<name> in <city>, <state>")
    /// * `location` - Optional center point for a location bias
    /// * `radius_m` - Optional bias radius in meters (max 50000)
    /// * `page_token` - Pagination token from the previous page
    ///
    /// # Returns
    /// The parsed response page, including the next-page token when present
    pub async fn text_search(
        &self,
        query: &str,
        location: Option<LatLng>,
        radius_m: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<PlacesSearchResponse, ProspectorError> {
        let url = format!("{}/place/textsearch/json", self.base_url);

        let mut params = HashMap::new();
        params.insert("query", query.to_string());
        params.insert("key", self.api_key.clone());

        if let Some(center) = location {
            params.insert("location", format!("{},{}", center.lat, center.lng));
        }

        if let Some(radius) = radius_m {
            params.insert("radius", radius.to_string());
        }

        if let Some(token) = page_token {
            params.insert("pagetoken", token.to_string());
        }

        log::debug!(
            "Places text search: query={:?}, paginated={}",
            query,
            page_token.is_some()
        );

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Places API request failed: {}", e);
                ProspectorError::ExternalApi(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Places API error {}: {}", status, body);
            return Err(ProspectorError::ExternalApi(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let api_response: PlacesSearchResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Places response: {}", e);
            ProspectorError::ExternalApi(format!("Parse error: {}", e))
        })?;

        Self::check_status(&api_response.status, api_response.error_message.as_deref())?;

        log::info!(
            "Places search returned {} results (status: {})",
            api_response.results.len(),
            api_response.status
        );

        Ok(api_response)
    }

    /// Get contact information for a specific place
    /// DOCUMENTATION: Retrieves phone and website by place_id
    ///
    /// # Arguments
    /// * `place_id` - Google Place ID
    ///
    /// # Returns
    /// PlaceDetails with name, phone and website when Google has them
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, ProspectorError> {
        let url = format!("{}/place/details/json", self.base_url);

        let params = [
            ("place_id", place_id),
            ("key", &self.api_key),
            ("fields", "name,formatted_phone_number,website"),
        ];

        log::debug!("Place details lookup: place_id={}", place_id);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Place details request failed: {}", e);
                ProspectorError::ExternalApi(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(ProspectorError::ExternalApi(
                "Details request failed".to_string(),
            ));
        }

        #[derive(Deserialize)]
        struct DetailsResponse {
            result: Option<PlaceDetails>,
            status: String,
            error_message: Option<String>,
        }

        let api_response: DetailsResponse = response
            .json()
            .await
            .map_err(|e| ProspectorError::ExternalApi(format!("Parse error: {}", e)))?;

        Self::check_status(&api_response.status, api_response.error_message.as_deref())?;

        api_response.result.ok_or_else(|| {
            ProspectorError::ExternalApi("Details response missing result".to_string())
        })
    }

    /// Resolve a city (and optional state) to coordinates
    /// DOCUMENTATION: Uses the Geocoding endpoint to build a location bias
    /// for radius-constrained searches
    pub async fn geocode(
        &self,
        city: &str,
        state: Option<&str>,
    ) -> Result<LatLng, ProspectorError> {
        let url = format!("{}/geocode/json", self.base_url);

        let address = match state {
            Some(state) => format!("{}, {}", city, state),
            None => city.to_string(),
        };

        let params = [("address", address.as_str()), ("key", &self.api_key)];

        log::debug!("Geocoding: address={:?}", address);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Geocoding request failed: {}", e);
                ProspectorError::ExternalApi(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(ProspectorError::ExternalApi(
                "Geocoding request failed".to_string(),
            ));
        }

        #[derive(Deserialize)]
        struct GeocodeResponse {
            #[serde(default)]
            results: Vec<GeocodeResult>,
            status: String,
            error_message: Option<String>,
        }

        #[derive(Deserialize)]
        struct GeocodeResult {
            geometry: GeocodeGeometry,
        }

        #[derive(Deserialize)]
        struct GeocodeGeometry {
            location: LatLng,
        }

        let api_response: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| ProspectorError::ExternalApi(format!("Parse error: {}", e)))?;

        Self::check_status(&api_response.status, api_response.error_message.as_deref())?;

        api_response
            .results
            .into_iter()
            .next()
            .map(|r| r.geometry.location)
            .ok_or_else(|| {
                ProspectorError::ExternalApi(format!("No geocoding result for {}", address))
            })
    }

    /// Check the Google status envelope
    /// DOCUMENTATION: Maps provider status codes to application errors
    /// OK and ZERO_RESULTS are the only success statuses
    fn check_status(status: &str, error_message: Option<&str>) -> Result<(), ProspectorError> {
        match status {
            "OK" | "ZERO_RESULTS" => Ok(()),
            "OVER_QUERY_LIMIT" => {
                log::error!("Places API quota exceeded");
                Err(ProspectorError::RateLimitExceeded)
            }
            "REQUEST_DENIED" | "INVALID_REQUEST" => {
                let msg = error_message.unwrap_or("Unknown error").to_string();
                log::error!("Places API request denied: {}", msg);
                Err(ProspectorError::ExternalApi(msg))
            }
            other => {
                let msg = error_message
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Unknown status: {}", other));
                log::error!("Places API unexpected status: {}", msg);
                Err(ProspectorError::ExternalApi(msg))
            }
        }
    }
}
