// src/services/prospect_service.rs
// DOCUMENTATION: Company prospecting service
// PURPOSE: Orchestrate paginated search and per-result enrichment

use crate::errors::ProspectorError;
use crate::models::{PlaceResult, ResultSet, SearchQuery};
use crate::services::places_client::{GooglePlacesClient, LatLng};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Prospecting statistics
/// DOCUMENTATION: Tracks results of a prospecting run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectStats {
    /// Search text that was prospected
    pub query: String,
    /// Total number of API requests made
    pub api_requests: u32,
    /// Result pages fetched from the search endpoint
    pub pages_fetched: u32,
    /// Total places retrieved from the API
    pub places_retrieved: u32,
    /// Place Details lookups that succeeded
    pub details_fetched: u32,
    /// Place Details lookups that failed (results kept as-is)
    pub details_failed: u32,
    /// Non-fatal error messages encountered
    pub errors: Vec<String>,
    /// Total run duration in seconds
    pub duration_seconds: u64,
    /// Timestamp when the run started
    pub started_at: String,
    /// Timestamp when the run completed
    pub completed_at: Option<String>,
}

impl ProspectStats {
    /// Create new statistics tracker
    pub fn new(query: String) -> Self {
        Self {
            query,
            api_requests: 0,
            pages_fetched: 0,
            places_retrieved: 0,
            details_fetched: 0,
            details_failed: 0,
            errors: Vec::new(),
            duration_seconds: 0,
            started_at: Utc::now().to_rfc3339(),
            completed_at: None,
        }
    }

    /// Mark the run as completed
    pub fn complete(&mut self, duration: u64) {
        self.duration_seconds = duration;
        self.completed_at = Some(Utc::now().to_rfc3339());
    }
}

/// Tuning knobs for a prospecting run
#[derive(Debug, Clone)]
pub struct ProspectOptions {
    /// Whether to enrich results with Place Details lookups
    pub fetch_details: bool,
    /// Pause before requesting a follow-up page
    /// (next_page_token takes a moment to activate on Google's side)
    pub page_delay: Duration,
    /// Pause between Place Details calls
    pub detail_delay: Duration,
}

impl Default for ProspectOptions {
    fn default() -> Self {
        Self {
            fetch_details: true,
            page_delay: Duration::from_millis(2000),
            detail_delay: Duration::from_millis(100),
        }
    }
}

/// Prospecting service
/// DOCUMENTATION: Sequential search -> enrich -> stats pipeline over the Places API
pub struct ProspectService;

impl ProspectService {
    /// Run a full prospecting pass for a query
    /// DOCUMENTATION: Main entry point
    ///
    /// Process:
    /// 1. Validate the query
    /// 2. Geocode the city into a location bias when a radius is requested
    /// 3. Page through Text Search results, collecting them in API order
    /// 4. Enrich each result with phone/website from Place Details
    /// 5. Return the results and run statistics
    ///
    /// # Arguments
    /// * `client` - Google Places API client
    /// * `query` - Search parameters
    /// * `opts` - Pacing and enrichment options
    ///
    /// # Returns
    /// The ordered ResultSet and the run's ProspectStats
    pub async fn prospect(
        client: &GooglePlacesClient,
        query: &SearchQuery,
        opts: &ProspectOptions,
    ) -> Result<(ResultSet, ProspectStats), ProspectorError> {
        let start_time = Instant::now();
        let mut stats = ProspectStats::new(query.text.clone());

        let mut results = Self::search(client, query, opts, &mut stats).await?;

        if opts.fetch_details {
            for result in results.iter_mut() {
                if !result.needs_details() {
                    continue;
                }

                log::debug!("Fetching details for: {}", result.name);
                stats.api_requests += 1;

                let (enriched, fetched) = Self::enrich(client, result.clone()).await;
                *result = enriched;

                if fetched {
                    stats.details_fetched += 1;
                } else {
                    stats.details_failed += 1;
                }

                // Small delay between Place Details calls to respect API limits
                tokio::time::sleep(opts.detail_delay).await;
            }
        }

        stats.complete(start_time.elapsed().as_secs());

        log::info!(
            "Prospecting completed for {:?}: {} places, {} details fetched, {} failed in {}s",
            stats.query,
            results.len(),
            stats.details_fetched,
            stats.details_failed,
            stats.duration_seconds
        );

        Ok((results, stats))
    }

    /// Collect all Text Search pages for a query
    /// DOCUMENTATION: Follows next_page_token until exhausted
    ///
    /// A provider error on the first page aborts the search. On a later page
    /// the results gathered so far are kept, so partial runs can still be
    /// exported, and the error is recorded in the statistics.
    pub async fn search(
        client: &GooglePlacesClient,
        query: &SearchQuery,
        opts: &ProspectOptions,
        stats: &mut ProspectStats,
    ) -> Result<ResultSet, ProspectorError> {
        query.ensure_valid()?;

        let location = Self::resolve_location_bias(client, query, stats).await;
        let radius = location.and(query.radius_meters);

        let text_query = query.query_string();
        let mut results: ResultSet = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            if page_token.is_some() {
                tokio::time::sleep(opts.page_delay).await;
            }

            stats.api_requests += 1;
            let page = match client
                .text_search(&text_query, location, radius, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    if results.is_empty() {
                        return Err(e);
                    }
                    log::error!("Search aborted after {} results: {}", results.len(), e);
                    stats.errors.push(format!("Search aborted: {}", e));
                    break;
                }
            };

            stats.pages_fetched += 1;
            log::info!(
                "Page {}: retrieved {} places",
                stats.pages_fetched,
                page.results.len()
            );

            for item in page.results {
                if item.place_id.is_empty() {
                    log::warn!("Skipping result without place_id: {}", item.name);
                    continue;
                }
                results.push(PlaceResult::from(item));
            }
            stats.places_retrieved = results.len() as u32;

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(results)
    }

    /// Enrich a single result with Place Details
    /// DOCUMENTATION: Best-effort lookup keyed by place_id
    /// Fills phone and website when absent and prefers the registered name
    /// from the details response. Any failure returns the original result
    /// unmodified; enrichment never drops a result.
    ///
    /// # Returns
    /// The (possibly enriched) result and whether the lookup succeeded
    pub async fn enrich(
        client: &GooglePlacesClient,
        result: PlaceResult,
    ) -> (PlaceResult, bool) {
        match client.place_details(&result.place_id).await {
            Ok(details) => {
                let enriched = PlaceResult {
                    place_id: result.place_id,
                    name: details.name.unwrap_or(result.name),
                    address: result.address,
                    phone: result.phone.or(details.formatted_phone_number),
                    website: result.website.or(details.website),
                };
                (enriched, true)
            }
            Err(e) => {
                log::warn!(
                    "Could not fetch details for {}: {}. Using basic info.",
                    result.name,
                    e
                );
                (result, false)
            }
        }
    }

    /// Resolve an optional location bias from the query
    /// DOCUMENTATION: A radius only makes sense around a geocoded city center.
    /// Geocoding failure downgrades to an unbiased search instead of aborting.
    async fn resolve_location_bias(
        client: &GooglePlacesClient,
        query: &SearchQuery,
        stats: &mut ProspectStats,
    ) -> Option<LatLng> {
        let radius = query.radius_meters?;

        let Some(city) = &query.city else {
            log::warn!("Radius {}m given without a city; ignoring it", radius);
            return None;
        };

        stats.api_requests += 1;
        match client.geocode(city, query.state.as_deref()).await {
            Ok(center) => {
                log::info!("Geocoded {} to {},{}", city, center.lat, center.lng);
                Some(center)
            }
            Err(e) => {
                log::warn!(
                    "Geocoding failed for {}: {}. Searching without location bias.",
                    city,
                    e
                );
                stats.errors.push(format!("Geocoding failed: {}", e));
                None
            }
        }
    }
}
