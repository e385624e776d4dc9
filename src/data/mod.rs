//! Core data models for coronagraph
//!
//! The dataset is a flat JSON array of daily per-region bulletins. Only the
//! three fields the charts need are decoded; everything else is ignored.

pub mod fetch;
pub mod regions;

pub use fetch::{CurlFetcher, Fetcher, FetcherKind, HttpFetcher};
pub use regions::{all_regions, catalog_listing, find_region};

use serde::Deserialize;

/// Published location of the regional dataset
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/pcm-dpc/COVID-19/master/dati-json/dpc-covid19-ita-regioni.json";

/// One daily bulletin row for a single region
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObservationRecord {
    /// Region name as spelled in the catalog
    #[serde(rename = "denominazione_regione")]
    pub region: String,
    /// Observation timestamp, e.g. `2020-02-24T18:00:00`
    #[serde(rename = "data")]
    pub timestamp: String,
    /// Cumulative case count up to this observation
    #[serde(rename = "totale_casi")]
    pub total_cases: u64,
}

/// The full collection of observations, in publication order
pub type Dataset = Vec<ObservationRecord>;

/// Parses a raw JSON payload into a dataset
///
/// Callers attach their own context: a bad download and a corrupt cache
/// file call for different remedies.
pub fn parse_dataset(bytes: &[u8]) -> serde_json::Result<Dataset> {
    serde_json::from_slice(bytes)
}
