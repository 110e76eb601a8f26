//! File-backed provider for driving the engine without a network service.
//!
//! A catalog is a JSON document in the places wire format:
//!
//! ```json
//! {
//!   "predictions": [{ "place_id": "p1", "description": "...", "structured_formatting": { ... } }],
//!   "details": { "p1": { "formatted_address": "...", "address_components": [ ... ] } },
//!   "status": "REQUEST_DENIED"
//! }
//! ```
//!
//! `status` is optional and forces every lookup to reply with that status.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use locus_places::wire::{Place, Prediction};
use locus_places::{
	DetailsRequest, LookupRequest, LookupResponse, LookupStatus, PlaceDetails, ProviderError,
	ProviderLoader, Suggestion, SuggestionProvider,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct Catalog {
	#[serde(default)]
	predictions: Vec<Prediction>,
	#[serde(default)]
	details: HashMap<String, Place>,
	#[serde(default)]
	status: Option<String>,
}

/// Serves lookups by case-insensitive word match over the catalog.
#[derive(Debug)]
pub struct FixtureProvider {
	suggestions: Vec<Suggestion>,
	details: HashMap<String, PlaceDetails>,
	forced_status: Option<LookupStatus>,
}

impl FixtureProvider {
	pub fn from_catalog(catalog: Catalog) -> Self {
		Self {
			suggestions: catalog.predictions.into_iter().map(Into::into).collect(),
			details: catalog
				.details
				.into_iter()
				.map(|(id, place)| (id, place.into()))
				.collect(),
			forced_status: catalog.status.as_deref().map(LookupStatus::from_wire),
		}
	}

	pub fn from_json(body: &str) -> Result<Self, ProviderError> {
		let catalog: Catalog = serde_json::from_str(body)?;
		Ok(Self::from_catalog(catalog))
	}
}

fn matches_query(suggestion: &Suggestion, query: &str) -> bool {
	let haystack = suggestion.description.to_lowercase();
	query
		.split_whitespace()
		.all(|word| haystack.contains(&word.to_lowercase()))
}

#[async_trait]
impl SuggestionProvider for FixtureProvider {
	async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse, ProviderError> {
		if let Some(status) = self.forced_status.filter(|s| *s != LookupStatus::Ok) {
			return Ok(LookupResponse::status(status));
		}
		let found: Vec<Suggestion> = self
			.suggestions
			.iter()
			.filter(|s| matches_query(s, &request.text))
			.cloned()
			.collect();
		debug!(query = %request.text, count = found.len(), "fixture.lookup");
		Ok(LookupResponse::ok(found))
	}

	async fn fetch_details(&self, request: &DetailsRequest) -> Result<PlaceDetails, ProviderError> {
		self.details
			.get(&request.id)
			.cloned()
			.ok_or_else(|| ProviderError::DetailsUnavailable {
				id: request.id.clone(),
			})
	}
}

/// Loads a [`FixtureProvider`] from disk on first use.
#[derive(Debug)]
pub struct CatalogLoader {
	path: PathBuf,
}

impl CatalogLoader {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

#[async_trait]
impl ProviderLoader for CatalogLoader {
	async fn load(&self) -> Result<Arc<dyn SuggestionProvider>, ProviderError> {
		let body = tokio::fs::read_to_string(&self.path)
			.await
			.map_err(|e| ProviderError::Unavailable(format!("{}: {e}", self.path.display())))?;
		Ok(Arc::new(FixtureProvider::from_json(&body)?))
	}
}
