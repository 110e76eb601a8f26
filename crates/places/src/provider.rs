//! Suggestion provider seam and its lazily-initialized shared handle.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::model::{PlaceDetails, Suggestion};
use crate::{ProviderError, Result};

/// Fields requested from a detail fetch unless the caller overrides them.
pub const DEFAULT_DETAIL_FIELDS: &[&str] = &["formatted_address", "address_components", "geometry"];

/// Number of load attempts a [`LazyProvider`] makes per call before giving up.
const LOAD_ATTEMPTS: usize = 2;

/// Outcome status of a lookup call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupStatus {
	/// Matches were found.
	Ok,
	/// Valid request, nothing matched.
	ZeroResults,
	/// Rejected by the provider (key, quota, referrer).
	RequestDenied,
	/// The request was malformed.
	InvalidRequest,
	/// Any other provider status.
	Other,
}

impl LookupStatus {
	/// Parses a provider status string. Unknown values map to [`Self::Other`].
	pub fn from_wire(status: &str) -> Self {
		match status {
			"OK" => Self::Ok,
			"ZERO_RESULTS" => Self::ZeroResults,
			"REQUEST_DENIED" => Self::RequestDenied,
			"INVALID_REQUEST" => Self::InvalidRequest,
			_ => Self::Other,
		}
	}

	/// Returns true when the response should populate the visible list.
	pub const fn populates_list(self) -> bool {
		matches!(self, Self::Ok | Self::ZeroResults)
	}

	/// Returns true for statuses that close the list silently.
	///
	/// `Other` is grouped with the denial statuses.
	pub const fn is_denial(self) -> bool {
		!self.populates_list()
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Ok => "OK",
			Self::ZeroResults => "ZERO_RESULTS",
			Self::RequestDenied => "REQUEST_DENIED",
			Self::InvalidRequest => "INVALID_REQUEST",
			Self::Other => "OTHER",
		}
	}
}

impl std::fmt::Display for LookupStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A suggestion lookup restricted to postal addresses in one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
	/// Text typed by the user.
	pub text: String,
	/// Restrict results to street addresses.
	pub address_only: bool,
	/// Lowercase ISO country code filter.
	pub country: String,
}

impl LookupRequest {
	/// Creates an address-only request for `text` within `country`.
	pub fn new(text: impl Into<String>, country: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			address_only: true,
			country: country.into(),
		}
	}
}

/// Response to a lookup call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
	pub status: LookupStatus,
	/// Ordered suggestions; empty for every non-`Ok` status.
	pub suggestions: Vec<Suggestion>,
}

impl LookupResponse {
	/// Builds a response, normalizing an empty `Ok` to `ZeroResults`.
	pub fn ok(suggestions: Vec<Suggestion>) -> Self {
		let status = if suggestions.is_empty() {
			LookupStatus::ZeroResults
		} else {
			LookupStatus::Ok
		};
		Self { status, suggestions }
	}

	/// Builds an empty response carrying a non-`Ok` status.
	pub fn status(status: LookupStatus) -> Self {
		Self {
			status,
			suggestions: Vec::new(),
		}
	}
}

/// A place detail fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsRequest {
	/// Provider place identifier.
	pub id: String,
	/// Requested detail fields.
	pub fields: Vec<String>,
}

impl DetailsRequest {
	/// Creates a request for `id` with [`DEFAULT_DETAIL_FIELDS`].
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			fields: DEFAULT_DETAIL_FIELDS.iter().map(|f| f.to_string()).collect(),
		}
	}
}

/// External address-suggestion service.
///
/// Implementations must resolve (or fail) rather than hang when the backing
/// service is not ready.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
	/// Looks up address suggestions.
	///
	/// Denial statuses resolve to an empty [`LookupResponse`] carrying the
	/// status; only infrastructure failures are errors.
	async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse>;

	/// Resolves one suggestion into structured place details.
	///
	/// Fails with [`ProviderError::DetailsUnavailable`] when the id cannot be
	/// resolved.
	async fn fetch_details(&self, request: &DetailsRequest) -> Result<PlaceDetails>;
}

/// Asynchronous factory for the backing provider.
#[async_trait]
pub trait ProviderLoader: Send + Sync {
	/// Loads the backing provider.
	async fn load(&self) -> Result<Arc<dyn SuggestionProvider>>;
}

/// Provider handle initialized on first use.
///
/// Concurrent callers share a single initialization. A failed load is retried
/// once within the same call; if that also fails the call resolves to
/// [`ProviderError::Unavailable`] and the next call tries again.
pub struct LazyProvider {
	loader: Box<dyn ProviderLoader>,
	inner: OnceCell<Arc<dyn SuggestionProvider>>,
}

impl std::fmt::Debug for LazyProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LazyProvider")
			.field("initialized", &self.inner.initialized())
			.finish()
	}
}

impl LazyProvider {
	/// Creates an uninitialized handle around `loader`.
	pub fn new(loader: impl ProviderLoader + 'static) -> Self {
		Self {
			loader: Box::new(loader),
			inner: OnceCell::new(),
		}
	}

	/// Returns true once the backing provider has loaded.
	pub fn is_ready(&self) -> bool {
		self.inner.initialized()
	}

	async fn get(&self) -> Result<&Arc<dyn SuggestionProvider>> {
		if let Some(provider) = self.inner.get() {
			return Ok(provider);
		}

		let mut last_error = None;
		for attempt in 1..=LOAD_ATTEMPTS {
			match self.inner.get_or_try_init(|| self.loader.load()).await {
				Ok(provider) => {
					debug!(attempt, "places.provider.ready");
					return Ok(provider);
				}
				Err(err) => {
					warn!(attempt, error = %err, "places.provider.load_failed");
					last_error = Some(err);
				}
			}
		}

		Err(ProviderError::Unavailable(
			last_error.map_or_else(|| "provider not loaded".to_string(), |e| e.to_string()),
		))
	}
}

#[async_trait]
impl SuggestionProvider for LazyProvider {
	async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse> {
		self.get().await?.lookup(request).await
	}

	async fn fetch_details(&self, request: &DetailsRequest) -> Result<PlaceDetails> {
		self.get().await?.fetch_details(request).await
	}
}

#[cfg(test)]
mod tests;
