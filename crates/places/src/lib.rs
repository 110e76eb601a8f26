//! Address place model and the suggestion provider seam.
//!
//! This crate owns everything that talks about places independent of any
//! input widget:
//!
//! - [`model`]: suggestions, typed address components, and the structured
//!   [`SelectionResult`] handed to host forms.
//! - [`parser`]: first-match mapping of provider components onto
//!   [`AddressComponents`].
//! - [`provider`]: the async [`SuggestionProvider`] trait and
//!   [`LazyProvider`], a shared handle whose backing service loads on first use.
//! - [`wire`]: serde decoding of the places service JSON bodies.

pub mod model;
pub mod parser;
pub mod provider;
pub mod wire;

pub use model::{
	AddressComponent, AddressComponents, DEFAULT_FALLBACK_COUNTRY, PlaceDetails, SelectionResult,
	Suggestion,
};
pub use parser::parse_components;
pub use provider::{
	DEFAULT_DETAIL_FIELDS, DetailsRequest, LazyProvider, LookupRequest, LookupResponse,
	LookupStatus, ProviderLoader, SuggestionProvider,
};

/// A convenient type alias for `Result` with `E` = [`ProviderError`].
pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

/// Failures surfaced by a [`SuggestionProvider`].
///
/// Denial statuses are not errors; they travel in [`LookupResponse::status`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProviderError {
	/// The backing service has not loaded or failed to load.
	#[error("provider unavailable: {0}")]
	Unavailable(String),
	/// The provider could not resolve a place id.
	#[error("no details for place {id}")]
	DetailsUnavailable {
		/// The place id that failed to resolve.
		id: String,
	},
	/// The request did not reach the service or the reply was lost.
	#[error("transport error: {0}")]
	Transport(String),
	/// The service replied with an undecodable body.
	#[error("deserialization failed: {0}")]
	Decode(#[from] serde_json::Error),
}
