//! Place data carried between the provider and the host form.

use serde::{Deserialize, Serialize};

/// Country code used when a resolved place carries no `country` component.
pub const DEFAULT_FALLBACK_COUNTRY: &str = "US";

/// One candidate address returned by a lookup.
///
/// The display text is split into a primary (street) line and a secondary
/// (locality) line. `id` is the provider's place identifier and is unique
/// within one response batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
	/// Provider place identifier.
	pub id: String,
	/// Full single-line description.
	pub description: String,
	/// Primary display line.
	pub main_text: String,
	/// Secondary display line, possibly missing the postal code.
	pub secondary_text: String,
}

impl Suggestion {
	/// Creates a suggestion from its four display fields.
	pub fn new(
		id: impl Into<String>,
		description: impl Into<String>,
		main_text: impl Into<String>,
		secondary_text: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			description: description.into(),
			main_text: main_text.into(),
			secondary_text: secondary_text.into(),
		}
	}
}

/// A typed address component as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponent {
	/// Component type tags (`route`, `locality`, ...).
	pub types: Vec<String>,
	/// Long-form name.
	pub long_name: String,
	/// Abbreviated name.
	pub short_name: String,
}

impl AddressComponent {
	/// Creates a component tagged with a single type.
	pub fn new(kind: &str, long_name: impl Into<String>, short_name: impl Into<String>) -> Self {
		Self {
			types: vec![kind.to_string()],
			long_name: long_name.into(),
			short_name: short_name.into(),
		}
	}

	/// Returns true when this component is tagged with `kind`.
	pub fn has_type(&self, kind: &str) -> bool {
		self.types.iter().any(|t| t == kind)
	}
}

/// Normalized address fields extracted from provider components.
///
/// Built once per selection and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponents {
	pub street_number: String,
	pub route: String,
	pub city: String,
	pub state: String,
	pub zip_code: String,
	pub country: String,
}

impl AddressComponents {
	/// Street number and route joined by a space and trimmed.
	pub fn street_line(&self) -> String {
		format!("{} {}", self.street_number, self.route).trim().to_string()
	}
}

/// A resolved place returned by a detail fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceDetails {
	/// Provider-formatted single-line address.
	pub formatted_address: String,
	/// Parsed address components.
	pub components: AddressComponents,
}

/// Structured address handed to the host form on selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
	pub formatted_address: String,
	pub street_address: String,
	pub city: String,
	pub state: String,
	pub zip_code: String,
	pub country: String,
}

impl SelectionResult {
	/// Builds a selection from resolved details.
	///
	/// `street_address` falls back to the formatted address when the place has
	/// neither street number nor route; `country` falls back to
	/// `fallback_country` when absent.
	pub fn from_details(details: &PlaceDetails, fallback_country: &str) -> Self {
		let parts = &details.components;
		let street = parts.street_line();
		let street_address = if street.is_empty() {
			details.formatted_address.clone()
		} else {
			street
		};
		let country = if parts.country.is_empty() {
			fallback_country.to_string()
		} else {
			parts.country.clone()
		};

		Self {
			formatted_address: details.formatted_address.clone(),
			street_address,
			city: parts.city.clone(),
			state: parts.state.clone(),
			zip_code: parts.zip_code.clone(),
			country,
		}
	}
}
