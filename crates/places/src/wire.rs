//! JSON wire format of the places service.
//!
//! Mirrors the autocomplete and place-details response bodies closely enough
//! to decode them; everything else in the payload is ignored.

use serde::{Deserialize, Serialize};

use crate::model::{AddressComponent, PlaceDetails, Suggestion};
use crate::parser::parse_components;
use crate::provider::{LookupResponse, LookupStatus};
use crate::{ProviderError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredFormatting {
	#[serde(default)]
	pub main_text: String,
	#[serde(default)]
	pub secondary_text: String,
}

/// One prediction in an autocomplete response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
	pub place_id: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub structured_formatting: StructuredFormatting,
}

impl From<Prediction> for Suggestion {
	fn from(p: Prediction) -> Self {
		Self {
			id: p.place_id,
			description: p.description,
			main_text: p.structured_formatting.main_text,
			secondary_text: p.structured_formatting.secondary_text,
		}
	}
}

/// Autocomplete response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteBody {
	#[serde(default)]
	pub status: String,
	#[serde(default)]
	pub predictions: Vec<Prediction>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireComponent {
	#[serde(default)]
	pub long_name: String,
	#[serde(default)]
	pub short_name: String,
	#[serde(default)]
	pub types: Vec<String>,
}

impl From<WireComponent> for AddressComponent {
	fn from(c: WireComponent) -> Self {
		Self {
			types: c.types,
			long_name: c.long_name,
			short_name: c.short_name,
		}
	}
}

/// The `result` object of a place-details response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
	#[serde(default)]
	pub formatted_address: String,
	#[serde(default)]
	pub address_components: Vec<WireComponent>,
}

impl From<Place> for PlaceDetails {
	fn from(place: Place) -> Self {
		let components: Vec<AddressComponent> =
			place.address_components.into_iter().map(Into::into).collect();
		Self {
			formatted_address: place.formatted_address,
			components: parse_components(&components),
		}
	}
}

/// Place-details response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsBody {
	#[serde(default)]
	pub status: String,
	#[serde(default)]
	pub result: Option<Place>,
}

impl AutocompleteBody {
	/// Converts into a [`LookupResponse`].
	///
	/// Predictions are dropped for any status that does not populate the list.
	pub fn into_response(self) -> LookupResponse {
		let status = LookupStatus::from_wire(&self.status);
		if !status.populates_list() {
			if let Some(message) = &self.error_message {
				tracing::debug!(%status, error_message = %message, "places.lookup.status");
			}
			return LookupResponse::status(status);
		}
		LookupResponse::ok(self.predictions.into_iter().map(Into::into).collect())
	}
}

impl DetailsBody {
	/// Converts into [`PlaceDetails`], failing when the record is missing.
	pub fn into_details(self, id: &str) -> Result<PlaceDetails> {
		match (self.status.as_str(), self.result) {
			("OK", Some(place)) => Ok(place.into()),
			_ => Err(ProviderError::DetailsUnavailable { id: id.to_string() }),
		}
	}
}

/// Decodes an autocomplete response body.
pub fn decode_lookup(body: &str) -> Result<LookupResponse> {
	let body: AutocompleteBody = serde_json::from_str(body)?;
	Ok(body.into_response())
}

/// Decodes a place-details response body for place `id`.
pub fn decode_details(id: &str, body: &str) -> Result<PlaceDetails> {
	let body: DetailsBody = serde_json::from_str(body)?;
	body.into_details(id)
}
