//! Change records delivered to the host form.

use locus_places::{PlaceDetails, SelectionResult, Suggestion};
use serde::Serialize;

/// Host form callback.
pub type ChangeCallback = Box<dyn FnMut(ChangeEvent) + Send>;

/// Address data attached to a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlaceData {
	/// Details resolved; every field is populated from typed components.
	Structured(SelectionResult),
	/// Details could not be fetched; only the suggestion text is known.
	Unstructured {
		#[serde(rename = "formattedAddress")]
		formatted_address: String,
	},
}

impl PlaceData {
	pub fn formatted_address(&self) -> &str {
		match self {
			Self::Structured(result) => &result.formatted_address,
			Self::Unstructured { formatted_address } => formatted_address,
		}
	}
}

/// A value change reported to the host form.
///
/// `Selected` tells the host the fields below may be bulk-populated from the
/// attached place data; `Typed` is plain manual entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
	Typed { value: String },
	Selected { value: String, place: PlaceData },
}

impl ChangeEvent {
	/// Current field text.
	pub fn value(&self) -> &str {
		match self {
			Self::Typed { value } | Self::Selected { value, .. } => value,
		}
	}

	/// Returns true for autofill events.
	pub fn is_selection(&self) -> bool {
		matches!(self, Self::Selected { .. })
	}

	pub fn place(&self) -> Option<&PlaceData> {
		match self {
			Self::Typed { .. } => None,
			Self::Selected { place, .. } => Some(place),
		}
	}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangeRecord<'a> {
	value: &'a str,
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	is_selection: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	place_data: Option<&'a PlaceData>,
}

impl Serialize for ChangeEvent {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		ChangeRecord {
			value: self.value(),
			is_selection: self.is_selection(),
			place_data: self.place(),
		}
		.serialize(serializer)
	}
}

/// Builds the selection event for `suggestion` from a detail fetch outcome.
///
/// Any fetch failure degrades to an unstructured selection carrying the
/// suggestion's description.
pub fn selection_event<E>(
	suggestion: &Suggestion,
	details: Result<PlaceDetails, E>,
	fallback_country: &str,
) -> ChangeEvent {
	match details {
		Ok(details) => {
			let result = SelectionResult::from_details(&details, fallback_country);
			ChangeEvent::Selected {
				value: result.formatted_address.clone(),
				place: PlaceData::Structured(result),
			}
		}
		Err(_) => ChangeEvent::Selected {
			value: suggestion.description.clone(),
			place: PlaceData::Unstructured {
				formatted_address: suggestion.description.clone(),
			},
		},
	}
}

/// Delivers change events to the host callback.
pub struct SelectionEmitter {
	on_change: ChangeCallback,
}

impl std::fmt::Debug for SelectionEmitter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SelectionEmitter").finish_non_exhaustive()
	}
}

impl SelectionEmitter {
	pub fn new(on_change: impl FnMut(ChangeEvent) + Send + 'static) -> Self {
		Self {
			on_change: Box::new(on_change),
		}
	}

	pub fn typed(&mut self, value: &str) {
		(self.on_change)(ChangeEvent::Typed {
			value: value.to_string(),
		});
	}

	pub fn emit(&mut self, event: ChangeEvent) {
		(self.on_change)(event);
	}
}

#[cfg(test)]
mod tests {
	use locus_places::{AddressComponents, ProviderError};
	use pretty_assertions::assert_eq;

	use super::*;

	fn suggestion() -> Suggestion {
		Suggestion::new(
			"p1",
			"100 Main St, Austin, TX 73301, USA",
			"100 Main St",
			"Austin, TX, USA",
		)
	}

	#[test]
	fn failed_fetch_falls_back_to_description() {
		let event = selection_event(
			&suggestion(),
			Err::<PlaceDetails, _>(ProviderError::DetailsUnavailable { id: "p1".into() }),
			"US",
		);

		assert!(event.is_selection());
		assert_eq!(event.value(), "100 Main St, Austin, TX 73301, USA");
		assert_eq!(
			event.place(),
			Some(&PlaceData::Unstructured {
				formatted_address: "100 Main St, Austin, TX 73301, USA".into()
			})
		);
	}

	#[test]
	fn structured_selection_serializes_like_the_host_record() {
		let details = PlaceDetails {
			formatted_address: "100 Main St, Austin, TX 73301, USA".into(),
			components: AddressComponents {
				street_number: "100".into(),
				route: "Main St".into(),
				city: "Austin".into(),
				state: "TX".into(),
				zip_code: "73301".into(),
				country: "US".into(),
			},
		};
		let event = selection_event(&suggestion(), Ok::<_, ProviderError>(details), "US");

		let json = serde_json::to_value(&event).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"value": "100 Main St, Austin, TX 73301, USA",
				"isSelection": true,
				"placeData": {
					"formattedAddress": "100 Main St, Austin, TX 73301, USA",
					"streetAddress": "100 Main St",
					"city": "Austin",
					"state": "TX",
					"zipCode": "73301",
					"country": "US"
				}
			})
		);
	}

	#[test]
	fn typed_event_serializes_value_only() {
		let json = serde_json::to_value(ChangeEvent::Typed { value: "100".into() }).unwrap();
		assert_eq!(json, serde_json::json!({ "value": "100" }));
	}
}
