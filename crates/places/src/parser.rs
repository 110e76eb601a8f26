//! Typed component list to [`AddressComponents`] mapping.
//!
//! Each output field takes the first component carrying one of its type tags.
//! The list is scanned once; fields nobody claims stay empty.

use crate::model::{AddressComponent, AddressComponents};

#[derive(Clone, Copy)]
enum Field {
	StreetNumber,
	Route,
	City,
	State,
	ZipCode,
	Country,
}

#[derive(Clone, Copy)]
enum NameForm {
	Long,
	Short,
}

/// Type tag → (field, which name to take).
const MAPPING: &[(&str, Field, NameForm)] = &[
	("street_number", Field::StreetNumber, NameForm::Long),
	("route", Field::Route, NameForm::Long),
	("locality", Field::City, NameForm::Long),
	("postal_town", Field::City, NameForm::Long),
	("administrative_area_level_1", Field::State, NameForm::Short),
	("postal_code", Field::ZipCode, NameForm::Long),
	("country", Field::Country, NameForm::Short),
];

impl AddressComponents {
	fn slot(&mut self, field: Field) -> &mut String {
		match field {
			Field::StreetNumber => &mut self.street_number,
			Field::Route => &mut self.route,
			Field::City => &mut self.city,
			Field::State => &mut self.state,
			Field::ZipCode => &mut self.zip_code,
			Field::Country => &mut self.country,
		}
	}
}

/// Maps provider components onto normalized address fields.
///
/// Never fails: an empty slice yields an all-empty structure.
pub fn parse_components(components: &[AddressComponent]) -> AddressComponents {
	let mut out = AddressComponents::default();
	let mut claimed = [false; 6];

	for component in components {
		for &(kind, field, form) in MAPPING {
			let idx = field as usize;
			if claimed[idx] || !component.has_type(kind) {
				continue;
			}
			let name = match form {
				NameForm::Long => &component.long_name,
				NameForm::Short => &component.short_name,
			};
			*out.slot(field) = name.clone();
			claimed[idx] = true;
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	fn austin() -> Vec<AddressComponent> {
		vec![
			AddressComponent::new("street_number", "100", "100"),
			AddressComponent::new("route", "Main St", "Main St"),
			AddressComponent::new("locality", "Austin", "Austin"),
			AddressComponent::new("administrative_area_level_1", "Texas", "TX"),
			AddressComponent::new("postal_code", "73301", "73301"),
			AddressComponent::new("country", "United States", "US"),
		]
	}

	#[test]
	fn maps_every_field_with_its_name_form() {
		assert_eq!(
			parse_components(&austin()),
			AddressComponents {
				street_number: "100".to_string(),
				route: "Main St".to_string(),
				city: "Austin".to_string(),
				state: "TX".to_string(),
				zip_code: "73301".to_string(),
				country: "US".to_string(),
			}
		);
	}

	#[test]
	fn empty_list_yields_empty_structure() {
		assert_eq!(parse_components(&[]), AddressComponents::default());
	}

	#[rstest]
	#[case::locality_first(&["locality", "postal_town"], "Austin")]
	#[case::postal_town_first(&["postal_town", "locality"], "Bath")]
	fn city_takes_first_matching_component(#[case] order: &[&str], #[case] expected: &str) {
		let components: Vec<_> = order
			.iter()
			.map(|kind| {
				let name = if *kind == "locality" { "Austin" } else { "Bath" };
				AddressComponent::new(kind, name, name)
			})
			.collect();

		assert_eq!(parse_components(&components).city, expected);
	}

	#[test]
	fn first_match_wins_for_repeated_types() {
		let components = vec![
			AddressComponent::new("postal_code", "73301", "73301"),
			AddressComponent::new("postal_code", "99999", "99999"),
		];
		assert_eq!(parse_components(&components).zip_code, "73301");
	}

	#[test]
	fn multi_typed_component_fills_its_field() {
		let components = vec![AddressComponent {
			types: vec!["locality".to_string(), "political".to_string()],
			long_name: "Seattle".to_string(),
			short_name: "Seattle".to_string(),
		}];
		assert_eq!(parse_components(&components).city, "Seattle");
	}
}
