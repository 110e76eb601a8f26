//! Postal-code repair for suggestion secondary lines.
//!
//! Providers sometimes drop the postal code from the secondary line while the
//! full description still carries it. This is display-only; the structured
//! selection always comes from typed components.

use std::sync::LazyLock;

use locus_places::Suggestion;
use regex::Regex;

/// Two-letter region code followed by a ZIP or ZIP+4.
static REGION_THEN_CODE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\b[A-Z]{2}\s+(\d{5}(?:-\d{4})?)\b").expect("valid region+code pattern")
});

/// Bare 5- or 9-digit code.
static BARE_CODE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\b\d{5}(?:-?\d{4})?\b").expect("valid postal code pattern"));

/// `, XX` followed by a comma or the end of the line.
static REGION_ANCHOR: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r", ([A-Z]{2})(?:,|$)").expect("valid region anchor pattern"));

/// Description with the main-text prefix and the following separator removed.
pub fn location_info(suggestion: &Suggestion) -> &str {
	let rest = suggestion
		.description
		.strip_prefix(suggestion.main_text.as_str())
		.unwrap_or(&suggestion.description);
	rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace())
}

/// Finds the postal code carried by a location string, if any.
///
/// A code next to a region code wins. Otherwise a bare code counts only when
/// it sits after a comma, so a leading street number is never mistaken for it.
pub fn find_postal_code(location: &str) -> Option<&str> {
	if let Some(caps) = REGION_THEN_CODE.captures(location) {
		return caps.get(1).map(|m| m.as_str());
	}

	BARE_CODE
		.find_iter(location)
		.find(|m| m.start() > 0 && location[..m.start()].contains(','))
		.map(|m| m.as_str())
}

/// Secondary display line with the postal code restored where possible.
pub fn enrich_secondary_text(suggestion: &Suggestion) -> String {
	let secondary = suggestion.secondary_text.as_str();
	let location = location_info(suggestion);

	if BARE_CODE.is_match(secondary) {
		return secondary.to_string();
	}
	if secondary.is_empty() {
		return location.to_string();
	}
	let Some(code) = find_postal_code(location) else {
		return secondary.to_string();
	};

	match REGION_ANCHOR.captures(secondary).and_then(|caps| caps.get(1)) {
		Some(region) => {
			let at = region.end();
			format!("{} {code}{}", &secondary[..at], &secondary[at..])
		}
		None => format!("{secondary} {code}"),
	}
}
