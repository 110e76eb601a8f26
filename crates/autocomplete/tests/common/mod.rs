#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use locus_autocomplete::{AddressAutocomplete, AutocompleteConfig, ChangeEvent, OutsidePointer};
use locus_places::{
	AddressComponent, DetailsRequest, LookupRequest, LookupResponse, LookupStatus, PlaceDetails,
	ProviderError, Suggestion, SuggestionProvider, parse_components,
};

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

#[derive(Clone)]
enum Reply {
	Found(Vec<Suggestion>),
	Status(LookupStatus),
	Unavailable,
}

/// In-memory provider with per-query replies and latencies.
#[derive(Default)]
pub struct ScriptedProvider {
	replies: Mutex<HashMap<String, (Duration, Reply)>>,
	details: Mutex<HashMap<String, PlaceDetails>>,
	lookups: Mutex<Vec<LookupRequest>>,
	detail_calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn found(&self, query: &str, suggestions: Vec<Suggestion>) {
		self.reply(query, Duration::ZERO, Reply::Found(suggestions));
	}

	pub fn found_after(&self, query: &str, latency: Duration, suggestions: Vec<Suggestion>) {
		self.reply(query, latency, Reply::Found(suggestions));
	}

	pub fn status(&self, query: &str, status: LookupStatus) {
		self.reply(query, Duration::ZERO, Reply::Status(status));
	}

	pub fn unavailable(&self, query: &str) {
		self.reply(query, Duration::ZERO, Reply::Unavailable);
	}

	pub fn place(&self, id: &str, formatted_address: &str, components: &[AddressComponent]) {
		self.details.lock().unwrap().insert(
			id.to_string(),
			PlaceDetails {
				formatted_address: formatted_address.to_string(),
				components: parse_components(components),
			},
		);
	}

	fn reply(&self, query: &str, latency: Duration, reply: Reply) {
		self.replies
			.lock()
			.unwrap()
			.insert(query.to_string(), (latency, reply));
	}

	pub fn lookups(&self) -> Vec<String> {
		self.lookups
			.lock()
			.unwrap()
			.iter()
			.map(|r| r.text.clone())
			.collect()
	}

	pub fn last_lookup(&self) -> Option<LookupRequest> {
		self.lookups.lock().unwrap().last().cloned()
	}

	pub fn detail_calls(&self) -> Vec<String> {
		self.detail_calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl SuggestionProvider for ScriptedProvider {
	async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse, ProviderError> {
		self.lookups.lock().unwrap().push(request.clone());
		let scripted = self.replies.lock().unwrap().get(&request.text).cloned();
		let Some((latency, reply)) = scripted else {
			return Ok(LookupResponse::ok(Vec::new()));
		};
		if !latency.is_zero() {
			tokio::time::sleep(latency).await;
		}
		match reply {
			Reply::Found(suggestions) => Ok(LookupResponse::ok(suggestions)),
			Reply::Status(status) => Ok(LookupResponse::status(status)),
			Reply::Unavailable => Err(ProviderError::Unavailable("script not loaded".into())),
		}
	}

	async fn fetch_details(&self, request: &DetailsRequest) -> Result<PlaceDetails, ProviderError> {
		self.detail_calls.lock().unwrap().push(request.id.clone());
		self.details
			.lock()
			.unwrap()
			.get(&request.id)
			.cloned()
			.ok_or_else(|| ProviderError::DetailsUnavailable {
				id: request.id.clone(),
			})
	}
}

/// Records every change event the widget emits.
#[derive(Clone, Default)]
pub struct Changes(Arc<Mutex<Vec<ChangeEvent>>>);

impl Changes {
	pub fn all(&self) -> Vec<ChangeEvent> {
		self.0.lock().unwrap().clone()
	}

	pub fn selections(&self) -> Vec<ChangeEvent> {
		self.all().into_iter().filter(ChangeEvent::is_selection).collect()
	}

	pub fn last(&self) -> Option<ChangeEvent> {
		self.0.lock().unwrap().last().cloned()
	}
}

/// Records subscribe/unsubscribe calls.
#[derive(Clone, Default)]
pub struct PointerLog(Arc<Mutex<Vec<&'static str>>>);

impl PointerLog {
	pub fn calls(&self) -> Vec<&'static str> {
		self.0.lock().unwrap().clone()
	}
}

impl OutsidePointer for PointerLog {
	fn subscribe(&mut self) {
		self.0.lock().unwrap().push("subscribe");
	}

	fn unsubscribe(&mut self) {
		self.0.lock().unwrap().push("unsubscribe");
	}
}

pub fn mount(provider: &Arc<ScriptedProvider>) -> (AddressAutocomplete, Changes) {
	let changes = Changes::default();
	let sink = changes.clone();
	let widget = AddressAutocomplete::new(
		provider.clone(),
		AutocompleteConfig::default(),
		"",
		move |event| sink.0.lock().unwrap().push(event),
	);
	(widget, changes)
}

/// Lets virtual time pass past the default quiet period.
pub async fn quiet_period() {
	tokio::time::sleep(Duration::from_millis(301)).await;
}

pub fn austin() -> Suggestion {
	Suggestion::new(
		"p1",
		"100 Main St, Austin, TX 73301, USA",
		"100 Main St",
		"Austin, TX, USA",
	)
}

pub fn austin_components() -> Vec<AddressComponent> {
	vec![
		AddressComponent::new("street_number", "100", "100"),
		AddressComponent::new("route", "Main St", "Main St"),
		AddressComponent::new("locality", "Austin", "Austin"),
		AddressComponent::new("administrative_area_level_1", "Texas", "TX"),
		AddressComponent::new("postal_code", "73301", "73301"),
		AddressComponent::new("country", "United States", "US"),
	]
}

pub fn row(id: &str, main: &str) -> Suggestion {
	Suggestion::new(id, format!("{main}, Austin, TX, USA"), main, "Austin, TX, USA")
}
