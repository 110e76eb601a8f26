//! Suggestion list state machine for one mounted address input.
//!
//! # Phases
//!
//! - [`Phase::Idle`]: nothing pending, nothing shown.
//! - [`Phase::Searching`]: the query changed; a lookup may be pending.
//! - [`Phase::Open`]: the list is visible, possibly empty after a search.
//! - [`Phase::Closed`]: the list is hidden but its rows are retained.
//!
//! The controller is driven from the UI loop: input, key, focus, and pointer
//! handlers mutate state synchronously, [`AddressAutocomplete::poll`] applies
//! finished lookups, and selection awaits the detail fetch inline.

use std::sync::Arc;

use locus_places::{DetailsRequest, Suggestion, SuggestionProvider};
use tracing::{debug, warn};

use crate::config::AutocompleteConfig;
use crate::debounce::{LookupOutcome, QueryDebouncer};
use crate::emit::{ChangeEvent, SelectionEmitter, selection_event};
use crate::enrich::enrich_secondary_text;
use crate::pointer::{NoOutsidePointer, OutsidePointer, OutsideWatch, PointerTarget};

/// Lifecycle phase of the suggestion list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
	#[default]
	Idle,
	Searching,
	Open,
	Closed,
}

/// Keys the list reacts to. Everything else is [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
	ArrowUp,
	ArrowDown,
	Enter,
	Escape,
	Char(char),
	Other,
}

/// Per-instance input session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
	/// Raw field text.
	pub query: String,
	/// Rows from the latest accepted lookup.
	pub suggestions: Vec<Suggestion>,
	/// Highlighted row; always a valid index into `suggestions`.
	pub selected: Option<usize>,
	/// Whether the list is shown.
	pub visible: bool,
	/// Whether the shown list is the result of a completed search.
	pub has_searched: bool,
	pub phase: Phase,
}

/// One row as the render layer should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
	pub id: String,
	pub main_text: String,
	/// Secondary line with the postal code restored.
	pub secondary_text: String,
	pub selected: bool,
}

/// Next highlighted row after one arrow step over `len` rows.
///
/// Clamps at the last row going down and at "none" going up; never wraps.
pub fn step_selection(selected: Option<usize>, len: usize, down: bool) -> Option<usize> {
	if len == 0 {
		return None;
	}
	match (selected, down) {
		(None, true) => Some(0),
		(Some(i), true) => Some((i + 1).min(len - 1)),
		(None, false) | (Some(0), false) => None,
		(Some(i), false) => Some(i - 1),
	}
}

/// Headless address-autocomplete widget.
pub struct AddressAutocomplete {
	config: AutocompleteConfig,
	provider: Arc<dyn SuggestionProvider>,
	debouncer: QueryDebouncer,
	emitter: SelectionEmitter,
	pointer: Box<dyn OutsidePointer>,
	watch: OutsideWatch,
	focused: bool,
	state: SessionState,
}

impl std::fmt::Debug for AddressAutocomplete {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AddressAutocomplete")
			.field("state", &self.state)
			.field("focused", &self.focused)
			.field("watch", &self.watch)
			.field("debouncer", &self.debouncer)
			.finish_non_exhaustive()
	}
}

impl AddressAutocomplete {
	/// Mounts a widget bound to `value` that reports changes to `on_change`.
	pub fn new(
		provider: Arc<dyn SuggestionProvider>,
		config: AutocompleteConfig,
		value: impl Into<String>,
		on_change: impl FnMut(ChangeEvent) + Send + 'static,
	) -> Self {
		let debouncer = QueryDebouncer::new(provider.clone(), config.debounce(), config.country.clone());
		Self {
			config,
			provider,
			debouncer,
			emitter: SelectionEmitter::new(on_change),
			pointer: Box::new(NoOutsidePointer),
			watch: OutsideWatch::Detached,
			focused: false,
			state: SessionState {
				query: value.into(),
				..SessionState::default()
			},
		}
	}

	/// Installs the host's outside-pointer capability.
	pub fn with_outside_pointer(mut self, pointer: impl OutsidePointer + 'static) -> Self {
		self.pointer = Box::new(pointer);
		self
	}

	pub fn state(&self) -> &SessionState {
		&self.state
	}

	pub fn phase(&self) -> Phase {
		self.state.phase
	}

	pub fn config(&self) -> &AutocompleteConfig {
		&self.config
	}

	/// Returns true while a debounced lookup is waiting or in flight.
	pub fn is_searching(&self) -> bool {
		self.debouncer.is_pending()
	}

	/// Whether to show the "No results found" affordance.
	pub fn show_no_results(&self) -> bool {
		self.state.visible && self.state.has_searched && self.state.suggestions.is_empty()
	}

	/// Rows to render. Empty while the list is hidden.
	pub fn rows(&self) -> Vec<SuggestionRow> {
		if !self.state.visible {
			return Vec::new();
		}
		self.state
			.suggestions
			.iter()
			.enumerate()
			.map(|(idx, s)| SuggestionRow {
				id: s.id.clone(),
				main_text: s.main_text.clone(),
				secondary_text: enrich_secondary_text(s),
				selected: self.state.selected == Some(idx),
			})
			.collect()
	}

	/// Handles a keystroke that changed the field to `raw`.
	///
	/// The host sees the new value immediately; the lookup waits for the
	/// quiet period.
	pub fn on_input(&mut self, raw: &str) {
		self.emitter.typed(raw);
		self.state.query = raw.to_string();

		let trimmed = raw.trim();
		if trimmed.is_empty() {
			self.debouncer.cancel();
			self.clear_list();
			self.state.phase = Phase::Idle;
			return;
		}

		if trimmed.chars().count() < self.config.min_query_chars {
			self.debouncer.cancel();
			self.clear_list();
			self.state.phase = Phase::Searching;
			return;
		}

		let generation = self.debouncer.schedule(trimmed.to_string());
		debug!(generation, "autocomplete.lookup.scheduled");
		self.state.phase = Phase::Searching;
	}

	/// Applies finished lookups. Call once per UI loop turn.
	///
	/// Also arms an outside-pointer subscription made during an earlier turn.
	/// Returns true when the session changed.
	pub fn poll(&mut self) -> bool {
		if self.watch == OutsideWatch::Pending {
			self.watch = OutsideWatch::Armed;
		}

		let mut changed = false;
		while let Some(outcome) = self.debouncer.try_recv() {
			changed |= self.accept(outcome);
		}
		changed
	}

	/// Waits for the pending lookup and applies it.
	///
	/// Returns false immediately when nothing is pending.
	pub async fn settle(&mut self) -> bool {
		while self.debouncer.is_pending() {
			let Some(outcome) = self.debouncer.recv().await else {
				return false;
			};
			if self.accept(outcome) {
				return true;
			}
		}
		false
	}

	fn accept(&mut self, outcome: LookupOutcome) -> bool {
		let current = self.state.query.trim();
		if outcome.query != current || !self.debouncer.settle(outcome.generation) {
			debug!(
				generation = outcome.generation,
				current_generation = self.debouncer.generation(),
				"autocomplete.lookup.stale"
			);
			return false;
		}

		match outcome.result {
			Ok(response) if response.status.populates_list() => {
				debug!(
					generation = outcome.generation,
					count = response.suggestions.len(),
					"autocomplete.lookup.applied"
				);
				self.state.suggestions = response.suggestions;
				self.state.selected = None;
				self.state.has_searched = true;
				self.open_list();
			}
			Ok(response) => {
				warn!(status = %response.status, "autocomplete.lookup.denied");
				self.clear_list();
				self.state.phase = Phase::Closed;
			}
			Err(err) => {
				warn!(error = %err, "autocomplete.lookup.failed");
				self.clear_list();
				self.state.phase = Phase::Closed;
			}
		}
		true
	}

	/// Handles a key press while the field has focus.
	///
	/// Returns true when the key was consumed; otherwise the caller's own
	/// handler should see it.
	pub async fn on_key(&mut self, key: Key) -> bool {
		if !self.state.visible {
			return false;
		}

		match key {
			Key::ArrowDown | Key::ArrowUp => {
				self.state.selected = step_selection(
					self.state.selected,
					self.state.suggestions.len(),
					key == Key::ArrowDown,
				);
				true
			}
			Key::Enter => match self.state.selected {
				Some(idx) => self.select(idx).await,
				None => false,
			},
			Key::Escape => {
				self.close_list();
				self.state.phase = Phase::Closed;
				true
			}
			Key::Char(_) | Key::Other => false,
		}
	}

	/// Highlights the hovered row without changing visibility.
	pub fn on_hover(&mut self, index: usize) {
		if self.state.visible && index < self.state.suggestions.len() {
			self.state.selected = Some(index);
		}
	}

	/// Handles a pointer-down anywhere in the host surface.
	pub async fn on_pointer_down(&mut self, target: PointerTarget) {
		match target {
			PointerTarget::Input | PointerTarget::List => {}
			PointerTarget::Row(index) => {
				if self.state.visible {
					self.select(index).await;
				}
			}
			PointerTarget::Outside => {
				if !self.state.visible {
					return;
				}
				if self.watch == OutsideWatch::Armed {
					self.close_list();
					self.state.phase = Phase::Closed;
				} else {
					debug!("autocomplete.pointer.ignored_initial");
					self.watch = OutsideWatch::Armed;
				}
			}
		}
	}

	/// Reopens retained rows when the field regains focus. Never re-queries.
	pub fn on_focus(&mut self) {
		self.focused = true;
		if !self.state.visible && !self.state.suggestions.is_empty() {
			self.open_list();
		}
	}

	pub fn on_blur(&mut self) {
		self.focused = false;
	}

	/// Rebinds to an externally changed value.
	///
	/// Ignored while focused, since the user's own keystrokes drive the value
	/// then. Returns true when the session was reset.
	pub fn sync_external_value(&mut self, value: &str) -> bool {
		if self.focused || self.state.query == value {
			return false;
		}
		self.debouncer.cancel();
		self.clear_list();
		self.state.query = value.to_string();
		self.state.phase = Phase::Idle;
		true
	}

	/// Commits to the suggestion at `index`.
	///
	/// Emits exactly one selection event, structured when details resolve and
	/// unstructured otherwise, then resets the list.
	pub async fn select(&mut self, index: usize) -> bool {
		let Some(suggestion) = self.state.suggestions.get(index).cloned() else {
			return false;
		};
		self.debouncer.cancel();

		let request = DetailsRequest {
			id: suggestion.id.clone(),
			fields: self.config.detail_fields.clone(),
		};
		let details = self.provider.fetch_details(&request).await;
		if let Err(err) = &details {
			warn!(id = %suggestion.id, error = %err, "autocomplete.details.failed");
		}

		let event = selection_event(&suggestion, details, &self.config.fallback_country);
		self.state.query = event.value().to_string();
		self.emitter.emit(event);

		self.clear_list();
		self.state.phase = Phase::Idle;
		true
	}

	fn open_list(&mut self) {
		self.state.visible = true;
		self.state.phase = Phase::Open;
		if self.watch == OutsideWatch::Detached {
			self.pointer.subscribe();
			self.watch = OutsideWatch::Pending;
		}
	}

	fn close_list(&mut self) {
		self.state.visible = false;
		self.state.selected = None;
		if self.watch != OutsideWatch::Detached {
			self.pointer.unsubscribe();
			self.watch = OutsideWatch::Detached;
		}
	}

	fn clear_list(&mut self) {
		self.close_list();
		self.state.suggestions.clear();
		self.state.has_searched = false;
	}
}

impl Drop for AddressAutocomplete {
	fn drop(&mut self) {
		self.debouncer.cancel();
		self.close_list();
	}
}
