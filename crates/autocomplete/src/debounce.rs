//! Keystroke coalescing into debounced, generation-tagged lookups.
//!
//! Every [`QueryDebouncer::schedule`] bumps the generation and cancels the
//! previous ticket. The spawned task sleeps for the quiet period, issues the
//! lookup, and reports back over a channel. Results are only accepted for the
//! ticket still pending, so a superseded request can finish on the wire but
//! never lands in the list.

use std::sync::Arc;
use std::time::Duration;

use locus_places::{LookupRequest, LookupResponse, ProviderError, SuggestionProvider};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// A lookup that ran to completion.
#[derive(Debug)]
pub struct LookupOutcome {
	/// Generation of the ticket that issued the lookup.
	pub generation: u64,
	/// Query text sent to the provider.
	pub query: String,
	pub result: Result<LookupResponse, ProviderError>,
}

#[derive(Debug)]
struct PendingLookup {
	generation: u64,
	cancel: CancellationToken,
}

/// Debounced lookup scheduler owned by one widget.
pub struct QueryDebouncer {
	provider: Arc<dyn SuggestionProvider>,
	quiet: Duration,
	country: String,
	generation: u64,
	pending: Option<PendingLookup>,
	outcome_tx: mpsc::UnboundedSender<LookupOutcome>,
	outcome_rx: mpsc::UnboundedReceiver<LookupOutcome>,
}

impl std::fmt::Debug for QueryDebouncer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QueryDebouncer")
			.field("quiet", &self.quiet)
			.field("generation", &self.generation)
			.field("pending", &self.pending)
			.finish_non_exhaustive()
	}
}

impl QueryDebouncer {
	pub fn new(provider: Arc<dyn SuggestionProvider>, quiet: Duration, country: impl Into<String>) -> Self {
		let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
		Self {
			provider,
			quiet,
			country: country.into(),
			generation: 0,
			pending: None,
			outcome_tx,
			outcome_rx,
		}
	}

	/// Generation of the most recently scheduled lookup.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true while a ticket is waiting out its quiet period or in flight.
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Cancels the pending ticket, if any.
	pub fn cancel(&mut self) {
		if let Some(pending) = self.pending.take() {
			trace!(generation = pending.generation, "autocomplete.lookup.cancel");
			pending.cancel.cancel();
		}
	}

	/// Schedules a lookup for `query` after the quiet period.
	///
	/// Supersedes any earlier ticket. Returns the new generation.
	pub fn schedule(&mut self, query: String) -> u64 {
		self.cancel();
		self.generation = self.generation.wrapping_add(1);
		let generation = self.generation;

		let cancel = CancellationToken::new();
		self.pending = Some(PendingLookup {
			generation,
			cancel: cancel.clone(),
		});

		let provider = self.provider.clone();
		let request = LookupRequest::new(query, self.country.clone());
		let quiet = self.quiet;
		let tx = self.outcome_tx.clone();

		trace!(generation, "autocomplete.lookup.spawn");
		tokio::spawn(async move {
			tokio::select! {
				_ = cancel.cancelled() => return,
				_ = sleep(quiet) => {}
			}

			debug!(generation, query = %request.text, "autocomplete.lookup.issue");
			let result = provider.lookup(&request).await;

			if cancel.is_cancelled() {
				debug!(generation, "autocomplete.lookup.superseded");
				return;
			}

			let _ = tx.send(LookupOutcome {
				generation,
				query: request.text,
				result,
			});
		});

		generation
	}

	/// Takes the next finished lookup without waiting.
	pub fn try_recv(&mut self) -> Option<LookupOutcome> {
		self.outcome_rx.try_recv().ok()
	}

	/// Waits for the next finished lookup.
	pub async fn recv(&mut self) -> Option<LookupOutcome> {
		self.outcome_rx.recv().await
	}

	/// Accepts `generation` if it belongs to the pending ticket, clearing it.
	///
	/// Returns false for outcomes from superseded or cancelled tickets.
	pub fn settle(&mut self, generation: u64) -> bool {
		match &self.pending {
			Some(pending) if pending.generation == generation => {
				self.pending = None;
				true
			}
			_ => false,
		}
	}
}

impl Drop for QueryDebouncer {
	fn drop(&mut self) {
		self.cancel();
	}
}
