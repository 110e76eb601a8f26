//! Headless address-autocomplete input engine.
//!
//! Turns keystrokes into debounced lookups against a
//! [`SuggestionProvider`](locus_places::SuggestionProvider), keeps the
//! suggestion list state (keyboard and pointer), and resolves a chosen row
//! into a structured address for the host form.
//!
//! ```text
//! on_input ─▶ QueryDebouncer ─(quiet period)─▶ provider.lookup
//!                                                    │
//! poll ◀──────────── generation-tagged outcome ◀─────┘
//!   │
//!   ▼
//! rows() / on_key / on_pointer_down ─▶ select ─▶ fetch_details ─▶ on_change
//! ```
//!
//! Rendering is left to the host; [`AddressAutocomplete::rows`] yields display
//! rows whose secondary line has its postal code restored by [`enrich`].

pub mod config;
pub mod controller;
pub mod debounce;
pub mod emit;
pub mod enrich;
pub mod pointer;

pub use config::{AutocompleteConfig, ConfigError};
pub use controller::{AddressAutocomplete, Key, Phase, SessionState, SuggestionRow, step_selection};
pub use debounce::{LookupOutcome, QueryDebouncer};
pub use emit::{ChangeCallback, ChangeEvent, PlaceData, SelectionEmitter, selection_event};
pub use enrich::enrich_secondary_text;
pub use pointer::{NoOutsidePointer, OutsidePointer, PointerTarget};
