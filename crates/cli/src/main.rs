//! `locus`: drive the address-autocomplete engine from a terminal.
//!
//! Suggestions come from a JSON catalog file (see [`fixture`]), loaded lazily
//! through the same provider seam a real places service would use.

mod fixture;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use locus_autocomplete::{AddressAutocomplete, AutocompleteConfig, ChangeEvent};
use locus_places::LazyProvider;
use tokio::sync::mpsc;
use tracing::info;

use crate::fixture::CatalogLoader;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "locus")]
#[command(about = "Address autocomplete against a JSON place catalog")]
struct Args {
	/// Place catalog in places wire format
	#[arg(short, long, value_name = "PATH")]
	catalog: PathBuf,

	/// Widget configuration (TOML)
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Type TEXT and print the suggestion rows
	Suggest { text: String },
	/// Type TEXT, pick a row, and print the emitted change record as JSON
	Resolve {
		text: String,
		/// Zero-based row to pick
		#[arg(long, default_value_t = 0)]
		pick: usize,
	},
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	setup_tracing(args.verbose);

	let config = match &args.config {
		Some(path) => AutocompleteConfig::load(path)
			.with_context(|| format!("loading config {}", path.display()))?,
		None => AutocompleteConfig::default(),
	};
	info!(catalog = %args.catalog.display(), "locus starting");

	let provider = Arc::new(LazyProvider::new(CatalogLoader::new(&args.catalog)));
	let (tx, mut changes) = mpsc::unbounded_channel::<ChangeEvent>();
	let mut widget = AddressAutocomplete::new(provider, config, "", move |event| {
		let _ = tx.send(event);
	});

	let text = match &args.command {
		Command::Suggest { text } | Command::Resolve { text, .. } => text.clone(),
	};
	widget.on_focus();
	widget.on_input(&text);
	widget.settle().await;

	match args.command {
		Command::Suggest { .. } => {
			if widget.show_no_results() {
				println!("No results found");
			}
			for (idx, row) in widget.rows().iter().enumerate() {
				println!("{idx:>2}  {}\n    {}", row.main_text, row.secondary_text);
			}
		}
		Command::Resolve { pick, .. } => {
			if !widget.select(pick).await {
				bail!("no suggestion at row {pick} for {text:?}");
			}
			while let Ok(event) = changes.try_recv() {
				if event.is_selection() {
					println!("{}", serde_json::to_string_pretty(&event)?);
				}
			}
		}
	}

	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("LOCUS_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("locus_autocomplete=debug,locus_places=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
