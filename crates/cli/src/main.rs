//! `cadence-menus`: resolves contributed menus against the built-in defaults
//! and stored orderings, prints the result, and remembers new orderings.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use cadence_menus::{MenuContext, ORDER_ROOT, Registries, legacy_ordering_seeds};
use cadence_prefs::TomlPreferences;
use cadence_registry::Conflict;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	let mut prefs = open_prefs(&cli)?;
	match cli.command.unwrap_or(Command::Show {
		toolbar: false,
		recent: Vec::new(),
	}) {
		Command::Show { toolbar, recent } => show(&mut prefs, toolbar, recent)?,
		Command::Orderings => {
			for (key, value) in prefs.iter().filter(|(key, _)| key.starts_with(ORDER_ROOT)) {
				println!("{key} = {value}");
			}
		}
	}

	if cli.no_save {
		tracing::debug!("not saving preferences");
		return Ok(());
	}
	prefs.save().context("saving preferences")?;
	Ok(())
}

fn init_tracing(verbose: u8) {
	let default = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn open_prefs(cli: &Cli) -> anyhow::Result<TomlPreferences> {
	let Some(path) = cli.prefs.clone().or_else(cadence_prefs::default_path) else {
		tracing::warn!("no config directory; orderings will not be remembered");
		return Ok(TomlPreferences::in_memory());
	};
	TomlPreferences::open(&path).with_context(|| format!("loading {}", path.display()))
}

fn show(prefs: &mut TomlPreferences, toolbar: bool, recent: Vec<String>) -> anyhow::Result<()> {
	if legacy_ordering_seeds().apply(prefs) {
		tracing::info!("seeded legacy orderings");
	}

	let registries = Registries::collect(Arc::new(MenuContext::with_recent(recent)));
	for (id, err) in registries.rejected() {
		eprintln!("rejected {id}: {err}");
	}

	let tree = if toolbar {
		registries.toolbar_tree(prefs)
	} else {
		registries.menu_tree(prefs)
	}
	.context("resolving menus")?;

	print!("{}", tree.render());
	report(&tree.conflicts);
	Ok(())
}

fn report(conflicts: &[Conflict]) {
	for conflict in conflicts {
		eprintln!("conflict: {conflict}");
	}
}
