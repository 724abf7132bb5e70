use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cadence-menus")]
#[command(about = "Resolve the Cadence menu bar and toolbar from registered contributions")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Preferences file (defaults to the platform config directory)
	#[arg(long, value_name = "PATH", global = true)]
	pub prefs: Option<PathBuf>,

	/// Do not write resolved orderings back to the preferences file
	#[arg(long, global = true)]
	pub no_save: bool,

	/// Increase log verbosity (-v debug, -vv trace)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Subcommand to execute (defaults to `show`).
	#[command(subcommand)]
	pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the resolved menu tree
	Show {
		/// Show the toolbar instead of the menu bar
		#[arg(long)]
		toolbar: bool,

		/// Recently opened project, most recent first (repeatable)
		#[arg(long, value_name = "FILE")]
		recent: Vec<String>,
	},
	/// List stored orderings
	Orderings,
}
