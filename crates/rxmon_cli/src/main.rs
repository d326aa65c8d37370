#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;
mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "rxmon", about = "Save-file creature import tools")]
struct Cli {
	/// Raise log verbosity (-v info, -vv debug, -vvv trace).
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List creature records found in a save file.
	Import(cmd::import::Args),
	/// Summarize the streams in a save file.
	Info {
		path: PathBuf,
		#[arg(long)]
		json: bool,
	},
	/// Pretty-print the decoded value tree of one stream.
	Dump(cmd::dump::Args),
	/// Parse a Showdown team export.
	Showdown {
		path: PathBuf,
		#[arg(long)]
		json: bool,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), CliError> {
	let cli = Cli::parse();
	cmd::util::init_logging(cli.verbose)?;

	match cli.command {
		Commands::Import(args) => cmd::import::run(args),
		Commands::Info { path, json } => cmd::info::run(path, json),
		Commands::Dump(args) => cmd::dump::run(args),
		Commands::Showdown { path, json } => cmd::showdown::run(path, json),
	}
}
