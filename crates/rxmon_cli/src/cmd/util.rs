use std::path::Path;

use log::LevelFilter;

use crate::error::CliError;

/// Read a whole input file.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
	std::fs::read(path).map_err(|source| CliError::Read {
		path: path.to_path_buf(),
		source,
	})
}

/// Read a whole input file as lossy UTF-8 text.
pub(crate) fn read_text(path: &Path) -> Result<String, CliError> {
	read_input(path).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Install the stderr logger for the requested verbosity.
pub(crate) fn init_logging(verbose: u8) -> Result<(), CliError> {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};

	fern::Dispatch::new()
		.format(|out, message, record| out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message)))
		.level(level)
		.chain(std::io::stderr())
		.apply()?;
	Ok(())
}

/// Render an optional label for tab-separated output.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
	value.unwrap_or("-")
}

/// Print a serializable payload as pretty JSON.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to encode json: {err}"),
	}
}
