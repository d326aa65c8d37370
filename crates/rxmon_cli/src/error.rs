use std::path::PathBuf;

use rxmon::marshal::MarshalError;
use thiserror::Error;

/// Failures surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Input file could not be read.
	#[error("read {}: {source}", path.display())]
	Read {
		/// Requested path.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Save data failed to decode.
	#[error(transparent)]
	Marshal(#[from] MarshalError),
	/// Requested stream index does not exist.
	#[error("stream {stream} out of range (file has {count} streams)")]
	StreamOutOfRange {
		/// Requested index.
		stream: usize,
		/// Streams decoded.
		count: usize,
	},
	/// Logger was already installed.
	#[error("logging setup: {0}")]
	Logger(#[from] log::SetLoggerError),
}
