use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use rxmon_testkit::{fixture_path, target_dir};

static RXMON_BIN: OnceLock<PathBuf> = OnceLock::new();

/// Fixture path as a command-line argument.
pub(crate) fn fixture_arg(name: &str) -> String {
	fixture_path(name).to_string_lossy().into_owned()
}

pub(crate) fn run_rxmon(args: &[&str]) -> Output {
	Command::new(rxmon_bin()).args(args).output().expect("rxmon command executes")
}

pub(crate) fn run_rxmon_json(args: &[&str]) -> serde_json::Value {
	let output = run_rxmon(args);
	assert!(
		output.status.success(),
		"rxmon command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn rxmon_bin() -> &'static PathBuf {
	RXMON_BIN.get_or_init(resolve_rxmon_bin)
}

fn resolve_rxmon_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_rxmon") {
		return PathBuf::from(path);
	}

	let bin = target_dir().join("debug").join(format!("rxmon{}", std::env::consts::EXE_SUFFIX));
	let status = Command::new("cargo")
		.current_dir(env!("CARGO_MANIFEST_DIR"))
		.args(["build", "--quiet", "--bin", "rxmon"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build rxmon binary at {}", bin.display());

	bin
}
