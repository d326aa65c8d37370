use rxmon::marshal::decode_all;
use rxmon_testkit::{fixture_bytes, self_referencing_creature};

use crate::cmd::dump::{DumpOptions, render_document};
use crate::cmd::test_support::{fixture_arg, run_rxmon};

#[test]
fn cycle_prints_back_reference_instead_of_recursing() {
	let docs = decode_all(&self_referencing_creature()).expect("cyclic stream decodes");
	let text = render_document(&docs[0], DumpOptions::default());
	assert_eq!(text, "#0 Pokemon {\n  @species: 25\n  @partner: @0\n}\n");
}

#[test]
fn party_tree_shows_wrapped_strings_and_links() {
	let docs = decode_all(&fixture_bytes("two_creatures.rxdata")).expect("party decodes");
	let text = render_document(&docs[0], DumpOptions::default());
	assert!(text.starts_with("#0 [\n  #1 Pokemon {\n    @species: :PIKACHU\n    @name: #2 \"Sparky\"\n"), "got:\n{text}");
	assert!(text.contains("    @item: 5\n"));
	assert!(text.contains("    @ability: :STATIC\n"));
}

#[test]
fn item_limit_elides_tail() {
	let docs = decode_all(&fixture_bytes("two_creatures.rxdata")).expect("party decodes");
	let options = DumpOptions {
		max_items: 1,
		..DumpOptions::default()
	};
	let text = render_document(&docs[0], options);
	assert!(text.contains("  ... 1 more\n"), "got:\n{text}");
	assert!(!text.contains("CHARIZARD"));
}

#[test]
fn out_of_range_stream_is_an_error() {
	let output = run_rxmon(&["dump", &fixture_arg("self_reference.rxdata"), "--stream", "3"]);
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("stream 3 out of range (file has 1 streams)"), "stderr: {stderr}");
}
