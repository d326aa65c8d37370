#![allow(missing_docs)]

use rxmon::marshal::{MarshalError, decode_all, decode_salvage};
use rxmon::mon::{Scalar, extract_creatures};
use rxmon_testkit::fixture_bytes;

#[test]
fn two_creature_save_imports_end_to_end() {
	let docs = decode_all(&fixture_bytes("two_creatures.rxdata")).expect("fixture decodes");
	assert_eq!(docs.len(), 1);

	let records = extract_creatures(&docs);
	assert_eq!(records.len(), 2);
	assert_eq!(records[0].species_slug, "pikachu");
	assert_eq!(records[0].nickname.as_deref(), Some("Sparky"));
	assert_eq!(records[1].species_slug, "charizard");
	assert_eq!(records[1].item, Some(Scalar::Int(5)));
	assert_eq!(records[0].ability, records[1].ability, "linked ability symbol resolves to the same name");
}

#[test]
fn multi_stream_save_matches_individual_streams() {
	let joined = decode_all(&fixture_bytes("multi_stream.rxdata")).expect("multi-stream fixture decodes");
	let first = decode_all(&fixture_bytes("two_creatures.rxdata")).expect("first decodes");
	let second = decode_all(&fixture_bytes("self_reference.rxdata")).expect("second decodes");

	assert_eq!(joined.len(), 2);
	assert_eq!(joined[0], first[0]);
	assert_eq!(joined[1], second[0]);
	assert_eq!(extract_creatures(&joined).len(), 3);
}

#[test]
fn every_truncation_of_the_party_fails_cleanly() {
	let bytes = fixture_bytes("two_creatures.rxdata");
	for cut in 0..bytes.len() {
		let truncated = &bytes[..cut];
		match decode_all(truncated) {
			Ok(docs) => assert!(docs.is_empty() && cut == 0, "only the empty prefix may decode, cut={cut}"),
			Err(err) => assert!(matches!(err, MarshalError::UnexpectedEndOfInput { .. }), "cut={cut}: {err}"),
		}
	}
}

#[test]
fn salvage_drops_only_the_truncated_tail() {
	let mut bytes = fixture_bytes("multi_stream.rxdata");
	bytes.pop();

	assert!(decode_all(&bytes).is_err());
	let salvage = decode_salvage(&bytes);
	assert_eq!(salvage.documents.len(), 1);
	assert_eq!(extract_creatures(&salvage.documents).len(), 2);
}
