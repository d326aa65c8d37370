mod party {

	use crate::marshal::decode_all;
	use crate::mon::{CreatureRecord, ExtractOptions, Scalar, TraversalOrder, extract_creatures, extract_creatures_with};
	use rxmon_testkit::{MarshalBuilder, self_referencing_creature, two_creature_party};

	#[test]
	fn two_creature_party_yields_two_records() {
		let docs = decode_all(&two_creature_party()).expect("party decodes");
		let records = extract_creatures(&docs);

		assert_eq!(
			records,
			vec![
				CreatureRecord {
					nickname: Some("Sparky".to_owned()),
					species_slug: "pikachu".to_owned(),
					ability: Some(Scalar::Text("STATIC".to_owned())),
					item: Some(Scalar::Text("LIGHTBALL".to_owned())),
				},
				CreatureRecord {
					nickname: Some("Flame".to_owned()),
					species_slug: "charizard".to_owned(),
					ability: Some(Scalar::Text("STATIC".to_owned())),
					item: Some(Scalar::Int(5)),
				},
			]
		);
	}

	#[test]
	fn self_reference_terminates_with_one_record() {
		let docs = decode_all(&self_referencing_creature()).expect("cyclic stream decodes");
		let records = extract_creatures(&docs);
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].species_slug, "25");
		assert_eq!(records[0].nickname, None);
	}

	#[test]
	fn mutual_cycle_is_visited_once_per_node() {
		// A = Pokemon { @species: 1, @partner: B }, B = Pokemon { @species: 2, @partner: A }
		let bytes = MarshalBuilder::new()
			.object()
			.symbol("Pokemon")
			.varint(2)
			.symbol("@species")
			.int(1)
			.symbol("@partner")
			.object()
			.symlink(0)
			.varint(2)
			.symlink(1)
			.int(2)
			.symlink(2)
			.link(0)
			.finish();
		let docs = decode_all(&bytes).expect("mutual cycle decodes");
		let slugs: Vec<String> = extract_creatures(&docs).into_iter().map(|record| record.species_slug).collect();
		assert_eq!(slugs, ["1", "2"]);
	}

	#[test]
	fn shared_creature_is_reported_once() {
		// [mon, [mon]] with the inner reference as a back-reference.
		let bytes = MarshalBuilder::new()
			.array(2)
			.object()
			.symbol("Pokemon")
			.varint(1)
			.symbol("@species")
			.symbol("EEVEE")
			.array(1)
			.link(1)
			.finish();
		let docs = decode_all(&bytes).expect("shared graph decodes");
		assert_eq!(extract_creatures(&docs).len(), 1);
	}

	#[test]
	fn depth_first_is_pre_order_and_breadth_first_is_level_order() {
		// [[deep], shallow]
		let bytes = MarshalBuilder::new()
			.array(2)
			.array(1)
			.mapping(1)
			.symbol("species")
			.symbol("DEEP")
			.mapping(1)
			.symlink(0)
			.symbol("SHALLOW")
			.finish();
		let docs = decode_all(&bytes).expect("nested decodes");

		let dfs: Vec<String> = extract_creatures(&docs).into_iter().map(|record| record.species_slug).collect();
		assert_eq!(dfs, ["deep", "shallow"]);

		let options = ExtractOptions {
			order: TraversalOrder::BreadthFirst,
		};
		let bfs: Vec<String> = extract_creatures_with(&docs, &options).into_iter().map(|record| record.species_slug).collect();
		assert_eq!(bfs, ["shallow", "deep"]);
	}

	#[test]
	fn records_follow_root_order_across_streams() {
		let mut joined = self_referencing_creature();
		joined.extend(two_creature_party());
		let docs = decode_all(&joined).expect("joined decodes");
		let slugs: Vec<String> = extract_creatures(&docs).into_iter().map(|record| record.species_slug).collect();
		assert_eq!(slugs, ["25", "pikachu", "charizard"]);
	}
}

mod skipping {

	use crate::marshal::decode_all;
	use crate::mon::{Scalar, extract_creatures};
	use rxmon_testkit::MarshalBuilder;

	#[test]
	fn objects_without_species_are_traversed_not_reported() {
		// Trainer { @name: "Red", @party: [Pokemon { @species: :MEW }] }
		let bytes = MarshalBuilder::new()
			.object()
			.symbol("Trainer")
			.varint(2)
			.symbol("@name")
			.string("Red")
			.symbol("@party")
			.array(1)
			.object()
			.symbol("Pokemon")
			.varint(1)
			.symbol("@species")
			.symbol("MEW")
			.finish();
		let docs = decode_all(&bytes).expect("trainer decodes");
		let records = extract_creatures(&docs);
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].species_slug, "mew");
		assert_eq!(records[0].nickname, None);
	}

	#[test]
	fn mistyped_species_is_skipped_silently() {
		// [{species: nil}, {species: 1.5}, {species: []}, {species: ""}]
		let bytes = MarshalBuilder::new()
			.array(4)
			.mapping(1)
			.symbol("species")
			.nil()
			.mapping(1)
			.symlink(0)
			.float("1.5")
			.mapping(1)
			.symlink(0)
			.array(0)
			.mapping(1)
			.symlink(0)
			.string("")
			.finish();
		let docs = decode_all(&bytes).expect("odd species decode");
		assert!(extract_creatures(&docs).is_empty());
	}

	#[test]
	fn blobs_and_scalars_are_ignored() {
		let bytes = MarshalBuilder::new().array(3).blob("Table", b"species").int(1).symbol("species").finish();
		let docs = decode_all(&bytes).expect("decodes");
		assert!(extract_creatures(&docs).is_empty());
	}

	#[test]
	fn field_names_match_case_insensitively_with_or_without_sigil() {
		// {"Species" => "Bulbasaur", "NICKNAME" => "Bulby", :@Item => 4, "ability" => 65}
		let bytes = MarshalBuilder::new()
			.mapping(4)
			.string("Species")
			.string("Bulbasaur")
			.string("NICKNAME")
			.string("Bulby")
			.symbol("@Item")
			.int(4)
			.string("ability")
			.int(65)
			.finish();
		let docs = decode_all(&bytes).expect("mapping decodes");
		let records = extract_creatures(&docs);
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].species_slug, "bulbasaur");
		assert_eq!(records[0].nickname.as_deref(), Some("Bulby"));
		assert_eq!(records[0].item, Some(Scalar::Int(4)));
		assert_eq!(records[0].ability, Some(Scalar::Int(65)));
	}

	#[test]
	fn name_wins_over_nickname_and_last_duplicate_wins() {
		let bytes = MarshalBuilder::new()
			.mapping(4)
			.symbol("nickname")
			.string("Nick")
			.symbol("name")
			.string("First")
			.symbol("species")
			.int(7)
			.symlink(1)
			.string("Second")
			.finish();
		let docs = decode_all(&bytes).expect("mapping decodes");
		let records = extract_creatures(&docs);
		assert_eq!(records[0].nickname.as_deref(), Some("Second"));
		assert_eq!(records[0].species_slug, "7");
	}

	#[test]
	fn non_text_companions_become_none() {
		let bytes = MarshalBuilder::new()
			.mapping(3)
			.symbol("species")
			.symbol("ABRA")
			.symbol("name")
			.int(3)
			.symbol("item")
			.nil()
			.finish();
		let docs = decode_all(&bytes).expect("mapping decodes");
		let records = extract_creatures(&docs);
		assert_eq!(records[0].nickname, None);
		assert_eq!(records[0].item, None);
		assert_eq!(records[0].ability, None);
	}
}
