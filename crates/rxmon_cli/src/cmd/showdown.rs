use std::path::PathBuf;

use rxmon::mon::parse_showdown;

use crate::cmd::util::{emit_json, or_dash, read_text};
use crate::error::CliError;

/// Parse a Showdown team export and list its sets.
pub fn run(path: PathBuf, json: bool) -> Result<(), CliError> {
	let text = read_text(&path)?;
	let team = parse_showdown(&text);

	if json {
		let payload: Vec<SetJson<'_>> = team
			.iter()
			.map(|set| SetJson {
				species: &set.species_slug,
				nickname: set.nickname.as_deref(),
				item: set.item.as_deref(),
				ability: set.ability.as_deref(),
				level: set.level,
				moves: &set.moves,
			})
			.collect();
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("sets: {}", team.len());
	println!("idx\tspecies\tnickname\tlevel\tability\titem\tmoves");
	for (index, set) in team.iter().enumerate() {
		println!(
			"{index}\t{}\t{}\t{}\t{}\t{}\t{}",
			set.species_slug,
			or_dash(set.nickname.as_deref()),
			set.level.map(|level| level.to_string()).unwrap_or_else(|| "-".to_owned()),
			or_dash(set.ability.as_deref()),
			or_dash(set.item.as_deref()),
			set.moves.join(", ")
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct SetJson<'a> {
	species: &'a str,
	nickname: Option<&'a str>,
	item: Option<&'a str>,
	ability: Option<&'a str>,
	level: Option<u32>,
	moves: &'a [String],
}
