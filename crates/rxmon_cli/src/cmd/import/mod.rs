use std::path::{Path, PathBuf};

use rxmon::marshal::{MarshalError, decode_all, decode_salvage};
use rxmon::mon::{Catalog, CreatureRecord, ExtractOptions, Scalar, TraversalOrder, extract_creatures_with};

use crate::cmd::util::{emit_json, or_dash, read_input, read_text};
use crate::error::CliError;


#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Keep every complete stream before a decode failure instead of aborting.
	#[arg(long)]
	pub salvage: bool,
	/// `id,name` catalog used to label numeric item ids.
	#[arg(long = "items")]
	pub items: Option<PathBuf>,
	/// `id,name` catalog used to label numeric ability ids.
	#[arg(long = "abilities")]
	pub abilities: Option<PathBuf>,
	/// Visit nodes level by level instead of depth-first.
	#[arg(long)]
	pub bfs: bool,
	#[arg(long)]
	pub json: bool,
}

/// Decode a save file and list the creature records found in it.
pub fn run(args: Args) -> Result<(), CliError> {
	let Args {
		file: path,
		salvage,
		items,
		abilities,
		bfs,
		json,
	} = args;

	let bytes = read_input(&path)?;
	let (documents, stopped) = if salvage {
		let result = decode_salvage(&bytes);
		(result.documents, result.error)
	} else {
		(decode_all(&bytes)?, None)
	};

	let items = load_catalog(items.as_deref())?;
	let abilities = load_catalog(abilities.as_deref())?;

	let options = ExtractOptions {
		order: if bfs { TraversalOrder::BreadthFirst } else { TraversalOrder::DepthFirst },
	};
	let records = extract_creatures_with(&documents, &options);

	if json {
		print_json(&path, documents.len(), stopped.as_ref(), &records, &items, &abilities);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("streams: {}", documents.len());
	if let Some(err) = &stopped {
		println!("stopped: {err}");
	}
	println!("creatures: {}", records.len());
	println!("idx\tspecies\tnickname\tability\titem");
	for (index, record) in records.iter().enumerate() {
		println!(
			"{index}\t{}\t{}\t{}\t{}",
			record.species_slug,
			or_dash(record.nickname.as_deref()),
			scalar_label(record.ability.as_ref(), &abilities),
			scalar_label(record.item.as_ref(), &items),
		);
	}

	Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, CliError> {
	match path {
		Some(path) => Ok(Catalog::parse(&read_text(path)?, 1)),
		None => Ok(Catalog::default()),
	}
}

fn scalar_label(value: Option<&Scalar>, catalog: &Catalog) -> String {
	match value {
		None => "-".to_owned(),
		Some(scalar @ Scalar::Int(id)) => match catalog.resolve(scalar) {
			Some(name) => format!("{name} (#{id})"),
			None => format!("#{id}"),
		},
		Some(Scalar::Text(text)) => text.clone(),
	}
}

fn print_json(path: &Path, streams: usize, stopped: Option<&MarshalError>, records: &[CreatureRecord], items: &Catalog, abilities: &Catalog) {
	let payload = ImportJson {
		path: path.display().to_string(),
		streams,
		stopped: stopped.map(ToString::to_string),
		creatures: records
			.iter()
			.enumerate()
			.map(|(index, record)| CreatureJson {
				index,
				species: record.species_slug.clone(),
				nickname: record.nickname.clone(),
				ability: record.ability.as_ref().map(ScalarJson::from),
				ability_name: resolved_name(record.ability.as_ref(), abilities),
				item: record.item.as_ref().map(ScalarJson::from),
				item_name: resolved_name(record.item.as_ref(), items),
			})
			.collect(),
	};

	emit_json(&payload);
}

fn resolved_name(value: Option<&Scalar>, catalog: &Catalog) -> Option<String> {
	match value? {
		scalar @ Scalar::Int(_) => catalog.resolve(scalar).map(str::to_owned),
		Scalar::Text(_) => None,
	}
}

#[derive(serde::Serialize)]
#[serde(untagged)]
enum ScalarJson {
	Text(String),
	Int(i64),
}

impl From<&Scalar> for ScalarJson {
	fn from(value: &Scalar) -> Self {
		match value {
			Scalar::Text(text) => Self::Text(text.clone()),
			Scalar::Int(id) => Self::Int(*id),
		}
	}
}

#[derive(serde::Serialize)]
struct CreatureJson {
	index: usize,
	species: String,
	nickname: Option<String>,
	ability: Option<ScalarJson>,
	#[serde(skip_serializing_if = "Option::is_none")]
	ability_name: Option<String>,
	item: Option<ScalarJson>,
	#[serde(skip_serializing_if = "Option::is_none")]
	item_name: Option<String>,
}

#[derive(serde::Serialize)]
struct ImportJson {
	path: String,
	streams: usize,
	stopped: Option<String>,
	creatures: Vec<CreatureJson>,
}
