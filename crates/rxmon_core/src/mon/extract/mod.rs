use std::borrow::Cow;
use std::collections::{HashSet, VecDeque};
use std::fmt;

use log::debug;

use crate::marshal::{Document, Node, NodeId, Value};
use crate::mon::normalize_species;

#[cfg(test)]
mod tests;

const SPECIES_FIELDS: &[&str] = &["species"];
const NICKNAME_FIELDS: &[&str] = &["name", "nickname"];
const ABILITY_FIELDS: &[&str] = &["ability"];
const ITEM_FIELDS: &[&str] = &["item"];

/// Ability or item reference copied out of a save file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
	/// Symbolic or display name.
	Text(String),
	/// Numeric catalog id.
	Int(i64),
}

impl fmt::Display for Scalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => f.write_str(text),
			Self::Int(id) => write!(f, "{id}"),
		}
	}
}

/// One creature found in a decoded save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureRecord {
	/// Player-given name, when present.
	pub nickname: Option<String>,
	/// Normalized species key (see [`normalize_species`]).
	pub species_slug: String,
	/// Ability reference as stored.
	pub ability: Option<Scalar>,
	/// Held item reference as stored.
	pub item: Option<Scalar>,
}

/// Node visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
	/// Pre-order depth-first; records come out in nesting order.
	#[default]
	DepthFirst,
	/// Level by level from each root.
	BreadthFirst,
}

/// Extraction behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
	/// Node visiting order.
	pub order: TraversalOrder,
}

/// Mine every creature record from decoded roots with default options.
pub fn extract_creatures(documents: &[Document]) -> Vec<CreatureRecord> {
	extract_creatures_with(documents, &ExtractOptions::default())
}

/// Mine every creature record from decoded roots.
///
/// Objects, and mappings keyed by names, qualify when they carry a species
/// field. Everything else is traversed for nested matches and otherwise
/// ignored. Each arena node is visited at most once, so cyclic graphs
/// terminate.
pub fn extract_creatures_with(documents: &[Document], options: &ExtractOptions) -> Vec<CreatureRecord> {
	let mut records = Vec::new();
	let mut visited_total = 0;

	for document in documents {
		visited_total += walk_document(document, options.order, &mut records);
	}

	debug!(
		"extracted {} creature records from {} roots ({visited_total} nodes visited)",
		records.len(),
		documents.len()
	);
	records
}

fn walk_document(document: &Document, order: TraversalOrder, records: &mut Vec<CreatureRecord>) -> usize {
	let mut visited: HashSet<NodeId> = HashSet::new();
	let mut pending: VecDeque<&Value> = VecDeque::new();
	pending.push_back(&document.root);

	loop {
		let next = match order {
			TraversalOrder::DepthFirst => pending.pop_back(),
			TraversalOrder::BreadthFirst => pending.pop_front(),
		};
		let Some(value) = next else {
			break;
		};

		let id = match value.unwrapped() {
			Value::Node(id) => *id,
			_ => continue,
		};
		if !visited.insert(id) {
			continue;
		}
		let Some(node) = document.node(id) else {
			continue;
		};

		if let Some(record) = match_record(document, node) {
			records.push(record);
		}

		let children = children_of(node);
		match order {
			TraversalOrder::DepthFirst => pending.extend(children.into_iter().rev()),
			TraversalOrder::BreadthFirst => pending.extend(children),
		}
	}

	visited.len()
}

fn children_of(node: &Node) -> Vec<&Value> {
	match node {
		Node::Array(items) => items.iter().collect(),
		Node::Mapping(pairs) => pairs.iter().flat_map(|(key, value)| [key, value]).collect(),
		Node::Object(object) => object.fields.iter().map(|(_, value)| value).collect(),
		Node::Bytes(_) | Node::Blob(_) => Vec::new(),
	}
}

/// Name/value view over an object's fields or a mapping's text keys.
struct Fields<'d> {
	entries: Vec<(Cow<'d, str>, &'d Value)>,
}

impl<'d> Fields<'d> {
	fn of(document: &'d Document, node: &'d Node) -> Option<Self> {
		let entries: Vec<(Cow<'d, str>, &'d Value)> = match node {
			Node::Object(object) => object.fields.iter().map(|(name, value)| (Cow::Borrowed(name.as_ref()), value)).collect(),
			Node::Mapping(pairs) => pairs.iter().filter_map(|(key, value)| Some((document.text(key)?, value))).collect(),
			_ => return None,
		};
		Some(Self { entries })
	}

	/// First listed spelling wins; among duplicate keys the last one wins.
	fn get(&self, names: &[&str]) -> Option<&'d Value> {
		names.iter().find_map(|wanted| {
			self.entries
				.iter()
				.rev()
				.find(|(name, _)| field_matches(name, wanted))
				.map(|(_, value)| *value)
		})
	}
}

fn field_matches(name: &str, wanted: &str) -> bool {
	name.strip_prefix('@').unwrap_or(name).eq_ignore_ascii_case(wanted)
}

fn match_record(document: &Document, node: &Node) -> Option<CreatureRecord> {
	let fields = Fields::of(document, node)?;
	let species_slug = species_slug(document, fields.get(SPECIES_FIELDS)?)?;

	Some(CreatureRecord {
		nickname: fields
			.get(NICKNAME_FIELDS)
			.and_then(|value| document.text(value))
			.map(Cow::into_owned),
		species_slug,
		ability: fields.get(ABILITY_FIELDS).and_then(|value| scalar(document, value)),
		item: fields.get(ITEM_FIELDS).and_then(|value| scalar(document, value)),
	})
}

fn species_slug(document: &Document, value: &Value) -> Option<String> {
	let slug = match value.unwrapped() {
		Value::Int(id) => normalize_species(*id),
		Value::BigInt(big) => big.to_string(),
		other => {
			let text = document.text(other)?;
			normalize_species(&*text)
		}
	};
	if slug.is_empty() { None } else { Some(slug) }
}

fn scalar(document: &Document, value: &Value) -> Option<Scalar> {
	match value.unwrapped() {
		Value::Int(id) => Some(Scalar::Int(*id)),
		Value::BigInt(big) => Some(Scalar::Text(big.to_string())),
		other => document.text(other).map(|text| Scalar::Text(text.into_owned())),
	}
}
