use std::path::{Path, PathBuf};

use rxmon::marshal::{Decoder, Document, Node};

use crate::cmd::util::{emit_json, read_input};
use crate::error::CliError;


/// Per-stream summary row.
struct StreamSummary {
	start: usize,
	end: usize,
	version: [u8; 2],
	root: &'static str,
	nodes: usize,
	symbols: usize,
	counts: KindCounts,
}

#[derive(Default, serde::Serialize)]
struct KindCounts {
	bytes: usize,
	array: usize,
	mapping: usize,
	object: usize,
	blob: usize,
}

/// Print stream layout and node statistics for a save file.
pub fn run(path: PathBuf, json: bool) -> Result<(), CliError> {
	let bytes = read_input(&path)?;

	let mut decoder = Decoder::new(&bytes);
	let mut streams = Vec::new();
	while !decoder.is_finished() {
		let start = decoder.position();
		let document = decoder.next_document()?;
		streams.push(summarize(&document, start, decoder.position()));
	}

	if json {
		print_json(&path, bytes.len(), &streams);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("size: {}", bytes.len());
	println!("streams: {}", streams.len());
	println!("idx\tspan\tversion\troot\tnodes\tsymbols\tobjects\tarrays\tmappings\tstrings\tblobs");
	for (index, item) in streams.iter().enumerate() {
		println!(
			"{index}\t{}..{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
			item.start,
			item.end,
			version_label(item.version),
			item.root,
			item.nodes,
			item.symbols,
			item.counts.object,
			item.counts.array,
			item.counts.mapping,
			item.counts.bytes,
			item.counts.blob
		);
	}

	Ok(())
}

fn summarize(document: &Document, start: usize, end: usize) -> StreamSummary {
	let mut counts = KindCounts::default();
	for node in &document.nodes {
		match node {
			Node::Bytes(_) => counts.bytes += 1,
			Node::Array(_) => counts.array += 1,
			Node::Mapping(_) => counts.mapping += 1,
			Node::Object(_) => counts.object += 1,
			Node::Blob(_) => counts.blob += 1,
		}
	}

	StreamSummary {
		start,
		end,
		version: document.version,
		root: document.node_of(&document.root).map(Node::kind).unwrap_or(document.root.unwrapped().kind()),
		nodes: document.nodes.len(),
		symbols: document.symbols.len(),
		counts,
	}
}

fn version_label(version: [u8; 2]) -> String {
	format!("{}.{}", version[0], version[1])
}

fn print_json(path: &Path, size: usize, streams: &[StreamSummary]) {
	let payload = InfoJson {
		path: path.display().to_string(),
		size,
		streams: streams
			.iter()
			.enumerate()
			.map(|(index, item)| StreamJson {
				index,
				start: item.start,
				end: item.end,
				version: version_label(item.version),
				root: item.root,
				nodes: item.nodes,
				symbols: item.symbols,
				counts: &item.counts,
			})
			.collect(),
	};

	emit_json(&payload);
}

#[derive(serde::Serialize)]
struct StreamJson<'a> {
	index: usize,
	start: usize,
	end: usize,
	version: String,
	root: &'static str,
	nodes: usize,
	symbols: usize,
	counts: &'a KindCounts,
}

#[derive(serde::Serialize)]
struct InfoJson<'a> {
	path: String,
	size: usize,
	streams: Vec<StreamJson<'a>>,
}
