use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::PathBuf;

use rxmon::marshal::{Document, Node, NodeId, Value, decode_all};

use crate::cmd::util::read_input;
use crate::error::CliError;

#[cfg(test)]
mod tests;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Zero-based stream index.
	#[arg(long, default_value_t = 0)]
	pub stream: usize,
	/// Maximum nesting depth printed.
	#[arg(long)]
	pub depth: Option<u32>,
	/// Maximum elements printed per collection.
	#[arg(long)]
	pub items: Option<usize>,
}

/// Output truncation limits for value trees.
#[derive(Debug, Clone, Copy)]
pub struct DumpOptions {
	/// Maximum recursive print depth.
	pub max_depth: u32,
	/// Maximum elements printed per array, mapping, or object.
	pub max_items: usize,
	/// Maximum characters printed for strings.
	pub max_string_len: usize,
}

impl Default for DumpOptions {
	fn default() -> Self {
		Self {
			max_depth: 8,
			max_items: 32,
			max_string_len: 120,
		}
	}
}

/// Print one decoded stream as an indented tree.
pub fn run(args: Args) -> Result<(), CliError> {
	let bytes = read_input(&args.file)?;
	let documents = decode_all(&bytes)?;
	let document = documents.get(args.stream).ok_or(CliError::StreamOutOfRange {
		stream: args.stream,
		count: documents.len(),
	})?;

	let mut options = DumpOptions::default();
	if let Some(depth) = args.depth {
		options.max_depth = depth;
	}
	if let Some(items) = args.items {
		options.max_items = items;
	}

	println!("stream {} (version {}.{})", args.stream, document.version[0], document.version[1]);
	print!("{}", render_document(document, options));
	Ok(())
}

/// Render a document root as text.
///
/// Each compound prints as `#<id>` the first time it is reached and as `@<id>`
/// afterwards, so shared and cyclic structure stays finite.
pub fn render_document(document: &Document, options: DumpOptions) -> String {
	let mut printer = Printer {
		document,
		options,
		printed: HashSet::new(),
		out: String::new(),
	};
	printer.value(&document.root, 0, 0, "");
	printer.out
}

struct Printer<'d> {
	document: &'d Document,
	options: DumpOptions,
	printed: HashSet<NodeId>,
	out: String,
}

impl Printer<'_> {
	fn line(&mut self, indent: usize, text: &str) {
		let _ = writeln!(self.out, "{}{text}", " ".repeat(indent));
	}

	fn value(&mut self, value: &Value, indent: usize, depth: u32, label: &str) {
		match value {
			Value::Nil => self.line(indent, &format!("{label}nil")),
			Value::Bool(v) => self.line(indent, &format!("{label}{v}")),
			Value::Int(v) => self.line(indent, &format!("{label}{v}")),
			Value::BigInt(v) => self.line(indent, &format!("{label}{v}")),
			Value::Float(v) => self.line(indent, &format!("{label}{v:?}")),
			Value::Symbol(v) => self.line(indent, &format!("{label}:{v}")),
			Value::Wrapped(wrapped) => self.value(&wrapped.inner, indent, depth, label),
			Value::Node(id) => self.node(*id, indent, depth, label),
		}
	}

	fn node(&mut self, id: NodeId, indent: usize, depth: u32, label: &str) {
		let tag = id.index();
		if !self.printed.insert(id) {
			self.line(indent, &format!("{label}@{tag}"));
			return;
		}
		let document = self.document;
		let Some(node) = document.node(id) else {
			self.line(indent, &format!("{label}#{tag} <missing>"));
			return;
		};

		match node {
			Node::Bytes(raw) => {
				let text = truncate(&String::from_utf8_lossy(raw), self.options.max_string_len);
				self.line(indent, &format!("{label}#{tag} {text:?}"));
			}
			Node::Blob(blob) => {
				let class = document.class_name(&blob.class);
				self.line(indent, &format!("{label}#{tag} {class} <{} bytes>", blob.raw.len()));
			}
			Node::Array(items) => {
				if depth >= self.options.max_depth {
					self.line(indent, &format!("{label}#{tag} [... {} items]", items.len()));
					return;
				}
				self.line(indent, &format!("{label}#{tag} ["));
				for item in items.iter().take(self.options.max_items) {
					self.value(item, indent + 2, depth + 1, "");
				}
				self.more(indent, items.len());
				self.line(indent, "]");
			}
			Node::Mapping(pairs) => {
				if depth >= self.options.max_depth {
					self.line(indent, &format!("{label}#{tag} {{... {} pairs}}", pairs.len()));
					return;
				}
				self.line(indent, &format!("{label}#{tag} {{"));
				for (key, value) in pairs.iter().take(self.options.max_items) {
					let key_label = format!("{} => ", key_label(document, key));
					self.value(value, indent + 2, depth + 1, &key_label);
				}
				self.more(indent, pairs.len());
				self.line(indent, "}");
			}
			Node::Object(object) => {
				let class = document.class_name(&object.class);
				if depth >= self.options.max_depth {
					self.line(indent, &format!("{label}#{tag} {class} {{ ... }}"));
					return;
				}
				self.line(indent, &format!("{label}#{tag} {class} {{"));
				for (name, value) in object.fields.iter().take(self.options.max_items) {
					self.value(value, indent + 2, depth + 1, &format!("{name}: "));
				}
				self.more(indent, object.fields.len());
				self.line(indent, "}");
			}
		}
	}

	fn more(&mut self, indent: usize, total: usize) {
		if total > self.options.max_items {
			self.line(indent + 2, &format!("... {} more", total - self.options.max_items));
		}
	}
}

fn key_label(document: &Document, key: &Value) -> String {
	match key.unwrapped() {
		Value::Symbol(name) => format!(":{name}"),
		Value::Int(v) => v.to_string(),
		other => match document.text(other) {
			Some(text) => format!("{text:?}"),
			None => other.kind().to_owned(),
		},
	}
}

fn truncate(input: &str, max_chars: usize) -> String {
	if input.chars().count() <= max_chars {
		return input.to_owned();
	}
	let mut out: String = input.chars().take(max_chars).collect();
	out.push('…');
	out
}
