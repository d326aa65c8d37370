use std::sync::Arc;

use log::{debug, trace, warn};

use crate::marshal::{BigInt, BlobNode, Cursor, Document, MarshalError, Node, NodeId, ObjectNode, Result, Value, Wrapped};


/// Runtime limits for stream decoding.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
	/// Maximum nesting depth before decoding aborts.
	///
	/// Decoding recurses once per level, so the limit has to fit the caller's
	/// stack. The default fits a 2 MiB thread stack in unoptimized builds.
	pub max_depth: u32,
}

/// Default nesting limit for [`DecodeOptions`].
pub const DEFAULT_MAX_DEPTH: u32 = 128;

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { max_depth: DEFAULT_MAX_DEPTH }
	}
}

/// Resumable decoder over a buffer of concatenated streams.
///
/// Each call to [`Decoder::next_document`] consumes one two-byte header plus
/// one root value and leaves the cursor on the first byte of the next stream.
/// After a failure the decoder stays at the failing stream and yields nothing
/// further through its iterator.
pub struct Decoder<'a> {
	cursor: Cursor<'a>,
	options: DecodeOptions,
	streams: usize,
	failed: bool,
}

/// Best-effort decode result.
#[derive(Debug, Clone)]
pub struct Salvage {
	/// Every stream that decoded completely, in buffer order.
	pub documents: Vec<Document>,
	/// Error that stopped decoding, if any.
	pub error: Option<MarshalError>,
}

impl<'a> Decoder<'a> {
	/// Create a decoder at offset 0 with default options.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self::with_options(bytes, DecodeOptions::default())
	}

	/// Create a decoder at offset 0.
	pub fn with_options(bytes: &'a [u8], options: DecodeOptions) -> Self {
		Self {
			cursor: Cursor::new(bytes),
			options,
			streams: 0,
			failed: false,
		}
	}

	/// Create a decoder resuming at a known stream boundary.
	pub fn resume_at(bytes: &'a [u8], offset: usize, options: DecodeOptions) -> Self {
		Self {
			cursor: Cursor::at(bytes, offset),
			options,
			streams: 0,
			failed: false,
		}
	}

	/// Offset of the next unread byte.
	pub fn position(&self) -> usize {
		self.cursor.pos()
	}

	/// Return true once the buffer is exhausted.
	pub fn is_finished(&self) -> bool {
		self.cursor.is_empty()
	}

	/// Decode the next header-prefixed stream.
	pub fn next_document(&mut self) -> Result<Document> {
		let start = self.cursor.pos();
		debug!("decoding stream {} at offset {start}", self.streams);

		let header = self.cursor.read_exact(2)?;
		let version = [header[0], header[1]];

		let mut stream = StreamDecoder {
			cursor: &mut self.cursor,
			max_depth: self.options.max_depth,
			nodes: Vec::new(),
			values: Vec::new(),
			symbols: Vec::new(),
		};
		let root = stream.read_value(0)?;

		trace!(
			"stream {} spans {start}..{}: {} nodes, {} table entries, {} symbols",
			self.streams,
			stream.cursor.pos(),
			stream.nodes.len(),
			stream.values.len(),
			stream.symbols.len()
		);

		let StreamDecoder { nodes, symbols, .. } = stream;
		self.streams += 1;
		Ok(Document {
			version,
			root,
			nodes,
			symbols,
		})
	}
}

impl Iterator for Decoder<'_> {
	type Item = Result<Document>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed || self.is_finished() {
			return None;
		}
		let item = self.next_document();
		self.failed = item.is_err();
		Some(item)
	}
}

/// Decode every concatenated stream in `bytes`, failing on the first bad one.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Document>> {
	Decoder::new(bytes).collect()
}

/// Decode every concatenated stream with explicit options.
pub fn decode_all_with(bytes: &[u8], options: DecodeOptions) -> Result<Vec<Document>> {
	Decoder::with_options(bytes, options).collect()
}

/// Decode streams until the first failure and keep everything before it.
pub fn decode_salvage(bytes: &[u8]) -> Salvage {
	let mut decoder = Decoder::new(bytes);
	let mut documents = Vec::new();
	let mut error = None;

	for item in decoder.by_ref() {
		match item {
			Ok(document) => documents.push(document),
			Err(err) => {
				error = Some(err);
				break;
			}
		}
	}

	if let Some(err) = &error {
		warn!("stopped after {} complete streams at offset {}: {err}", documents.len(), decoder.position());
	}

	Salvage { documents, error }
}

struct StreamDecoder<'c, 'a> {
	cursor: &'c mut Cursor<'a>,
	max_depth: u32,
	nodes: Vec<Node>,
	values: Vec<Value>,
	symbols: Vec<Arc<str>>,
}

impl StreamDecoder<'_, '_> {
	fn read_value(&mut self, depth: u32) -> Result<Value> {
		let at = self.cursor.pos();
		if depth > self.max_depth {
			return Err(MarshalError::DepthExceeded {
				max_depth: self.max_depth,
				at,
			});
		}

		let tag = self.cursor.read_u8()?;
		match tag {
			b'0' => Ok(Value::Nil),
			b'T' => Ok(Value::Bool(true)),
			b'F' => Ok(Value::Bool(false)),
			b'i' => Ok(Value::Int(self.cursor.read_varint()?)),
			b'l' => {
				let value = self.read_big_int()?;
				self.values.push(value.clone());
				Ok(value)
			}
			b'f' => {
				let value = Value::Float(self.read_float()?);
				self.values.push(value.clone());
				Ok(value)
			}
			b'"' => {
				let raw = self.cursor.read_prefixed()?.to_vec();
				let id = self.reserve();
				Ok(self.fill(id, Node::Bytes(raw)))
			}
			b':' => self.read_symbol().map(Value::Symbol),
			b';' => self.read_symbol_link(at).map(Value::Symbol),
			b'[' => {
				let len = self.cursor.read_len()?;
				let id = self.reserve();
				let mut items = Vec::with_capacity(self.capacity_hint(len));
				for _ in 0..len {
					items.push(self.read_value(depth + 1)?);
				}
				Ok(self.fill(id, Node::Array(items)))
			}
			b'{' => {
				let len = self.cursor.read_len()?;
				let id = self.reserve();
				let pairs = self.read_pairs(len, depth)?;
				Ok(self.fill(id, Node::Mapping(pairs)))
			}
			b'o' => {
				let class = self.read_value(depth + 1)?;
				let len = self.cursor.read_len()?;
				let id = self.reserve();
				let mut fields = Vec::with_capacity(self.capacity_hint(len));
				for _ in 0..len {
					let name = self.read_field_name(depth)?;
					let value = self.read_value(depth + 1)?;
					fields.push((name, value));
				}
				Ok(self.fill(id, Node::Object(ObjectNode { class, fields })))
			}
			b'u' => {
				let class = self.read_value(depth + 1)?;
				let raw = self.cursor.read_prefixed()?.to_vec();
				let id = self.reserve();
				Ok(self.fill(id, Node::Blob(BlobNode { class, raw })))
			}
			b'I' => {
				let inner = self.read_value(depth + 1)?;
				let len = self.cursor.read_len()?;
				let annotations = self.read_pairs(len, depth)?;
				Ok(Value::Wrapped(Box::new(Wrapped { inner, annotations })))
			}
			b'@' => {
				let index = self.cursor.read_varint()?;
				usize::try_from(index)
					.ok()
					.and_then(|idx| self.values.get(idx))
					.cloned()
					.ok_or(MarshalError::BadBackReference {
						index,
						len: self.values.len(),
						at,
					})
			}
			_ => Err(MarshalError::UnknownTag { tag, at }),
		}
	}

	/// Register a table slot for a compound before its children are read.
	fn reserve(&mut self) -> NodeId {
		let id = NodeId(self.nodes.len());
		// Placeholder until the children are decoded; only the id escapes meanwhile.
		self.nodes.push(Node::Array(Vec::new()));
		self.values.push(Value::Node(id));
		id
	}

	fn fill(&mut self, id: NodeId, node: Node) -> Value {
		self.nodes[id.0] = node;
		Value::Node(id)
	}

	fn capacity_hint(&self, len: usize) -> usize {
		len.min(self.cursor.remaining())
	}

	fn read_pairs(&mut self, len: usize, depth: u32) -> Result<Vec<(Value, Value)>> {
		let mut pairs = Vec::with_capacity(self.capacity_hint(len));
		for _ in 0..len {
			let key = self.read_value(depth + 1)?;
			let value = self.read_value(depth + 1)?;
			pairs.push((key, value));
		}
		Ok(pairs)
	}

	fn read_field_name(&mut self, depth: u32) -> Result<Arc<str>> {
		let at = self.cursor.pos();
		match self.read_value(depth + 1)? {
			Value::Symbol(name) => Ok(name),
			Value::Wrapped(wrapped) => match wrapped.inner {
				Value::Symbol(name) => Ok(name),
				_ => Err(MarshalError::UnexpectedFieldName { at, got: "Wrapped" }),
			},
			other => Err(MarshalError::UnexpectedFieldName { at, got: other.kind() }),
		}
	}

	fn read_symbol(&mut self) -> Result<Arc<str>> {
		let raw = self.cursor.read_prefixed()?;
		let name: Arc<str> = Arc::from(String::from_utf8_lossy(raw).as_ref());
		self.symbols.push(name.clone());
		Ok(name)
	}

	fn read_symbol_link(&mut self, at: usize) -> Result<Arc<str>> {
		let index = self.cursor.read_varint()?;
		usize::try_from(index)
			.ok()
			.and_then(|idx| self.symbols.get(idx))
			.cloned()
			.ok_or(MarshalError::BadSymbolLink {
				index,
				len: self.symbols.len(),
				at,
			})
	}

	fn read_big_int(&mut self) -> Result<Value> {
		let at = self.cursor.pos();
		let negative = match self.cursor.read_u8()? {
			b'+' => false,
			b'-' => true,
			_ => {
				return Err(MarshalError::MalformedBigInteger {
					at,
					reason: "sign marker must be '+' or '-'",
				});
			}
		};

		let count = self.cursor.read_varint()?;
		let byte_len = usize::try_from(count)
			.ok()
			.and_then(|count| count.checked_mul(2))
			.ok_or(MarshalError::MalformedBigInteger {
				at,
				reason: "digit count must be non-negative",
			})?;

		let raw = self.cursor.read_exact(byte_len)?;
		let digits = raw.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect();
		let big = BigInt::from_digits(negative, digits);
		Ok(match big.to_i64() {
			Some(small) => Value::Int(small),
			None => Value::BigInt(big),
		})
	}

	fn read_float(&mut self) -> Result<f64> {
		let at = self.cursor.pos();
		let raw = self.cursor.read_prefixed()?;
		// Older writers append mantissa bytes after a NUL.
		let text_len = raw.iter().position(|byte| *byte == 0).unwrap_or(raw.len());
		let text = String::from_utf8_lossy(&raw[..text_len]);
		match text.as_ref() {
			"inf" => Ok(f64::INFINITY),
			"-inf" => Ok(f64::NEG_INFINITY),
			"nan" => Ok(f64::NAN),
			other => other.parse::<f64>().map_err(|_| MarshalError::MalformedFloat {
				text: other.to_owned(),
				at,
			}),
		}
	}
}
