use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Handle to a compound node stored in a [`Document`] arena.
///
/// Two values that carry the same id are the same object in the source
/// graph, not merely equal copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// Position of the node inside its document arena.
	pub fn index(self) -> usize {
		self.0
	}
}

/// One decoded value.
///
/// Scalars are stored inline. Compound values live in the document arena and
/// are referenced through [`Value::Node`], which keeps shared and cyclic
/// structure representable without copying.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Null.
	Nil,
	/// `true` or `false`.
	Bool(bool),
	/// Fixed-width integer, including big integers that fit.
	Int(i64),
	/// Integer too wide for `i64`.
	BigInt(BigInt),
	/// Float parsed from its decimal text.
	Float(f64),
	/// Interned name.
	Symbol(Arc<str>),
	/// Handle to a compound in the document arena.
	Node(NodeId),
	/// Value with annotations attached.
	Wrapped(Box<Wrapped>),
}

/// Value decorated with out-of-band annotations (for example string encodings).
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapped {
	/// Decorated value.
	pub inner: Value,
	/// Annotation key/value pairs in stream order.
	pub annotations: Vec<(Value, Value)>,
}

/// Compound value stored in a document arena.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	/// Raw byte string; usually text, but no encoding is assumed.
	Bytes(Vec<u8>),
	/// Ordered element list.
	Array(Vec<Value>),
	/// Ordered key/value pairs; keys may repeat.
	Mapping(Vec<(Value, Value)>),
	/// Plain object with named instance fields.
	Object(ObjectNode),
	/// User-defined payload the decoder does not interpret.
	Blob(BlobNode),
}

/// Plain object node.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
	/// Class tag, normally a symbol.
	pub class: Value,
	/// Field name/value pairs in stream order.
	pub fields: Vec<(Arc<str>, Value)>,
}

/// Opaque user-defined node.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobNode {
	/// Class tag, normally a symbol.
	pub class: Value,
	/// Uninterpreted payload.
	pub raw: Vec<u8>,
}

/// Sign-magnitude integer made of little-endian 16-bit digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
	negative: bool,
	digits: Vec<u16>,
}

/// One fully decoded root stream together with the arena it points into.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
	/// Two header bytes that preceded the root (major, minor).
	pub version: [u8; 2],
	/// Root value.
	pub root: Value,
	/// Compound node arena in registration order.
	pub nodes: Vec<Node>,
	/// Symbol table in interning order.
	pub symbols: Vec<Arc<str>>,
}

impl Value {
	/// Stable variant label.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Nil => "Nil",
			Self::Bool(_) => "Bool",
			Self::Int(_) => "Int",
			Self::BigInt(_) => "BigInt",
			Self::Float(_) => "Float",
			Self::Symbol(_) => "Symbol",
			Self::Node(_) => "Node",
			Self::Wrapped(_) => "Wrapped",
		}
	}

	/// Return the arena handle for compound values.
	pub fn node_id(&self) -> Option<NodeId> {
		match self {
			Self::Node(id) => Some(*id),
			_ => None,
		}
	}

	/// Strip any number of annotation wrappers.
	pub fn unwrapped(&self) -> &Value {
		let mut current = self;
		while let Self::Wrapped(wrapped) = current {
			current = &wrapped.inner;
		}
		current
	}
}

impl Node {
	/// Stable variant label.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Bytes(_) => "Bytes",
			Self::Array(_) => "Array",
			Self::Mapping(_) => "Mapping",
			Self::Object(_) => "Object",
			Self::Blob(_) => "Blob",
		}
	}
}

impl BigInt {
	/// Build from a sign and little-endian 16-bit digits; high zero digits are dropped.
	pub fn from_digits(negative: bool, mut digits: Vec<u16>) -> Self {
		while digits.last() == Some(&0) {
			digits.pop();
		}
		let negative = negative && !digits.is_empty();
		Self { negative, digits }
	}

	/// Return true for values below zero.
	pub fn is_negative(&self) -> bool {
		self.negative
	}

	/// Little-endian magnitude digits.
	pub fn digits(&self) -> &[u16] {
		&self.digits
	}

	/// Narrow to `i64` when the value fits.
	pub fn to_i64(&self) -> Option<i64> {
		if self.digits.len() > 4 {
			return None;
		}
		let magnitude = self.digits.iter().rev().fold(0_u64, |acc, digit| (acc << 16) | u64::from(*digit));
		let signed = if self.negative { -i128::from(magnitude) } else { i128::from(magnitude) };
		i64::try_from(signed).ok()
	}
}

impl fmt::Display for BigInt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		const CHUNK: u32 = 10_000;

		let mut limbs: Vec<u32> = self.digits.iter().rev().map(|digit| u32::from(*digit)).collect();
		let mut chunks = Vec::new();
		while !limbs.is_empty() {
			let mut rem = 0_u32;
			for limb in limbs.iter_mut() {
				let current = (rem << 16) | *limb;
				*limb = current / CHUNK;
				rem = current % CHUNK;
			}
			chunks.push(rem);
			let zeros = limbs.iter().take_while(|limb| **limb == 0).count();
			limbs.drain(..zeros);
		}

		if self.negative {
			f.write_str("-")?;
		}
		match chunks.split_last() {
			None => f.write_str("0"),
			Some((top, rest)) => {
				write!(f, "{top}")?;
				for chunk in rest.iter().rev() {
					write!(f, "{chunk:04}")?;
				}
				Ok(())
			}
		}
	}
}

impl Document {
	/// Look up an arena node.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.0)
	}

	/// Resolve a value to its arena node, looking through wrappers.
	pub fn node_of(&self, value: &Value) -> Option<&Node> {
		value.unwrapped().node_id().and_then(|id| self.node(id))
	}

	/// Read a value as text when it is a symbol or a byte string.
	///
	/// Byte strings are decoded lossily as UTF-8.
	pub fn text<'d>(&'d self, value: &'d Value) -> Option<Cow<'d, str>> {
		match value.unwrapped() {
			Value::Symbol(text) => Some(Cow::Borrowed(text.as_ref())),
			Value::Node(id) => match self.node(*id)? {
				Node::Bytes(raw) => Some(String::from_utf8_lossy(raw)),
				_ => None,
			},
			_ => None,
		}
	}

	/// Render an object or blob class tag as text.
	pub fn class_name<'d>(&'d self, class: &'d Value) -> Cow<'d, str> {
		self.text(class).unwrap_or(Cow::Borrowed("<anonymous>"))
	}
}
