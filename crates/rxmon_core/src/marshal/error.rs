use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, MarshalError>;

/// Errors produced while decoding a marshal stream.
///
/// Every error is fatal to the stream being decoded. Earlier streams in the
/// same buffer are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarshalError {
	/// Not enough bytes remained for a requested read.
	#[error("unexpected end of input at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEndOfInput {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Tag byte does not name a supported value kind.
	#[error("unknown tag 0x{tag:02x} ({}) at offset {at}", render_tag(*tag))]
	UnknownTag {
		/// Offending tag byte.
		tag: u8,
		/// Offset of the tag byte.
		at: usize,
	},
	/// Big integer header was inconsistent.
	#[error("malformed big integer at offset {at}: {reason}")]
	MalformedBigInteger {
		/// Offset of the sign marker.
		at: usize,
		/// What was wrong with it.
		reason: &'static str,
	},
	/// Float payload was not decimal text.
	#[error("malformed float {text:?} at offset {at}")]
	MalformedFloat {
		/// Payload decoded lossily as text.
		text: String,
		/// Offset of the payload.
		at: usize,
	},
	/// A length or count prefix decoded negative.
	#[error("negative length {len} at offset {at}")]
	NegativeLength {
		/// Decoded prefix value.
		len: i64,
		/// Offset of the prefix.
		at: usize,
	},
	/// Back-reference index did not name an already-registered value.
	#[error("back-reference {index} out of range (table has {len} entries) at offset {at}")]
	BadBackReference {
		/// Requested table index.
		index: i64,
		/// Table size at the point of the reference.
		len: usize,
		/// Offset of the reference tag.
		at: usize,
	},
	/// Symbol link index did not name an already-interned symbol.
	#[error("symbol link {index} out of range (table has {len} entries) at offset {at}")]
	BadSymbolLink {
		/// Requested symbol index.
		index: i64,
		/// Symbol table size at the point of the link.
		len: usize,
		/// Offset of the link tag.
		at: usize,
	},
	/// Object field name was not a symbol.
	#[error("expected symbol field name at offset {at}, got {got}")]
	UnexpectedFieldName {
		/// Offset of the field name value.
		at: usize,
		/// Kind of the value found instead.
		got: &'static str,
	},
	/// Nesting exceeded the configured ceiling.
	#[error("decode depth exceeded (max={max_depth}) at offset {at}")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
		/// Offset where the limit was hit.
		at: usize,
	},
}

impl MarshalError {
	/// Return true when the stream simply ran out of bytes.
	pub fn is_truncation(&self) -> bool {
		matches!(self, Self::UnexpectedEndOfInput { .. })
	}
}

fn render_tag(tag: u8) -> String {
	if tag.is_ascii_graphic() {
		format!("'{}'", char::from(tag))
	} else {
		"non-printable".to_owned()
	}
}
