mod bytes;
mod decode;
mod error;
mod value;

/// Bounded byte cursor and varint reader.
pub use bytes::Cursor;
/// Stream decoding entry points and options.
pub use decode::{DEFAULT_MAX_DEPTH, DecodeOptions, Decoder, Salvage, decode_all, decode_all_with, decode_salvage};
/// Error and result aliases.
pub use error::{MarshalError, Result};
/// Decoded value graph types.
pub use value::{BigInt, BlobNode, Document, Node, NodeId, ObjectNode, Value, Wrapped};
