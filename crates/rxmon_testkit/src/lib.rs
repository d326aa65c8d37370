//! Fixture lookup and stream builders shared by the rxmon crates' tests.

use std::path::{Path, PathBuf};

/// Workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	let root = manifest_dir.ancestors().nth(2).unwrap_or(manifest_dir);
	root.canonicalize().unwrap_or_else(|_| root.to_path_buf())
}

/// Path of a checked-in save or text fixture under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a fixture file into memory.
pub fn fixture_bytes(name: &str) -> Vec<u8> {
	let path = fixture_path(name);
	std::fs::read(&path).unwrap_or_else(|err| panic!("fixture {} should be readable: {err}", path.display()))
}

/// Cargo target directory, honouring `CARGO_TARGET_DIR`.
pub fn target_dir() -> PathBuf {
	match std::env::var_os("CARGO_TARGET_DIR") {
		Some(dir) => PathBuf::from(dir),
		None => workspace_root().join("target"),
	}
}

/// Encode one varint the way the stream writer does (shortest form).
pub fn encode_varint(value: i64) -> Vec<u8> {
	match value {
		0 => return vec![0],
		1..=122 => return vec![(value + 5) as u8],
		-123..=-1 => return vec![(value - 5) as i8 as u8],
		_ => {}
	}

	let mut payload = Vec::new();
	let mut rest = value;
	for width in 1..=4_i8 {
		payload.push((rest & 0xff) as u8);
		rest >>= 8;
		let done = if value >= 0 { rest == 0 } else { rest == -1 };
		if done {
			let head = if value >= 0 { width } else { -width };
			let mut out = vec![head as u8];
			out.extend(payload);
			return out;
		}
	}
	panic!("varint out of range: {value}");
}

/// Hand-assembles stream bytes for decoder fixtures.
///
/// The builder writes tags verbatim and tracks nothing: callers choose symbol
/// and back-reference indices themselves, exactly as they would appear on disk.
#[derive(Debug, Clone)]
pub struct MarshalBuilder {
	bytes: Vec<u8>,
}

impl Default for MarshalBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl MarshalBuilder {
	/// Start a stream with the common `4.8` header.
	pub fn new() -> Self {
		Self { bytes: vec![4, 8] }
	}

	/// Append raw bytes.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Append a bare varint (length, count, or index).
	pub fn varint(mut self, value: i64) -> Self {
		self.bytes.extend(encode_varint(value));
		self
	}

	/// `nil`.
	pub fn nil(self) -> Self {
		self.raw(b"0")
	}

	/// `true` / `false`.
	pub fn bool(self, value: bool) -> Self {
		self.raw(if value { b"T" } else { b"F" })
	}

	/// Small integer.
	pub fn int(self, value: i64) -> Self {
		self.raw(b"i").varint(value)
	}

	/// Float stored as decimal text.
	pub fn float(self, text: &str) -> Self {
		self.raw(b"f").varint(text.len() as i64).raw(text.as_bytes())
	}

	/// New symbol.
	pub fn symbol(self, name: &str) -> Self {
		self.raw(b":").varint(name.len() as i64).raw(name.as_bytes())
	}

	/// Symbol link into the symbol table.
	pub fn symlink(self, index: i64) -> Self {
		self.raw(b";").varint(index)
	}

	/// Byte string without encoding annotations.
	pub fn string(self, text: &str) -> Self {
		self.raw(b"\"").varint(text.len() as i64).raw(text.as_bytes())
	}

	/// Start a wrapper; the caller writes the inner value next, then [`Self::annotations`].
	pub fn wrap(self) -> Self {
		self.raw(b"I")
	}

	/// Annotation pair count following a wrapped value.
	pub fn annotations(self, count: i64) -> Self {
		self.varint(count)
	}

	/// Array header; the caller writes `len` elements next.
	pub fn array(self, len: i64) -> Self {
		self.raw(b"[").varint(len)
	}

	/// Mapping header; the caller writes `len` key/value pairs next.
	pub fn mapping(self, len: i64) -> Self {
		self.raw(b"{").varint(len)
	}

	/// Object header; the caller writes the class tag, then [`Self::varint`] field count and pairs.
	pub fn object(self) -> Self {
		self.raw(b"o")
	}

	/// Opaque blob with a new class symbol and payload.
	pub fn blob(self, class: &str, payload: &[u8]) -> Self {
		self.raw(b"u").symbol(class).varint(payload.len() as i64).raw(payload)
	}

	/// Back-reference into the value table.
	pub fn link(self, index: i64) -> Self {
		self.raw(b"@").varint(index)
	}

	/// Finish and return the encoded bytes.
	pub fn finish(self) -> Vec<u8> {
		self.bytes
	}
}

/// Two-creature party where the second record reuses symbols by link.
///
/// Symbol table: `Pokemon, @species, PIKACHU, @name, E, @item, LIGHTBALL,
/// @ability, STATIC, CHARIZARD`. Value table: party array, first object,
/// `"Sparky"`, second object, `"Flame"`.
pub fn two_creature_party() -> Vec<u8> {
	MarshalBuilder::new()
		.array(2)
		.object()
		.symbol("Pokemon")
		.varint(4)
		.symbol("@species")
		.symbol("PIKACHU")
		.symbol("@name")
		.wrap()
		.string("Sparky")
		.annotations(1)
		.symbol("E")
		.bool(true)
		.symbol("@item")
		.symbol("LIGHTBALL")
		.symbol("@ability")
		.symbol("STATIC")
		.object()
		.symlink(0)
		.varint(4)
		.symlink(1)
		.symbol("CHARIZARD")
		.symlink(3)
		.wrap()
		.string("Flame")
		.annotations(1)
		.symlink(4)
		.bool(true)
		.symlink(5)
		.int(5)
		.symlink(7)
		.symlink(8)
		.finish()
}

/// Object whose `@partner` field points back at itself, with numeric species 25.
pub fn self_referencing_creature() -> Vec<u8> {
	MarshalBuilder::new()
		.object()
		.symbol("Pokemon")
		.varint(2)
		.symbol("@species")
		.int(25)
		.symbol("@partner")
		.link(0)
		.finish()
}
