use crate::marshal::{MarshalError, Result};

/// Simple bounded cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Create a cursor resuming at `pos`.
	pub fn at(bytes: &'a [u8], pos: usize) -> Self {
		Self {
			bytes,
			pos: pos.min(bytes.len()),
		}
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Return true when every byte has been consumed.
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Read one byte and advance cursor.
	pub fn read_u8(&mut self) -> Result<u8> {
		let raw = self.read_exact(1)?;
		Ok(raw[0])
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(MarshalError::UnexpectedEndOfInput {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one signed variable-length integer.
	///
	/// A leading `0` is zero, `5..=127` and `-128..=-5` carry the value offset
	/// by five, and `1..=4` / `-4..=-1` announce that many little-endian
	/// payload bytes (sign-extended with `0xff` for the negative forms).
	pub fn read_varint(&mut self) -> Result<i64> {
		let head = self.read_u8()? as i8;
		match head {
			0 => Ok(0),
			5..=i8::MAX => Ok(i64::from(head) - 5),
			i8::MIN..=-5 => Ok(i64::from(head) + 5),
			1..=4 => {
				let raw = self.read_exact(head as usize)?;
				Ok(le_unsigned(raw) as i64)
			}
			-4..=-1 => {
				let n = usize::from(head.unsigned_abs());
				let raw = self.read_exact(n)?;
				Ok(le_unsigned(raw) as i64 - (1_i64 << (8 * n)))
			}
		}
	}

	/// Read a varint that must be a non-negative length, count, or index.
	pub fn read_len(&mut self) -> Result<usize> {
		let at = self.pos;
		let len = self.read_varint()?;
		usize::try_from(len).map_err(|_| MarshalError::NegativeLength { len, at })
	}

	/// Read a length-prefixed byte run.
	pub fn read_prefixed(&mut self) -> Result<&'a [u8]> {
		let len = self.read_len()?;
		self.read_exact(len)
	}
}

fn le_unsigned(raw: &[u8]) -> u64 {
	raw.iter().rev().fold(0_u64, |acc, byte| (acc << 8) | u64::from(*byte))
}
