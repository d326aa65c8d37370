use std::collections::HashMap;

use crate::mon::Scalar;

/// Numeric id to display name table loaded from `id,name,...` text.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	names: HashMap<i64, String>,
}

impl Catalog {
	/// Parse comma-separated rows, taking the name from `name_column`.
	///
	/// Blank lines, `#` comments, rows with a non-numeric id, and rows without
	/// the requested column are skipped.
	pub fn parse(text: &str, name_column: usize) -> Self {
		let mut names = HashMap::new();
		for line in text.lines().map(str::trim) {
			if line.is_empty() || line.starts_with('#') {
				continue;
			}
			let columns: Vec<&str> = line.split(',').map(str::trim).collect();
			let Ok(id) = columns[0].parse::<i64>() else {
				continue;
			};
			let Some(name) = columns.get(name_column).filter(|name| !name.is_empty()) else {
				continue;
			};
			names.insert(id, (*name).to_owned());
		}
		Self { names }
	}

	/// Name for a numeric id.
	pub fn get(&self, id: i64) -> Option<&str> {
		self.names.get(&id).map(String::as_str)
	}

	/// Display name for a stored reference; text passes through unchanged.
	pub fn resolve<'a>(&'a self, value: &'a Scalar) -> Option<&'a str> {
		match value {
			Scalar::Text(text) => Some(text.as_str()),
			Scalar::Int(id) => self.get(*id),
		}
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Return true when nothing was loaded.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}
