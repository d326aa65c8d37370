/// Raw species label as found in a save file or team text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesLabel<'a> {
	/// Free-form display name or internal constant (`"Mr. Mime"`, `"PIKACHU"`).
	Text(&'a str),
	/// National dex style numeric id.
	Number(i64),
}

impl<'a> From<&'a str> for SpeciesLabel<'a> {
	fn from(value: &'a str) -> Self {
		Self::Text(value)
	}
}

impl<'a> From<&'a String> for SpeciesLabel<'a> {
	fn from(value: &'a String) -> Self {
		Self::Text(value.as_str())
	}
}

impl From<i64> for SpeciesLabel<'_> {
	fn from(value: i64) -> Self {
		Self::Number(value)
	}
}

/// Canonicalize a species label into a lowercase hyphenated lookup key.
///
/// Numbers render as decimal. Text is trimmed, lowercased, and folded to
/// unaccented letters. Anything outside `[a-z0-9-]` becomes `-` and runs of
/// `-` collapse. Applying it to its own output is a no-op.
pub fn normalize_species<'a>(label: impl Into<SpeciesLabel<'a>>) -> String {
	let text = match label.into() {
		SpeciesLabel::Number(id) => return id.to_string(),
		SpeciesLabel::Text(text) => text.trim(),
	};

	let mut out = String::with_capacity(text.len());
	for ch in text.chars().flat_map(char::to_lowercase) {
		if is_combining_mark(ch) {
			continue;
		}
		match fold_diacritic(ch) {
			Some(base) => base.chars().for_each(|base| push_slug_char(&mut out, base)),
			None => push_slug_char(&mut out, ch),
		}
	}
	out
}

fn push_slug_char(out: &mut String, ch: char) {
	let ch = if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' { ch } else { '-' };
	if ch == '-' && out.ends_with('-') {
		return;
	}
	out.push(ch);
}

fn is_combining_mark(ch: char) -> bool {
	matches!(ch, '\u{0300}'..='\u{036f}')
}

fn fold_diacritic(ch: char) -> Option<&'static str> {
	Some(match ch {
		'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
		'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
		'ď' | 'đ' | 'ð' => "d",
		'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
		'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
		'ĥ' | 'ħ' => "h",
		'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
		'ĵ' => "j",
		'ķ' => "k",
		'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
		'ñ' | 'ń' | 'ņ' | 'ň' => "n",
		'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
		'ŕ' | 'ŗ' | 'ř' => "r",
		'ś' | 'ŝ' | 'ş' | 'š' => "s",
		'ţ' | 'ť' | 'ŧ' => "t",
		'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
		'ŵ' => "w",
		'ý' | 'ÿ' | 'ŷ' => "y",
		'ź' | 'ż' | 'ž' => "z",
		'ß' => "ss",
		'æ' => "ae",
		'œ' => "oe",
		'þ' => "th",
		_ => return None,
	})
}
