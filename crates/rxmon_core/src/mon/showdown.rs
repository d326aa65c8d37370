use crate::mon::{CreatureRecord, Scalar, normalize_species};

/// Team text importers stop after one full party.
pub const MAX_TEAM_SIZE: usize = 6;

/// One set parsed from Showdown-style team text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowdownSet {
	/// Nickname when the header uses `Nick (Species)`.
	pub nickname: Option<String>,
	/// Normalized species key.
	pub species_slug: String,
	/// Held item from the `@ Item` suffix.
	pub item: Option<String>,
	/// `Ability:` line value.
	pub ability: Option<String>,
	/// `Level:` line value.
	pub level: Option<u32>,
	/// `- Move` lines in order.
	pub moves: Vec<String>,
}

impl From<ShowdownSet> for CreatureRecord {
	fn from(set: ShowdownSet) -> Self {
		Self {
			nickname: set.nickname,
			species_slug: set.species_slug,
			ability: set.ability.map(Scalar::Text),
			item: set.item.map(Scalar::Text),
		}
	}
}

/// Parse blank-line separated Showdown sets, keeping at most [`MAX_TEAM_SIZE`].
///
/// Unknown lines (EVs, natures, IVs) are ignored.
pub fn parse_showdown(text: &str) -> Vec<ShowdownSet> {
	let text = text.replace('\r', "");
	let mut team = Vec::new();

	for block in text.trim().split("\n\n") {
		if team.len() >= MAX_TEAM_SIZE {
			break;
		}

		let mut lines = block.lines().map(str::trim).filter(|line| !line.is_empty());
		let Some(header) = lines.next() else {
			continue;
		};

		let mut set = parse_header(header);
		for line in lines {
			if let Some(rest) = line.strip_prefix("Ability:") {
				set.ability = Some(rest.trim().to_owned());
			} else if let Some(rest) = line.strip_prefix("Level:") {
				if let Ok(level) = rest.trim().parse() {
					set.level = Some(level);
				}
			} else if let Some(rest) = line.strip_prefix('-') {
				set.moves.push(rest.trim().to_owned());
			}
		}
		team.push(set);
	}

	team
}

fn parse_header(line: &str) -> ShowdownSet {
	let (head, item) = match line.split_once(" @ ") {
		Some((head, item)) => (head, Some(item.trim().to_owned())),
		None => (line, None),
	};

	let (nickname, species) = match split_nickname(head) {
		Some((nickname, species)) => (Some(nickname.to_owned()), species),
		None => (None, head),
	};

	ShowdownSet {
		nickname,
		species_slug: normalize_species(species),
		item,
		..ShowdownSet::default()
	}
}

/// Split `Nick (Species)` at the first ` (` whose remainder is one closed group.
fn split_nickname(head: &str) -> Option<(&str, &str)> {
	let inner_end = head.strip_suffix(')')?.len();
	head.match_indices(" (").find_map(|(at, _)| {
		let inner = &head[at + 2..inner_end];
		if inner.is_empty() || inner.contains(')') {
			None
		} else {
			Some((&head[..at], inner))
		}
	})
}
