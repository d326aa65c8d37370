mod catalog;
mod extract;
mod showdown;
mod slug;

/// Id to name lookup tables.
pub use catalog::Catalog;
/// Graph extraction types and entry points.
pub use extract::{CreatureRecord, ExtractOptions, Scalar, TraversalOrder, extract_creatures, extract_creatures_with};
/// Showdown team text import.
pub use showdown::{MAX_TEAM_SIZE, ShowdownSet, parse_showdown};
/// Species slug normalization.
pub use slug::{SpeciesLabel, normalize_species};
