//! Public library API for decoding save-game object graphs and mining creature records.

/// Binary object-graph decoding: cursor, varints, values, and the stream decoder.
pub mod marshal;
/// Creature extraction, species slugs, and team-text import.
pub mod mon;
