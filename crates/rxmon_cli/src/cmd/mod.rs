/// Value tree printing command.
pub mod dump;
/// Creature import command.
pub mod import;
/// Stream summary command.
pub mod info;
/// Showdown team text command.
pub mod showdown;
#[cfg(test)]
pub(crate) mod test_support;
/// Shared CLI helpers.
pub mod util;
