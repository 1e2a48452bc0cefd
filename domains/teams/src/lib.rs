//! Teams domain: team directory, coaches, squads

pub mod directory;

pub use directory::{TeamDirectory, TeamRoster};
