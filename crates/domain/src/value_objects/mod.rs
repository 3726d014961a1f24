//! Value objects for the NPC reply contract.

mod intimacy;

pub use intimacy::Intimacy;
