mod data;
mod moves;

pub use data::{GameData, ServerAnalysis, Source, VariantKey, STARTING_FEN};
pub use moves::{mainline_from_sans, GameError, MoveRecord};
