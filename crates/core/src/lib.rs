//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod dice;
pub mod engine;
pub mod events;
pub mod player;
pub mod rng;
pub mod score;
pub mod scorecard;
pub mod snapshot;
pub mod turn;

pub use dice::*;
pub use engine::*;
pub use events::*;
pub use player::*;
pub use rng::*;
pub use score::*;
pub use scorecard::*;
pub use snapshot::*;
pub use turn::*;
