//! Word chain: a timed game where each word starts with the last letter of the previous one.

pub mod achievements;
pub mod hints;
pub mod session;

pub use hints::HINT_PENALTY;
pub use session::{
    points_for, GameOver, Hint, LookupOutcome, MoveCheck, TurnOutcome, WordChainSession,
};
