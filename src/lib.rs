//! Rules and state engine for Klondike solitaire.
//!
//! The [`game`] tree owns cards, piles and move legality. The [`engine`] tree
//! layers scoring, hints and the command façade a presentation layer talks to.

pub mod engine;
pub mod game;
pub mod trace;

pub use engine::commands::{MoveOutcome, PileRef, RejectReason};
pub use engine::config::{Difficulty, DifficultyConfig, DrawMode};
pub use engine::controller::{GameController, GameState};
pub use engine::error::EngineError;
pub use engine::events::{EventSink, GameEvent, NullSink, RecordingSink};
pub use engine::hinting::{Hint, HintMove};
pub use engine::session::{FinalScore, SessionState};
pub use game::{Card, DrawResult, KlondikeGame, Suit};
