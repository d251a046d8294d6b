use std::error::Error;
use std::fmt;

/// Conditions the engine refuses to continue through. Illegal moves are not
/// in here; they come back as a rejected outcome on the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    GameOver,
    NoHintsRemaining,
    InvalidConfig(String),
    CardConservation {
        missing: Vec<String>,
        duplicated: Vec<String>,
    },
    BrokenLayout(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver => f.write_str("the game is over; start a new game"),
            Self::NoHintsRemaining => f.write_str("no hints remaining"),
            Self::InvalidConfig(reason) => write!(f, "invalid difficulty configuration: {reason}"),
            Self::CardConservation {
                missing,
                duplicated,
            } => write!(
                f,
                "card set corrupted (missing: [{}], duplicated: [{}])",
                missing.join(", "),
                duplicated.join(", ")
            ),
            Self::BrokenLayout(detail) => write!(f, "pile layout corrupted: {detail}"),
        }
    }
}

impl Error for EngineError {}
