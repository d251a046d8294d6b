use crate::engine::commands::{PileRef, RejectReason};
use crate::engine::config::DifficultyConfig;
use crate::game::Card;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Dealt { seed: u64 },
    Drew { count: usize },
    Recycled { count: usize },
    Flipped { pile: usize, card: Card },
    Placed { card: Card, from: PileRef, to: PileRef, count: usize },
    InvalidMove { reason: RejectReason, penalized: bool },
    HintGiven { text: String, remaining: u32 },
    Won { final_score: f64 },
    Lost { elapsed_seconds: u32 },
}

/// `initialize` runs on every deal and `dispose` when the controller drops.
pub trait EventSink: Send {
    fn initialize(&mut self, _config: &DifficultyConfig) {}

    fn emit(&mut self, event: GameEvent);

    fn dispose(&mut self) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Keeps every event in order. Handy for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<GameEvent>,
    initialized: usize,
    disposed: bool,
}

impl RecordingSink {
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn initialize_count(&self) -> usize {
        self.initialized
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl EventSink for RecordingSink {
    fn initialize(&mut self, _config: &DifficultyConfig) {
        self.initialized += 1;
        self.disposed = false;
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

/// Shares one sink between the controller and an observer on the same
/// thread of control, e.g. a test that wants to inspect what was emitted.
impl<S: EventSink> EventSink for std::sync::Arc<std::sync::Mutex<S>> {
    fn initialize(&mut self, config: &DifficultyConfig) {
        if let Ok(mut sink) = self.lock() {
            sink.initialize(config);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        if let Ok(mut sink) = self.lock() {
            sink.emit(event);
        }
    }

    fn dispose(&mut self) {
        if let Ok(mut sink) = self.lock() {
            sink.dispose();
        }
    }
}
