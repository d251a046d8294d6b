use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::commands::{EngineCommand, MoveOutcome, PileRef, RejectReason};
use crate::engine::config::DifficultyConfig;
use crate::engine::error::EngineError;
use crate::engine::events::{EventSink, GameEvent, NullSink};
use crate::engine::hinting::{find_hint, Hint};
use crate::engine::session::{
    SessionState, PENALTY_INVALID_MOVE, PENALTY_RECYCLE, POINTS_FOUNDATION, POINTS_REVEAL,
    POINTS_TABLEAU,
};
use crate::game::{Card, CardCensus, DrawResult, KlondikeGame, MoveResult};
use crate::trace;

/// Full, self-contained picture of a game after one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub piles: KlondikeGame,
    pub session: SessionState,
    pub config: DifficultyConfig,
    pub seed: Option<u64>,
    pub last_outcome: MoveOutcome,
}

impl GameState {
    fn dealt(config: DifficultyConfig, seed: u64) -> Self {
        Self {
            piles: KlondikeGame::new_with_seed(seed),
            session: SessionState::new(&config),
            config,
            seed: Some(seed),
            last_outcome: MoveOutcome::Applied,
        }
    }
}

pub struct GameController {
    state: GameState,
    sink: Box<dyn EventSink>,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl GameController {
    pub fn new(config: DifficultyConfig) -> Result<Self, EngineError> {
        Self::with_sink(config, rand::thread_rng().gen(), NullSink)
    }

    pub fn with_seed(config: DifficultyConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_sink(config, seed, NullSink)
    }

    pub fn with_sink(
        config: DifficultyConfig,
        seed: u64,
        sink: impl EventSink + 'static,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let mut controller = Self {
            state: GameState::dealt(config.clone(), seed),
            sink: Box::new(sink),
        };
        controller.announce_deal(&config, seed);
        Ok(controller)
    }

    /// Starts from an arbitrary position instead of a fresh deal. The pile
    /// layout is audited and a completed position is scored as a win at once.
    pub fn from_position(
        config: DifficultyConfig,
        piles: KlondikeGame,
        sink: impl EventSink + 'static,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        audit(&piles)?;
        let mut sink: Box<dyn EventSink> = Box::new(sink);
        sink.initialize(&config);

        let mut state = GameState {
            piles,
            session: SessionState::new(&config),
            config,
            seed: None,
            last_outcome: MoveOutcome::Applied,
        };
        let mut events = Vec::new();
        settle_foundations(&mut state, &mut events);

        let mut controller = Self { state, sink };
        controller.emit_all(events);
        Ok(controller)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.state.config
    }

    /// Throws the current game away and deals a fresh one.
    pub fn new_game(&mut self, config: DifficultyConfig) -> Result<GameState, EngineError> {
        self.new_game_with_seed(config, rand::thread_rng().gen())
    }

    pub fn new_game_with_seed(
        &mut self,
        config: DifficultyConfig,
        seed: u64,
    ) -> Result<GameState, EngineError> {
        config.validate()?;
        self.state = GameState::dealt(config.clone(), seed);
        self.announce_deal(&config, seed);
        Ok(self.snapshot())
    }

    pub fn execute(&mut self, command: EngineCommand) -> Result<GameState, EngineError> {
        match command {
            EngineCommand::DrawFromStock => self.draw_from_stock(),
            EngineCommand::FlipTopTableauCard { pile } => self.flip_top_tableau_card(pile),
            EngineCommand::ClickTableauCard { pile, card_index } => {
                self.click_tableau_card(pile, card_index)
            }
            EngineCommand::AutoMoveToFoundation { source, card_index } => {
                self.attempt_auto_move_to_foundation(source, card_index)
            }
            EngineCommand::Move { card, from, to } => self.attempt_move(card, from, to),
            EngineCommand::Tick => self.tick(),
        }
    }

    /// Draws from the stock, or turns the waste over when the stock is out.
    pub fn draw_from_stock(&mut self) -> Result<GameState, EngineError> {
        self.ensure_playable()?;
        self.transition("cmd:draw", |next, events| {
            let waste_before = next.piles.waste_len();
            let result = next
                .piles
                .draw_or_recycle_with_count(next.config.draw_mode.count());
            match result {
                DrawResult::DrewFromStock => {
                    next.session.record_move();
                    events.push(GameEvent::Drew {
                        count: next.piles.waste_len() - waste_before,
                    });
                }
                DrawResult::RecycledWaste => {
                    next.session.adjust_score(PENALTY_RECYCLE, &next.config);
                    events.push(GameEvent::Recycled {
                        count: next.piles.stock_len(),
                    });
                }
                DrawResult::NoOp => {}
            }
            MoveOutcome::from_draw(result)
        })
    }

    pub fn flip_top_tableau_card(&mut self, pile: usize) -> Result<GameState, EngineError> {
        self.ensure_playable()?;
        self.transition("cmd:flip", |next, events| match reveal(next, pile, events) {
            Ok(()) => MoveOutcome::Applied,
            Err(reason) => MoveOutcome::Rejected(reason),
        })
    }

    /// A plain click on a tableau card: turns a face-down top card over, or
    /// sends a face-up top card to the first foundation that takes it.
    pub fn click_tableau_card(
        &mut self,
        pile: usize,
        card_index: usize,
    ) -> Result<GameState, EngineError> {
        self.ensure_playable()?;
        self.transition("cmd:click", |next, events| {
            let Some(len) = next.piles.tableau_len(pile) else {
                return MoveOutcome::Rejected(RejectReason::NoSuchPile);
            };
            let Some(card) = next.piles.tableau_card(pile, card_index) else {
                return MoveOutcome::Rejected(RejectReason::CardNotInSource);
            };
            if card_index + 1 != len {
                return MoveOutcome::NoOp;
            }
            if !card.face_up {
                return match reveal(next, pile, events) {
                    Ok(()) => MoveOutcome::Applied,
                    Err(reason) => MoveOutcome::Rejected(reason),
                };
            }
            match auto_move(next, PileRef::Tableau(pile), Some(card_index), events) {
                Ok(()) => MoveOutcome::Applied,
                Err(_) => MoveOutcome::NoOp,
            }
        })
    }

    /// Sends the top card of the waste or a tableau pile to the first
    /// foundation, in index order, that accepts it. Failure is not penalized.
    pub fn attempt_auto_move_to_foundation(
        &mut self,
        source: PileRef,
        card_index: Option<usize>,
    ) -> Result<GameState, EngineError> {
        self.ensure_playable()?;
        self.transition("cmd:auto-foundation", |next, events| {
            match auto_move(next, source, card_index, events) {
                Ok(()) => MoveOutcome::Applied,
                Err(reason) => MoveOutcome::Rejected(reason),
            }
        })
    }

    /// A drag-and-drop of `card` (and, from the tableau, everything above
    /// it) from `from` onto `to`.
    pub fn attempt_move(
        &mut self,
        card: Card,
        from: PileRef,
        to: PileRef,
    ) -> Result<GameState, EngineError> {
        self.ensure_playable()?;
        self.transition("cmd:move", |next, events| {
            match drop_card(next, card, from, to, events) {
                Ok(()) => MoveOutcome::Applied,
                Err(reason) => {
                    let penalized = next.config.move_penalty_enabled;
                    if penalized {
                        next.session
                            .adjust_score(PENALTY_INVALID_MOVE, &next.config);
                    }
                    events.push(GameEvent::InvalidMove { reason, penalized });
                    MoveOutcome::Rejected(reason)
                }
            }
        })
    }

    /// Charges one hint and describes the best move found. Piles are left
    /// alone.
    pub fn request_hint(&mut self) -> Result<Hint, EngineError> {
        self.ensure_playable()?;
        let suggestion = find_hint(&self.state.piles);
        let mut session = self.state.session.clone();
        let remaining = session.consume_hint()?;
        self.state.session = session;

        let hint = Hint::from_suggestion(suggestion, remaining);
        trace::event("hint:given", format!("remaining={remaining} text={:?}", hint.text));
        self.sink.emit(GameEvent::HintGiven {
            text: hint.text.clone(),
            remaining,
        });
        Ok(hint)
    }

    /// One second of wall clock. Only the timer and the time-limit check are
    /// touched; once the game is over the clock stays put.
    pub fn tick(&mut self) -> Result<GameState, EngineError> {
        if self.state.session.is_game_over {
            let mut snapshot = self.snapshot();
            snapshot.last_outcome = MoveOutcome::NoOp;
            return Ok(snapshot);
        }
        let expired = self.state.session.advance_clock(&self.state.config);
        self.state.last_outcome = MoveOutcome::Applied;
        if expired {
            let elapsed_seconds = self.state.session.elapsed_seconds;
            trace::event("game:lost", format!("elapsed={elapsed_seconds}"));
            self.sink.emit(GameEvent::Lost { elapsed_seconds });
        }
        Ok(self.snapshot())
    }

    fn ensure_playable(&self) -> Result<(), EngineError> {
        if self.state.session.is_game_over {
            trace::mark("cmd:refused-game-over");
            return Err(EngineError::GameOver);
        }
        Ok(())
    }

    fn transition(
        &mut self,
        label: &'static str,
        apply: impl FnOnce(&mut GameState, &mut Vec<GameEvent>) -> MoveOutcome,
    ) -> Result<GameState, EngineError> {
        let mut next = self.state.clone();
        let mut events = Vec::new();
        let outcome = apply(&mut next, &mut events);
        next.last_outcome = outcome;

        if let Err(err) = audit(&next.piles) {
            trace::event("engine:audit-fault", format!("after {label}: {err}"));
            return Err(err);
        }

        trace::event(
            label,
            format!(
                "outcome={:?} score={} moves={}",
                outcome, next.session.score, next.session.moves
            ),
        );
        self.state = next;
        self.emit_all(events);
        Ok(self.snapshot())
    }

    fn announce_deal(&mut self, config: &DifficultyConfig, seed: u64) {
        trace::event("game:deal", format!("seed={seed} draw={}", config.draw_mode.count()));
        self.sink.initialize(config);
        self.sink.emit(GameEvent::Dealt { seed });
    }

    fn emit_all(&mut self, events: Vec<GameEvent>) {
        for event in events {
            if let GameEvent::Won { final_score } = &event {
                trace::event("game:won", format!("final_score={final_score}"));
            }
            self.sink.emit(event);
        }
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.sink.dispose();
    }
}

fn audit(piles: &KlondikeGame) -> Result<(), EngineError> {
    let census = piles.census();
    if !census.is_complete() {
        return Err(census_error(&census));
    }
    if !piles.foundations_are_ordered() {
        return Err(EngineError::BrokenLayout(
            "a foundation is not an ascending same-suit run from the ace".to_string(),
        ));
    }
    if !piles.tableau_faces_are_ordered() {
        return Err(EngineError::BrokenLayout(
            "a face-up tableau card lies beneath a face-down one".to_string(),
        ));
    }
    Ok(())
}

fn census_error(census: &CardCensus) -> EngineError {
    let mut missing: Vec<String> = census.missing.iter().map(Card::label).collect();
    missing.extend(census.foreign.iter().map(|card| format!("foreign {}", card.label())));
    EngineError::CardConservation {
        missing,
        duplicated: census.duplicated.iter().map(Card::label).collect(),
    }
}

fn reveal(next: &mut GameState, pile: usize, events: &mut Vec<GameEvent>) -> MoveResult {
    next.piles.flip_tableau_top(pile)?;
    next.session.adjust_score(POINTS_REVEAL, &next.config);
    if let Some(card) = next.piles.tableau_top(pile) {
        events.push(GameEvent::Flipped { pile, card });
    }
    Ok(())
}

fn auto_move(
    next: &mut GameState,
    source: PileRef,
    card_index: Option<usize>,
    events: &mut Vec<GameEvent>,
) -> MoveResult {
    if matches!(source, PileRef::Stock | PileRef::Foundation(_)) {
        return Err(RejectReason::UnsupportedSource);
    }
    let pile = next.piles.pile(source).ok_or(RejectReason::NoSuchPile)?;
    let card = pile.last().copied().ok_or(RejectReason::EmptySource)?;
    if card_index.is_some_and(|idx| idx != pile.len() - 1) {
        return Err(RejectReason::NotTopCard);
    }
    if !card.face_up {
        return Err(RejectReason::CardFaceDown);
    }
    let dst = next
        .piles
        .first_accepting_foundation(card)
        .ok_or(RejectReason::IllegalPlacement)?;
    drop_card(next, card, source, PileRef::Foundation(dst), events)
}

/// Validates and applies one drop, scoring it on success. Rejections leave
/// `next` untouched.
fn drop_card(
    next: &mut GameState,
    card: Card,
    from: PileRef,
    to: PileRef,
    events: &mut Vec<GameEvent>,
) -> MoveResult {
    if from == to {
        return Err(RejectReason::SamePile);
    }
    let source = next.piles.pile(from).ok_or(RejectReason::NoSuchPile)?;
    if next.piles.pile(to).is_none() {
        return Err(RejectReason::NoSuchPile);
    }
    let index = next
        .piles
        .locate(card, from)
        .ok_or(RejectReason::CardNotInSource)?;
    let is_top = index + 1 == source.len();
    let count = source.len() - index;

    let (points, exposed) = match (from, to) {
        (_, PileRef::Stock | PileRef::Waste) => {
            return Err(RejectReason::UnsupportedDestination)
        }
        (PileRef::Stock, _) => return Err(RejectReason::UnsupportedSource),
        (PileRef::Waste | PileRef::Foundation(_), _) if !is_top => {
            return Err(RejectReason::NotTopCard)
        }
        (PileRef::Waste, PileRef::Foundation(dst)) => {
            next.piles.move_waste_to_foundation(dst)?;
            (POINTS_FOUNDATION, false)
        }
        (PileRef::Waste, PileRef::Tableau(dst)) => {
            next.piles.move_waste_to_tableau(dst)?;
            (POINTS_TABLEAU, false)
        }
        (PileRef::Foundation(src), PileRef::Tableau(dst)) => {
            next.piles.move_foundation_top_to_tableau(src, dst)?;
            (0, false)
        }
        (PileRef::Foundation(_), PileRef::Foundation(_)) => {
            return Err(RejectReason::UnsupportedDestination)
        }
        (PileRef::Tableau(src), PileRef::Foundation(dst)) => {
            if !source[index].face_up {
                return Err(RejectReason::CardFaceDown);
            }
            if !is_top {
                return Err(RejectReason::NotTopCard);
            }
            let exposed = next.piles.move_tableau_top_to_foundation(src, dst)?;
            (POINTS_FOUNDATION, exposed)
        }
        (PileRef::Tableau(src), PileRef::Tableau(dst)) => {
            let exposed = next.piles.move_tableau_run_to_tableau(src, index, dst)?;
            (POINTS_TABLEAU, exposed)
        }
    };

    if points != 0 {
        next.session.adjust_score(points, &next.config);
    }
    next.session.record_move();
    events.push(GameEvent::Placed {
        card,
        from,
        to,
        count,
    });

    if exposed {
        if let PileRef::Tableau(src) = from {
            next.session.adjust_score(POINTS_REVEAL, &next.config);
            if let Some(card) = next.piles.tableau_top(src) {
                events.push(GameEvent::Flipped { pile: src, card });
            }
        }
    }

    if matches!(to, PileRef::Foundation(_)) {
        settle_foundations(next, events);
    }
    Ok(())
}

/// Win check, run after anything lands on a foundation.
fn settle_foundations(next: &mut GameState, events: &mut Vec<GameEvent>) {
    if !next.piles.is_won() {
        return;
    }
    if let Some(breakdown) = next.session.finish_won(&next.config) {
        events.push(GameEvent::Won {
            final_score: breakdown.total,
        });
    }
}
