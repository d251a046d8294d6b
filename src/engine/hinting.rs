use serde::{Deserialize, Serialize};

use crate::engine::commands::{EngineCommand, PileRef};
use crate::game::{can_stack_tableau, first_face_up_index, Card, KlondikeGame};

pub const NO_MOVE_TEXT: &str = "No valid moves found. Try drawing cards or recycling the waste pile.";
pub const DRAW_TEXT: &str = "Draw new cards from the stock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintMove {
    WasteToFoundation { dst: usize },
    TableauTopToFoundation { src: usize, dst: usize },
    TableauToTableau { src: usize, start: usize, dst: usize },
    Draw,
}

impl HintMove {
    /// The controller command that carries this move out on `game`.
    pub fn to_command(self, game: &KlondikeGame) -> Option<EngineCommand> {
        match self {
            HintMove::WasteToFoundation { dst } => Some(EngineCommand::Move {
                card: game.waste_top()?,
                from: PileRef::Waste,
                to: PileRef::Foundation(dst),
            }),
            HintMove::TableauTopToFoundation { src, dst } => Some(EngineCommand::Move {
                card: game.tableau_top(src)?,
                from: PileRef::Tableau(src),
                to: PileRef::Foundation(dst),
            }),
            HintMove::TableauToTableau { src, start, dst } => Some(EngineCommand::Move {
                card: game.tableau_card(src, start)?,
                from: PileRef::Tableau(src),
                to: PileRef::Tableau(dst),
            }),
            HintMove::Draw => Some(EngineCommand::DrawFromStock),
        }
    }
}

/// A suggestion before it is charged against the hint budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintSuggestion {
    pub text: String,
    pub card: Option<Card>,
    pub source: Option<PileRef>,
    pub target: Option<PileRef>,
    pub hint_move: Option<HintMove>,
}

/// What `request_hint` hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub text: String,
    pub remaining: u32,
    pub card: Option<Card>,
    pub source: Option<PileRef>,
    pub target: Option<PileRef>,
    pub hint_move: Option<HintMove>,
}

impl Hint {
    pub(crate) fn from_suggestion(suggestion: HintSuggestion, remaining: u32) -> Self {
        Self {
            text: suggestion.text,
            remaining,
            card: suggestion.card,
            source: suggestion.source,
            target: suggestion.target,
            hint_move: suggestion.hint_move,
        }
    }
}

/// First legal move in fixed priority order: waste to foundation, tableau
/// top to foundation, tableau to tableau, then drawing. Never mutates.
pub fn find_hint(game: &KlondikeGame) -> HintSuggestion {
    waste_to_foundation(game)
        .or_else(|| tableau_to_foundation(game))
        .or_else(|| tableau_to_tableau(game))
        .or_else(|| draw_from_stock(game))
        .unwrap_or_else(|| HintSuggestion {
            text: NO_MOVE_TEXT.to_string(),
            card: None,
            source: None,
            target: None,
            hint_move: None,
        })
}

fn waste_to_foundation(game: &KlondikeGame) -> Option<HintSuggestion> {
    let card = game.waste_top()?;
    let dst = game.first_accepting_foundation(card)?;
    Some(HintSuggestion {
        text: format!(
            "Move {} from waste to foundation pile {}",
            card.name(),
            dst + 1
        ),
        card: Some(card),
        source: Some(PileRef::Waste),
        target: Some(PileRef::Foundation(dst)),
        hint_move: Some(HintMove::WasteToFoundation { dst }),
    })
}

fn tableau_to_foundation(game: &KlondikeGame) -> Option<HintSuggestion> {
    game.tableau().iter().enumerate().find_map(|(src, pile)| {
        let card = pile.last().copied().filter(|card| card.face_up)?;
        let dst = game.first_accepting_foundation(card)?;
        Some(HintSuggestion {
            text: format!(
                "Move {} from tableau pile {} to foundation pile {}",
                card.name(),
                src + 1,
                dst + 1
            ),
            card: Some(card),
            source: Some(PileRef::Tableau(src)),
            target: Some(PileRef::Foundation(dst)),
            hint_move: Some(HintMove::TableauTopToFoundation { src, dst }),
        })
    })
}

fn tableau_to_tableau(game: &KlondikeGame) -> Option<HintSuggestion> {
    let tableau = game.tableau();
    for (src, source) in tableau.iter().enumerate() {
        let Some(first_up) = first_face_up_index(source) else {
            continue;
        };
        for (start, &card) in source.iter().enumerate().skip(first_up) {
            for (dst, target) in tableau.iter().enumerate() {
                if dst == src || !can_stack_tableau(target.last(), card) {
                    continue;
                }
                let destination = if target.is_empty() {
                    format!("empty tableau pile {}", dst + 1)
                } else {
                    format!("tableau pile {}", dst + 1)
                };
                return Some(HintSuggestion {
                    text: format!(
                        "Move {} from tableau pile {} to {}",
                        card.name(),
                        src + 1,
                        destination
                    ),
                    card: Some(card),
                    source: Some(PileRef::Tableau(src)),
                    target: Some(PileRef::Tableau(dst)),
                    hint_move: Some(HintMove::TableauToTableau { src, start, dst }),
                });
            }
        }
    }
    None
}

fn draw_from_stock(game: &KlondikeGame) -> Option<HintSuggestion> {
    if game.stock_len() == 0 {
        return None;
    }
    Some(HintSuggestion {
        text: DRAW_TEXT.to_string(),
        card: None,
        source: Some(PileRef::Stock),
        target: Some(PileRef::Waste),
        hint_move: Some(HintMove::Draw),
    })
}
