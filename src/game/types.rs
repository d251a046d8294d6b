use std::fmt;

use serde::{Deserialize, Serialize};

use super::{rank_label, rank_name, FOUNDATION_COUNT, TABLEAU_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawMode {
    One,
    Three,
}

impl DrawMode {
    pub fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Three => 3,
        }
    }

    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(Self::One),
            3 => Some(Self::Three),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// Canonical deck order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    pub fn color(self) -> Color {
        if self.is_red() {
            Color::Red
        } else {
            Color::Black
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
    pub face_up: bool,
}

impl Card {
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    pub fn label(&self) -> String {
        format!("{}{}", rank_label(self.rank), self.suit.short())
    }

    /// "Queen of Hearts"
    pub fn name(&self) -> String {
        format!("{} of {}", rank_name(self.rank), self.suit.name())
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }

    pub fn color_red(&self) -> bool {
        self.suit.is_red()
    }

    /// Identity ignores orientation.
    pub fn same_card(&self, other: &Card) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }

    /// Position of this card in a canonical 52-card deck.
    pub fn deck_index(&self) -> Option<usize> {
        if !(1..=13).contains(&self.rank) {
            return None;
        }
        Some(self.suit.index() * 13 + usize::from(self.rank - 1))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Tagged pile address. Indices are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum PileRef {
    Stock,
    Waste,
    Foundation(usize),
    Tableau(usize),
}

impl fmt::Display for PileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileRef::Stock => f.write_str("stock"),
            PileRef::Waste => f.write_str("waste"),
            PileRef::Foundation(index) => write!(f, "foundation pile {}", index + 1),
            PileRef::Tableau(index) => write!(f, "tableau pile {}", index + 1),
        }
    }
}

/// Why a pile-level move was refused. These are expected user mistakes, not
/// engine faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    EmptySource,
    CardNotInSource,
    CardFaceDown,
    NotTopCard,
    IllegalPlacement,
    NoSuchPile,
    SamePile,
    NotARun,
    UnsupportedSource,
    UnsupportedDestination,
    NothingToDo,
}

impl RejectReason {
    pub fn describe(self) -> &'static str {
        match self {
            Self::EmptySource => "the source pile is empty",
            Self::CardNotInSource => "that card is not in the source pile",
            Self::CardFaceDown => "face-down cards cannot be moved",
            Self::NotTopCard => "only the top card can go there",
            Self::IllegalPlacement => "the card does not fit on that pile",
            Self::NoSuchPile => "no such pile",
            Self::SamePile => "source and destination are the same pile",
            Self::NotARun => "the cards above are not an ordered run",
            Self::UnsupportedSource => "cards cannot be taken from there",
            Self::UnsupportedDestination => "cards cannot be dropped there",
            Self::NothingToDo => "nothing to do",
        }
    }
}

pub type MoveResult<T = ()> = Result<T, RejectReason>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KlondikeGame {
    pub(super) stock: Vec<Card>,
    pub(super) waste: Vec<Card>,
    pub(super) foundations: [Vec<Card>; FOUNDATION_COUNT],
    pub(super) tableau: [Vec<Card>; TABLEAU_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawResult {
    DrewFromStock,
    RecycledWaste,
    NoOp,
}

/// Result of auditing the 52-card identity set across all piles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardCensus {
    pub missing: Vec<Card>,
    pub duplicated: Vec<Card>,
    pub foreign: Vec<Card>,
}

impl CardCensus {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.duplicated.is_empty() && self.foreign.is_empty()
    }
}
