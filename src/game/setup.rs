use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

impl KlondikeGame {
    pub fn empty() -> Self {
        Self {
            stock: Vec::new(),
            waste: Vec::new(),
            foundations: std::array::from_fn(|_| Vec::new()),
            tableau: std::array::from_fn(|_| Vec::new()),
        }
    }

    pub fn new_shuffled() -> Self {
        let mut rng = rand::thread_rng();
        Self::new_with_seed(rng.gen())
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = full_deck();
        let mut rng = StdRng::seed_from_u64(seed);
        shuffle(&mut deck, &mut rng);
        Self::deal(deck)
    }

    /// Lays out a shuffled deck. The deck is consumed from its end, one card
    /// per pile per round, so pile `k` ends up with `k + 1` cards and only its
    /// last card face up. Whatever is left becomes the stock, face down.
    pub fn deal(mut deck: Vec<Card>) -> Self {
        let mut game = Self::empty();

        for round in 0..TABLEAU_COUNT {
            for col in round..TABLEAU_COUNT {
                let Some(mut card) = deck.pop() else {
                    break;
                };
                card.face_up = round == col;
                game.tableau[col].push(card);
            }
        }

        for card in &mut deck {
            card.face_up = false;
        }
        game.stock = deck;
        game
    }

    /// Assembles a position from explicit piles, e.g. to resume a layout
    /// produced elsewhere. Callers are expected to audit it with [`Self::census`].
    pub fn from_piles(
        stock: Vec<Card>,
        waste: Vec<Card>,
        foundations: [Vec<Card>; FOUNDATION_COUNT],
        tableau: [Vec<Card>; TABLEAU_COUNT],
    ) -> Self {
        Self {
            stock,
            waste,
            foundations,
            tableau,
        }
    }

    pub fn draw_or_recycle_with_count(&mut self, draw_count: u8) -> DrawResult {
        if !self.stock.is_empty() {
            let draw_count = usize::from(draw_count.max(1));
            for _ in 0..draw_count {
                let Some(mut card) = self.stock.pop() else {
                    break;
                };
                card.face_up = true;
                self.waste.push(card);
            }
            return DrawResult::DrewFromStock;
        }

        if self.waste.is_empty() {
            return DrawResult::NoOp;
        }

        while let Some(mut card) = self.waste.pop() {
            card.face_up = false;
            self.stock.push(card);
        }
        DrawResult::RecycledWaste
    }

    pub fn stock(&self) -> &[Card] {
        &self.stock
    }

    pub fn waste(&self) -> &[Card] {
        &self.waste
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn waste_len(&self) -> usize {
        self.waste.len()
    }

    pub fn foundations(&self) -> &[Vec<Card>; FOUNDATION_COUNT] {
        &self.foundations
    }

    pub fn tableau(&self) -> &[Vec<Card>; TABLEAU_COUNT] {
        &self.tableau
    }

    pub fn pile(&self, pile: PileRef) -> Option<&[Card]> {
        match pile {
            PileRef::Stock => Some(&self.stock),
            PileRef::Waste => Some(&self.waste),
            PileRef::Foundation(idx) => self.foundations.get(idx).map(Vec::as_slice),
            PileRef::Tableau(idx) => self.tableau.get(idx).map(Vec::as_slice),
        }
    }

    pub fn foundation_card_count(&self) -> usize {
        self.foundations.iter().map(Vec::len).sum()
    }

    pub fn is_won(&self) -> bool {
        self.foundation_card_count() == DECK_SIZE
    }

    pub fn census(&self) -> CardCensus {
        let mut seen = [0_u8; DECK_SIZE];
        let mut census = CardCensus::default();

        let all = self
            .stock
            .iter()
            .chain(&self.waste)
            .chain(self.foundations.iter().flatten())
            .chain(self.tableau.iter().flatten());
        for card in all {
            match card.deck_index() {
                Some(idx) => {
                    seen[idx] = seen[idx].saturating_add(1);
                    if seen[idx] == 2 {
                        census.duplicated.push(*card);
                    }
                }
                None => census.foreign.push(*card),
            }
        }

        for (idx, card) in full_deck().into_iter().enumerate() {
            if seen[idx] == 0 {
                census.missing.push(card);
            }
        }
        census
    }

    /// Every foundation runs Ace upward in one suit.
    pub fn foundations_are_ordered(&self) -> bool {
        self.foundations.iter().all(|pile| {
            pile.iter().enumerate().all(|(idx, card)| {
                usize::from(card.rank) == idx + 1 && card.suit == pile[0].suit
            })
        })
    }

    /// No face-up card sits beneath a face-down one in any tableau pile.
    pub fn tableau_faces_are_ordered(&self) -> bool {
        self.tableau
            .iter()
            .all(|pile| pile.windows(2).all(|pair| !pair[0].face_up || pair[1].face_up))
    }
}

/// The 52 cards face down, suit-major and rank-minor.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in 1..=13 {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// Fisher-Yates: walk from the last slot down to 1 and swap each slot with a
/// uniformly chosen slot at or below it.
pub fn shuffle<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.gen_range(0..=i);
        deck.swap(i, j);
    }
}
