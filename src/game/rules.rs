use super::*;

pub fn can_stack_foundation(top: Option<&Card>, card: Card) -> bool {
    match top {
        None => card.rank == 1,
        Some(top_card) => {
            top_card.suit == card.suit && top_card.rank.checked_add(1) == Some(card.rank)
        }
    }
}

pub fn can_stack_tableau(top: Option<&Card>, card: Card) -> bool {
    match top {
        None => card.rank == 13,
        Some(top_card) => {
            top_card.face_up
                && top_card.color_red() != card.color_red()
                && top_card.rank.checked_sub(1) == Some(card.rank)
        }
    }
}

/// Face up, alternating colors, each card one rank below the one it covers.
pub fn is_valid_face_up_run(run: &[Card]) -> bool {
    run.iter().all(|card| card.face_up)
        && run.windows(2).all(|pair| {
            let a = pair[0];
            let b = pair[1];
            a.color_red() != b.color_red() && a.rank.checked_sub(1) == Some(b.rank)
        })
}

pub fn first_face_up_index(pile: &[Card]) -> Option<usize> {
    pile.iter().position(|card| card.face_up)
}

impl KlondikeGame {
    /// Whether `card` may land on `dst`. Runs are judged by their head card.
    pub fn can_place(&self, card: Card, dst: PileRef) -> bool {
        match dst {
            PileRef::Foundation(idx) => self
                .foundations
                .get(idx)
                .is_some_and(|pile| can_stack_foundation(pile.last(), card)),
            PileRef::Tableau(idx) => self
                .tableau
                .get(idx)
                .is_some_and(|pile| can_stack_tableau(pile.last(), card)),
            PileRef::Stock | PileRef::Waste => false,
        }
    }

    /// Lowest-numbered foundation that accepts `card`.
    pub fn first_accepting_foundation(&self, card: Card) -> Option<usize> {
        self.foundations
            .iter()
            .position(|pile| can_stack_foundation(pile.last(), card))
    }

    /// Start of the draggable face-up suffix of a tableau pile.
    pub fn movable_run_start(&self, col: usize) -> Option<usize> {
        let pile = self.tableau.get(col)?;
        let first = first_face_up_index(pile)?;
        (first..pile.len()).find(|&start| is_valid_face_up_run(&pile[start..]))
    }

    /// Index of `card` inside `pile`, matched by identity.
    pub fn locate(&self, card: Card, pile: PileRef) -> Option<usize> {
        self.pile(pile)?.iter().position(|c| c.same_card(&card))
    }

    pub fn can_move_tableau_run_to_tableau(&self, src: usize, start: usize, dst: usize) -> bool {
        if src == dst || src >= TABLEAU_COUNT || dst >= TABLEAU_COUNT {
            return false;
        }
        let source = &self.tableau[src];
        if start >= source.len() || !is_valid_face_up_run(&source[start..]) {
            return false;
        }
        self.can_place(source[start], PileRef::Tableau(dst))
    }

    pub fn can_move_foundation_top_to_tableau(&self, src: usize, dst: usize) -> bool {
        self.foundations
            .get(src)
            .and_then(|pile| pile.last().copied())
            .is_some_and(|card| self.can_place(card, PileRef::Tableau(dst)))
    }
}
