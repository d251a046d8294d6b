use super::*;

impl KlondikeGame {
    pub fn move_waste_to_foundation(&mut self, dst: usize) -> MoveResult {
        let card = self.waste_top().ok_or(RejectReason::EmptySource)?;
        let pile = self.foundations.get(dst).ok_or(RejectReason::NoSuchPile)?;
        if !can_stack_foundation(pile.last(), card) {
            return Err(RejectReason::IllegalPlacement);
        }

        self.waste.pop();
        self.foundations[dst].push(card);
        Ok(())
    }

    pub fn move_waste_to_tableau(&mut self, dst: usize) -> MoveResult {
        let card = self.waste_top().ok_or(RejectReason::EmptySource)?;
        let pile = self.tableau.get(dst).ok_or(RejectReason::NoSuchPile)?;
        if !can_stack_tableau(pile.last(), card) {
            return Err(RejectReason::IllegalPlacement);
        }

        self.waste.pop();
        self.tableau[dst].push(card);
        Ok(())
    }

    /// Returns whether a face-down card was exposed and turned over.
    pub fn move_tableau_top_to_foundation(&mut self, src: usize, dst: usize) -> MoveResult<bool> {
        let source = self.tableau.get(src).ok_or(RejectReason::NoSuchPile)?;
        let card = source.last().copied().ok_or(RejectReason::EmptySource)?;
        if !card.face_up {
            return Err(RejectReason::CardFaceDown);
        }
        let pile = self.foundations.get(dst).ok_or(RejectReason::NoSuchPile)?;
        if !can_stack_foundation(pile.last(), card) {
            return Err(RejectReason::IllegalPlacement);
        }

        self.tableau[src].pop();
        self.foundations[dst].push(card);
        Ok(self.flip_top_tableau_if_needed(src))
    }

    /// Moves the suffix of `src` starting at `start`. Returns whether a
    /// face-down card was exposed and turned over.
    pub fn move_tableau_run_to_tableau(
        &mut self,
        src: usize,
        start: usize,
        dst: usize,
    ) -> MoveResult<bool> {
        if src >= TABLEAU_COUNT || dst >= TABLEAU_COUNT {
            return Err(RejectReason::NoSuchPile);
        }
        if src == dst {
            return Err(RejectReason::SamePile);
        }
        let source = &self.tableau[src];
        let first = source.get(start).copied().ok_or(RejectReason::CardNotInSource)?;
        if !first.face_up {
            return Err(RejectReason::CardFaceDown);
        }
        if !is_valid_face_up_run(&source[start..]) {
            return Err(RejectReason::NotARun);
        }
        if !can_stack_tableau(self.tableau[dst].last(), first) {
            return Err(RejectReason::IllegalPlacement);
        }

        let moved = self.tableau[src].split_off(start);
        self.tableau[dst].extend(moved);
        Ok(self.flip_top_tableau_if_needed(src))
    }

    pub fn move_foundation_top_to_tableau(&mut self, src: usize, dst: usize) -> MoveResult {
        let source = self.foundations.get(src).ok_or(RejectReason::NoSuchPile)?;
        let card = source.last().copied().ok_or(RejectReason::EmptySource)?;
        let pile = self.tableau.get(dst).ok_or(RejectReason::NoSuchPile)?;
        if !can_stack_tableau(pile.last(), card) {
            return Err(RejectReason::IllegalPlacement);
        }

        self.foundations[src].pop();
        self.tableau[dst].push(card);
        Ok(())
    }

    /// Turns a face-down top card face up.
    pub fn flip_tableau_top(&mut self, col: usize) -> MoveResult {
        let pile = self.tableau.get_mut(col).ok_or(RejectReason::NoSuchPile)?;
        let card = pile.last_mut().ok_or(RejectReason::EmptySource)?;
        if card.face_up {
            return Err(RejectReason::NothingToDo);
        }
        card.face_up = true;
        Ok(())
    }

    pub fn tableau_top(&self, col: usize) -> Option<Card> {
        self.tableau.get(col).and_then(|pile| pile.last().copied())
    }

    pub fn tableau_len(&self, col: usize) -> Option<usize> {
        self.tableau.get(col).map(Vec::len)
    }

    pub fn tableau_card(&self, col: usize, index: usize) -> Option<Card> {
        self.tableau
            .get(col)
            .and_then(|pile| pile.get(index))
            .copied()
    }

    pub fn waste_top(&self) -> Option<Card> {
        self.waste.last().copied()
    }

    fn flip_top_tableau_if_needed(&mut self, col: usize) -> bool {
        match self.tableau[col].last_mut() {
            Some(card) if !card.face_up => {
                card.face_up = true;
                true
            }
            _ => false,
        }
    }
}
