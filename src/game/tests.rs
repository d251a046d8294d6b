use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;

fn card(suit: Suit, rank: u8, face_up: bool) -> Card {
    Card {
        suit,
        rank,
        face_up,
    }
}

fn empty_game() -> KlondikeGame {
    KlondikeGame::empty()
}

#[test]
fn full_deck_is_canonical_and_face_down() {
    let deck = full_deck();
    assert_eq!(deck.len(), 52);
    assert!(deck.iter().all(|card| !card.face_up));
    assert_eq!(deck[0], card(Suit::Hearts, 1, false));
    assert_eq!(deck[12], card(Suit::Hearts, 13, false));
    assert_eq!(deck[13], card(Suit::Diamonds, 1, false));
    assert_eq!(deck[51], card(Suit::Spades, 13, false));

    let unique: HashSet<(Suit, u8)> = deck.iter().map(|c| (c.suit, c.rank)).collect();
    assert_eq!(unique.len(), 52);
}

#[test]
fn shuffle_keeps_every_card() {
    let mut deck = full_deck();
    let mut rng = StdRng::seed_from_u64(11);
    shuffle(&mut deck, &mut rng);

    assert_ne!(deck, full_deck());
    let mut sorted = deck.clone();
    sorted.sort_by_key(|c| c.deck_index());
    assert_eq!(sorted, full_deck());
}

#[test]
fn shuffle_tolerates_tiny_decks() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut empty: Vec<Card> = Vec::new();
    shuffle(&mut empty, &mut rng);
    assert!(empty.is_empty());

    let mut single = vec![card(Suit::Clubs, 4, false)];
    shuffle(&mut single, &mut rng);
    assert_eq!(single, vec![card(Suit::Clubs, 4, false)]);
}

#[test]
fn new_game_has_full_deck_accounted_for() {
    let game = KlondikeGame::new_shuffled();

    let tableau_count: usize = game.tableau.iter().map(Vec::len).sum();
    let foundations_count: usize = game.foundations.iter().map(Vec::len).sum();
    let total = game.stock.len() + game.waste.len() + foundations_count + tableau_count;

    assert_eq!(total, 52);
    assert_eq!(tableau_count, 28);
    assert_eq!(game.stock.len(), 24);
    assert_eq!(game.waste.len(), 0);
    assert!(game.census().is_complete());
}

#[test]
fn deal_builds_staircase_with_only_last_card_face_up() {
    let game = KlondikeGame::new_with_seed(5);

    for (col, pile) in game.tableau.iter().enumerate() {
        assert_eq!(pile.len(), col + 1);
        let (last, rest) = pile.split_last().unwrap();
        assert!(last.face_up);
        assert!(rest.iter().all(|c| !c.face_up));
    }
    assert!(game.stock.iter().all(|c| !c.face_up));
}

#[test]
fn deal_pops_from_the_end_of_the_deck() {
    let deck = full_deck();
    let game = KlondikeGame::deal(deck.clone());

    // First round hands out the last seven cards, one per pile.
    for col in 0..7 {
        assert!(game.tableau[col][0].same_card(&deck[51 - col]));
    }
    // Second round starts at pile 1.
    assert!(game.tableau[1][1].same_card(&deck[44]));
    // The untouched front of the deck becomes the stock in order.
    assert_eq!(game.stock.len(), 24);
    assert!(game.stock[0].same_card(&deck[0]));
    assert!(game.stock[23].same_card(&deck[23]));
}

#[test]
fn seeded_games_are_deterministic() {
    let game_a = KlondikeGame::new_with_seed(42);
    let game_b = KlondikeGame::new_with_seed(42);
    let game_c = KlondikeGame::new_with_seed(43);

    assert_eq!(game_a, game_b);
    assert_ne!(game_a, game_c);
}

#[test]
fn draw_moves_one_card_from_stock_to_waste_face_up() {
    let mut game = empty_game();
    game.stock.push(card(Suit::Spades, 7, false));

    let result = game.draw_or_recycle_with_count(1);

    assert_eq!(result, DrawResult::DrewFromStock);
    assert_eq!(game.stock.len(), 0);
    assert_eq!(game.waste.len(), 1);
    assert!(game.waste[0].face_up);
    assert_eq!(game.waste[0].rank, 7);
}

#[test]
fn draw_recycles_waste_back_to_stock_reversed_face_down() {
    let mut game = empty_game();
    game.waste.push(card(Suit::Hearts, 2, true));
    game.waste.push(card(Suit::Clubs, 9, true));

    let result = game.draw_or_recycle_with_count(1);

    assert_eq!(result, DrawResult::RecycledWaste);
    assert_eq!(game.waste.len(), 0);
    assert_eq!(game.stock.len(), 2);
    assert!(game.stock.iter().all(|c| !c.face_up));
    assert_eq!(game.stock[0].rank, 9);
    // The card drawn first comes back on top.
    assert_eq!(game.stock[1].rank, 2);
}

#[test]
fn draw_with_both_piles_empty_is_a_noop() {
    let mut game = empty_game();
    assert_eq!(game.draw_or_recycle_with_count(3), DrawResult::NoOp);
}

#[test]
fn draw_three_with_low_stock_draws_remaining_cards_only() {
    let mut game = empty_game();
    game.stock.push(card(Suit::Spades, 12, false));
    game.stock.push(card(Suit::Spades, 13, false));

    let result = game.draw_or_recycle_with_count(DrawMode::Three.count());

    assert_eq!(result, DrawResult::DrewFromStock);
    assert_eq!(game.stock.len(), 0);
    assert_eq!(game.waste.len(), 2);
    assert_eq!(game.waste_top().map(|c| c.rank), Some(12));
    assert!(game.waste.iter().all(|card| card.face_up));
}

#[test]
fn foundation_accepts_ace_on_empty_and_rejects_suit_mismatch() {
    let mut game = empty_game();
    assert!(game.can_place(card(Suit::Hearts, 1, true), PileRef::Foundation(0)));

    game.foundations[1].push(card(Suit::Spades, 1, true));
    game.foundations[1].push(card(Suit::Spades, 2, true));
    assert!(!game.can_place(card(Suit::Hearts, 3, true), PileRef::Foundation(1)));
    assert!(!game.can_place(card(Suit::Hearts, 2, true), PileRef::Foundation(1)));
    assert!(game.can_place(card(Suit::Spades, 3, true), PileRef::Foundation(1)));
}

#[test]
fn tableau_placement_follows_klondike_rules() {
    let mut game = empty_game();
    assert!(game.can_place(card(Suit::Spades, 13, true), PileRef::Tableau(0)));
    assert!(!game.can_place(card(Suit::Spades, 12, true), PileRef::Tableau(0)));

    game.tableau[0].push(card(Suit::Spades, 13, true));
    assert!(game.can_place(card(Suit::Hearts, 12, true), PileRef::Tableau(0)));
    assert!(!game.can_place(card(Suit::Hearts, 11, true), PileRef::Tableau(0)));
    assert!(!game.can_place(card(Suit::Clubs, 12, true), PileRef::Tableau(0)));

    game.tableau[1].push(card(Suit::Spades, 13, false));
    assert!(!game.can_place(card(Suit::Hearts, 12, true), PileRef::Tableau(1)));
}

#[test]
fn placement_onto_missing_or_wrong_kind_of_pile_is_refused() {
    let game = empty_game();
    let ace = card(Suit::Clubs, 1, true);
    assert!(!game.can_place(ace, PileRef::Foundation(4)));
    assert!(!game.can_place(card(Suit::Clubs, 13, true), PileRef::Tableau(7)));
    assert!(!game.can_place(ace, PileRef::Waste));
    assert!(!game.can_place(ace, PileRef::Stock));
}

#[test]
fn out_of_range_ranks_are_refused_without_overflow() {
    let mut game = empty_game();
    game.tableau[0].push(card(Suit::Spades, 0, true));
    game.foundations[0].push(card(Suit::Hearts, 255, true));

    assert!(!game.can_place(card(Suit::Hearts, 255, true), PileRef::Tableau(0)));
    assert!(!game.can_place(card(Suit::Hearts, 0, true), PileRef::Foundation(0)));
    assert!(!is_valid_face_up_run(&[
        card(Suit::Spades, 0, true),
        card(Suit::Hearts, 255, true),
    ]));
}

#[test]
fn first_accepting_foundation_scans_in_order() {
    let mut game = empty_game();
    game.foundations[0].push(card(Suit::Clubs, 1, true));
    assert_eq!(game.first_accepting_foundation(card(Suit::Hearts, 1, true)), Some(1));
    assert_eq!(game.first_accepting_foundation(card(Suit::Clubs, 2, true)), Some(0));
    assert_eq!(game.first_accepting_foundation(card(Suit::Clubs, 3, true)), None);
}

#[test]
fn waste_to_foundation_requires_ace_then_next_rank_same_suit() {
    let mut game = empty_game();
    game.waste.push(card(Suit::Clubs, 2, true));
    assert_eq!(
        game.move_waste_to_foundation(0),
        Err(RejectReason::IllegalPlacement)
    );

    game.waste.clear();
    game.waste.push(card(Suit::Clubs, 1, true));
    assert_eq!(game.move_waste_to_foundation(2), Ok(()));
    assert_eq!(game.foundations[2].len(), 1);

    game.waste.push(card(Suit::Clubs, 2, true));
    assert_eq!(game.move_waste_to_foundation(2), Ok(()));
    assert_eq!(game.foundations[2].len(), 2);

    game.waste.push(card(Suit::Spades, 3, true));
    assert!(game.move_waste_to_foundation(2).is_err());
    assert_eq!(game.move_waste_to_foundation(9), Err(RejectReason::NoSuchPile));
}

#[test]
fn waste_to_tableau_enforces_klondike_rules() {
    let mut game = empty_game();

    game.waste.push(card(Suit::Hearts, 13, true));
    assert!(game.move_waste_to_tableau(0).is_ok());
    assert_eq!(game.tableau[0].len(), 1);

    game.waste.push(card(Suit::Diamonds, 12, true));
    assert!(game.move_waste_to_tableau(0).is_err());

    game.waste.pop();
    game.waste.push(card(Suit::Spades, 12, true));
    assert!(game.move_waste_to_tableau(0).is_ok());
    assert_eq!(game.tableau[0].len(), 2);
}

#[test]
fn tableau_move_flips_new_top_card() {
    let mut game = empty_game();
    game.tableau[0].push(card(Suit::Clubs, 6, false));
    game.tableau[0].push(card(Suit::Hearts, 5, true));
    game.tableau[1].push(card(Suit::Spades, 6, true));

    assert_eq!(game.move_tableau_run_to_tableau(0, 1, 1), Ok(true));
    assert!(game.tableau[0][0].face_up);
    assert_eq!(game.tableau[1].last().map(|c| c.rank), Some(5));
}

#[test]
fn tableau_move_reports_no_flip_when_exposed_card_already_face_up() {
    let mut game = empty_game();
    game.tableau[0].push(card(Suit::Spades, 13, true));
    game.tableau[0].push(card(Suit::Diamonds, 1, true));

    assert_eq!(game.move_tableau_top_to_foundation(0, 0), Ok(false));
    assert!(game.tableau[0][0].face_up);
}

#[test]
fn tableau_to_foundation_rejects_face_down_cards() {
    let mut game = empty_game();
    game.tableau[0].push(card(Suit::Diamonds, 1, false));

    assert_eq!(
        game.move_tableau_top_to_foundation(0, 0),
        Err(RejectReason::CardFaceDown)
    );
    assert!(game.foundations[0].is_empty());
}

#[test]
fn tableau_run_move_requires_valid_face_up_sequence() {
    let mut game = empty_game();
    game.tableau[0].push(card(Suit::Spades, 9, false));
    game.tableau[0].push(card(Suit::Hearts, 8, true));
    game.tableau[0].push(card(Suit::Clubs, 7, true));
    game.tableau[1].push(card(Suit::Clubs, 9, true));

    assert!(game.can_move_tableau_run_to_tableau(0, 1, 1));
    assert_eq!(game.move_tableau_run_to_tableau(0, 1, 1), Ok(true));
    assert_eq!(game.tableau[0].len(), 1);
    assert!(game.tableau[0][0].face_up);
    assert_eq!(game.tableau[1].len(), 3);
    assert_eq!(game.tableau[1][1].rank, 8);
    assert_eq!(game.tableau[1][2].rank, 7);
}

#[test]
fn tableau_run_move_rejects_invalid_start() {
    let mut game = empty_game();
    game.tableau[0].push(card(Suit::Spades, 9, true));
    game.tableau[0].push(card(Suit::Hearts, 8, true));
    game.tableau[0].push(card(Suit::Diamonds, 7, true));
    game.tableau[1].push(card(Suit::Diamonds, 10, true));

    assert!(!game.can_move_tableau_run_to_tableau(0, 0, 1));
    assert_eq!(
        game.move_tableau_run_to_tableau(0, 0, 1),
        Err(RejectReason::NotARun)
    );
    assert_eq!(
        game.move_tableau_run_to_tableau(0, 0, 0),
        Err(RejectReason::SamePile)
    );
}

#[test]
fn movable_run_start_finds_ordered_suffix() {
    let mut game = empty_game();
    game.tableau[0].push(card(Suit::Spades, 2, false));
    game.tableau[0].push(card(Suit::Spades, 9, true));
    game.tableau[0].push(card(Suit::Hearts, 8, true));
    game.tableau[0].push(card(Suit::Clubs, 7, true));
    assert_eq!(game.movable_run_start(0), Some(1));

    game.tableau[1].push(card(Suit::Diamonds, 5, false));
    assert_eq!(game.movable_run_start(1), None);
    assert_eq!(game.movable_run_start(2), None);
}

#[test]
fn foundation_top_returns_to_tableau_when_it_fits() {
    let mut game = empty_game();
    game.foundations[3].push(card(Suit::Hearts, 1, true));
    game.foundations[3].push(card(Suit::Hearts, 2, true));
    game.tableau[4].push(card(Suit::Clubs, 3, true));

    assert!(game.can_move_foundation_top_to_tableau(3, 4));
    assert_eq!(game.move_foundation_top_to_tableau(3, 4), Ok(()));
    assert_eq!(game.foundations[3].len(), 1);
    assert_eq!(game.tableau[4].len(), 2);
    assert_eq!(
        game.move_foundation_top_to_tableau(3, 4),
        Err(RejectReason::IllegalPlacement)
    );
}

#[test]
fn flip_tableau_top_only_turns_face_down_cards() {
    let mut game = empty_game();
    game.tableau[2].push(card(Suit::Clubs, 4, false));

    assert_eq!(game.flip_tableau_top(2), Ok(()));
    assert!(game.tableau[2][0].face_up);
    assert_eq!(game.flip_tableau_top(2), Err(RejectReason::NothingToDo));
    assert_eq!(game.flip_tableau_top(3), Err(RejectReason::EmptySource));
    assert_eq!(game.flip_tableau_top(8), Err(RejectReason::NoSuchPile));
}

#[test]
fn census_reports_missing_and_duplicated_cards() {
    let mut game = KlondikeGame::new_with_seed(9);
    assert!(game.census().is_complete());

    let stolen = game.stock.pop().unwrap();
    let census = game.census();
    assert_eq!(census.missing.len(), 1);
    assert!(census.missing[0].same_card(&stolen));

    game.stock.push(stolen);
    game.waste.push(stolen);
    let census = game.census();
    assert!(census.missing.is_empty());
    assert_eq!(census.duplicated.len(), 1);

    game.waste.clear();
    game.waste.push(card(Suit::Clubs, 14, true));
    assert_eq!(game.census().foreign.len(), 1);
}

#[test]
fn ordering_checks_flag_broken_piles() {
    let mut game = empty_game();
    game.foundations[0].push(card(Suit::Hearts, 1, true));
    game.foundations[0].push(card(Suit::Hearts, 2, true));
    assert!(game.foundations_are_ordered());
    game.foundations[0].push(card(Suit::Spades, 3, true));
    assert!(!game.foundations_are_ordered());

    game.tableau[0].push(card(Suit::Hearts, 9, false));
    game.tableau[0].push(card(Suit::Clubs, 8, true));
    assert!(game.tableau_faces_are_ordered());
    game.tableau[0].push(card(Suit::Hearts, 7, false));
    assert!(!game.tableau_faces_are_ordered());
}

#[test]
fn rank_labels_are_correct() {
    assert_eq!(rank_label(1), "A");
    assert_eq!(rank_label(11), "J");
    assert_eq!(rank_label(12), "Q");
    assert_eq!(rank_label(13), "K");
    assert_eq!(rank_label(99), "?");
    assert_eq!(rank_name(1), "Ace");
    assert_eq!(rank_name(7), "7");
    assert_eq!(rank_name(12), "Queen");
}

#[test]
fn card_names_and_colors() {
    let queen = card(Suit::Hearts, 12, true);
    assert_eq!(queen.name(), "Queen of Hearts");
    assert_eq!(queen.label(), "QH");
    assert_eq!(queen.color(), Color::Red);
    assert_eq!(card(Suit::Spades, 10, false).color(), Color::Black);
    assert_eq!(PileRef::Tableau(2).to_string(), "tableau pile 3");
    assert_eq!(DrawMode::from_count(3), Some(DrawMode::Three));
    assert_eq!(DrawMode::from_count(2), None);
}
