mod klondike_moves;
mod rules;
mod setup;
mod types;

#[cfg(test)]
mod tests;

pub use rules::{can_stack_foundation, can_stack_tableau, first_face_up_index, is_valid_face_up_run};
pub use setup::{full_deck, shuffle};
pub use types::*;

pub const FOUNDATION_COUNT: usize = 4;
pub const TABLEAU_COUNT: usize = 7;
pub const DECK_SIZE: usize = 52;

pub fn rank_label(rank: u8) -> &'static str {
    match rank {
        1 => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        11 => "J",
        12 => "Q",
        13 => "K",
        _ => "?",
    }
}

/// Long rank name used in hint sentences ("Ace", "7", "Queen").
pub fn rank_name(rank: u8) -> &'static str {
    match rank {
        1 => "Ace",
        11 => "Jack",
        12 => "Queen",
        13 => "King",
        _ => rank_label(rank),
    }
}
