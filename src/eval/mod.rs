//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `evaluate_best_hand_from(cards) -> HandRank` (5..=7 карт)

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_best_hand, evaluate_best_hand_from, evaluate_five};
pub use hand_rank::{HandRank, HandType};
