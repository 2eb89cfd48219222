//! Покерный движок: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `Round` (одна раздача)
//! Основные операции:
//!   - `Round::new` – блайнды, раздача карт
//!   - `Round::do_action` – применить действие текущего игрока
//!   - `Pot::determine_winner` – выплата по всем узлам банка
//!
//! Движок ничего не логирует и не печатает: ошибки возвращаются наверх.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod positions;
pub mod pot;

pub use actions::Action;
pub use betting::BettingState;
pub use errors::EngineError;
pub use game_loop::{Round, MAX_PLAYERS};
pub use positions::{blind_seats, next_active_seat};
pub use pot::{Pot, PotNode};

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
