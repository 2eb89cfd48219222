use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::SeatIndex;

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerDto {
    pub seat_index: SeatIndex,
    pub name: String,
    pub stack: Chips,
    pub current_bet: Chips,
    pub has_folded: bool,
    pub is_all_in: bool,
    /// Карманные карты – только для "героя".
    pub hole_cards: Option<Vec<Card>>,
}

/// Один узел банка: основной банк или сайд-пот.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotDto {
    pub size: Chips,
    pub players: Vec<SeatIndex>,
}

/// DTO стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub starting_stack: Chips,
    pub dealer_button: Option<SeatIndex>,
    pub hands_played: u64,
    /// Есть ли активная раздача.
    pub hand_in_progress: bool,
    /// Улица последней раздачи (если раздачи были).
    pub street: Option<Street>,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub pots: Vec<PotDto>,
    /// Ставка, которую нужно уравнять на текущей улице.
    pub current_bet: Chips,
    /// Текущий игрок, чей ход (если раздача идёт).
    pub current_actor_seat: Option<SeatIndex>,
    pub players: Vec<PlayerDto>,
    /// Объявления победителей последней завершённой раздачи.
    pub winners: Vec<String>,
}
