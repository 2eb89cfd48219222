use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::Player;
use crate::domain::SeatIndex;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Ставка на момент начала улицы. Если `total_bet` её не превысил,
    /// повышений на улице не было.
    pub street_start_bet: Chips,
    pub big_blind_seat: SeatIndex,
    pub big_blind: Chips,
    /// BB уже воспользовался своим правом хода на префлопе.
    pub big_blind_acted: bool,
}

impl BettingState {
    pub fn preflop(big_blind_seat: SeatIndex, big_blind: Chips) -> Self {
        Self {
            street: Street::Preflop,
            street_start_bet: Chips::ZERO,
            big_blind_seat,
            big_blind,
            big_blind_acted: false,
        }
    }

    /// Состояние для следующей улицы (блайнды остаются для справки).
    pub fn next_street(&self, street: Street) -> Self {
        Self {
            street,
            street_start_bet: Chips::ZERO,
            big_blind_seat: self.big_blind_seat,
            big_blind: self.big_blind,
            big_blind_acted: true,
        }
    }

    /// Отметить, что seat сделал ход.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        if self.street == Street::Preflop && seat == self.big_blind_seat {
            self.big_blind_acted = true;
        }
    }

    pub fn raise_occurred(&self, total_bet: Chips) -> bool {
        total_bet != self.street_start_bet
    }

    /// Завершена ли улица:
    /// - без повышений: все активные сделали check;
    /// - с повышением: у всех активных `current_bet == total_bet`;
    /// - префлоп: BB, уравненный на своей ставке, ходит ещё раз.
    pub fn is_street_complete(&self, players: &[Player], total_bet: Chips) -> bool {
        if !self.raise_occurred(total_bet) {
            return players
                .iter()
                .filter(|p| p.is_active())
                .all(|p| p.has_checked);
        }

        if self.street == Street::Preflop
            && !self.big_blind_acted
            && total_bet <= self.big_blind
            && players
                .get(self.big_blind_seat)
                .is_some_and(Player::is_active)
        {
            return false;
        }

        players
            .iter()
            .filter(|p| p.is_active())
            .all(|p| p.current_bet == total_bet)
    }
}
