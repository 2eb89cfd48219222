use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;

/// Игрок за столом.
///
/// Создаётся один раз и живёт между раздачами. Карманные карты и флаги
/// сбрасываются в начале каждой раздачи (`reset_for_hand`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    /// Фишки, которые ещё не поставлены.
    pub stack: Chips,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Сколько игрок уже вложил на текущей улице.
    pub current_bet: Chips,
    pub has_folded: bool,
    pub has_checked: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: Chips) -> Self {
        Self {
            name: name.into(),
            stack,
            hole_cards: Vec::new(),
            current_bet: Chips::ZERO,
            has_folded: false,
            has_checked: false,
        }
    }

    /// Может ли игрок ещё делать ставки: не сфолдил и есть фишки.
    pub fn is_active(&self) -> bool {
        !self.has_folded && !self.stack.is_zero()
    }

    /// В оллыне: в раздаче, но фишек больше нет.
    pub fn is_all_in(&self) -> bool {
        !self.has_folded && self.stack.is_zero()
    }

    /// Списать до `amount` фишек со стека в текущую ставку.
    /// Возвращает сколько реально списано (не больше стека).
    pub fn bet_chips(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.stack);
        self.stack -= real;
        self.current_bet += real;
        real
    }

    pub fn add_chips(&mut self, amount: Chips) {
        self.stack += amount;
    }

    /// Фолд: карты уходят в мак.
    pub fn fold(&mut self) {
        self.has_folded = true;
        self.hole_cards.clear();
    }

    pub fn check(&mut self) {
        self.has_checked = true;
    }

    /// Сброс на новую улицу.
    pub fn reset_for_street(&mut self) {
        self.current_bet = Chips::ZERO;
        self.has_checked = false;
    }

    /// Сброс на новую раздачу.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.current_bet = Chips::ZERO;
        self.has_folded = false;
        self.has_checked = false;
    }
}
