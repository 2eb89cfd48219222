use crate::domain::Chips;

use thiserror::Error;

/// Ошибки движка покера.
///
/// Все проверки делаются до любых изменений состояния: если вернулась
/// ошибка, раздача осталась ровно такой же, как до вызова.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Игрок {player} хочет поставить {amount}, но у него только {stack}")]
    InsufficientFunds {
        player: String,
        amount: Chips,
        stack: Chips,
    },

    #[error("Игрок {player} не может рейзить: {amount} не превышает ставку {to_match}")]
    InvalidRaise {
        player: String,
        amount: Chips,
        to_match: Chips,
    },

    #[error("Игрок {player} не может сделать check – нужно уравнять ставку")]
    IllegalCheck { player: String },

    #[error("Игрок {player} не может сделать call – нет ставки для уравнивания")]
    IllegalCall { player: String },

    #[error("Раздача уже завершена, для новой игры начните новую раздачу")]
    HandAlreadyComplete,

    #[error("Некорректные параметры раздачи: {0}")]
    InvalidSetup(String),

    #[error("Колода закончилась")]
    DeckExhausted,
}
