use thiserror::Error;

use crate::domain::table::TableError;
use crate::engine::EngineError;
use crate::infra::PersistenceError;

/// Ошибки внешнего API (то, что видит клиент / CLI).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Неправильные входные данные (например, неизвестная цель show).
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    /// Команда не может быть выполнена в текущем состоянии стола.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Ошибка движка (ставки, действия).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Не удалось загрузить или сохранить игру.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
