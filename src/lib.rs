//! Движок Texas Hold'em: ставки, сайд-поты и расчёт одной раздачи.
//!
//! Слои:
//! - `domain` – карты, колода, фишки, игроки, стол;
//! - `eval` – оценка силы рук;
//! - `engine` – раздача (`Round`) и банк (`Pot`);
//! - `infra` – RNG и хранилище игр;
//! - `api` – команды и запросы поверх хранилища.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
