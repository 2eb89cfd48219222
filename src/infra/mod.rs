//! Инфраструктурный слой вокруг покерного движка:
//! - RNG-реализации для движка;
//! - хранилище игр (in-memory / JSON-файл).

pub mod persistence;
pub mod rng;

pub use persistence::{GameStore, InMemoryGameStore, JsonFileStore, PersistenceError};
pub use rng::*;
