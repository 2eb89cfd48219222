use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::Error as _;
use thiserror::Error;

use crate::domain::table::Table;
use crate::domain::GameId;

/// Ошибки хранилища игр.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Файл состояния {0} не существует")]
    FileDoesNotExist(PathBuf),

    #[error("Игра {0} не найдена")]
    GameDoesNotExist(GameId),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] io::Error),

    #[error("Error loading state: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// Абстракция хранилища столов.
///
/// Удобна:
/// - для тестов (`InMemoryGameStore`),
/// - для CLI, который между вызовами держит всё в JSON-файле.
pub trait GameStore {
    /// Сохранить стол под номером `id` (перезаписывает).
    fn save(&mut self, id: GameId, table: &Table) -> Result<(), PersistenceError>;

    /// Загрузить стол.
    fn load(&self, id: GameId) -> Result<Table, PersistenceError>;

    /// Свободный номер для новой игры: максимальный + 1, либо 0.
    fn next_id(&self) -> Result<GameId, PersistenceError>;
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: BTreeMap<GameId, Table>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl GameStore for InMemoryGameStore {
    fn save(&mut self, id: GameId, table: &Table) -> Result<(), PersistenceError> {
        self.games.insert(id, table.clone());
        Ok(())
    }

    fn load(&self, id: GameId) -> Result<Table, PersistenceError> {
        self.games
            .get(&id)
            .cloned()
            .ok_or(PersistenceError::GameDoesNotExist(id))
    }

    fn next_id(&self) -> Result<GameId, PersistenceError> {
        Ok(next_free_id(&self.games))
    }
}

/// Все игры в одном JSON-файле: объект `id -> состояние стола`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<GameId, Table>, PersistenceError> {
        if !self.path.exists() {
            return Err(PersistenceError::FileDoesNotExist(self.path.clone()));
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all(&self, games: &BTreeMap<GameId, Table>) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string_pretty(games)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl GameStore for JsonFileStore {
    fn save(&mut self, id: GameId, table: &Table) -> Result<(), PersistenceError> {
        let mut games = match self.read_all() {
            Ok(games) => games,
            Err(PersistenceError::FileDoesNotExist(_)) => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        games.insert(id, table.clone());
        self.write_all(&games)?;

        log::debug!("Игра {id} сохранена в {}", self.path.display());
        Ok(())
    }

    fn load(&self, id: GameId) -> Result<Table, PersistenceError> {
        let mut games = self.read_all()?;
        let table = games
            .remove(&id)
            .ok_or(PersistenceError::GameDoesNotExist(id))?;
        table
            .check_integrity()
            .map_err(|msg| PersistenceError::Corrupted(serde_json::Error::custom(msg)))?;

        log::debug!("Игра {id} загружена из {}", self.path.display());
        Ok(table)
    }

    fn next_id(&self) -> Result<GameId, PersistenceError> {
        match self.read_all() {
            Ok(games) => Ok(next_free_id(&games)),
            Err(PersistenceError::FileDoesNotExist(_)) => Ok(0),
            Err(e) => Err(e),
        }
    }
}

fn next_free_id(games: &BTreeMap<GameId, Table>) -> GameId {
    games.keys().next_back().map_or(0, |max| max + 1)
}
