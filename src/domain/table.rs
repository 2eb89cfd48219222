use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::player::Player;
use crate::engine::{Action, EngineError, RandomSource, Round};

/// Индекс места за столом (0..players.len()-1).
pub type SeatIndex = usize;

/// Стейки стола (SB/BB).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }

    /// SB > 0 и BB >= SB.
    pub fn is_valid(&self) -> bool {
        !self.small_blind.is_zero() && self.big_blind >= self.small_blind
    }
}

/// Конфиг стола: лимиты и стартовый стек для новых игроков.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub stakes: TableStakes,
    pub starting_stack: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            stakes: TableStakes::new(Chips(5), Chips(10)),
            starting_stack: Chips(1000),
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), TableError> {
        if !self.stakes.is_valid() {
            return Err(TableError::InvalidStakes {
                small_blind: self.stakes.small_blind,
                big_blind: self.stakes.big_blind,
            });
        }
        if self.starting_stack.is_zero() {
            return Err(TableError::InvalidAmount(self.starting_stack));
        }
        Ok(())
    }
}

/// Ошибки жизненного цикла стола.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Раздача уже идёт, дождитесь её завершения")]
    HandInProgress,

    #[error("Нет активной раздачи")]
    NoHand,

    #[error("Игрок {0} уже сидит за столом")]
    DuplicatePlayer(String),

    #[error("Игрок {0} не найден")]
    PlayerNotFound(String),

    #[error("Некорректные блайнды {small_blind}/{big_blind}")]
    InvalidStakes { small_blind: Chips, big_blind: Chips },

    #[error("Некорректное количество фишек: {0}")]
    InvalidAmount(Chips),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Стол: игроки между раздачами + текущая (или последняя) раздача.
///
/// Во время раздачи игроки живут внутри `Round`; стол забирает их обратно
/// при первой операции после её завершения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub config: TableConfig,
    seats: Vec<Player>,
    round: Option<Round>,
    /// Место дилера в последней раздаче; `None`, если раздач ещё не было.
    dealer_button: Option<SeatIndex>,
    pub hands_played: u64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            config: TableConfig::default(),
            seats: Vec::new(),
            round: None,
            dealer_button: None,
            hands_played: 0,
        }
    }
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Идёт ли сейчас раздача (начата и не завершена).
    pub fn hand_in_progress(&self) -> bool {
        self.round.as_ref().is_some_and(|r| !r.is_complete())
    }

    /// Игроки в порядке мест. Во время раздачи – с их состоянием в ней.
    pub fn players(&self) -> &[Player] {
        match &self.round {
            Some(round) => round.players(),
            None => &self.seats,
        }
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn dealer(&self) -> Option<SeatIndex> {
        self.dealer_button
    }

    /// Согласованность загруженного состояния (см. `Round::check_integrity`).
    pub fn check_integrity(&self) -> Result<(), String> {
        match &self.round {
            Some(round) => round.check_integrity(),
            None => Ok(()),
        }
    }

    pub fn add_player(&mut self, name: &str, stack: Option<Chips>) -> Result<(), TableError> {
        self.ensure_idle()?;
        if self.seats.iter().any(|p| p.name == name) {
            return Err(TableError::DuplicatePlayer(name.to_string()));
        }
        let stack = stack.unwrap_or(self.config.starting_stack);
        if stack.is_zero() {
            return Err(TableError::InvalidAmount(stack));
        }

        log::info!("Игрок {name} садится за стол со стеком {stack}");
        self.seats.push(Player::new(name, stack));
        Ok(())
    }

    pub fn remove_player(&mut self, name: &str) -> Result<Player, TableError> {
        self.ensure_idle()?;
        let idx = self
            .seats
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| TableError::PlayerNotFound(name.to_string()))?;

        log::info!("Игрок {name} покидает стол");
        Ok(self.seats.remove(idx))
    }

    pub fn set_blinds(&mut self, small_blind: Chips, big_blind: Chips) -> Result<(), TableError> {
        self.ensure_idle()?;
        let stakes = TableStakes::new(small_blind, big_blind);
        if !stakes.is_valid() {
            return Err(TableError::InvalidStakes {
                small_blind,
                big_blind,
            });
        }

        log::debug!("Блайнды: {small_blind}/{big_blind}");
        self.config.stakes = stakes;
        Ok(())
    }

    pub fn set_starting_stack(&mut self, amount: Chips) -> Result<(), TableError> {
        self.ensure_idle()?;
        if amount.is_zero() {
            return Err(TableError::InvalidAmount(amount));
        }

        log::debug!("Стартовый стек: {amount}");
        self.config.starting_stack = amount;
        Ok(())
    }

    /// Начать новую раздачу с перемешанной колодой.
    pub fn start_hand<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), TableError> {
        self.start_hand_with_deck(Deck::shuffled(rng))
    }

    /// Начать новую раздачу с заданной колодой:
    /// - забрать игроков из прошлой раздачи;
    /// - убрать вылетевших (стек 0);
    /// - сдвинуть кнопку (первая раздача – место 0);
    /// - запустить `Round`.
    pub fn start_hand_with_deck(&mut self, deck: Deck) -> Result<(), TableError> {
        self.ensure_idle()?;

        self.seats.retain(|p| {
            let busted = p.stack.is_zero();
            if busted {
                log::info!("Игрок {} вылетел", p.name);
            }
            !busted
        });

        let dealer = match self.dealer_button {
            Some(prev) if !self.seats.is_empty() => (prev + 1) % self.seats.len(),
            _ => 0,
        };

        let stakes = &self.config.stakes;
        let round = Round::with_deck(
            self.seats.clone(),
            dealer,
            stakes.small_blind,
            stakes.big_blind,
            deck,
        )?;

        log::info!(
            "Раздача #{}: {} игроков, дилер {}, блайнды {}/{}",
            self.hands_played + 1,
            self.seats.len(),
            self.seats[dealer].name,
            stakes.small_blind,
            stakes.big_blind
        );

        self.dealer_button = Some(dealer);
        self.seats.clear();
        self.round = Some(round);
        self.note_if_finished();
        Ok(())
    }

    /// Действие текущего игрока в активной раздаче.
    pub fn act(&mut self, action: Action, amount: Chips) -> Result<(), TableError> {
        let round = self.round.as_mut().ok_or(TableError::NoHand)?;

        let name = round.current_player().name.clone();
        round.do_action(action, amount)?;
        log::debug!("{name}: {action} {amount}");

        self.note_if_finished();
        Ok(())
    }

    /// Операции настройки разрешены только между раздачами.
    /// Заодно возвращает игроков из завершённой раздачи на места.
    fn ensure_idle(&mut self) -> Result<(), TableError> {
        if self.hand_in_progress() {
            return Err(TableError::HandInProgress);
        }
        if let Some(round) = self.round.take() {
            self.seats = round.into_players();
        }
        Ok(())
    }

    fn note_if_finished(&mut self) {
        if let Some(round) = self.round.as_ref().filter(|r| r.is_complete()) {
            self.hands_played += 1;
            for line in round.last_winner_announcements() {
                log::info!("{line}");
            }
        }
    }
}
