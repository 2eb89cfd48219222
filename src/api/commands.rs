use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::{Table, TableError};
use crate::domain::GameId;
use crate::engine::{Action, Round};
use crate::infra::{DeterministicRng, GameStore, SystemRng};

use super::errors::ApiError;

/// Команда верхнего уровня над одной игрой в хранилище.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Создать новую игру (номер выдаёт хранилище).
    NewGame,

    /// Посадить игрока; без `chips` – стартовый стек стола.
    AddPlayer { name: String, chips: Option<Chips> },

    RemovePlayer { name: String },

    SetBlinds { small_blind: Chips, big_blind: Chips },

    SetStartingStack { amount: Chips },

    /// Новая раздача. С `seed` колода перемешивается детерминированно.
    DealHand { seed: Option<u64> },

    /// Действие текущего игрока.
    Act { action: Action, amount: Chips },

    /// Показать часть состояния (ничего не меняет).
    Show(ShowTarget),
}

/// Что показать командой `show`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShowTarget {
    Hole,
    Board,
    Money,
    Pot,
    CurrentPlayer,
    Bet,
    Players,
    Winners,
}

impl ShowTarget {
    pub const ALL: [ShowTarget; 8] = [
        ShowTarget::Hole,
        ShowTarget::Board,
        ShowTarget::Money,
        ShowTarget::Pot,
        ShowTarget::CurrentPlayer,
        ShowTarget::Bet,
        ShowTarget::Players,
        ShowTarget::Winners,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShowTarget::Hole => "hole",
            ShowTarget::Board => "board",
            ShowTarget::Money => "money",
            ShowTarget::Pot => "pot",
            ShowTarget::CurrentPlayer => "current-player",
            ShowTarget::Bet => "bet",
            ShowTarget::Players => "players",
            ShowTarget::Winners => "winners",
        }
    }
}

impl fmt::Display for ShowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShowTarget {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase().replace('_', "-");
        ShowTarget::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| ApiError::BadRequest(format!("неизвестная цель show: {s}")))
    }
}

/// Выполнить команду: загрузить стол, применить, сохранить.
///
/// Возвращает строки для пользователя.
pub fn execute_command<S: GameStore + ?Sized>(
    store: &mut S,
    game_id: GameId,
    command: Command,
) -> Result<Vec<String>, ApiError> {
    log::debug!("Игра {game_id}: {command:?}");

    match command {
        Command::NewGame => {
            let id = store.next_id()?;
            store.save(id, &Table::default())?;
            log::info!("Создана игра {id}");
            Ok(vec![format!("Game was created with ID: {id}")])
        }
        Command::Show(target) => {
            let table = store.load(game_id)?;
            show(&table, target)
        }
        other => {
            let mut table = store.load(game_id)?;
            let out = apply(&mut table, other)?;
            store.save(game_id, &table)?;
            Ok(out)
        }
    }
}

fn apply(table: &mut Table, command: Command) -> Result<Vec<String>, ApiError> {
    let out = match command {
        Command::AddPlayer { name, chips } => {
            table.add_player(&name, chips)?;
            vec![format!("Player {name} was added")]
        }
        Command::RemovePlayer { name } => {
            table.remove_player(&name)?;
            vec![format!("Player {name} was removed")]
        }
        Command::SetBlinds {
            small_blind,
            big_blind,
        } => {
            table.set_blinds(small_blind, big_blind)?;
            vec![format!("Blinds are now {small_blind}/{big_blind}")]
        }
        Command::SetStartingStack { amount } => {
            table.set_starting_stack(amount)?;
            vec![format!("Starting stack is now {amount}")]
        }
        Command::DealHand { seed } => {
            match seed {
                Some(seed) => table.start_hand(&mut DeterministicRng::from_u64(seed))?,
                None => table.start_hand(&mut SystemRng)?,
            }
            deal_report(table)?
        }
        Command::Act { action, amount } => act(table, action, amount)?,
        other @ (Command::NewGame | Command::Show(_)) => {
            return Err(ApiError::BadRequest(format!(
                "{other:?} не меняет существующий стол"
            )))
        }
    };
    Ok(out)
}

fn deal_report(table: &Table) -> Result<Vec<String>, ApiError> {
    let round = active_round(table)?;
    let mut out = vec![
        format!("Hand #{} was dealt", table.hands_played + u64::from(!round.is_complete())),
        format!("Dealer is {}", round.players()[round.dealer()].name),
    ];
    if round.is_complete() {
        out.extend(round.last_winner_announcements().iter().cloned());
    } else {
        out.push(format!("Next player is {}", round.current_player().name));
    }
    Ok(out)
}

fn act(table: &mut Table, action: Action, amount: Chips) -> Result<Vec<String>, ApiError> {
    let (name, stage_before) = {
        let round = active_round(table)?;
        (round.current_player().name.clone(), round.stage())
    };

    table.act(action, amount)?;

    let round = active_round(table)?;
    let mut out = vec![format!("Player {name} has performed action {action}")];
    if round.is_complete() {
        out.extend(round.last_winner_announcements().iter().cloned());
    } else {
        if round.stage() != stage_before {
            out.push("Stage is over".to_string());
            out.extend(board_lines(round));
        }
        out.push(format!("Next player is {}", round.current_player().name));
    }
    Ok(out)
}

fn show(table: &Table, target: ShowTarget) -> Result<Vec<String>, ApiError> {
    let out = match target {
        ShowTarget::Players => player_lines(table),
        ShowTarget::Hole => {
            let current = active_round(table)?.current_player();
            let mut out = vec![format!("The hole cards of {} are:", current.name)];
            out.extend(current.hole_cards.iter().map(|c| format!("   {}", c.long_name())));
            out
        }
        ShowTarget::Board => board_lines(active_round(table)?),
        ShowTarget::Money => {
            let current = active_round(table)?.current_player();
            vec![format!("The current money of {}: {}", current.name, current.stack)]
        }
        ShowTarget::Pot => {
            let round = active_round(table)?;
            let mut out = vec![format!("Current pot: {}", round.pot_size())];
            for (i, node) in round.pot().nodes().iter().enumerate().skip(1) {
                out.push(format!("   side pot {i}: {}", node.size()));
            }
            out
        }
        ShowTarget::CurrentPlayer => vec![format!(
            "The current player is {}",
            active_round(table)?.current_player().name
        )],
        ShowTarget::Bet => {
            let round = active_round(table)?;
            let current = round.current_player();
            vec![
                format!("The current bet is {}", round.total_bet()),
                format!("The current bet of {} is {}", current.name, current.current_bet),
            ]
        }
        ShowTarget::Winners => {
            let round = active_round(table)?;
            if round.is_complete() {
                round.last_winner_announcements().to_vec()
            } else {
                vec!["The hand is still in progress".to_string()]
            }
        }
    };
    Ok(out)
}

/// Текущая (или последняя) раздача стола.
fn active_round(table: &Table) -> Result<&Round, TableError> {
    table.round().ok_or(TableError::NoHand)
}

fn board_lines(round: &Round) -> Vec<String> {
    let mut out = vec!["The shown community cards are:".to_string()];
    out.extend(
        round
            .revealed_community_cards()
            .iter()
            .map(|c| format!("   {}", c.long_name())),
    );
    out
}

fn player_lines(table: &Table) -> Vec<String> {
    if table.players().is_empty() {
        return vec!["No players at the table".to_string()];
    }

    let dealer = table.dealer();
    let in_hand = table.round().is_some();
    table
        .players()
        .iter()
        .enumerate()
        .map(|(seat, p)| {
            let mut line = format!("{seat}: {} ({} chips)", p.name, p.stack);
            if dealer == Some(seat) {
                line.push_str(" [dealer]");
            }
            if in_hand && p.has_folded {
                line.push_str(" [folded]");
            } else if in_hand && p.is_all_in() {
                line.push_str(" [all-in]");
            }
            line
        })
        .collect()
}
