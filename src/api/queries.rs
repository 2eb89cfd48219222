use serde::{Deserialize, Serialize};

use crate::domain::table::Table;
use crate::domain::GameId;
use crate::infra::GameStore;

use super::dto::{PlayerDto, PotDto, TableViewDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Получить состояние стола. `hero` – чьи карманные карты показать.
    GetTable { game_id: GameId, hero: Option<String> },

    /// Свободный номер для новой игры.
    NextGameId,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    Table(TableViewDto),
    NextGameId(GameId),
}

pub fn run_query<S: GameStore + ?Sized>(store: &S, query: Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetTable { game_id, hero } => {
            let table = store.load(game_id)?;
            Ok(QueryResponse::Table(build_table_view(&table, hero.as_deref())))
        }
        Query::NextGameId => Ok(QueryResponse::NextGameId(store.next_id()?)),
    }
}

/// Сформировать DTO стола. Карты показываем только игроку `hero`.
pub fn build_table_view(table: &Table, hero: Option<&str>) -> TableViewDto {
    let round = table.round();

    let players = table
        .players()
        .iter()
        .enumerate()
        .map(|(seat_index, p)| PlayerDto {
            seat_index,
            name: p.name.clone(),
            stack: p.stack,
            current_bet: p.current_bet,
            has_folded: p.has_folded,
            is_all_in: round.is_some() && p.is_all_in(),
            hole_cards: (hero == Some(p.name.as_str())).then(|| p.hole_cards.clone()),
        })
        .collect();

    let pots = round
        .map(|r| {
            r.pot()
                .nodes()
                .iter()
                .map(|node| PotDto {
                    size: node.size(),
                    players: node.players.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    TableViewDto {
        small_blind: table.config.stakes.small_blind,
        big_blind: table.config.stakes.big_blind,
        starting_stack: table.config.starting_stack,
        dealer_button: table.dealer(),
        hands_played: table.hands_played,
        hand_in_progress: table.hand_in_progress(),
        street: round.map(|r| r.stage()),
        board: round
            .map(|r| r.revealed_community_cards().to_vec())
            .unwrap_or_default(),
        total_pot: round.map(|r| r.pot_size()).unwrap_or_default(),
        pots,
        current_bet: round.map(|r| r.total_bet()).unwrap_or_default(),
        current_actor_seat: round
            .filter(|r| !r.is_complete())
            .map(|r| r.current_seat()),
        players,
        winners: round
            .filter(|r| r.is_complete())
            .map(|r| r.last_winner_announcements().to_vec())
            .unwrap_or_default(),
    }
}
