use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::Street;
use crate::domain::player::Player;
use crate::domain::SeatIndex;
use crate::engine::actions::Action;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::positions::{
    blind_seats, first_to_act_postflop, first_to_act_preflop, next_active_seat,
};
use crate::engine::pot::Pot;
use crate::engine::RandomSource;

/// Больше игроков колода не обслужит: 2 карты каждому + 5 на борд.
pub const MAX_PLAYERS: usize = 23;

const BOARD_SIZE: usize = 5;

/// Одна раздача: от блайндов до шоудауна.
///
/// Все 5 общих карт вытягиваются при создании и открываются по улицам.
/// После завершения (`is_complete`) раздача неизменяема.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Round {
    players: Vec<Player>,
    dealer: SeatIndex,
    small_blind: Chips,
    big_blind: Chips,
    deck: Deck,
    community_cards: Vec<Card>,
    stage: Street,
    pot: Pot,
    betting: BettingState,
    current_player: SeatIndex,
    is_complete: bool,
    last_winner_announcements: Vec<String>,
}

impl Round {
    /// Новая раздача со свежей перемешанной колодой.
    pub fn new<R: RandomSource>(
        players: Vec<Player>,
        dealer: SeatIndex,
        small_blind: Chips,
        big_blind: Chips,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        Self::with_deck(players, dealer, small_blind, big_blind, Deck::shuffled(rng))
    }

    /// Раздача с заданной колодой (реплеи, тесты).
    ///
    /// Карманные карты раздаются по кругу с места 0, по одной за проход,
    /// затем вытягиваются 5 карт борда.
    pub fn with_deck(
        mut players: Vec<Player>,
        dealer: SeatIndex,
        small_blind: Chips,
        big_blind: Chips,
        mut deck: Deck,
    ) -> Result<Self, EngineError> {
        validate_setup(&players, dealer, small_blind, big_blind)?;
        if deck.len() < players.len() * 2 + BOARD_SIZE {
            return Err(EngineError::DeckExhausted);
        }

        for p in players.iter_mut() {
            p.reset_for_hand();
        }
        for _pass in 0..2 {
            for p in players.iter_mut() {
                let card = deck.draw_one().ok_or(EngineError::DeckExhausted)?;
                p.hole_cards.push(card);
            }
        }
        let community_cards = deck.draw_n(BOARD_SIZE);

        let (sb_seat, bb_seat) = blind_seats(players.len(), dealer);

        let mut round = Self {
            players,
            dealer,
            small_blind,
            big_blind,
            deck,
            community_cards,
            stage: Street::Preflop,
            pot: Pot::new(),
            betting: BettingState::preflop(bb_seat, big_blind),
            current_player: 0,
            is_complete: false,
            last_winner_announcements: Vec::new(),
        };

        round.post_blind(sb_seat, small_blind)?;
        round.post_blind(bb_seat, big_blind)?;
        // Короткий оллын на BB не снижает цену колла.
        round.pot.raise_bet_to(big_blind);
        round.current_player = first_to_act_preflop(&round.players, bb_seat);

        // Блайнды могли отправить всех в оллын.
        if round.is_hand_over() {
            round.finish_hand();
        }

        Ok(round)
    }

    /// Применить действие текущего игрока.
    ///
    /// `amount` учитывается только для `Raise`: сколько фишек игрок
    /// докладывает сейчас (включая доплату до call).
    /// При ошибке состояние раздачи не меняется.
    pub fn do_action(&mut self, action: Action, amount: Chips) -> Result<(), EngineError> {
        if self.is_complete {
            return Err(EngineError::HandAlreadyComplete);
        }

        let seat = self.current_player;
        let total_bet = self.pot.total_bet();
        let player = &mut self.players[seat];

        match action {
            Action::Check => {
                if player.current_bet != total_bet {
                    return Err(EngineError::IllegalCheck {
                        player: player.name.clone(),
                    });
                }
                player.check();
            }
            Action::Call => {
                self.pot.call(seat, player)?;
            }
            Action::Raise => {
                self.pot.raise(seat, player, amount)?;
            }
            Action::Fold => player.fold(),
        }

        self.betting.mark_acted(seat);
        self.current_player = next_active_seat(&self.players, seat);

        if self.is_hand_over() {
            self.finish_hand();
        } else if self
            .betting
            .is_street_complete(&self.players, self.pot.total_bet())
        {
            self.advance_street();
        }

        Ok(())
    }

    pub fn current_seat(&self) -> SeatIndex {
        self.current_player
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Открытые общие карты: 0 / 3 / 4 / 5 по улицам.
    pub fn revealed_community_cards(&self) -> &[Card] {
        let shown = self.stage.revealed_cards().min(self.community_cards.len());
        &self.community_cards[..shown]
    }

    pub fn pot_size(&self) -> Chips {
        self.pot.pot_size()
    }

    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    /// Сколько нужно поставить на текущей улице, чтобы быть в уровне.
    pub fn total_bet(&self) -> Chips {
        self.pot.total_bet()
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// По одной строке на узел банка, от основного к сайд-потам.
    pub fn last_winner_announcements(&self) -> &[String] {
        &self.last_winner_announcements
    }

    pub fn stage(&self) -> Street {
        self.stage
    }

    pub fn dealer(&self) -> SeatIndex {
        self.dealer
    }

    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Проверка раздачи, пришедшей извне (файл состояния): все места
    /// в пределах стола, узлы банка согласованы, карты на месте.
    pub fn check_integrity(&self) -> Result<(), String> {
        let n = self.players.len();
        if n == 0 {
            return Err("в раздаче нет игроков".to_string());
        }

        let seats = [
            ("current_player", self.current_player),
            ("dealer", self.dealer),
            ("big_blind_seat", self.betting.big_blind_seat),
        ];
        if let Some((field, seat)) = seats.into_iter().find(|&(_, seat)| seat >= n) {
            return Err(format!("{field} = {seat}, а игроков {n}"));
        }

        if self.pot.nodes().is_empty() {
            return Err("в банке нет ни одного узла".to_string());
        }
        for (i, node) in self.pot.nodes().iter().enumerate() {
            if node.players.len() != node.player_bets.len() {
                return Err(format!("узел {i}: players и player_bets разной длины"));
            }
            if let Some(seat) = node.players.iter().find(|&&s| s >= n) {
                return Err(format!("узел {i}: нет места {seat}"));
            }
        }

        if self.community_cards.len() != BOARD_SIZE {
            return Err(format!("на борде {} карт", self.community_cards.len()));
        }
        if let Some(p) = self
            .players
            .iter()
            .find(|p| !p.has_folded && p.hole_cards.len() != 2)
        {
            return Err(format!("у игрока {} {} карманных карт", p.name, p.hole_cards.len()));
        }
        Ok(())
    }

    /// Забрать игроков обратно (стол делает это после раздачи).
    pub fn into_players(self) -> Vec<Player> {
        self.players
    }

    /// Блайнд проходит через банк как рейз, чтобы оллын на блайнде
    /// сразу породил сайд-пот. Если стека не хватает даже на уже
    /// поставленный SB, это просто короткий call.
    fn post_blind(&mut self, seat: SeatIndex, blind: Chips) -> Result<(), EngineError> {
        let player = &mut self.players[seat];
        let amount = blind.min(player.stack);
        if amount > self.pot.total_bet() {
            self.pot.raise(seat, player, amount)
        } else {
            self.pot.call(seat, player).map(|_| ())
        }
    }

    /// Раздача заканчивается досрочно, если остался один игрок или
    /// ставить больше некому: активных нет, либо единственный активный
    /// уже уравнял ставку.
    fn is_hand_over(&self) -> bool {
        let in_hand = self.players.iter().filter(|p| !p.has_folded).count();
        if in_hand <= 1 {
            return true;
        }

        let total_bet = self.pot.total_bet();
        let mut active = self.players.iter().filter(|p| p.is_active());
        match (active.next(), active.next()) {
            (None, _) => true,
            (Some(only), None) => only.current_bet >= total_bet,
            _ => false,
        }
    }

    fn advance_street(&mut self) {
        match self.stage.next() {
            Some(next) => {
                for p in self.players.iter_mut() {
                    p.reset_for_street();
                }
                self.pot.next_stage(&mut self.players);
                self.betting = self.betting.next_street(next);
                self.stage = next;
                self.current_player = first_to_act_postflop(&self.players, self.dealer);
            }
            None => self.showdown(),
        }
    }

    fn finish_hand(&mut self) {
        let in_hand = self.players.iter().filter(|p| !p.has_folded).count();
        if in_hand > 1 {
            // Ставить некому: докладываем борд до конца.
            self.stage = Street::River;
        }
        self.showdown();
    }

    fn showdown(&mut self) {
        self.last_winner_announcements = self
            .pot
            .determine_winner(&mut self.players, &self.community_cards);
        self.is_complete = true;
    }
}

fn validate_setup(
    players: &[Player],
    dealer: SeatIndex,
    small_blind: Chips,
    big_blind: Chips,
) -> Result<(), EngineError> {
    if players.len() < 2 {
        return Err(EngineError::InvalidSetup(format!(
            "нужно минимум 2 игрока, есть {}",
            players.len()
        )));
    }
    if players.len() > MAX_PLAYERS {
        return Err(EngineError::InvalidSetup(format!(
            "слишком много игроков: {} (максимум {MAX_PLAYERS})",
            players.len()
        )));
    }
    if dealer >= players.len() {
        return Err(EngineError::InvalidSetup(format!(
            "нет места дилера {dealer} за столом из {} игроков",
            players.len()
        )));
    }
    if let Some(p) = players.iter().find(|p| p.stack.is_zero()) {
        return Err(EngineError::InvalidSetup(format!(
            "у игрока {} нет фишек",
            p.name
        )));
    }
    if small_blind.is_zero() || big_blind < small_blind {
        return Err(EngineError::InvalidSetup(format!(
            "некорректные блайнды {small_blind}/{big_blind}"
        )));
    }
    Ok(())
}
