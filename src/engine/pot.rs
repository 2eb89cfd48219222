use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::SeatIndex;
use crate::engine::errors::EngineError;
use crate::eval::{evaluate_best_hand, HandRank};

/// Один узел цепочки банков: основной банк или сайд-пот.
///
/// Инварианты:
/// - `players` и `player_bets` – параллельные списки, только дописываются;
/// - размер узла = сумма `player_bets`;
/// - игроки следующего узла – подмножество игроков этого узла
///   (кроме тех, кто докладывает в узел позже).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotNode {
    pub players: Vec<SeatIndex>,
    pub player_bets: Vec<Chips>,
    /// Сколько нужно внести в этот узел, чтобы в нём участвовать.
    pub current_bet: Chips,
    /// Узел ограничен оллыном: его ставка больше расти не может,
    /// новые повышения уходят в следующий узел.
    pub capped: bool,
}

impl PotNode {
    pub fn size(&self) -> Chips {
        self.player_bets.iter().sum()
    }

    pub fn contains(&self, seat: SeatIndex) -> bool {
        self.players.contains(&seat)
    }

    /// Сколько игрок уже внёс в этот узел.
    pub fn bet_of(&self, seat: SeatIndex) -> Chips {
        self.players
            .iter()
            .position(|s| *s == seat)
            .map(|idx| self.player_bets[idx])
            .unwrap_or(Chips::ZERO)
    }

    fn set_bet(&mut self, seat: SeatIndex, amount: Chips) {
        match self.players.iter().position(|s| *s == seat) {
            Some(idx) => self.player_bets[idx] = amount,
            None => {
                self.players.push(seat);
                self.player_bets.push(amount);
            }
        }
    }
}

/// Банк раздачи: цепочка узлов `nodes[0]` (основной) → сайд-поты.
///
/// `total_bet` – сколько игрок должен вложить на текущей улице, чтобы
/// быть "в уровне". Живёт внутри конкретного банка (одна раздача),
/// сбрасывается в `next_stage`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    nodes: Vec<PotNode>,
    total_bet: Chips,
}

impl Default for Pot {
    fn default() -> Self {
        Self::new()
    }
}

impl Pot {
    pub fn new() -> Self {
        Self {
            nodes: vec![PotNode::default()],
            total_bet: Chips::ZERO,
        }
    }

    pub fn total_bet(&self) -> Chips {
        self.total_bet
    }

    /// Все узлы, от основного банка к самому глубокому сайд-поту.
    pub fn nodes(&self) -> &[PotNode] {
        &self.nodes
    }

    pub fn main_pot(&self) -> &PotNode {
        &self.nodes[0]
    }

    /// Следующий узел после `index`, если он есть.
    pub fn next_pot(&self, index: usize) -> Option<&PotNode> {
        self.nodes.get(index + 1)
    }

    /// Общий размер всех узлов.
    pub fn pot_size(&self) -> Chips {
        self.nodes.iter().map(PotNode::size).sum()
    }

    /// Сколько игрок суммарно вложил во все узлы.
    pub fn contribution_of(&self, seat: SeatIndex) -> Chips {
        self.nodes.iter().map(|n| n.bet_of(seat)).sum()
    }

    /// Call: довести ставку игрока до `total_bet` во всех узлах.
    ///
    /// Если стека не хватает, узел, в котором игрок упирается в оллын,
    /// делится: излишек остальных уходит в новый сайд-пот сразу за ним.
    /// Возвращает сколько фишек реально внесено.
    pub fn call(&mut self, seat: SeatIndex, player: &mut Player) -> Result<Chips, EngineError> {
        if player.current_bet >= self.total_bet {
            return Err(EngineError::IllegalCall {
                player: player.name.clone(),
            });
        }
        Ok(self.call_through_nodes(seat, player))
    }

    /// Raise: игрок докладывает `amount` фишек (включая доплату до call).
    ///
    /// Проверки до изменений:
    /// - стек >= `amount`, иначе `InsufficientFunds`;
    /// - `current_bet + amount > total_bet`, иначе `InvalidRaise`.
    pub fn raise(
        &mut self,
        seat: SeatIndex,
        player: &mut Player,
        amount: Chips,
    ) -> Result<(), EngineError> {
        if player.stack < amount {
            return Err(EngineError::InsufficientFunds {
                player: player.name.clone(),
                amount,
                stack: player.stack,
            });
        }
        if player.current_bet + amount <= self.total_bet {
            return Err(EngineError::InvalidRaise {
                player: player.name.clone(),
                amount,
                to_match: self.total_bet.saturating_sub(player.current_bet),
            });
        }

        let to_raise = player.current_bet + amount - self.total_bet;
        if player.current_bet < self.total_bet {
            self.call_through_nodes(seat, player);
        }

        // Повышение всегда идёт в самый глубокий узел; если он упёрся
        // в чей-то оллын, открываем новый.
        if self.deepest().capped {
            self.nodes.push(PotNode::default());
        }

        let node = self.deepest_mut();
        let already = node.bet_of(seat);
        node.current_bet += to_raise;
        let paid = player.bet_chips(to_raise);
        node.set_bet(seat, already + paid);
        if player.is_all_in() {
            node.capped = true;
        }

        self.total_bet += to_raise;
        Ok(())
    }

    /// Поднять ставку улицы до `amount`, никого не списывая.
    ///
    /// Нужно, когда BB в оллыне короче блайнда: остальные всё равно
    /// уравнивают полный блайнд, недостающая часть уходит в самый глубокий
    /// (или новый, если тот ограничен) узел.
    pub fn raise_bet_to(&mut self, amount: Chips) {
        if amount <= self.total_bet {
            return;
        }
        if self.deepest().capped {
            self.nodes.push(PotNode::default());
        }

        let shortfall = amount - self.total_bet;
        self.deepest_mut().current_bet += shortfall;
        self.total_bet = amount;
    }

    /// Переход на новую улицу: снять check-флаги у участников всех узлов
    /// и обнулить ставку улицы.
    pub fn next_stage(&mut self, players: &mut [Player]) {
        for node in &self.nodes {
            for &seat in &node.players {
                if let Some(p) = players.get_mut(seat) {
                    p.has_checked = false;
                }
            }
        }
        self.total_bet = Chips::ZERO;
    }

    /// Шоудаун: каждый узел разыгрывается отдельно.
    ///
    /// - один несфолдивший участник забирает узел без вскрытия;
    /// - иначе лучшая рука (или несколько равных) делит узел поровну,
    ///   остаток достаётся победителю с меньшим номером места;
    /// - узел без живых участников уходит победителям предыдущего узла;
    /// - узел, в который никто не вносил (недобор короткого BB), пропускается.
    ///
    /// Возвращает по одной строке-объявлению на узел, от основного банка
    /// к глубоким. После выплаты узлы пустеют.
    pub fn determine_winner(&mut self, players: &mut [Player], community_cards: &[Card]) -> Vec<String> {
        let mut announcements = Vec::with_capacity(self.nodes.len());
        let mut previous_winners: Option<Vec<SeatIndex>> = None;

        for node in self.nodes.iter_mut() {
            if node.players.is_empty() {
                continue;
            }
            let size = node.size();

            let mut contenders: Vec<SeatIndex> = node
                .players
                .iter()
                .copied()
                .filter(|&s| players.get(s).is_some_and(|p| !p.has_folded))
                .collect();
            if contenders.is_empty() {
                contenders = match &previous_winners {
                    Some(prev) => prev.clone(),
                    None => (0..players.len()).filter(|&s| !players[s].has_folded).collect(),
                };
            }
            if contenders.is_empty() {
                // Все сфолдили – такого быть не должно, фишки остаются в узле.
                announcements.push(format!("Nobody wins the pot of {size} chips!"));
                continue;
            }

            let (winners, best_hand) = pick_winners(players, &contenders, community_cards);
            announcements.push(reward_winners(players, &winners, size, best_hand.as_ref()));

            node.player_bets.iter_mut().for_each(|b| *b = Chips::ZERO);
            previous_winners = Some(winners);
        }

        announcements
    }

    fn deepest(&self) -> &PotNode {
        // В цепочке всегда есть хотя бы основной узел.
        &self.nodes[self.nodes.len() - 1]
    }

    fn deepest_mut(&mut self) -> &mut PotNode {
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }

    /// Доплата во все узлы по порядку. Останавливается, когда игрок в оллыне.
    fn call_through_nodes(&mut self, seat: SeatIndex, player: &mut Player) -> Chips {
        let mut paid_total = Chips::ZERO;
        let mut index = 0;

        while index < self.nodes.len() && !player.is_all_in() {
            paid_total += self.call_node(index, seat, player);
            index += 1;
        }

        paid_total
    }

    fn call_node(&mut self, index: usize, seat: SeatIndex, player: &mut Player) -> Chips {
        let already = self.nodes[index].bet_of(seat);
        let to_call = self.nodes[index].current_bet.saturating_sub(already);

        if player.stack < to_call {
            self.split_node(index, already + player.stack);
        }

        let node = &mut self.nodes[index];
        let paid = player.bet_chips(node.current_bet.saturating_sub(already));
        node.set_bet(seat, already + paid);
        if player.is_all_in() && already + paid == node.current_bet {
            node.capped = true;
        }
        paid
    }

    /// Урезать узел до `ceiling`: всё, что участники внесли сверх потолка,
    /// переезжает в новый сайд-пот сразу за этим узлом.
    fn split_node(&mut self, index: usize, ceiling: Chips) {
        let node = &mut self.nodes[index];
        let mut side = PotNode {
            players: Vec::new(),
            player_bets: Vec::new(),
            current_bet: node.current_bet.saturating_sub(ceiling),
            capped: node.capped,
        };

        for (seat, bet) in node.players.iter().zip(node.player_bets.iter_mut()) {
            if *bet > ceiling {
                side.players.push(*seat);
                side.player_bets.push(*bet - ceiling);
                *bet = ceiling;
            }
        }

        node.current_bet = ceiling;
        node.capped = true;
        self.nodes.insert(index + 1, side);
    }
}

/// Лучшие руки среди претендентов. Один претендент побеждает без вскрытия.
fn pick_winners(
    players: &[Player],
    contenders: &[SeatIndex],
    community_cards: &[Card],
) -> (Vec<SeatIndex>, Option<HandRank>) {
    if contenders.len() == 1 {
        return (contenders.to_vec(), None);
    }

    let ranked: Vec<(SeatIndex, HandRank)> = contenders
        .iter()
        .map(|&seat| (seat, evaluate_best_hand(&players[seat].hole_cards, community_cards)))
        .collect();

    let best = ranked
        .iter()
        .map(|(_, rank)| rank)
        .max()
        .cloned();

    let mut winners: Vec<SeatIndex> = ranked
        .iter()
        .filter(|(_, rank)| Some(rank) == best.as_ref())
        .map(|(seat, _)| *seat)
        .collect();
    winners.sort_unstable();

    (winners, best)
}

/// Раздать узел победителям и сформировать объявление.
fn reward_winners(
    players: &mut [Player],
    winners: &[SeatIndex],
    size: Chips,
    best_hand: Option<&HandRank>,
) -> String {
    let count = winners.len() as u64;
    let share = Chips(size.0 / count);
    let remainder = Chips(size.0 % count);

    for (i, &seat) in winners.iter().enumerate() {
        let prize = if i == 0 { share + remainder } else { share };
        players[seat].add_chips(prize);
    }

    let with_hand = best_hand
        .map(|h| format!(" with {}", h.hand_type))
        .unwrap_or_default();

    if winners.len() == 1 {
        format!("{} wins {} chips{}!", players[winners[0]].name, size, with_hand)
    } else {
        let names: Vec<&str> = winners.iter().map(|&s| players[s].name.as_str()).collect();
        format!(
            "{} split the pot of {} chips ({} each){}!",
            names.join(", "),
            size,
            share,
            with_hand
        )
    }
}
