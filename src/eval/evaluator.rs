use crate::domain::card::{Card, Rank, Suit};

use super::hand_rank::{HandRank, HandType};
use super::lookup_tables::{detect_straight, rank_mask, straight_ranks};

/// Детектор одной категории: `Some(rank)`, если 5 карт её образуют.
type Detector = fn(&[Card], &RankGroups) -> Option<HandRank>;

/// Детекторы в порядке убывания силы. Первый сработавший определяет руку.
const DETECTORS: [Detector; 9] = [
    detect_straight_flush,
    detect_four_of_a_kind,
    detect_full_house,
    detect_flush,
    detect_straight_hand,
    detect_three_of_a_kind,
    detect_two_pair,
    detect_one_pair,
    detect_high_card,
];

/// Главная функция: лучшая 5-карточная рука из hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> HandRank {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate_best_hand_from(&all_cards)
}

/// Лучшая рука из 5..=7 карт: перебираем все 5-карточные подмножества
/// (для 7 карт их 21) и берём максимальный `HandRank`.
///
/// Меньше 5 карт – ошибка программиста, паникуем.
pub fn evaluate_best_hand_from(cards: &[Card]) -> HandRank {
    let n = cards.len();
    assert!(
        (5..=7).contains(&n),
        "evaluate_best_hand_from ожидает от 5 до 7 карт, получено {n}"
    );

    let mut best: Option<HandRank> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let r = evaluate_five(&five);
                        if best.as_ref().map_or(true, |best_r| r > *best_r) {
                            best = Some(r);
                        }
                    }
                }
            }
        }
    }

    // n >= 5, значит хотя бы одна комбинация была.
    best.unwrap_or_else(|| unreachable!("нет ни одной 5-карточной комбинации"))
}

/// Оценка строго 5-карточной комбинации.
pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let groups = RankGroups::new(cards);
    DETECTORS
        .iter()
        .find_map(|detect| detect(cards, &groups))
        .unwrap_or_else(|| unreachable!("high card срабатывает всегда"))
}

/// Группы рангов: (ранг, сколько раз), по убыванию количества, затем ранга.
pub struct RankGroups {
    grouped: Vec<(Rank, u8)>,
}

impl RankGroups {
    pub fn new(cards: &[Card]) -> Self {
        let mut counts = [0u8; 15];
        for card in cards {
            counts[card.rank.value() as usize] += 1;
        }

        let mut grouped: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .filter(|r| counts[r.value() as usize] > 0)
            .map(|r| (*r, counts[r.value() as usize]))
            .collect();

        grouped.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        Self { grouped }
    }

    /// Ранги, встречающиеся ровно `n` раз (по убыванию ранга).
    pub fn ranks_with_count(&self, n: u8) -> Vec<Rank> {
        self.grouped
            .iter()
            .filter(|(_, c)| *c == n)
            .map(|(r, _)| *r)
            .collect()
    }

    pub fn first(&self) -> Option<(Rank, u8)> {
        self.grouped.first().copied()
    }

    pub fn second(&self) -> Option<(Rank, u8)> {
        self.grouped.get(1).copied()
    }

    /// `lead` + остальные ранги по убыванию, обрезанные до `len`.
    fn with_kickers(&self, lead: Vec<Rank>, len: usize) -> Vec<Rank> {
        let mut kickers: Vec<Rank> = self
            .grouped
            .iter()
            .map(|(r, _)| *r)
            .filter(|r| !lead.contains(r))
            .collect();
        kickers.sort_by(|a, b| b.cmp(a));

        let mut ranks = lead;
        ranks.extend(kickers);
        ranks.truncate(len);
        ranks
    }
}

/// Карты масти, которой 5 и больше (если есть).
fn flush_cards(cards: &[Card]) -> Option<Vec<Card>> {
    Suit::ALL.iter().find_map(|suit| {
        let suited: Vec<Card> = cards.iter().filter(|c| c.suit == *suit).copied().collect();
        (suited.len() >= 5).then_some(suited)
    })
}

fn detect_straight_flush(cards: &[Card], _groups: &RankGroups) -> Option<HandRank> {
    let suited = flush_cards(cards)?;
    let high = detect_straight(rank_mask(&suited))?;
    let hand_type = if high == Rank::Ace {
        HandType::RoyalFlush
    } else {
        HandType::StraightFlush
    };
    Some(HandRank::new(hand_type, straight_ranks(high)))
}

fn detect_four_of_a_kind(_cards: &[Card], groups: &RankGroups) -> Option<HandRank> {
    let (quad, count) = groups.first()?;
    (count == 4).then(|| {
        let ranks = groups.with_kickers(vec![quad], HandType::FourOfAKind.tie_break_len());
        HandRank::new(HandType::FourOfAKind, ranks)
    })
}

fn detect_full_house(_cards: &[Card], groups: &RankGroups) -> Option<HandRank> {
    let (trips, c1) = groups.first()?;
    let (pair, c2) = groups.second()?;
    (c1 == 3 && c2 >= 2).then(|| HandRank::new(HandType::FullHouse, vec![trips, pair]))
}

fn detect_flush(cards: &[Card], _groups: &RankGroups) -> Option<HandRank> {
    let suited = flush_cards(cards)?;
    let mut ranks: Vec<Rank> = suited.iter().map(|c| c.rank).collect();
    ranks.sort_by(|a, b| b.cmp(a));
    ranks.truncate(HandType::Flush.tie_break_len());
    Some(HandRank::new(HandType::Flush, ranks))
}

fn detect_straight_hand(cards: &[Card], _groups: &RankGroups) -> Option<HandRank> {
    let high = detect_straight(rank_mask(cards))?;
    Some(HandRank::new(HandType::Straight, straight_ranks(high)))
}

fn detect_three_of_a_kind(_cards: &[Card], groups: &RankGroups) -> Option<HandRank> {
    let (trips, count) = groups.first()?;
    (count == 3).then(|| {
        let ranks = groups.with_kickers(vec![trips], HandType::ThreeOfAKind.tie_break_len());
        HandRank::new(HandType::ThreeOfAKind, ranks)
    })
}

fn detect_two_pair(_cards: &[Card], groups: &RankGroups) -> Option<HandRank> {
    let pairs = groups.ranks_with_count(2);
    if pairs.len() < 2 {
        return None;
    }
    let ranks = groups.with_kickers(pairs[..2].to_vec(), HandType::TwoPair.tie_break_len());
    Some(HandRank::new(HandType::TwoPair, ranks))
}

fn detect_one_pair(_cards: &[Card], groups: &RankGroups) -> Option<HandRank> {
    let (pair, count) = groups.first()?;
    (count == 2).then(|| {
        let ranks = groups.with_kickers(vec![pair], HandType::OnePair.tie_break_len());
        HandRank::new(HandType::OnePair, ranks)
    })
}

fn detect_high_card(_cards: &[Card], groups: &RankGroups) -> Option<HandRank> {
    let ranks = groups.with_kickers(Vec::new(), HandType::HighCard.tie_break_len());
    Some(HandRank::new(HandType::HighCard, ranks))
}
