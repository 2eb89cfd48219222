use crate::domain::card::{Card, Rank};

/// Битовая маска рангов.
///
/// Бит 0 – "туз как единица" (только для wheel), биты 1..=13 – двойка..туз.
/// Туз выставляет сразу оба бита: 0 и 13.
pub type RankMask = u16;

/// Маска пяти подряд идущих значений, младшее из которых `low` (1..=10).
const fn run_mask(low: u8) -> RankMask {
    0b1_1111 << (low - 1)
}

/// Маски всех стритов, индексированные по старшей карте:
/// индекс 0 = wheel (A2345, старшая 5), индекс 9 = бродвей (TJQKA).
pub const STRAIGHT_MASKS: [RankMask; 10] = {
    let mut masks = [0; 10];
    let mut i = 0;
    while i < 10 {
        masks[i] = run_mask(i as u8 + 1);
        i += 1;
    }
    masks
};

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    let bit = 1u16 << (rank.value() - 1);
    if rank == Rank::Ace {
        bit | 1
    } else {
        bit
    }
}

/// Маска рангов для набора карт (повторы рангов схлопываются).
pub fn rank_mask(cards: &[Card]) -> RankMask {
    cards.iter().fold(0, |mask, c| mask | rank_to_bit(c.rank))
}

/// Найти самый старший стрит в маске рангов.
/// Возвращает старшую карту стрита (для wheel – `Rank::Five`).
pub fn detect_straight(mask: RankMask) -> Option<Rank> {
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, sm)| mask & **sm == **sm)
        .and_then(|(i, _)| Rank::from_value(i as u8 + 5))
}

/// Ранги стрита от старшего к младшему. Для wheel туз идёт последним.
pub fn straight_ranks(high: Rank) -> Vec<Rank> {
    let top = high.value();
    (0..5)
        .filter_map(|offset| Rank::from_value(top - offset))
        .collect()
}
