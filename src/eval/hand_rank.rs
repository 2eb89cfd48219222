use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Категория покерной руки по силе (от слабой к сильной).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandType {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandType {
    /// Числовая сила категории.
    pub fn strength(self) -> u8 {
        self as u8
    }

    /// Длина списка тай-брейков для категории.
    pub fn tie_break_len(self) -> usize {
        match self {
            HandType::HighCard | HandType::Flush => 5,
            HandType::OnePair => 4,
            HandType::TwoPair | HandType::ThreeOfAKind => 3,
            HandType::FullHouse | HandType::FourOfAKind => 2,
            HandType::Straight | HandType::StraightFlush | HandType::RoyalFlush => 5,
        }
    }
}

impl fmt::Display for HandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandType::HighCard => "High card",
            HandType::OnePair => "One pair",
            HandType::TwoPair => "Two pair",
            HandType::ThreeOfAKind => "Three of a kind",
            HandType::Straight => "Straight",
            HandType::Flush => "Flush",
            HandType::FullHouse => "Full house",
            HandType::FourOfAKind => "Four of a kind",
            HandType::StraightFlush => "Straight flush",
            HandType::RoyalFlush => "Royal flush",
        };
        f.write_str(s)
    }
}

/// Ранг руки: категория + упорядоченный список рангов для тай-брейка.
///
/// Сравнение: сначала категория, затем лексикографически по `ranks`
/// (evaluator уже кладёт их в порядке убывания значимости).
/// Порядок полей важен для derive(Ord).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank {
    pub hand_type: HandType,
    pub ranks: Vec<Rank>,
}

impl HandRank {
    pub fn new(hand_type: HandType, ranks: Vec<Rank>) -> Self {
        Self { hand_type, ranks }
    }

    pub fn category(&self) -> HandType {
        self.hand_type
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hand_type)?;
        if !self.ranks.is_empty() {
            let ranks: Vec<String> = self.ranks.iter().map(|r| r.to_string()).collect();
            write!(f, " ({})", ranks.join(" "))?;
        }
        Ok(())
    }
}
