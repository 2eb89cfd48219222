use crate::domain::player::Player;
use crate::domain::SeatIndex;

/// Следующий по кругу игрок, который может действовать (`is_active`).
///
/// Сам `current` проверяется последним. Если активных нет совсем,
/// возвращаем место 0.
pub fn next_active_seat(players: &[Player], current: SeatIndex) -> SeatIndex {
    let n = players.len();
    if n == 0 {
        return 0;
    }

    (1..=n)
        .map(|offset| (current + offset) % n)
        .find(|&seat| players[seat].is_active())
        .unwrap_or(0)
}

/// Места малого и большого блайнда.
///
/// Хедз-ап: дилер ставит SB, второй игрок BB.
/// 3+ игроков: dealer+1 и dealer+2.
pub fn blind_seats(player_count: usize, dealer: SeatIndex) -> (SeatIndex, SeatIndex) {
    if player_count == 2 {
        (dealer, (dealer + 1) % 2)
    } else {
        ((dealer + 1) % player_count, (dealer + 2) % player_count)
    }
}

/// Кто ходит первым на префлопе: следующий активный после BB.
/// В хедз-апе это дилер.
pub fn first_to_act_preflop(players: &[Player], big_blind_seat: SeatIndex) -> SeatIndex {
    next_active_seat(players, big_blind_seat)
}

/// Кто ходит первым на флопе и дальше: следующий активный после дилера.
pub fn first_to_act_postflop(players: &[Player], dealer: SeatIndex) -> SeatIndex {
    next_active_seat(players, dealer)
}
