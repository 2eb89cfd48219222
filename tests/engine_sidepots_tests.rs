//! Side pot / showdown tests для банка (`Pot`).
//!
//! Здесь мы проверяем:
//! - деление узла при коротком call (оллын);
//! - оллын-рейз и ре-рейз поверх него;
//! - выплаты по узлам, сплит с остатком, узел без живых участников;
//! - что ошибки не меняют состояние.

use holdem_engine::domain::{card::parse_cards, chips::Chips, player::Player, SeatIndex};
use holdem_engine::engine::{EngineError, Pot};

/// Утилита: игроки p0, p1, ... с заданными стеками.
fn players(stacks: &[u64]) -> Vec<Player> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, s)| Player::new(format!("p{i}"), Chips(*s)))
        .collect()
}

/// Утилита: (размер, участники) каждого узла.
fn layout(pot: &Pot) -> Vec<(u64, Vec<SeatIndex>)> {
    pot.nodes()
        .iter()
        .map(|n| (n.size().0, n.players.clone()))
        .collect()
}

fn total_chips(players: &[Player], pot: &Pot) -> u64 {
    players.iter().map(|p| p.stack.0).sum::<u64>() + pot.pot_size().0
}

fn deal(players: &mut [Player], holes: &[&str]) {
    for (p, h) in players.iter_mut().zip(holes) {
        p.hole_cards = parse_cards(h).unwrap();
    }
}

//
// ====================== ДЕЛЕНИЕ УЗЛОВ ======================
//

/// 3 игрока 250/200/100: первый идёт в оллын, остальные коллируют
/// всем стеком. Ожидаем три узла: 300 {0,1,2}, 200 {0,1}, 50 {0}.
#[test]
fn short_calls_split_into_three_layers() {
    let mut ps = players(&[250, 200, 100]);
    let mut pot = Pot::new();

    pot.raise(0, &mut ps[0], Chips(250)).unwrap();
    pot.call(1, &mut ps[1]).unwrap();
    pot.call(2, &mut ps[2]).unwrap();

    assert_eq!(
        layout(&pot),
        vec![(300, vec![0, 1, 2]), (200, vec![0, 1]), (50, vec![0])]
    );
    assert_eq!(pot.pot_size(), Chips(550));
    assert!(ps.iter().all(|p| p.stack.is_zero()));
    assert_eq!(pot.total_bet(), Chips(250));
}

/// Все уравнивают без оллынов: один узел, ре-рейзы копятся в нём.
#[test]
fn raise_reraise_stays_in_one_node() {
    let mut ps = players(&[1000, 1000, 1000]);
    let mut pot = Pot::new();

    pot.raise(0, &mut ps[0], Chips(100)).unwrap();
    pot.raise(1, &mut ps[1], Chips(300)).unwrap();
    pot.call(2, &mut ps[2]).unwrap();
    pot.call(0, &mut ps[0]).unwrap();

    assert_eq!(layout(&pot), vec![(900, vec![0, 1, 2])]);
    assert_eq!(pot.total_bet(), Chips(300));
    assert!(ps.iter().all(|p| p.current_bet == Chips(300)));
}

/// Оллын-рейз закрывает узел: следующий рейз открывает новый,
/// в котором оллын-игрока нет.
#[test]
fn reraise_over_all_in_raise_opens_new_node() {
    let mut ps = players(&[1000, 150, 1000]);
    let mut pot = Pot::new();

    pot.raise(0, &mut ps[0], Chips(100)).unwrap();
    pot.raise(1, &mut ps[1], Chips(150)).unwrap();
    assert!(ps[1].is_all_in());

    pot.raise(2, &mut ps[2], Chips(400)).unwrap();
    pot.call(0, &mut ps[0]).unwrap();

    assert_eq!(
        layout(&pot),
        vec![(450, vec![0, 1, 2]), (500, vec![2, 0])]
    );
    assert_eq!(ps[0].stack, Chips(600));
    assert_eq!(ps[2].stack, Chips(600));
}

/// Call ровно на весь стек – обычный call, но узел закрывается.
#[test]
fn exact_stack_call_caps_the_node() {
    let mut ps = players(&[1000, 100, 1000]);
    let mut pot = Pot::new();

    pot.raise(0, &mut ps[0], Chips(100)).unwrap();
    pot.call(1, &mut ps[1]).unwrap();
    assert_eq!(pot.nodes().len(), 1);
    assert!(pot.main_pot().capped);

    pot.raise(2, &mut ps[2], Chips(300)).unwrap();
    pot.call(0, &mut ps[0]).unwrap();

    assert_eq!(
        layout(&pot),
        vec![(300, vec![0, 1, 2]), (400, vec![2, 0])]
    );
    assert_eq!(pot.next_pot(0).map(|n| n.current_bet), Some(Chips(200)));
    assert_eq!(pot.contribution_of(0), Chips(300));
    assert_eq!(pot.contribution_of(1), Chips(100));
}

/// BB в оллыне короче блайнда: ставку улицы поднимаем до полного BB,
/// недобор ложится в новый узел без BB.
#[test]
fn lifted_street_bet_opens_node_without_short_blind() {
    let mut ps = players(&[1000, 7]);
    let mut pot = Pot::new();

    pot.raise(0, &mut ps[0], Chips(5)).unwrap();
    pot.raise(1, &mut ps[1], Chips(7)).unwrap();
    assert!(pot.main_pot().capped);

    pot.raise_bet_to(Chips(10));
    pot.raise_bet_to(Chips(8)); // ниже текущей – ничего не меняет
    assert_eq!(pot.total_bet(), Chips(10));
    assert_eq!(layout(&pot), vec![(12, vec![0, 1]), (0, vec![])]);

    pot.call(0, &mut ps[0]).unwrap();

    assert_eq!(layout(&pot), vec![(14, vec![0, 1]), (3, vec![0])]);
    assert_eq!(ps[0].stack, Chips(990));
    assert_eq!(total_chips(&ps, &pot), 1007);
}

#[test]
fn chips_are_conserved_through_splits() {
    let mut ps = players(&[500, 120, 80, 500]);
    let before = total_chips(&ps, &Pot::new());
    let mut pot = Pot::new();

    pot.raise(0, &mut ps[0], Chips(50)).unwrap();
    pot.call(1, &mut ps[1]).unwrap();
    pot.raise(2, &mut ps[2], Chips(80)).unwrap();
    pot.raise(3, &mut ps[3], Chips(200)).unwrap();
    pot.call(0, &mut ps[0]).unwrap();
    pot.call(1, &mut ps[1]).unwrap();

    assert_eq!(total_chips(&ps, &pot), before);
    for node in pot.nodes() {
        assert_eq!(node.players.len(), node.player_bets.len());
    }
    // Каждый следующий узел – подмножество предыдущего.
    for pair in pot.nodes().windows(2) {
        assert!(pair[1].players.iter().all(|s| pair[0].contains(*s)));
    }
}

//
// ====================== ОШИБКИ ======================
//

#[test]
fn raise_more_than_stack_is_rejected_without_changes() {
    let mut ps = players(&[100, 100]);
    let mut pot = Pot::new();
    pot.raise(0, &mut ps[0], Chips(10)).unwrap();

    let pot_before = pot.clone();
    let player_before = ps[1].clone();

    let err = pot.raise(1, &mut ps[1], Chips(101)).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds { .. }));
    assert_eq!(pot, pot_before);
    assert_eq!(ps[1], player_before);
}

#[test]
fn raise_that_does_not_exceed_the_bet_is_rejected() {
    let mut ps = players(&[100, 100]);
    let mut pot = Pot::new();
    pot.raise(0, &mut ps[0], Chips(20)).unwrap();

    let err = pot.raise(1, &mut ps[1], Chips(20)).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidRaise {
            player: "p1".into(),
            amount: Chips(20),
            to_match: Chips(20),
        }
    );
    assert_eq!(ps[1].stack, Chips(100));
}

#[test]
fn call_when_level_is_rejected() {
    let mut ps = players(&[100, 100]);
    let mut pot = Pot::new();

    let err = pot.call(0, &mut ps[0]).unwrap_err();
    assert!(matches!(err, EngineError::IllegalCall { .. }));
    assert_eq!(pot.pot_size(), Chips::ZERO);
}

//
// ====================== ШОУДАУН ======================
//

/// Разные победители в разных узлах: короткий стек с лучшей рукой
/// забирает только основной банк.
#[test]
fn each_node_has_its_own_winner() {
    let mut ps = players(&[250, 200, 100]);
    let mut pot = Pot::new();
    pot.raise(0, &mut ps[0], Chips(250)).unwrap();
    pot.call(1, &mut ps[1]).unwrap();
    pot.call(2, &mut ps[2]).unwrap();

    deal(&mut ps, &["Qh Qd", "Kh Kd", "Ah Ad"]);
    let board = parse_cards("2c 7d 9h Js 3s").unwrap();

    let lines = pot.determine_winner(&mut ps, &board);

    assert_eq!(
        lines,
        vec![
            "p2 wins 300 chips with One pair!".to_string(),
            "p1 wins 200 chips with One pair!".to_string(),
            "p0 wins 50 chips!".to_string(),
        ]
    );
    assert_eq!(ps[0].stack, Chips(50));
    assert_eq!(ps[1].stack, Chips(200));
    assert_eq!(ps[2].stack, Chips(300));
    assert_eq!(pot.pot_size(), Chips::ZERO);
}

/// Тройной сплит банка 100: 34/33/33, лишняя фишка – месту 0.
#[test]
fn three_way_split_gives_remainder_to_lowest_seat() {
    let mut ps = players(&[1000, 1000, 1000, 1000]);
    let mut pot = Pot::new();

    pot.raise(3, &mut ps[3], Chips(10)).unwrap();
    pot.raise(0, &mut ps[0], Chips(30)).unwrap();
    pot.call(1, &mut ps[1]).unwrap();
    pot.call(2, &mut ps[2]).unwrap();
    ps[3].fold();
    assert_eq!(pot.pot_size(), Chips(100));

    deal(&mut ps, &["2c 3d", "4c 5d", "6c 7d"]);
    let board = parse_cards("As Ks Qs Js Ts").unwrap();

    let lines = pot.determine_winner(&mut ps, &board);

    assert_eq!(
        lines,
        vec!["p0, p1, p2 split the pot of 100 chips (33 each) with Royal flush!".to_string()]
    );
    assert_eq!(ps[0].stack, Chips(1004));
    assert_eq!(ps[1].stack, Chips(1003));
    assert_eq!(ps[2].stack, Chips(1003));
    assert_eq!(ps[3].stack, Chips(990));
    assert_eq!(ps.iter().map(|p| p.stack.0).sum::<u64>(), 4000);
}

/// Сайд-пот, все участники которого сфолдили, уходит победителю
/// предыдущего узла.
#[test]
fn orphan_side_pot_goes_to_previous_winner() {
    let mut ps = players(&[50, 1000, 1000]);
    let mut pot = Pot::new();

    pot.raise(0, &mut ps[0], Chips(50)).unwrap();
    pot.raise(1, &mut ps[1], Chips(200)).unwrap();
    pot.call(2, &mut ps[2]).unwrap();
    assert_eq!(layout(&pot), vec![(150, vec![0, 1, 2]), (300, vec![1, 2])]);

    ps[1].fold();
    ps[2].fold();
    deal(&mut ps, &["7c 2d"]);

    let lines = pot.determine_winner(&mut ps, &parse_cards("Ah Kh Qd 9s 4c").unwrap());

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "p0 wins 150 chips!");
    assert_eq!(lines[1], "p0 wins 300 chips!");
    assert_eq!(ps[0].stack, Chips(450));
}

#[test]
fn next_stage_resets_street_bet_and_checks() {
    let mut ps = players(&[100, 100]);
    let mut pot = Pot::new();
    pot.raise(0, &mut ps[0], Chips(10)).unwrap();
    pot.call(1, &mut ps[1]).unwrap();
    ps[1].check();

    pot.next_stage(&mut ps);

    assert_eq!(pot.total_bet(), Chips::ZERO);
    assert!(!ps[1].has_checked);
    assert_eq!(pot.pot_size(), Chips(20), "узлы копятся всю раздачу");
}

/// Два независимых банка не делят ставку улицы.
#[test]
fn street_bet_is_per_pot() {
    let mut a_players = players(&[100, 100]);
    let mut b_players = players(&[100, 100]);
    let mut a = Pot::new();
    let mut b = Pot::new();

    a.raise(0, &mut a_players[0], Chips(40)).unwrap();

    assert_eq!(a.total_bet(), Chips(40));
    assert_eq!(b.total_bet(), Chips::ZERO);
    assert!(b.call(0, &mut b_players[0]).is_err());
}
