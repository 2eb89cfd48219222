use holdem_engine::{
    api::{
        build_table_view, execute_command, run_query, ApiError, Command, Query, QueryResponse,
        ShowTarget,
    },
    domain::{chips::Chips, hand::Street, table::TableError},
    engine::{Action, EngineError},
    infra::{GameStore, InMemoryGameStore, PersistenceError},
};

fn run(store: &mut InMemoryGameStore, command: Command) -> Vec<String> {
    execute_command(store, 0, command).unwrap()
}

fn show(store: &mut InMemoryGameStore, target: ShowTarget) -> Vec<String> {
    run(store, Command::Show(target))
}

fn act(store: &mut InMemoryGameStore, action: Action, amount: u64) -> Vec<String> {
    run(
        store,
        Command::Act {
            action,
            amount: Chips(amount),
        },
    )
}

/// Игра 0 с тремя игроками по 1000.
fn game_with_three_players() -> InMemoryGameStore {
    let mut store = InMemoryGameStore::new();
    assert_eq!(
        run(&mut store, Command::NewGame),
        vec!["Game was created with ID: 0"]
    );
    for name in ["Alice", "Bob", "Carol"] {
        assert_eq!(
            run(
                &mut store,
                Command::AddPlayer {
                    name: name.into(),
                    chips: None,
                }
            ),
            vec![format!("Player {name} was added")]
        );
    }
    store
}

#[test]
fn new_games_get_increasing_ids() {
    let mut store = InMemoryGameStore::new();
    run(&mut store, Command::NewGame);
    let out = run(&mut store, Command::NewGame);

    assert_eq!(out, vec!["Game was created with ID: 1"]);
    assert!(matches!(
        run_query(&store, Query::NextGameId).unwrap(),
        QueryResponse::NextGameId(2)
    ));
}

#[test]
fn unknown_game_is_a_persistence_error() {
    let mut store = InMemoryGameStore::new();
    let err = execute_command(&mut store, 3, Command::Show(ShowTarget::Players)).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Persistence(PersistenceError::GameDoesNotExist(3))
    ));
}

#[test]
fn setup_commands_report_changes() {
    let mut store = game_with_three_players();

    assert_eq!(
        run(
            &mut store,
            Command::SetBlinds {
                small_blind: Chips(25),
                big_blind: Chips(50),
            }
        ),
        vec!["Blinds are now 25/50"]
    );
    assert_eq!(
        run(&mut store, Command::SetStartingStack { amount: Chips(400) }),
        vec!["Starting stack is now 400"]
    );
    run(
        &mut store,
        Command::AddPlayer {
            name: "Dave".into(),
            chips: None,
        },
    );
    assert_eq!(
        run(&mut store, Command::RemovePlayer { name: "Bob".into() }),
        vec!["Player Bob was removed"]
    );

    assert_eq!(
        show(&mut store, ShowTarget::Players),
        vec![
            "0: Alice (1000 chips)",
            "1: Carol (1000 chips)",
            "2: Dave (400 chips)",
        ]
    );
}

#[test]
fn show_needs_a_hand_except_players() {
    let mut store = InMemoryGameStore::new();
    run(&mut store, Command::NewGame);

    assert_eq!(
        show(&mut store, ShowTarget::Players),
        vec!["No players at the table"]
    );
    for target in ShowTarget::ALL
        .into_iter()
        .filter(|t| *t != ShowTarget::Players)
    {
        let err = execute_command(&mut store, 0, Command::Show(target)).unwrap_err();
        assert!(
            matches!(err, ApiError::Table(TableError::NoHand)),
            "{target}: {err}"
        );
    }
}

#[test]
fn show_target_parsing() {
    assert_eq!("hole".parse::<ShowTarget>().unwrap(), ShowTarget::Hole);
    assert_eq!(
        "current_player".parse::<ShowTarget>().unwrap(),
        ShowTarget::CurrentPlayer
    );
    assert_eq!("WINNERS".parse::<ShowTarget>().unwrap(), ShowTarget::Winners);
    for target in ShowTarget::ALL {
        assert_eq!(target.to_string().parse::<ShowTarget>().unwrap(), target);
    }

    let err = "stack".parse::<ShowTarget>().unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[test]
fn full_hand_through_commands() {
    let mut store = game_with_three_players();

    let out = run(&mut store, Command::DealHand { seed: Some(1) });
    assert_eq!(
        out,
        vec!["Hand #1 was dealt", "Dealer is Alice", "Next player is Alice"]
    );

    // Во время раздачи состав стола не меняется.
    let err = execute_command(
        &mut store,
        0,
        Command::AddPlayer {
            name: "Dave".into(),
            chips: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Table(TableError::HandInProgress)));

    assert_eq!(
        act(&mut store, Action::Call, 0),
        vec!["Player Alice has performed action CALL", "Next player is Bob"]
    );
    assert_eq!(
        act(&mut store, Action::Call, 0),
        vec!["Player Bob has performed action CALL", "Next player is Carol"]
    );

    // Big blind чекает: префлоп закрыт, открывается флоп.
    let out = act(&mut store, Action::Check, 0);
    assert_eq!(out.len(), 7, "{out:?}");
    assert_eq!(out[0], "Player Carol has performed action CHECK");
    assert_eq!(out[1], "Stage is over");
    assert_eq!(out[2], "The shown community cards are:");
    assert!(out[3..6].iter().all(|l| l.starts_with("   ") && l.contains(" of ")));
    assert_eq!(out[6], "Next player is Bob");

    assert_eq!(show(&mut store, ShowTarget::Board), out[2..6].to_vec());
    assert_eq!(show(&mut store, ShowTarget::Pot), vec!["Current pot: 30"]);
    assert_eq!(
        show(&mut store, ShowTarget::CurrentPlayer),
        vec!["The current player is Bob"]
    );
    assert_eq!(
        show(&mut store, ShowTarget::Money),
        vec!["The current money of Bob: 990"]
    );
    assert_eq!(
        show(&mut store, ShowTarget::Bet),
        vec!["The current bet is 0", "The current bet of Bob is 0"]
    );
    assert_eq!(
        show(&mut store, ShowTarget::Winners),
        vec!["The hand is still in progress"]
    );

    let hole = show(&mut store, ShowTarget::Hole);
    assert_eq!(hole.len(), 3);
    assert_eq!(hole[0], "The hole cards of Bob are:");

    // Ставка на флопе и два фолда.
    assert_eq!(
        act(&mut store, Action::Raise, 50),
        vec!["Player Bob has performed action RAISE", "Next player is Carol"]
    );
    assert_eq!(
        show(&mut store, ShowTarget::Bet),
        vec!["The current bet is 50", "The current bet of Carol is 0"]
    );
    act(&mut store, Action::Fold, 0);
    assert_eq!(
        act(&mut store, Action::Fold, 0),
        vec!["Player Alice has performed action FOLD", "Bob wins 80 chips!"]
    );

    assert_eq!(
        show(&mut store, ShowTarget::Winners),
        vec!["Bob wins 80 chips!"]
    );
    assert_eq!(
        show(&mut store, ShowTarget::Players),
        vec![
            "0: Alice (990 chips) [dealer] [folded]",
            "1: Bob (1020 chips)",
            "2: Carol (990 chips) [folded]",
        ]
    );

    let err = execute_command(
        &mut store,
        0,
        Command::Act {
            action: Action::Check,
            amount: Chips::ZERO,
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Table(TableError::Engine(EngineError::HandAlreadyComplete))
    ));

    // Следующая раздача: кнопка переходит к Bob.
    let out = run(&mut store, Command::DealHand { seed: Some(2) });
    assert_eq!(out[0], "Hand #2 was dealt");
    assert_eq!(out[1], "Dealer is Bob");
    assert_eq!(out[2], "Next player is Bob");
}

#[test]
fn illegal_action_leaves_stored_game_untouched() {
    let mut store = game_with_three_players();
    run(&mut store, Command::DealHand { seed: Some(9) });

    let err = execute_command(
        &mut store,
        0,
        Command::Act {
            action: Action::Check,
            amount: Chips::ZERO,
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Table(TableError::Engine(EngineError::IllegalCheck { .. }))
    ));
    assert_eq!(
        show(&mut store, ShowTarget::CurrentPlayer),
        vec!["The current player is Alice"]
    );
    assert_eq!(show(&mut store, ShowTarget::Pot), vec!["Current pot: 15"]);
}

#[test]
fn table_view_hides_other_hole_cards() {
    let mut store = game_with_three_players();
    run(&mut store, Command::DealHand { seed: Some(4) });
    act(&mut store, Action::Raise, 40);

    let view = match run_query(
        &store,
        Query::GetTable {
            game_id: 0,
            hero: Some("Bob".into()),
        },
    )
    .unwrap()
    {
        QueryResponse::Table(view) => view,
        other => panic!("unexpected response: {other:?}"),
    };

    assert!(view.hand_in_progress);
    assert_eq!(view.street, Some(Street::Preflop));
    assert_eq!(view.dealer_button, Some(0));
    assert_eq!(view.current_actor_seat, Some(1));
    assert_eq!(view.current_bet, Chips(40));
    assert_eq!(view.total_pot, Chips(55));
    assert_eq!(view.pots.len(), 1);
    assert!(view.board.is_empty());
    assert!(view.winners.is_empty());

    assert_eq!(view.players[0].current_bet, Chips(40));
    assert!(view.players[0].hole_cards.is_none());
    assert_eq!(view.players[1].hole_cards.as_ref().map(Vec::len), Some(2));
    assert!(view.players[2].hole_cards.is_none());
}

#[test]
fn table_view_between_hands() {
    let mut store = game_with_three_players();
    let table = store.load(0).unwrap();
    let view = build_table_view(&table, None);

    assert!(!view.hand_in_progress);
    assert_eq!(view.street, None);
    assert_eq!(view.dealer_button, None);
    assert_eq!(view.current_actor_seat, None);
    assert_eq!(view.total_pot, Chips::ZERO);
    assert!(view.pots.is_empty());
    assert_eq!(view.players.len(), 3);
    assert!(view.players.iter().all(|p| p.stack == Chips(1000)));

    run(&mut store, Command::DealHand { seed: Some(5) });
    assert!(matches!(
        run_query(&store, Query::NextGameId).unwrap(),
        QueryResponse::NextGameId(1)
    ));
}
