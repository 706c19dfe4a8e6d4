//! End-to-end tests for turn sequencing, outcomes, and CPU scheduling.

use gridduel::{
    CpuDelivery, GameController, GameEvent, GameStatus, MoveError, PlayerConfig, Symbol,
    find_winner, is_draw,
};
use tokio::sync::mpsc;

fn human(symbol: Symbol) -> PlayerConfig {
    PlayerConfig {
        symbol,
        is_cpu: false,
        display_name: None,
    }
}

fn cpu(symbol: Symbol) -> PlayerConfig {
    PlayerConfig {
        symbol,
        is_cpu: true,
        display_name: None,
    }
}

fn new_game(
    configs: [PlayerConfig; 2],
) -> (
    GameController,
    mpsc::UnboundedReceiver<GameEvent>,
    mpsc::UnboundedReceiver<CpuDelivery>,
) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (controller, delivery_rx) = GameController::new(3, configs, event_tx);
    (controller, event_rx, delivery_rx)
}

fn drain(event_rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = event_rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_top_row_win() {
    let (mut controller, mut event_rx, _deliveries) =
        new_game([human(Symbol::X), human(Symbol::O)]);

    // X takes the top row while O scatters.
    for (moves_made, index) in [0, 4, 1, 7, 2].into_iter().enumerate() {
        assert_eq!(controller.current_turn_index(), moves_made % 2);
        controller.submit_move(index).unwrap();
    }

    assert_eq!(controller.status(), GameStatus::Won(Symbol::X));
    assert_eq!(find_winner(controller.board()), Some(Symbol::X));

    let events = drain(&mut event_rx);
    assert_eq!(events.len(), 6);
    assert_eq!(
        events[0],
        GameEvent::MoveApplied {
            cell_index: 0,
            symbol: Symbol::X
        }
    );
    assert_eq!(
        events[5],
        GameEvent::GameOver {
            winner: Some(Symbol::X)
        }
    );
}

#[tokio::test]
async fn test_full_board_without_line_is_a_draw() {
    let (mut controller, mut event_rx, _deliveries) =
        new_game([human(Symbol::X), human(Symbol::O)]);

    // Ends with cells X,O,X,X,O,O,O,X,X and no completed line.
    for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        controller.submit_move(index).unwrap();
    }

    assert_eq!(controller.status(), GameStatus::Draw);
    assert!(is_draw(controller.board()));

    let game_over: Vec<_> = drain(&mut event_rx)
        .into_iter()
        .filter(|event| matches!(event, GameEvent::GameOver { .. }))
        .collect();
    assert_eq!(game_over, vec![GameEvent::GameOver { winner: None }]);
}

#[tokio::test]
async fn test_second_move_on_same_cell_is_rejected() {
    let (mut controller, _event_rx, _deliveries) =
        new_game([human(Symbol::X), human(Symbol::O)]);

    controller.submit_move(0).unwrap();
    assert_eq!(controller.submit_move(0), Err(MoveError::CellOccupied(0)));

    // The occupant and the turn are unchanged by the rejection.
    assert_eq!(controller.board().cell(0).unwrap().occupant(), Some(Symbol::X));
    assert_eq!(controller.current_turn_index(), 1);
}

#[tokio::test]
async fn test_out_of_range_move_is_rejected() {
    let (mut controller, _event_rx, _deliveries) =
        new_game([human(Symbol::X), human(Symbol::O)]);

    assert_eq!(controller.submit_move(9), Err(MoveError::OutOfRange(9)));
    assert_eq!(controller.current_turn_index(), 0);
}

#[tokio::test]
async fn test_terminal_state_rejects_further_moves() {
    let (mut controller, mut event_rx, _deliveries) =
        new_game([human(Symbol::X), human(Symbol::O)]);

    for index in [0, 4, 1, 7, 2] {
        controller.submit_move(index).unwrap();
    }
    assert_eq!(controller.status(), GameStatus::Won(Symbol::X));
    let board_at_end = controller.board().clone();
    drain(&mut event_rx);

    assert_eq!(controller.submit_move(5), Err(MoveError::GameAlreadyOver));
    assert_eq!(controller.board(), &board_at_end);
    assert!(drain(&mut event_rx).is_empty());
}

#[tokio::test]
async fn test_submit_during_cpu_turn_is_rejected() {
    let (mut controller, _event_rx, _deliveries) = new_game([cpu(Symbol::X), human(Symbol::O)]);

    assert_eq!(
        controller.submit_move(0),
        Err(MoveError::WrongPlayer(Symbol::X))
    );
    assert!(controller.board().is_empty(0));
}

#[tokio::test(start_paused = true)]
async fn test_cpu_delivery_applies_and_hands_turn_over() {
    let (mut controller, mut event_rx, mut delivery_rx) =
        new_game([cpu(Symbol::X), human(Symbol::O)]);

    let delivery = delivery_rx.recv().await.unwrap();
    assert_eq!(delivery.symbol, Symbol::X);
    assert!(controller.board().is_empty(delivery.cell_index));

    controller.apply_cpu_delivery(delivery).unwrap();

    assert_eq!(
        controller.board().cell(delivery.cell_index).unwrap().occupant(),
        Some(Symbol::X)
    );
    assert_eq!(controller.current_turn_index(), 1);
    assert_eq!(
        drain(&mut event_rx),
        vec![GameEvent::MoveApplied {
            cell_index: delivery.cell_index,
            symbol: Symbol::X
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_cpu_versus_cpu_reaches_a_terminal_state() {
    let (mut controller, mut event_rx, mut delivery_rx) =
        new_game([cpu(Symbol::X), cpu(Symbol::O)]);

    for _ in 0..9 {
        if controller.status() != GameStatus::InProgress {
            break;
        }
        let delivery = delivery_rx.recv().await.unwrap();
        controller.apply_cpu_delivery(delivery).unwrap();
    }

    match controller.status() {
        GameStatus::Won(symbol) => {
            assert_eq!(find_winner(controller.board()), Some(symbol));
        }
        GameStatus::Draw => assert!(is_draw(controller.board())),
        GameStatus::InProgress => panic!("nine CPU moves must end a 3x3 game"),
    }

    let game_over_count = drain(&mut event_rx)
        .into_iter()
        .filter(|event| matches!(event, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_over_count, 1);
}

#[tokio::test(start_paused = true)]
async fn test_new_game_discards_pending_cpu_delivery() {
    let (mut controller, _event_rx, mut delivery_rx) =
        new_game([cpu(Symbol::X), human(Symbol::O)]);

    // Reset while the opening CPU move is still thinking.
    controller.start_new_game([human(Symbol::X), human(Symbol::O)]);

    let stale = delivery_rx.recv().await.unwrap();
    assert_eq!(
        controller.apply_cpu_delivery(stale),
        Err(MoveError::StaleDelivery)
    );

    // The stale move left no trace on the new game's board.
    let cell_count = controller.board().size() * controller.board().size();
    assert!((0..cell_count).all(|index| controller.board().is_empty(index)));
    assert_eq!(controller.status(), GameStatus::InProgress);
    assert_eq!(controller.current_turn_index(), 0);
}

#[tokio::test]
async fn test_new_game_resets_board_and_turn() {
    let (mut controller, mut event_rx, _deliveries) =
        new_game([human(Symbol::X), human(Symbol::O)]);

    for index in [0, 4, 1, 7, 2] {
        controller.submit_move(index).unwrap();
    }
    assert_eq!(controller.status(), GameStatus::Won(Symbol::X));
    let generation_before = controller.generation();
    drain(&mut event_rx);

    controller.start_new_game([human(Symbol::O), human(Symbol::X)]);

    assert_eq!(controller.status(), GameStatus::InProgress);
    assert_eq!(controller.current_turn_index(), 0);
    assert_eq!(controller.current_player().symbol(), Symbol::O);
    assert!(controller.generation() > generation_before);
    assert!((0..9).all(|index| controller.board().is_empty(index)));

    controller.submit_move(4).unwrap();
    assert_eq!(
        controller.board().cell(4).unwrap().occupant(),
        Some(Symbol::O)
    );
}
