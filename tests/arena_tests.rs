//! Versus and solo arenas: garbage exchange, restart, winner

use tui_puyo::core::{Board, SessionConfig, SessionEvent};
use tui_puyo::engine::{Arena, Mode, PlannerConfig};
use tui_puyo::types::{GameAction, SessionState, TICK_MS};

/// Inbound garbage never drops during these tests.
fn held_garbage_config() -> SessionConfig {
    SessionConfig {
        garbage_interval_ms: 600_000,
        ..SessionConfig::default()
    }
}

/// Purples clear, then eight cyans: 6 garbage at the default ojama base.
fn two_step_board() -> Board {
    Board::from_rows(&["CC.C..", "###C..", "PPPP..", "CCC#C."])
}

#[test]
fn test_chain_garbage_delivered_exactly_once() {
    let mut arena = Arena::versus(held_garbage_config(), 10, [None, None]).expect("arena");
    let p1 = arena.session_mut(0).expect("p1");
    p1.load_board(two_step_board());
    for _ in 0..3 {
        p1.apply_action(GameAction::MoveRight);
    }
    p1.apply_action(GameAction::HardDrop);

    for _ in 0..400 {
        arena.update(TICK_MS);
    }

    let p1 = arena.session(0).expect("p1");
    let p2 = arena.session(1).expect("p2");
    assert_eq!(p1.score(), 680);
    assert_eq!(p1.outgoing_garbage(), 0);
    assert_eq!(p2.pending_garbage(), 6);
    // Nothing flows back.
    assert_eq!(p1.pending_garbage(), 0);
}

#[test]
fn test_events_are_tagged_by_player() {
    let mut arena = Arena::versus(SessionConfig::default(), 2, [None, None]).expect("arena");
    arena.handle_input(1, GameAction::HardDrop);
    let events = arena.take_events();
    assert!(events
        .iter()
        .any(|(i, e)| *i == 1 && matches!(e, SessionEvent::Locked { .. })));
    assert!(events.iter().all(|(i, _)| *i == 1));
    assert!(arena.take_events().is_empty());
}

#[test]
fn test_winner_is_last_board_standing() {
    let mut arena = Arena::versus(SessionConfig::default(), 3, [None, None]).expect("arena");
    assert_eq!(arena.mode(), Mode::Versus);
    assert_eq!(arena.winner(), None);

    let p2 = arena.session_mut(1).expect("p2");
    p2.load_board(Board::from_rows(&["...#.."; 11]));
    p2.apply_action(GameAction::HardDrop);
    assert_eq!(arena.session(1).map(|s| s.state()), Some(SessionState::GameOver));
    assert_eq!(arena.winner(), Some(0));

    arena.handle_input(0, GameAction::Restart);
    assert_eq!(arena.winner(), None);
}

#[test]
fn test_solo_has_no_winner() {
    let mut arena = Arena::solo(SessionConfig::default(), 3, None).expect("arena");
    assert_eq!(arena.mode(), Mode::Solo);
    assert_eq!(arena.players().len(), 1);
    let s = arena.session_mut(0).expect("solo");
    s.load_board(Board::from_rows(&["...#.."; 11]));
    s.apply_action(GameAction::HardDrop);
    assert_eq!(arena.winner(), None);
}

#[test]
fn test_player_seeds_differ() {
    let arena = Arena::versus(SessionConfig::default(), 40, [None, None]).expect("arena");
    let seeds: Vec<u64> = arena.players().iter().map(|p| p.session.seed()).collect();
    assert_eq!(seeds, vec![40, 41]);
}

#[test]
fn test_ai_versus_ai_runs() {
    let ai = Some(PlannerConfig::default());
    let mut arena = Arena::versus(SessionConfig::default(), 77, [ai, ai]).expect("arena");
    assert!(arena.players().iter().all(|p| p.is_ai()));

    // Two simulated minutes.
    for _ in 0..(120_000 / TICK_MS) {
        arena.update(TICK_MS);
    }
    for p in arena.players() {
        assert!(p.session.piece_id() > 10);
    }
}
