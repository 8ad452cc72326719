//! Route planning and the heuristic AI

use tui_puyo::core::{Board, PuyoPair, Session, SessionConfig};
use tui_puyo::engine::{apply_place, plan_route, search, PlaceError, Planner, PlannerConfig};
use tui_puyo::types::{GameAction, Orientation, PuyoColor, BOARD_WIDTH, TICK_MS};

fn pair() -> PuyoPair {
    PuyoPair::new(PuyoColor::Red, PuyoColor::Blue)
}

#[test]
fn test_route_moves_only() {
    let (route, end) = plan_route(&Board::new(), pair(), 0, Orientation::Up).expect("route");
    assert_eq!(route.as_slice(), &[GameAction::MoveLeft, GameAction::MoveLeft]);
    assert_eq!((end.x, end.orientation), (0, Orientation::Up));
}

#[test]
fn test_route_rotates_the_short_way_first() {
    let board = Board::new();
    let (route, _) = plan_route(&board, pair(), 2, Orientation::Left).expect("route");
    assert_eq!(route.as_slice(), &[GameAction::RotateCcw]);

    let (route, end) = plan_route(&board, pair(), 4, Orientation::Right).expect("route");
    assert_eq!(
        route.as_slice(),
        &[GameAction::RotateCw, GameAction::MoveRight, GameAction::MoveRight]
    );
    assert_eq!(end.child_pos(), (5, 1));
}

#[test]
fn test_route_errors() {
    let board = Board::new();
    assert_eq!(
        plan_route(&board, pair(), 5, Orientation::Right).map(|_| ()),
        Err(PlaceError::XOutOfBounds)
    );

    let wall = Board::from_rows(&["...#.."; 11]);
    let err = plan_route(&wall, pair(), 5, Orientation::Up).map(|_| ());
    assert_eq!(err, Err(PlaceError::XBlocked));
    assert_eq!(PlaceError::XBlocked.code(), "invalid_place");
}

#[test]
fn test_apply_place_drops_at_target() {
    let mut s = Session::new(SessionConfig::default(), 6).expect("session");
    let placed = s.current().expect("pair");
    apply_place(&mut s, 0, Orientation::Right).expect("placed");
    assert_eq!(s.board().color_at(0, 11), Some(placed.pivot));
    assert_eq!(s.board().color_at(1, 11), Some(placed.child));
}

#[test]
fn test_search_covers_every_column() {
    let best = search(&Board::new(), pair()).expect("candidate");
    assert!((0..BOARD_WIDTH as i8).contains(&best.x));
    // Replaying the chosen route ends where the candidate says.
    let (_, end) = plan_route(&Board::new(), pair(), best.x, best.orientation).expect("route");
    assert_eq!((end.x, end.orientation), (best.x, best.orientation));
}

#[test]
fn test_planner_plays_a_game() {
    let mut s = Session::new(SessionConfig::default(), 12).expect("session");
    let mut p = Planner::new(PlannerConfig::default(), 12);
    for _ in 0..(60_000 / TICK_MS) {
        s.update(TICK_MS);
        p.update(&mut s, TICK_MS);
        if s.game_over() {
            break;
        }
    }
    assert!(s.piece_id() > 5);
}

#[test]
fn test_planner_with_no_think_time_drops_quickly() {
    let cfg = PlannerConfig {
        think_ms: 0,
        move_delay_ms: 0,
        rotate_delay_ms: 0,
    };
    let mut s = Session::new(SessionConfig::default(), 12).expect("session");
    let mut p = Planner::new(cfg, 12);
    let mut updates = 0;
    while s.piece_id() == 1 && updates < 20 {
        p.update(&mut s, TICK_MS);
        updates += 1;
    }
    // One update per route step plus the drop, with no session time passing.
    assert_eq!(s.piece_id(), 2);
    assert!(updates <= 8);
}
