use arrayvec::ArrayVec;

use tui_puyo_core::{Board, PuyoPair, Session};
use tui_puyo_types::{GameAction, Orientation, RotationDir, BOARD_WIDTH};

/// Commands that bring a pair from its spawn to a target placement.
///
/// At most two rotations and `BOARD_WIDTH - 1` moves.
pub type Route = ArrayVec<GameAction, 8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    NotPlayable,
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable | PlaceError::NoActive => "not_playable",
            PlaceError::RotationBlocked | PlaceError::XOutOfBounds | PlaceError::XBlocked => {
                "invalid_place"
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::RotationBlocked => "could not rotate to target orientation",
            PlaceError::XOutOfBounds => "target x would place pair out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
            PlaceError::NotPlayable => "session is not accepting input",
            PlaceError::NoActive => "no active pair",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Simulate the route to `(target_x, target)` from `pair` on `board`.
///
/// Rotations come first, trying the shorter direction and then the other;
/// horizontal moves follow. Returns the route and the pair where it ends
/// (before dropping).
pub fn plan_route(
    board: &Board,
    pair: PuyoPair,
    target_x: i8,
    target: Orientation,
) -> Result<(Route, PuyoPair), PlaceError> {
    let cur = pair.orientation.index() as i8;
    let tgt = target.index() as i8;
    let cw = (tgt - cur).rem_euclid(4) as u8;
    let ccw = (cur - tgt).rem_euclid(4) as u8;

    let mut plans = [(RotationDir::Cw, cw), (RotationDir::Ccw, ccw)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let mut rotated = None;
    for (dir, steps) in plans {
        let mut sim = pair;
        let mut route = Route::new();
        let mut ok = true;
        for _ in 0..steps {
            if !sim.try_rotate(board, dir) {
                ok = false;
                break;
            }
            route.push(match dir {
                RotationDir::Cw => GameAction::RotateCw,
                RotationDir::Ccw => GameAction::RotateCcw,
            });
        }
        if ok {
            rotated = Some((route, sim));
            break;
        }
    }
    let Some((mut route, mut sim)) = rotated else {
        return Err(PlaceError::RotationBlocked);
    };

    let (child_dx, _) = target.child_offset();
    if target_x + child_dx.min(0) < 0 || target_x + child_dx.max(0) >= BOARD_WIDTH as i8 {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = target_x - sim.x;
    let (step, action) = if dx > 0 {
        (1, GameAction::MoveRight)
    } else {
        (-1, GameAction::MoveLeft)
    };
    for _ in 0..dx.unsigned_abs() {
        if !sim.try_move(board, step, 0) {
            return Err(PlaceError::XBlocked);
        }
        route.push(action);
    }

    Ok((route, sim))
}

/// Steer the session's pair to a placement and hard drop it
pub fn apply_place(
    session: &mut Session,
    target_x: i8,
    target: Orientation,
) -> Result<(), PlaceError> {
    if session.game_over() {
        return Err(PlaceError::NotPlayable);
    }
    let Some(pair) = session.current() else {
        return Err(PlaceError::NoActive);
    };
    if !session.accepts_input() {
        return Err(PlaceError::NotPlayable);
    }

    let (route, _) = plan_route(session.board(), pair, target_x, target)?;
    for action in route {
        if !session.apply_action(action) {
            return Err(PlaceError::XBlocked);
        }
    }
    if !session.apply_action(GameAction::HardDrop) {
        return Err(PlaceError::NotPlayable);
    }
    Ok(())
}
