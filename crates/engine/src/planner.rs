//! Heuristic AI planner
//!
//! After an idle "think" interval the planner scores every reachable
//! (column, orientation) placement of the active pair, keeps the best route,
//! and replays it one command at a time with short delays before hard dropping.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use tui_puyo_core::{Board, PuyoPair, Session};
use tui_puyo_types::{
    GameAction, Orientation, Puyo, PuyoColor, AI_MOVE_DELAY_MS, AI_ROTATE_DELAY_MS, AI_THINK_MS,
    BOARD_HEIGHT, BOARD_WIDTH,
};

use crate::place::{plan_route, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    pub think_ms: u32,
    pub move_delay_ms: u32,
    pub rotate_delay_ms: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            think_ms: AI_THINK_MS,
            move_delay_ms: AI_MOVE_DELAY_MS,
            rotate_delay_ms: AI_ROTATE_DELAY_MS,
        }
    }
}

/// A scored placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub x: i8,
    pub orientation: Orientation,
    pub score: i32,
    pub route: Route,
}

#[derive(Debug, Clone)]
struct Plan {
    piece_id: u32,
    steps: Route,
    next: usize,
}

#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    rng: StdRng,
    think_timer_ms: u32,
    delay_ms: u32,
    plan: Option<Plan>,
}

impl Planner {
    pub fn new(config: PlannerConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            think_timer_ms: 0,
            delay_ms: 0,
            plan: None,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Forget the current plan and timers
    pub fn reset(&mut self) {
        self.think_timer_ms = 0;
        self.delay_ms = 0;
        self.plan = None;
    }

    pub fn has_plan(&self) -> bool {
        self.plan.is_some()
    }

    /// Steps of the current plan not yet replayed
    pub fn remaining_steps(&self) -> &[GameAction] {
        self.plan
            .as_ref()
            .map(|p| &p.steps[p.next..])
            .unwrap_or(&[])
    }

    /// Advance the planner and drive the session
    pub fn update(&mut self, session: &mut Session, elapsed_ms: u32) {
        if self
            .plan
            .as_ref()
            .is_some_and(|p| p.piece_id != session.piece_id())
        {
            self.reset();
        }
        if !session.accepts_input() {
            return;
        }
        let Some(pair) = session.current() else {
            return;
        };

        if self.plan.is_none() {
            self.think_timer_ms += elapsed_ms;
            if self.think_timer_ms >= self.config.think_ms {
                self.think_timer_ms = 0;
                let steps = self.decide(session.board(), pair);
                self.plan = Some(Plan {
                    piece_id: session.piece_id(),
                    steps,
                    next: 0,
                });
            }
        }

        if self.delay_ms > 0 {
            self.delay_ms = self.delay_ms.saturating_sub(elapsed_ms);
            return;
        }

        let Some(plan) = self.plan.as_mut() else {
            return;
        };
        if let Some(&action) = plan.steps.get(plan.next) {
            session.apply_action(action);
            plan.next += 1;
            self.delay_ms = if action.is_rotation() {
                self.config.rotate_delay_ms
            } else {
                self.config.move_delay_ms
            };
        } else {
            self.plan = None;
            session.apply_action(GameAction::HardDrop);
        }
    }

    /// Pick a route for `pair`: the best scoring placement, else a random one.
    ///
    /// An empty route means the pair is dropped where it is.
    pub fn decide(&mut self, board: &Board, pair: PuyoPair) -> Route {
        if let Some(best) = search(board, pair) {
            debug!(
                x = best.x,
                orientation = best.orientation.as_str(),
                score = best.score,
                steps = best.route.len(),
                "ai placement chosen"
            );
            return best.route;
        }

        self.fallback_route(board, pair)
    }

    /// Route to a seeded random (column, orientation), empty when unreachable
    fn fallback_route(&mut self, board: &Board, pair: PuyoPair) -> Route {
        let x = self.rng.gen_range(0..BOARD_WIDTH as i8);
        let orientation = Orientation::ALL[self.rng.gen_range(0..Orientation::ALL.len())];
        let route = plan_route(board, pair, x, orientation)
            .map(|(route, _)| route)
            .unwrap_or_default();
        debug!(
            x,
            orientation = orientation.as_str(),
            steps = route.len(),
            "ai fallback placement"
        );
        route
    }
}

/// Best reachable placement, ties resolved in favor of the first found.
///
/// Candidates are visited column-major, then in rotation order. A pair that
/// overlaps the board where it stands has no placement.
pub fn search(board: &Board, pair: PuyoPair) -> Option<Candidate> {
    if !pair.fits_at_current(board) {
        return None;
    }
    let mut best: Option<Candidate> = None;
    for x in 0..BOARD_WIDTH as i8 {
        for orientation in Orientation::ALL {
            let Ok((route, end)) = plan_route(board, pair, x, orientation) else {
                continue;
            };
            let score = evaluate(board, end);
            trace!(x, orientation = orientation.as_str(), score, "ai candidate");
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(Candidate {
                    x,
                    orientation,
                    score,
                    route,
                });
            }
        }
    }
    best
}

fn same_color_neighbors(board: &Board, x: i8, y: i8, color: PuyoColor) -> i32 {
    [(0, -1), (1, 0), (0, 1), (-1, 0)]
        .iter()
        .filter(|&&(dx, dy)| board.color_at(x + dx, y + dy) == Some(color))
        .count() as i32
}

/// Score a pair dropped from where it stands.
///
/// Each cell falls on its own, lower cell first, then
/// `10 * neighbors - 2 * height + centrality` is summed over both cells.
pub fn evaluate(board: &Board, pair: PuyoPair) -> i32 {
    let mut sim = board.clone();
    let mut cells = pair.cells();
    cells.sort_by_key(|&(_, y, _)| std::cmp::Reverse(y));

    let mut placed = [(0i8, 0i8, PuyoColor::Red); 2];
    for (slot, &(x, y, color)) in placed.iter_mut().zip(cells.iter()) {
        let mut y = y;
        while sim.is_valid(x, y + 1) {
            y += 1;
        }
        sim.set(x, y, Some(Puyo::Colored(color)));
        *slot = (x, y, color);
    }

    let h = BOARD_HEIGHT as i32;
    let half = BOARD_WIDTH as i32 / 2;
    placed
        .iter()
        .map(|&(x, y, color)| {
            10 * same_color_neighbors(&sim, x, y, color) - 2 * (h - y as i32)
                + (half - (x as i32 - half).abs())
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_puyo_core::SessionConfig;
    use tui_puyo_types::{RotationDir, SessionState, TICK_MS};

    fn red_blue() -> PuyoPair {
        PuyoPair::new(PuyoColor::Red, PuyoColor::Blue)
    }

    #[test]
    fn evaluate_vertical_pair_stacks() {
        let board = Board::new();
        // Pivot lands at row 11, child on top at row 10, both in column 2.
        // Heights: (12-11)+(12-10) = 3, centrality: 2*(3-1) = 4.
        assert_eq!(evaluate(&board, red_blue()), -6 + 4);
    }

    #[test]
    fn evaluate_rewards_matching_neighbors() {
        let board = Board::from_rows(&["RR...."]);
        let next_to = red_blue().at(2, 5, Orientation::Right);
        let far = red_blue().at(4, 5, Orientation::Right);
        assert!(evaluate(&board, next_to) > evaluate(&board, far));
    }

    #[test]
    fn search_prefers_joining_color() {
        let board = Board::from_rows(&["R.....", "R....."]);
        let pair = PuyoPair::new(PuyoColor::Red, PuyoColor::Red);
        let best = search(&board, pair).expect("candidate");
        // Standing next to the reds touches both of them from each cell.
        assert_eq!(best.x, 1);
        assert_eq!(best.orientation, Orientation::Up);
        assert_eq!(best.score, 36);
    }

    #[test]
    fn search_allows_negative_scores() {
        // A full stack keeps the pair at the top, so every placement scores below zero.
        let board = Board::from_rows(&["######"; 10]);
        let best = search(&board, red_blue()).expect("candidate");
        assert!(best.score < 0);
    }

    #[test]
    fn search_finds_nothing_for_a_wedged_pair() {
        let board = Board::from_rows(&["..#..."; 11]);
        assert!(search(&board, red_blue()).is_none());
    }

    #[test]
    fn fallback_route_is_seeded() {
        let board = Board::new();
        let mut a = Planner::new(PlannerConfig::default(), 21);
        let mut b = Planner::new(PlannerConfig::default(), 21);
        for _ in 0..8 {
            let route = a.fallback_route(&board, red_blue());
            assert_eq!(route, b.fallback_route(&board, red_blue()));
            assert!(route.iter().filter(|act| act.is_rotation()).count() <= 2);
        }
    }

    #[test]
    fn fallback_route_reaches_its_target_on_an_empty_board() {
        let board = Board::new();
        let mut p = Planner::new(PlannerConfig::default(), 4);
        let mut seen_moves = false;
        for _ in 0..32 {
            let route = p.fallback_route(&board, red_blue());
            let mut sim = red_blue();
            for &action in &route {
                let ok = match action {
                    GameAction::MoveLeft => sim.try_move(&board, -1, 0),
                    GameAction::MoveRight => sim.try_move(&board, 1, 0),
                    GameAction::RotateCw => sim.try_rotate(&board, RotationDir::Cw),
                    GameAction::RotateCcw => sim.try_rotate(&board, RotationDir::Ccw),
                    _ => false,
                };
                assert!(ok, "{action:?} failed in {route:?}");
            }
            seen_moves |= route
                .iter()
                .any(|a| matches!(a, GameAction::MoveLeft | GameAction::MoveRight));
        }
        assert!(seen_moves);
    }

    #[test]
    fn fallback_route_is_empty_when_target_unreachable() {
        // Walls on both sides allow no move and no rotation.
        let board = Board::from_rows(&[".#.#.."; 12]);
        let mut p = Planner::new(PlannerConfig::default(), 9);
        for _ in 0..32 {
            assert!(p.fallback_route(&board, red_blue()).is_empty());
        }
    }

    #[test]
    fn decide_falls_back_when_search_finds_nothing() {
        let board = Board::from_rows(&["..#..."; 11]);
        let mut p = Planner::new(PlannerConfig::default(), 5);
        let mut q = Planner::new(PlannerConfig::default(), 5);
        assert_eq!(p.decide(&board, red_blue()), q.fallback_route(&board, red_blue()));
    }

    #[test]
    fn planner_waits_then_drops() {
        let mut s = Session::new(SessionConfig::default(), 3).expect("valid config");
        let mut p = Planner::new(PlannerConfig::default(), 3);

        p.update(&mut s, 400);
        assert!(!p.has_plan());
        assert_eq!(s.board().count_occupied(), 0);

        let mut elapsed = 0;
        while s.board().count_occupied() == 0 && elapsed < 5_000 {
            s.update(TICK_MS);
            p.update(&mut s, TICK_MS);
            elapsed += TICK_MS;
        }
        assert_eq!(s.board().count_occupied(), 2);
        assert!(!p.has_plan());
        assert_eq!(s.state(), SessionState::Controlling);
    }

    #[test]
    fn planner_drops_stale_plan_after_lock() {
        let mut s = Session::new(SessionConfig::default(), 3).expect("valid config");
        let mut p = Planner::new(PlannerConfig::default(), 3);
        // On an empty board the best placement lies one rotation away.
        p.update(&mut s, 500);
        assert!(p.has_plan());
        s.apply_action(GameAction::HardDrop);
        p.update(&mut s, 1);
        assert!(!p.has_plan());
    }
}
