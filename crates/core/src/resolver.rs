//! Resolver module - connected-group matching, garbage removal, and gravity
//!
//! A resolution pass flood-fills every colored region with an explicit stack,
//! removes the regions of at least [`MIN_GROUP_SIZE`] cells together with any
//! garbage touching them, and reports what was removed. Gravity is a separate
//! step ([`settle`]) so the session can pause between the clear and the cascade.
//!
//! All scratch state (visited mask, work stack) is local to a pass; nothing is
//! stored on the cells themselves.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Puyo, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH, MIN_GROUP_SIZE};

const NEIGHBORS: [(i8, i8); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// One bit per board slot
type Mask = u128;

const _: () = assert!(BOARD_SIZE <= Mask::BITS as usize);

#[inline(always)]
fn bit(idx: usize) -> Mask {
    1 << idx
}

/// Tallies for one clearing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearStats {
    /// Colored cells removed (garbage excluded)
    pub cleared: u32,
    /// Qualifying groups
    pub groups: u32,
    /// Distinct colors among the groups
    pub colors: u32,
    /// Chain length after this pass (1 for the first clear)
    pub chain: u32,
}

/// A cell removed by a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedCell {
    pub x: i8,
    pub y: i8,
    pub puyo: Puyo,
}

/// Output of a clearing pass
#[derive(Debug, Clone, PartialEq)]
pub struct ClearReport {
    pub stats: ClearStats,
    /// Group cells first, then adjacent garbage
    pub removed: ArrayVec<ClearedCell, BOARD_SIZE>,
}

/// A single gravity move within a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMove {
    pub x: i8,
    pub from: i8,
    pub to: i8,
}

impl CellMove {
    pub fn rows(&self) -> u8 {
        (self.to - self.from) as u8
    }
}

/// Moves made by one [`settle`] call
pub type Settle = ArrayVec<CellMove, BOARD_SIZE>;

/// Compact every column so no cell floats above an empty slot.
///
/// Each column is scanned bottom-up and every cell drops to the lowest free
/// row, so a single call settles the board completely.
pub fn settle(board: &mut Board) -> Settle {
    let mut moves = Settle::new();
    for x in 0..BOARD_WIDTH as i8 {
        let mut write = BOARD_HEIGHT as i8 - 1;
        for read in (0..BOARD_HEIGHT as i8).rev() {
            let cell = board.get(x, read).flatten();
            if cell.is_none() {
                continue;
            }
            if read != write {
                board.set(x, write, cell);
                board.set(x, read, None);
                moves.push(CellMove {
                    x,
                    from: read,
                    to: write,
                });
            }
            write -= 1;
        }
    }
    moves
}

/// Group finder and chain counter for one board
#[derive(Debug, Clone, Default)]
pub struct MatchResolver {
    chain: u32,
}

impl MatchResolver {
    pub fn new() -> Self {
        Self { chain: 0 }
    }

    /// Current chain length (0 when the last pass cleared nothing)
    pub fn chain(&self) -> u32 {
        self.chain
    }

    pub fn reset(&mut self) {
        self.chain = 0;
    }

    /// Run one clearing pass without applying gravity.
    ///
    /// Returns `None` and resets the chain when no group qualifies.
    pub fn resolve(&mut self, board: &mut Board) -> Option<ClearReport> {
        let cells = board.cells();
        let mut visited: Mask = 0;
        let mut clear: Mask = 0;
        let mut stack: ArrayVec<usize, BOARD_SIZE> = ArrayVec::new();
        let mut region: ArrayVec<usize, BOARD_SIZE> = ArrayVec::new();
        let mut groups = 0u32;
        let mut color_mask = 0u8;

        for start in 0..BOARD_SIZE {
            let Some(Puyo::Colored(color)) = cells[start] else {
                continue;
            };
            if visited & bit(start) != 0 {
                continue;
            }

            visited |= bit(start);
            stack.clear();
            region.clear();
            stack.push(start);
            while let Some(idx) = stack.pop() {
                region.push(idx);
                let (x, y) = Board::coords(idx);
                for (dx, dy) in NEIGHBORS {
                    let Some(n) = Board::index(x + dx, y + dy) else {
                        continue;
                    };
                    if visited & bit(n) == 0 && cells[n] == Some(Puyo::Colored(color)) {
                        visited |= bit(n);
                        stack.push(n);
                    }
                }
            }

            if region.len() >= MIN_GROUP_SIZE {
                groups += 1;
                color_mask |= 1 << color as u8;
                for &idx in &region {
                    clear |= bit(idx);
                }
            }
        }

        if groups == 0 {
            self.chain = 0;
            return None;
        }
        self.chain += 1;

        let touches_clear = |idx: usize| {
            let (x, y) = Board::coords(idx);
            NEIGHBORS.iter().any(|&(dx, dy)| {
                Board::index(x + dx, y + dy).is_some_and(|n| clear & bit(n) != 0)
            })
        };

        let mut removed = ArrayVec::new();
        let mut garbage = ArrayVec::<ClearedCell, BOARD_SIZE>::new();
        for (idx, cell) in cells.iter().enumerate() {
            let Some(puyo) = *cell else {
                continue;
            };
            let (x, y) = Board::coords(idx);
            if clear & bit(idx) != 0 {
                removed.push(ClearedCell { x, y, puyo });
            } else if puyo.is_garbage() && touches_clear(idx) {
                garbage.push(ClearedCell { x, y, puyo });
            }
        }
        removed.extend(garbage);

        let cells = board.cells_mut();
        for cell in &removed {
            if let Some(idx) = Board::index(cell.x, cell.y) {
                cells[idx] = None;
            }
        }

        let cleared = clear.count_ones();
        Some(ClearReport {
            stats: ClearStats {
                cleared,
                groups,
                colors: color_mask.count_ones(),
                chain: self.chain,
            },
            removed,
        })
    }

    /// Clear and then settle, for headless chain simulation
    pub fn resolve_step(&mut self, board: &mut Board) -> Option<ClearReport> {
        let report = self.resolve(board)?;
        settle(board);
        Some(report)
    }

    /// Resolve the full chain, returning stats for every clearing pass
    pub fn resolve_all(&mut self, board: &mut Board) -> Vec<ClearStats> {
        let mut steps = Vec::new();
        while let Some(report) = self.resolve_step(board) {
            steps.push(report.stats);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_of_four_clears() {
        let mut board = Board::from_rows(&["RR....", "RR...."]);
        let mut resolver = MatchResolver::new();
        let report = resolver.resolve(&mut board).expect("clear");
        assert_eq!(
            report.stats,
            ClearStats {
                cleared: 4,
                groups: 1,
                colors: 1,
                chain: 1
            }
        );
        assert!(board.is_empty());
    }

    #[test]
    fn test_group_of_three_stays() {
        let mut board = Board::from_rows(&["RRR..."]);
        let mut resolver = MatchResolver::new();
        assert!(resolver.resolve(&mut board).is_none());
        assert_eq!(board.count_occupied(), 3);
        assert_eq!(resolver.chain(), 0);
    }

    #[test]
    fn test_regions_do_not_span_colors() {
        let mut board = Board::from_rows(&["RRGG..", "RGG..."]);
        let mut resolver = MatchResolver::new();
        let report = resolver.resolve(&mut board).expect("green clears");
        assert_eq!(report.stats.cleared, 4);
        assert_eq!(board.count_occupied(), 3);
    }

    #[test]
    fn test_adjacent_garbage_removed_distant_garbage_survives() {
        let mut board = Board::from_rows(&["#.....", "RRRR.#"]);
        let mut resolver = MatchResolver::new();
        let report = resolver.resolve(&mut board).expect("clear");
        assert_eq!(report.stats.cleared, 4);
        assert_eq!(report.removed.len(), 5);
        assert!(report.removed[4].puyo.is_garbage());
        assert_eq!(board.get(0, 10), Some(None));
        assert_eq!(board.get(5, 11), Some(Some(Puyo::Garbage)));
    }

    #[test]
    fn test_garbage_never_joins_group() {
        let mut board = Board::from_rows(&["RR##..", "R#...."]);
        let mut resolver = MatchResolver::new();
        assert!(resolver.resolve(&mut board).is_none());
    }

    #[test]
    fn test_two_groups_two_colors() {
        let mut board = Board::from_rows(&["RRGG..", "RRGG.."]);
        let mut resolver = MatchResolver::new();
        let stats = resolver.resolve(&mut board).expect("clear").stats;
        assert_eq!(stats.groups, 2);
        assert_eq!(stats.colors, 2);
        assert_eq!(stats.cleared, 8);
    }

    #[test]
    fn test_settle_is_idempotent() {
        let mut board = Board::from_rows(&["R.....", "......", "G.B...", "..#..."]);
        let moves = settle(&mut board);
        assert_eq!(moves.len(), 2);
        assert_eq!(
            moves[1],
            CellMove {
                x: 0,
                from: 8,
                to: 10
            }
        );
        assert_eq!(board.to_string().lines().last(), Some("G.#..."));
        assert_eq!(board.to_string().lines().nth(10), Some("R.B..."));
        let before = board.clone();
        assert!(settle(&mut board).is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_two_step_chain() {
        // Clearing the reds drops the blue on top into the blue trio.
        let mut board = Board::from_rows(&[
            "B.....", //
            "R.....",
            "R.....",
            "RR....",
            "BBB...",
        ]);
        let mut resolver = MatchResolver::new();
        let steps = resolver.resolve_all(&mut board);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].chain, 1);
        assert_eq!(steps[1].chain, 2);
        assert!(board.is_empty());
        assert_eq!(resolver.chain(), 0);
    }
}
