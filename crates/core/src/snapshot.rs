use crate::piece::PuyoPair;
use crate::types::{Orientation, PuyoColor, SessionState, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairSnapshot {
    pub pivot: PuyoColor,
    pub child: PuyoColor,
    pub x: i8,
    pub y: i8,
    pub orientation: Orientation,
}

impl From<PuyoPair> for PairSnapshot {
    fn from(value: PuyoPair) -> Self {
        Self {
            pivot: value.pivot,
            child: value.child,
            x: value.x,
            y: value.y,
            orientation: value.orientation,
        }
    }
}

impl Default for PairSnapshot {
    fn default() -> Self {
        Self::from(PuyoPair::new(PuyoColor::Red, PuyoColor::Red))
    }
}

/// Plain-data view of a session for renderers.
///
/// Board codes: 0 empty, 1-6 colors in palette order, 7 garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<PairSnapshot>,
    pub next: PairSnapshot,
    pub state: SessionState,
    pub score: u32,
    pub chain: u32,
    pub pending_garbage: u32,
    pub episode_id: u32,
    pub piece_id: u32,
    pub seed: u64,
    pub animating: bool,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            next: PairSnapshot::default(),
            state: SessionState::Controlling,
            score: 0,
            chain: 0,
            pending_garbage: 0,
            episode_id: 0,
            piece_id: 0,
            seed: 0,
            animating: false,
        }
    }
}
