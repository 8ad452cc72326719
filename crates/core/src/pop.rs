//! Pop effects for cleared cells
//!
//! Each removed cell leaves an effect keyed by its coordinate. Renderers query
//! scale and brightness; the session only ages and expires them.
//!
//! The curve has four phases over the effect's lifetime:
//!
//! | Progress | Scale | Brightness |
//! |----------|-------|------------|
//! | 0.0-0.2 | grows 1.0 → 1.3 | ramps to 0.4, flashing |
//! | 0.2-0.6 | eases 1.3 → 1.2 | flashes between 0.4 and 0.7 |
//! | 0.6-0.8 | shrinks 1.2 → 0.8 | rises 0.7 → 1.0 |
//! | 0.8-1.0 | vanishes 0.8 → 0.0 | 1.0 |

use std::f32::consts::PI;

use arrayvec::ArrayVec;

use crate::types::{Puyo, BOARD_SIZE, POP_FLASH_HZ};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopEffect {
    pub x: i8,
    pub y: i8,
    pub puyo: Puyo,
    pub ttl_ms: u32,
    pub remaining_ms: u32,
}

impl PopEffect {
    pub fn new(x: i8, y: i8, puyo: Puyo, ttl_ms: u32) -> Self {
        Self {
            x,
            y,
            puyo,
            ttl_ms,
            remaining_ms: ttl_ms,
        }
    }

    /// Lifetime progress in `0.0..=1.0`
    pub fn phase(&self) -> f32 {
        if self.ttl_ms == 0 {
            return 1.0;
        }
        1.0 - self.remaining_ms as f32 / self.ttl_ms as f32
    }

    fn flash(&self) -> f32 {
        (self.phase() * POP_FLASH_HZ * PI * 2.0).sin() * 0.5 + 0.5
    }

    pub fn scale(&self) -> f32 {
        let p = self.phase();
        if p < 0.2 {
            1.0 + (p / 0.2) * 0.3
        } else if p < 0.6 {
            1.3 - ((p - 0.2) / 0.4) * 0.1
        } else if p < 0.8 {
            1.2 - ((p - 0.6) / 0.2) * 0.4
        } else {
            0.8 - ((p - 0.8) / 0.2) * 0.8
        }
    }

    pub fn brightness(&self) -> f32 {
        let p = self.phase();
        if p < 0.2 {
            p / 0.2 * 0.4 * (0.5 + self.flash() * 0.5)
        } else if p < 0.6 {
            0.4 + self.flash() * 0.3
        } else if p < 0.8 {
            0.7 + (p - 0.6) / 0.2 * 0.3
        } else {
            1.0
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }
}

/// Live effects, at most one per coordinate
#[derive(Debug, Clone, Default)]
pub struct PopEffects {
    effects: ArrayVec<PopEffect, BOARD_SIZE>,
}

impl PopEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect, replacing any at the same coordinate
    pub fn spawn(&mut self, effect: PopEffect) {
        if let Some(slot) = self
            .effects
            .iter_mut()
            .find(|e| (e.x, e.y) == (effect.x, effect.y))
        {
            *slot = effect;
        } else if !self.effects.is_full() {
            self.effects.push(effect);
        }
    }

    /// Age every effect and drop the expired ones
    pub fn tick(&mut self, elapsed_ms: u32) {
        for e in &mut self.effects {
            e.remaining_ms = e.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.effects.retain(|e| !e.is_expired());
    }

    pub fn get(&self, x: i8, y: i8) -> Option<&PopEffect> {
        self.effects.iter().find(|e| (e.x, e.y) == (x, y))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PopEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
