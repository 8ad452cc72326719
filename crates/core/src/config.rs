//! Session configuration and its validation errors

use thiserror::Error;

use crate::rng::Palette;
use crate::types::{
    PuyoColor, CASCADE_ROWS_PER_SEC, CLEAR_WAIT_MS, FALL_INTERVAL_MS, GARBAGE_BATCH_CAP,
    GARBAGE_INTERVAL_MS, KEY_DEBOUNCE_MS, MIN_PALETTE_COLORS, OJAMA_BASE, POP_EFFECT_MS,
    ROTATE_DEBOUNCE_MS,
};

/// Rejected configuration, reported by `Session::new`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("palette has {distinct} distinct colors, need at least {min}")]
    PaletteTooSmall { distinct: usize, min: usize },
    #[error("ojama base must be non-zero")]
    ZeroOjamaBase,
    #[error("garbage batch cap must be non-zero")]
    ZeroGarbageBatch,
    #[error("{0} must be non-zero")]
    ZeroInterval(&'static str),
}

/// Tunables for one board
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Colors pairs are drawn from; duplicates are ignored
    pub palette: Vec<PuyoColor>,
    pub fall_interval_ms: u32,
    pub clear_wait_ms: u32,
    pub cascade_rows_per_sec: u32,
    pub garbage_interval_ms: u32,
    pub garbage_batch_cap: u32,
    pub ojama_base: u32,
    pub key_debounce_ms: u32,
    pub rotate_debounce_ms: u32,
    pub pop_effect_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            palette: PuyoColor::ALL[..4].to_vec(),
            fall_interval_ms: FALL_INTERVAL_MS,
            clear_wait_ms: CLEAR_WAIT_MS,
            cascade_rows_per_sec: CASCADE_ROWS_PER_SEC,
            garbage_interval_ms: GARBAGE_INTERVAL_MS,
            garbage_batch_cap: GARBAGE_BATCH_CAP,
            ojama_base: OJAMA_BASE,
            key_debounce_ms: KEY_DEBOUNCE_MS,
            rotate_debounce_ms: ROTATE_DEBOUNCE_MS,
            pop_effect_ms: POP_EFFECT_MS,
        }
    }
}

impl SessionConfig {
    /// Default config with the first `n` palette colors (clamped to 1..=6)
    pub fn with_colors(n: usize) -> Self {
        let n = n.clamp(1, PuyoColor::ALL.len());
        Self {
            palette: PuyoColor::ALL[..n].to_vec(),
            ..Self::default()
        }
    }

    /// Distinct palette colors, in first-seen order
    pub fn distinct_palette(&self) -> Palette {
        let mut out = Palette::new();
        for &c in &self.palette {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let distinct = self.distinct_palette().len();
        if distinct < MIN_PALETTE_COLORS {
            return Err(ConfigError::PaletteTooSmall {
                distinct,
                min: MIN_PALETTE_COLORS,
            });
        }
        if self.ojama_base == 0 {
            return Err(ConfigError::ZeroOjamaBase);
        }
        if self.garbage_batch_cap == 0 {
            return Err(ConfigError::ZeroGarbageBatch);
        }
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("fall interval"));
        }
        if self.garbage_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("garbage interval"));
        }
        if self.cascade_rows_per_sec == 0 {
            return Err(ConfigError::ZeroInterval("cascade speed"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_colors_do_not_count() {
        let cfg = SessionConfig {
            palette: vec![PuyoColor::Red, PuyoColor::Red, PuyoColor::Red],
            ..SessionConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::PaletteTooSmall {
                distinct: 1,
                min: 2
            })
        );
    }

    #[test]
    fn test_zero_values_rejected() {
        let cfg = SessionConfig {
            ojama_base: 0,
            ..SessionConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroOjamaBase));

        let cfg = SessionConfig {
            fall_interval_ms: 0,
            ..SessionConfig::default()
        };
        assert_eq!(
            cfg.validate().map_err(|e| e.to_string()),
            Err("fall interval must be non-zero".to_string())
        );
    }

    #[test]
    fn test_with_colors_clamps() {
        assert_eq!(SessionConfig::with_colors(9).palette.len(), 6);
        assert_eq!(SessionConfig::with_colors(3).palette.len(), 3);
    }
}
