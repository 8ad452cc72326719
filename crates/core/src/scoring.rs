//! Scoring module - attack power, score, and garbage
//!
//! Power is the sum of the chain, group, and color bonuses (at least 1).
//! Score is `10 * cleared * power`; garbage sent is `cleared * power / ojama_base`.

use crate::resolver::ClearStats;
use crate::types::{CHAIN_BONUS, COLOR_BONUS, GROUP_BONUS};

/// Attack calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackResult {
    pub power: u32,
    pub score: u32,
    pub garbage: u32,
}

/// Table lookup that saturates at the last entry
fn saturating_lookup(table: &[u32], index: u32) -> u32 {
    let last = table.len().saturating_sub(1);
    table
        .get((index as usize).min(last))
        .copied()
        .unwrap_or(0)
}

pub fn chain_bonus(chain: u32) -> u32 {
    saturating_lookup(&CHAIN_BONUS, chain)
}

pub fn group_bonus(groups: u32) -> u32 {
    saturating_lookup(&GROUP_BONUS, groups)
}

pub fn color_bonus(colors: u32) -> u32 {
    saturating_lookup(&COLOR_BONUS, colors)
}

/// Combined multiplier, never below 1
pub fn power(stats: &ClearStats) -> u32 {
    let sum = chain_bonus(stats.chain) + group_bonus(stats.groups) + color_bonus(stats.colors);
    sum.max(1)
}

/// Score and garbage for one clearing pass
///
/// # Examples
///
/// ```
/// use tui_puyo_core::resolver::ClearStats;
/// use tui_puyo_core::scoring::calculate_attack;
///
/// let stats = ClearStats { cleared: 4, groups: 1, colors: 1, chain: 1 };
/// let attack = calculate_attack(&stats, 10);
/// assert_eq!(attack.power, 1);
/// assert_eq!(attack.score, 40);
/// assert_eq!(attack.garbage, 0);
/// ```
pub fn calculate_attack(stats: &ClearStats, ojama_base: u32) -> AttackResult {
    let power = power(stats);
    let raw = stats.cleared.saturating_mul(power);
    AttackResult {
        power,
        score: raw.saturating_mul(10),
        garbage: raw.checked_div(ojama_base).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(cleared: u32, groups: u32, colors: u32, chain: u32) -> ClearStats {
        ClearStats {
            cleared,
            groups,
            colors,
            chain,
        }
    }

    #[test]
    fn test_single_group_first_chain() {
        let a = calculate_attack(&stats(4, 1, 1, 1), 10);
        assert_eq!(
            a,
            AttackResult {
                power: 1,
                score: 40,
                garbage: 0
            }
        );
    }

    #[test]
    fn test_second_chain_eight_cells() {
        let a = calculate_attack(&stats(8, 1, 1, 2), 10);
        assert_eq!(a.power, 8);
        assert_eq!(a.score, 640);
        assert_eq!(a.garbage, 6);
    }

    #[test]
    fn test_bonus_tables_saturate() {
        assert_eq!(chain_bonus(19), 512);
        assert_eq!(chain_bonus(40), 512);
        assert_eq!(group_bonus(11), 10);
        assert_eq!(group_bonus(30), 10);
        assert_eq!(color_bonus(5), 24);
        assert_eq!(color_bonus(6), 24);
    }

    #[test]
    fn test_group_bonus_starts_at_five() {
        assert_eq!(group_bonus(4), 0);
        assert_eq!(group_bonus(5), 2);
        // Two colors alone give power 3.
        assert_eq!(power(&stats(8, 2, 2, 1)), 3);
    }

    #[test]
    fn test_ojama_base_divides() {
        let a = calculate_attack(&stats(8, 1, 1, 2), 4);
        assert_eq!(a.garbage, 16);
    }
}
