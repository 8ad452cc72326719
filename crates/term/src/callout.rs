//! Chain callouts shown over a board while a chain resolves.

const CALLOUTS: [&str; 11] = [
    "Fire!",
    "Ice Storm!",
    "Diacute!",
    "Bayoen!",
    "Eleven Chain!",
    "Magical Fever!",
    "Brain Dump!",
    "Jugem!",
    "Violet High!",
    "Miracle Bomber!",
    "Fantastic!",
];

/// Callout for a chain step. Single clears and chains past 12 have none.
pub fn chain_callout(chain: u32) -> Option<&'static str> {
    let idx = chain.checked_sub(2)?;
    CALLOUTS.get(idx as usize).copied()
}
