//! Arena - one or two boards plus their optional AI drivers
//!
//! The arena steps each session, then its planner, and finally moves
//! outgoing garbage to the opponent. In solo mode outgoing garbage is
//! discarded.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use tui_puyo_core::{ConfigError, Session, SessionConfig, SessionEvent};
use tui_puyo_types::GameAction;

use crate::planner::{Planner, PlannerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Solo,
    Versus,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub session: Session,
    pub planner: Option<Planner>,
}

impl Player {
    pub fn is_ai(&self) -> bool {
        self.planner.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Arena {
    mode: Mode,
    players: ArrayVec<Player, 2>,
}

fn player(
    config: &SessionConfig,
    seed: u64,
    ai: Option<PlannerConfig>,
) -> Result<Player, ConfigError> {
    Ok(Player {
        session: Session::new(config.clone(), seed)?,
        planner: ai.map(|cfg| Planner::new(cfg, seed.rotate_left(32))),
    })
}

impl Arena {
    /// A single board; `ai` lets the planner play it
    pub fn solo(
        config: SessionConfig,
        seed: u64,
        ai: Option<PlannerConfig>,
    ) -> Result<Self, ConfigError> {
        let mut players = ArrayVec::new();
        players.push(player(&config, seed, ai)?);
        Ok(Self {
            mode: Mode::Solo,
            players,
        })
    }

    /// Two boards exchanging garbage; `ai[i]` drives player `i`
    pub fn versus(
        config: SessionConfig,
        seed: u64,
        ai: [Option<PlannerConfig>; 2],
    ) -> Result<Self, ConfigError> {
        let mut players = ArrayVec::new();
        for (i, ai) in ai.into_iter().enumerate() {
            players.push(player(&config, seed.wrapping_add(i as u64), ai)?);
        }
        Ok(Self {
            mode: Mode::Versus,
            players,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn session(&self, index: usize) -> Option<&Session> {
        self.players.get(index).map(|p| &p.session)
    }

    pub fn session_mut(&mut self, index: usize) -> Option<&mut Session> {
        self.players.get_mut(index).map(|p| &mut p.session)
    }

    /// Advance every board, run the planners, then exchange garbage
    pub fn update(&mut self, elapsed_ms: u32) {
        for p in &mut self.players {
            p.session.update(elapsed_ms);
            if let Some(planner) = p.planner.as_mut() {
                planner.update(&mut p.session, elapsed_ms);
            }
        }
        self.exchange_garbage();
    }

    fn exchange_garbage(&mut self) {
        match self.mode {
            Mode::Solo => {
                for p in &mut self.players {
                    p.session.take_outgoing_garbage();
                }
            }
            Mode::Versus => {
                let sent: ArrayVec<u32, 2> = self
                    .players
                    .iter_mut()
                    .map(|p| p.session.take_outgoing_garbage())
                    .collect();
                let [a, b] = self.players.as_mut_slice() else {
                    return;
                };
                if sent[0] > 0 || sent[1] > 0 {
                    debug!(p1_sent = sent[0], p2_sent = sent[1], "garbage exchanged");
                }
                b.session.receive_garbage(sent[0]);
                a.session.receive_garbage(sent[1]);
            }
        }
    }

    /// Route a human command to player `index`.
    ///
    /// Restart resets the whole arena; other commands to AI boards are ignored.
    pub fn handle_input(&mut self, index: usize, action: GameAction) -> bool {
        if action == GameAction::Restart {
            self.restart();
            return true;
        }
        match self.players.get_mut(index) {
            Some(p) if !p.is_ai() => p.session.handle_input(action),
            _ => false,
        }
    }

    /// Restart every board and reset the planners
    pub fn restart(&mut self) {
        for p in &mut self.players {
            p.session.restart();
            if let Some(planner) = p.planner.as_mut() {
                planner.reset();
            }
        }
        info!(mode = ?self.mode, "arena restarted");
    }

    /// Index of the winner once exactly one board is still alive (versus only)
    pub fn winner(&self) -> Option<usize> {
        if self.mode != Mode::Versus {
            return None;
        }
        let alive: ArrayVec<usize, 2> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.session.game_over())
            .map(|(i, _)| i)
            .collect();
        match alive.as_slice() {
            [i] => Some(*i),
            _ => None,
        }
    }

    /// Drain every board's events, tagged with the player index
    pub fn take_events(&mut self) -> Vec<(usize, SessionEvent)> {
        let mut out = Vec::new();
        for (i, p) in self.players.iter_mut().enumerate() {
            out.extend(p.session.take_events().into_iter().map(|e| (i, e)));
        }
        out
    }
}
