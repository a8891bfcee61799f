//! Battle snapshot model — plain data polled from the attempt-log store.
//!
//! These are data structs with no engine logic. Scoring lives in the
//! resolver, change classification in the delta detector; both are pure
//! functions over a [`Battle`] snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::{BattleMode, TeamSide};
use crate::types::{BattleId, ParticipantId};

/// One competitor and their ordered attempt history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Ordered attempt outcomes, `true` = success. May exceed the battle
    /// target; the resolver treats overshoot as zero remaining.
    pub attempts: Vec<bool>,
    /// Side membership, only meaningful in team mode.
    #[serde(default)]
    pub team: Option<TeamSide>,
    /// Current point balance from the school ledger. Read-only input used
    /// to cap debits; never mutated by the engine.
    #[serde(default)]
    pub points: u32,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(id),
            name: name.into(),
            attempts: Vec::new(),
            team: None,
            points: 0,
        }
    }

    /// Number of successful attempts. Always <= `attempt_count`.
    pub fn success_count(&self) -> u32 {
        self.attempts.iter().filter(|&&ok| ok).count() as u32
    }

    /// Total attempts recorded so far.
    pub fn attempt_count(&self) -> u32 {
        self.attempts.len() as u32
    }

    /// Attempts left before reaching `target`, floored at zero.
    pub fn remaining(&self, target: u32) -> u32 {
        target.saturating_sub(self.attempt_count())
    }

    /// Success rate over recorded attempts; `None` with zero attempts.
    pub fn success_rate(&self) -> Option<f64> {
        if self.attempts.is_empty() {
            None
        } else {
            Some(f64::from(self.success_count()) / f64::from(self.attempt_count()))
        }
    }
}

/// Winning side of a settled battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementWinner {
    Participant(ParticipantId),
    Team(TeamSide),
}

/// Externally persisted, authoritative resolution.
///
/// Once `settled_at` is present the settlement overrides any live-derived
/// winner; the resolver only fills in `points_delta` when it is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub winner: Option<SettlementWinner>,
    #[serde(default)]
    pub mvp_ids: Vec<ParticipantId>,
    /// Per-participant point delta; absent when the settling side left it
    /// to be derived with the live formula.
    #[serde(default)]
    pub points_delta: Option<HashMap<ParticipantId, i64>>,
    /// Settlement timestamp (ms). Presence marks the settlement authoritative.
    pub settled_at: u64,
}

/// Full battle snapshot as read at one poll instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    pub id: BattleId,
    pub mode: BattleMode,
    /// Repetitions each participant is expected to attempt.
    pub target: u32,
    pub participants: Vec<Participant>,
    /// Points staked per participant; 0 means lead-based payout.
    #[serde(default)]
    pub wager_amount: u32,
    /// Points per rep of lead for lead-based payouts.
    #[serde(default = "default_points_per_rep")]
    pub points_per_rep: u32,
    #[serde(default)]
    pub settlement: Option<Settlement>,
}

fn default_points_per_rep() -> u32 {
    crate::constants::DEFAULT_POINTS_PER_REP
}

impl Battle {
    /// Whether this snapshot is too broken to score. The resolver degrades
    /// to HP 1 / no winner for malformed battles instead of failing, since
    /// display continuity matters more than a hard error.
    pub fn is_malformed(&self) -> bool {
        if self.target == 0 || self.participants.len() < 2 {
            return true;
        }
        if self.mode == BattleMode::Teams {
            let top = self.team_members(TeamSide::Top).count();
            let bottom = self.team_members(TeamSide::Bottom).count();
            if top == 0 || bottom == 0 {
                return true;
            }
        }
        false
    }

    /// Whether an authoritative settlement is present.
    pub fn is_settled(&self) -> bool {
        self.settlement.is_some()
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Members of one team side. Participants with no side are ignored.
    pub fn team_members(&self, side: TeamSide) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(move |p| p.team == Some(side))
    }

    /// Sum of successes across one team.
    pub fn team_successes(&self, side: TeamSide) -> u32 {
        self.team_members(side).map(Participant::success_count).sum()
    }

    /// Sum of remaining attempts across one team.
    pub fn team_remaining(&self, side: TeamSide) -> u32 {
        self.team_members(side).map(|p| p.remaining(self.target)).sum()
    }
}
