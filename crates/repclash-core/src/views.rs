//! Derived battle state exposed to the presentation adapter.
//!
//! Views carry everything a card renderer needs: HP, score, and the
//! resolution once one exists. They are rebuilt from scratch on every
//! resolve; nothing here is persisted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::battle::SettlementWinner;
use crate::enums::ActorId;
use crate::types::ParticipantId;

/// Per-actor derived state for one poll instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub actor: ActorId,
    /// Normalized combat health in [0, 1].
    pub hp: f64,
    /// Successful reps so far (aggregated per side in team mode).
    pub successes: u32,
    /// Best still-reachable success count: successes + remaining.
    pub potential: u32,
}

/// Complete derived view of a battle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleView {
    pub actors: Vec<ActorView>,
    /// Winner, either settled or live-derived. Live derivation is for UI
    /// purposes only, pending a real settlement.
    pub winner: Option<SettlementWinner>,
    /// Whether `winner` came from an authoritative settlement.
    pub settled: bool,
    pub mvp_ids: Vec<ParticipantId>,
    /// Positive for winners (MVP bonus included), non-positive for losers,
    /// zero for anyone unaffected.
    pub points_delta: HashMap<ParticipantId, i64>,
}

impl BattleView {
    pub fn actor(&self, actor: &ActorId) -> Option<&ActorView> {
        self.actors.iter().find(|a| &a.actor == actor)
    }

    /// Whether the battle has a decided outcome (settled or live-derived).
    pub fn resolved(&self) -> bool {
        self.winner.is_some()
    }
}
