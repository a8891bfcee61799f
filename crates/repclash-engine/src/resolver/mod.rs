//! Battle resolver — pure scoring functions over one snapshot.
//!
//! Everything here is a total function of the [`Battle`]: no I/O, no
//! timers, no errors. Malformed snapshots degrade to full HP and no
//! winner rather than failing, because the display must keep rendering
//! whatever the store hands us. Recomputing from scratch every refresh is
//! deliberate; the engine memoizes per snapshot identity to keep redundant
//! refreshes from re-triggering effects.

pub mod hp;
pub mod mvp;
pub mod points;
pub mod winner;

use std::collections::{BTreeMap, HashMap};

use repclash_core::battle::{Battle, SettlementWinner};
use repclash_core::enums::{ActorId, BattleMode, TeamSide};
use repclash_core::types::ParticipantId;
use repclash_core::views::{ActorView, BattleView};

/// Per-actor score pair: what landed and what is still reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub successes: u32,
    /// successes + remaining attempts.
    pub potential: u32,
}

/// Complete derived output of one resolve pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleResolution {
    /// Normalized HP per actor, each in [0, 1].
    pub hp: BTreeMap<ActorId, f64>,
    pub scores: BTreeMap<ActorId, Score>,
    pub winner: Option<SettlementWinner>,
    /// Whether `winner` (and MVP set) came from an authoritative settlement.
    pub settled: bool,
    pub mvp_ids: Vec<ParticipantId>,
    pub points_delta: HashMap<ParticipantId, i64>,
}

impl BattleResolution {
    pub fn hp_of(&self, actor: &ActorId) -> f64 {
        self.hp.get(actor).copied().unwrap_or(1.0)
    }

    /// Build the presentation-facing view, preserving roster order.
    pub fn to_view(&self, battle: &Battle) -> BattleView {
        let actors = actor_ids(battle)
            .into_iter()
            .map(|actor| {
                let score = self.scores.get(&actor).copied().unwrap_or(Score {
                    successes: 0,
                    potential: 0,
                });
                ActorView {
                    hp: self.hp_of(&actor),
                    successes: score.successes,
                    potential: score.potential,
                    actor,
                }
            })
            .collect();
        BattleView {
            actors,
            winner: self.winner.clone(),
            settled: self.settled,
            mvp_ids: self.mvp_ids.clone(),
            points_delta: self.points_delta.clone(),
        }
    }
}

/// The actors of a battle: the two sides in team mode, otherwise every
/// participant in roster order.
pub fn actor_ids(battle: &Battle) -> Vec<ActorId> {
    match battle.mode {
        BattleMode::Teams => vec![ActorId::Team(TeamSide::Top), ActorId::Team(TeamSide::Bottom)],
        _ => battle
            .participants
            .iter()
            .map(|p| ActorId::Participant(p.id.clone()))
            .collect(),
    }
}

/// Resolve one snapshot into HP, scores, winner, MVPs, and point deltas.
pub fn resolve(battle: &Battle) -> BattleResolution {
    let malformed = battle.is_malformed();
    let hp = if malformed {
        actor_ids(battle).into_iter().map(|a| (a, 1.0)).collect()
    } else {
        hp::compute_hp(battle)
    };
    let scores = compute_scores(battle);

    // An authoritative settlement overrides any live derivation; only the
    // point deltas may still be filled in with the live formula.
    if let Some(settlement) = &battle.settlement {
        let winner = settlement.winner.clone();
        let mvp_ids = settlement.mvp_ids.clone();
        let points_delta = match &settlement.points_delta {
            Some(delta) => delta.clone(),
            None => points::points_delta(battle, winner.as_ref(), &mvp_ids),
        };
        return BattleResolution {
            hp,
            scores,
            winner,
            settled: true,
            mvp_ids,
            points_delta,
        };
    }

    let winner = if malformed {
        None
    } else {
        winner::live_winner(battle, &hp)
    };
    let mvp_ids = if battle.mode == BattleMode::Teams && !malformed {
        mvp::team_mvps(battle)
    } else {
        Vec::new()
    };
    let points_delta = points::points_delta(battle, winner.as_ref(), &mvp_ids);

    BattleResolution {
        hp,
        scores,
        winner,
        settled: false,
        mvp_ids,
        points_delta,
    }
}

fn compute_scores(battle: &Battle) -> BTreeMap<ActorId, Score> {
    match battle.mode {
        BattleMode::Teams => [TeamSide::Top, TeamSide::Bottom]
            .into_iter()
            .map(|side| {
                let successes = battle.team_successes(side);
                let potential = successes + battle.team_remaining(side);
                (ActorId::Team(side), Score { successes, potential })
            })
            .collect(),
        _ => battle
            .participants
            .iter()
            .map(|p| {
                let successes = p.success_count();
                let potential = successes + p.remaining(battle.target);
                (ActorId::Participant(p.id.clone()), Score { successes, potential })
            })
            .collect(),
    }
}
