//! Live winner derivation from HP.
//!
//! Used only while no authoritative settlement exists; the result is a UI
//! hint, never persisted. A field that is all-tied-at-zero (or all still
//! alive) stays unresolved on purpose.

use std::collections::BTreeMap;

use repclash_core::battle::{Battle, SettlementWinner};
use repclash_core::enums::ActorId;

/// A winner exists iff exactly one actor still has HP > 0 while every
/// other actor sits at 0.
pub fn live_winner(battle: &Battle, hp: &BTreeMap<ActorId, f64>) -> Option<SettlementWinner> {
    if hp.len() < 2 {
        return None;
    }
    let mut alive = hp.iter().filter(|(_, &h)| h > 0.0);
    let survivor = alive.next()?;
    if alive.next().is_some() {
        // More than one actor alive: undecided.
        return None;
    }
    let winner = match survivor.0 {
        ActorId::Participant(id) => {
            // The id must belong to the roster; HP maps are derived from it.
            debug_assert!(battle.participant(id).is_some());
            SettlementWinner::Participant(id.clone())
        }
        ActorId::Team(side) => SettlementWinner::Team(*side),
    };
    Some(winner)
}
