//! HP derivation — the normalized [0, 1] combat-health metric.
//!
//! The tie rule is deliberate UX, not a fallback: while a tie is still
//! mathematically reachable, a non-positive raw HP renders as full life
//! instead of collapsing to zero prematurely. A mathematically forced
//! loss is never rescued.

use std::collections::BTreeMap;

use repclash_core::battle::{Battle, Participant};
use repclash_core::enums::{ActorId, BattleMode, TeamSide};

/// Compute HP for every actor of a well-formed battle.
pub fn compute_hp(battle: &Battle) -> BTreeMap<ActorId, f64> {
    match battle.mode {
        BattleMode::Duel => duel_hp(battle),
        BattleMode::Ffa => ffa_hp(battle),
        BattleMode::Teams => team_hp(battle),
    }
}

/// Shared core: raw HP against one rival, with the tie-rescue rule.
///
/// `self_pot` / `opp_pot` are potentials (successes + remaining);
/// `denominator` is the self side's total target.
fn hp_from_raw(self_succ: u32, self_pot: u32, opp_succ: u32, tie_possible: bool, denominator: u32) -> f64 {
    let hp_raw = i64::from(self_succ) + i64::from(self_pot - self_succ) - i64::from(opp_succ);
    if hp_raw <= 0 && tie_possible {
        return 1.0;
    }
    let hp = hp_raw.max(0) as f64 / f64::from(denominator.max(1));
    hp.clamp(0.0, 1.0)
}

fn duel_hp(battle: &Battle) -> BTreeMap<ActorId, f64> {
    let mut hp = BTreeMap::new();
    for me in &battle.participants {
        // With more than two entrants in duel mode only the first rival
        // counts; a well-formed duel has exactly two.
        let value = match battle.participants.iter().find(|p| p.id != me.id) {
            Some(opp) => pair_hp(me, opp, battle.target),
            None => 1.0,
        };
        hp.insert(ActorId::Participant(me.id.clone()), value);
    }
    hp
}

fn pair_hp(me: &Participant, opp: &Participant, target: u32) -> f64 {
    let my_pot = me.success_count() + me.remaining(target);
    let opp_pot = opp.success_count() + opp.remaining(target);
    let tie_possible = my_pot >= opp.success_count() && opp_pot >= me.success_count();
    hp_from_raw(me.success_count(), my_pot, opp.success_count(), tie_possible, target)
}

fn ffa_hp(battle: &Battle) -> BTreeMap<ActorId, f64> {
    let mut hp = BTreeMap::new();
    for me in &battle.participants {
        // Only the single best rival matters.
        let max_other = battle
            .participants
            .iter()
            .filter(|p| p.id != me.id)
            .map(Participant::success_count)
            .max()
            .unwrap_or(0);
        let my_pot = me.success_count() + me.remaining(battle.target);
        let tie_possible = my_pot >= max_other;
        hp.insert(
            ActorId::Participant(me.id.clone()),
            hp_from_raw(me.success_count(), my_pot, max_other, tie_possible, battle.target),
        );
    }
    hp
}

fn team_hp(battle: &Battle) -> BTreeMap<ActorId, f64> {
    let mut hp = BTreeMap::new();
    for side in [TeamSide::Top, TeamSide::Bottom] {
        let opp = side.opponent();
        let my_succ = battle.team_successes(side);
        let my_pot = my_succ + battle.team_remaining(side);
        let opp_succ = battle.team_successes(opp);
        let opp_pot = opp_succ + battle.team_remaining(opp);
        let tie_possible = my_pot >= opp_succ && opp_pot >= my_succ;
        // Aggregate target: each member owes `target` reps.
        let team_size = battle.team_members(side).count() as u32;
        let denominator = battle.target * team_size;
        hp.insert(
            ActorId::Team(side),
            hp_from_raw(my_succ, my_pot, opp_succ, tie_possible, denominator),
        );
    }
    hp
}
