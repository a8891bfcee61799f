//! Point distribution — the payout pool moved between winners and losers.
//!
//! Wager battles are a symmetric stake transfer: everyone stakes the wager
//! (capped at their balance), winners take the pool. Lead battles credit
//! winners from the success lead and debit losers proportionally to their
//! balances, never pushing a balance below zero.

use std::collections::HashMap;

use repclash_core::battle::{Battle, Participant, SettlementWinner};
use repclash_core::enums::BattleMode;
use repclash_core::types::ParticipantId;

/// Derive per-participant point deltas. Every participant gets an entry;
/// zero means unaffected. With no decided winner, everything is zero.
pub fn points_delta(
    battle: &Battle,
    winner: Option<&SettlementWinner>,
    mvp_ids: &[ParticipantId],
) -> HashMap<ParticipantId, i64> {
    let mut deltas: HashMap<ParticipantId, i64> = battle
        .participants
        .iter()
        .map(|p| (p.id.clone(), 0))
        .collect();

    let Some(winner) = winner else {
        return deltas;
    };
    let winner_ids = winner_ids(battle, winner);
    if winner_ids.is_empty() {
        return deltas;
    }
    let losers: Vec<&Participant> = battle
        .participants
        .iter()
        .filter(|p| !winner_ids.contains(&p.id))
        .collect();

    match battle.mode {
        BattleMode::Teams => {
            // Wager is ignored in team mode by design.
            let top = i64::from(battle.team_successes(repclash_core::enums::TeamSide::Top));
            let bottom = i64::from(battle.team_successes(repclash_core::enums::TeamSide::Bottom));
            let pool = (top - bottom).unsigned_abs() * u64::from(battle.points_per_rep);
            credit_winners(&mut deltas, &winner_ids, mvp_ids, pool);
            debit_losers_proportionally(&mut deltas, &losers, pool);
        }
        _ if battle.wager_amount > 0 => {
            let wager = u64::from(battle.wager_amount);
            let pool = wager * battle.participants.len() as u64;
            // Everyone stakes, winners take the pool back.
            for p in &battle.participants {
                let stake = wager.min(u64::from(p.points));
                *deltas.entry(p.id.clone()).or_default() -= stake as i64;
            }
            credit_winners(&mut deltas, &winner_ids, mvp_ids, pool);
        }
        _ => {
            let pool = u64::from(success_lead(battle)) * u64::from(battle.points_per_rep);
            credit_winners(&mut deltas, &winner_ids, mvp_ids, pool);
            debit_losers_proportionally(&mut deltas, &losers, pool);
        }
    }
    deltas
}

fn winner_ids(battle: &Battle, winner: &SettlementWinner) -> Vec<ParticipantId> {
    match winner {
        SettlementWinner::Participant(id) => vec![id.clone()],
        SettlementWinner::Team(side) => battle.team_members(*side).map(|p| p.id.clone()).collect(),
    }
}

/// Gap between the best and the second-best success count.
fn success_lead(battle: &Battle) -> u32 {
    let mut successes: Vec<u32> = battle
        .participants
        .iter()
        .map(Participant::success_count)
        .collect();
    successes.sort_unstable_by(|a, b| b.cmp(a));
    match (successes.first(), successes.get(1)) {
        (Some(&top), Some(&second)) => top.saturating_sub(second),
        _ => 0,
    }
}

/// Winners split the pool evenly (floor division); an MVP's share doubles.
fn credit_winners(
    deltas: &mut HashMap<ParticipantId, i64>,
    winner_ids: &[ParticipantId],
    mvp_ids: &[ParticipantId],
    pool: u64,
) {
    let share = (pool / winner_ids.len() as u64) as i64;
    for id in winner_ids {
        let credit = if mvp_ids.contains(id) { share * 2 } else { share };
        *deltas.entry(id.clone()).or_default() += credit;
    }
}

/// Debit losers proportionally to their balances, each capped so the
/// derived balance never goes negative; the largest balance (most recent
/// on ties) absorbs the rounding remainder.
fn debit_losers_proportionally(
    deltas: &mut HashMap<ParticipantId, i64>,
    losers: &[&Participant],
    pool: u64,
) {
    let total_balance: u64 = losers.iter().map(|p| u64::from(p.points)).sum();
    if pool == 0 || total_balance == 0 {
        return;
    }

    let mut debited: u64 = 0;
    let mut debits: Vec<(ParticipantId, u64, u64)> = Vec::with_capacity(losers.len());
    for p in losers {
        let balance = u64::from(p.points);
        let debit = (pool * balance / total_balance).min(balance);
        debits.push((p.id.clone(), debit, balance));
        debited += debit;
    }

    // Push the remainder onto the largest balance, later roster entry on
    // ties, still capped at that loser's balance.
    let remainder = pool.saturating_sub(debited);
    if remainder > 0 {
        if let Some(absorber) = debits
            .iter_mut()
            .enumerate()
            .max_by_key(|(idx, (_, _, balance))| (*balance, *idx))
            .map(|(_, entry)| entry)
        {
            absorber.1 = (absorber.1 + remainder).min(absorber.2);
        }
    }

    for (id, debit, _) in debits {
        *deltas.entry(id).or_default() -= debit as i64;
    }
}
