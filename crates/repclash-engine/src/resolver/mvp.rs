//! MVP selection for team battles.

use repclash_core::battle::{Battle, Participant};
use repclash_core::constants::MVP_SUCCESS_RATE;
use repclash_core::enums::TeamSide;
use repclash_core::types::ParticipantId;

/// Select at most one MVP per team: members with at least one attempt and
/// a success rate >= the cutoff, ranked by successes then success rate.
/// Top side first in the returned list. There is no cross-team MVP.
pub fn team_mvps(battle: &Battle) -> Vec<ParticipantId> {
    [TeamSide::Top, TeamSide::Bottom]
        .into_iter()
        .filter_map(|side| side_mvp(battle, side))
        .collect()
}

fn side_mvp(battle: &Battle, side: TeamSide) -> Option<ParticipantId> {
    battle
        .team_members(side)
        .filter(|p| qualifies(p))
        .max_by(|a, b| {
            a.success_count()
                .cmp(&b.success_count())
                .then_with(|| {
                    let ra = a.success_rate().unwrap_or(0.0);
                    let rb = b.success_rate().unwrap_or(0.0);
                    ra.total_cmp(&rb)
                })
        })
        .map(|p| p.id.clone())
}

fn qualifies(p: &Participant) -> bool {
    match p.success_rate() {
        Some(rate) => rate >= MVP_SUCCESS_RATE,
        None => false,
    }
}
