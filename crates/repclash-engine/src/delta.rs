//! Delta detector — classifies what changed between two snapshots.
//!
//! Pure given two snapshots and their resolver outputs. It never schedules
//! anything itself; it emits [`ChangeEvent`]s with relative offsets and the
//! scheduler turns those into timed cues. Safe to call redundantly: equal
//! snapshots produce no events (the engine additionally memoizes by
//! snapshot identity so overlapping refresh triggers cannot double-fire).

use repclash_core::battle::{Battle, Participant};
use repclash_core::constants::{COUNTER_DELAY_MS, HIT_DETECT_DELAY_MS};
use repclash_core::enums::{ActorId, BattleMode};
use repclash_core::events::{ChangeEvent, ChangeKind};

use crate::resolver::BattleResolution;

const HP_EPS: f64 = 1e-9;

/// Compare the previous sample to the current one and emit semantic change
/// events for every participant whose attempt count increased.
///
/// A decreased attempt count (stale or out-of-order poll) re-baselines
/// silently: no events, no synthesized negative deltas.
pub fn detect(
    prev: &Battle,
    prev_res: &BattleResolution,
    curr: &Battle,
    curr_res: &BattleResolution,
) -> Vec<ChangeEvent> {
    let mut events = Vec::new();

    for participant in &curr.participants {
        // Unknown in the previous sample: new baseline, nothing to classify.
        let Some(before) = prev.participant(&participant.id) else {
            continue;
        };
        if participant.attempt_count() <= before.attempt_count() {
            continue;
        }
        // Several attempts may land in one poll; only the newest one is
        // classified, matching what the display can show.
        let Some(&succeeded) = participant.attempts.last() else {
            continue;
        };

        let actor = self_actor(curr, participant);
        let rivals = rival_actors(curr, participant);

        if succeeded {
            let dropped: Vec<ActorId> = rivals
                .into_iter()
                .filter(|r| hp_decreased(prev_res, curr_res, r))
                .collect();
            if dropped.is_empty() {
                // Fully absorbed: the attempt changed nothing.
                events.push(ChangeEvent {
                    actor,
                    kind: ChangeKind::Blocked,
                    offset_ms: HIT_DETECT_DELAY_MS,
                });
            } else {
                for rival in dropped {
                    events.push(ChangeEvent {
                        actor: rival,
                        kind: ChangeKind::Hit,
                        offset_ms: HIT_DETECT_DELAY_MS,
                    });
                }
            }
        } else {
            for rival in rivals {
                events.push(ChangeEvent {
                    actor: rival,
                    kind: ChangeKind::Blocked,
                    offset_ms: HIT_DETECT_DELAY_MS,
                });
            }
            // Counter-damage trails the block so it reads as a response.
            if hp_decreased(prev_res, curr_res, &actor) {
                events.push(ChangeEvent {
                    actor,
                    kind: ChangeKind::Counter,
                    offset_ms: HIT_DETECT_DELAY_MS + COUNTER_DELAY_MS,
                });
            }
        }
    }

    events
}

fn hp_decreased(prev: &BattleResolution, curr: &BattleResolution, actor: &ActorId) -> bool {
    curr.hp_of(actor) < prev.hp_of(actor) - HP_EPS
}

/// The actor a participant cues as: themselves, or their side in team mode.
fn self_actor(battle: &Battle, participant: &Participant) -> ActorId {
    match (battle.mode, participant.team) {
        (BattleMode::Teams, Some(side)) => ActorId::Team(side),
        _ => ActorId::Participant(participant.id.clone()),
    }
}

/// The opposing actors: the other side in team mode, every other
/// participant otherwise.
fn rival_actors(battle: &Battle, participant: &Participant) -> Vec<ActorId> {
    match (battle.mode, participant.team) {
        (BattleMode::Teams, Some(side)) => vec![ActorId::Team(side.opponent())],
        (BattleMode::Teams, None) => Vec::new(),
        _ => battle
            .participants
            .iter()
            .filter(|p| p.id != participant.id)
            .map(|p| ActorId::Participant(p.id.clone()))
            .collect(),
    }
}
