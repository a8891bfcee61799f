//! Effect scheduler — turns change events into timed, mutually exclusive
//! audio/visual cues.
//!
//! Per actor: a flash chain (`Idle → Flashing → FxPlaying → Idle`) and an
//! independent drain branch gated behind the global cooldown. All waiting
//! happens through [`TaskQueue`]; the only entry points are `observe_*`
//! and a single [`tick`](EffectScheduler::tick) driven by the caller's
//! clock, so the whole machine runs under a fake clock in tests.

use std::collections::HashMap;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use repclash_core::catalog::EffectCatalog;
use repclash_core::constants::{
    CUE_DURATION_MS, FLASH_DURATION_MS, FLASH_TO_FX_DELAY_MS, GLOBAL_COOLDOWN_MS, HP_DEBOUNCE_MS,
};
use repclash_core::enums::{ActorId, CueKind};
use repclash_core::events::{ChangeEvent, CueRequest, FlashRequest, HpUpdate};

use crate::tasks::{Task, TaskKind, TaskQueue};

const HP_EPS: f64 = 1e-9;

/// Everything the scheduler hands to the presentation adapter, in firing
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchedulerEvent {
    Flash(FlashRequest),
    Cue(CueRequest),
    Hp(HpUpdate),
}

#[derive(Debug, Default)]
struct ActorState {
    /// Cue kind the next FxStart should play, set when a flash starts.
    pending_fx: Option<CueKind>,
    /// Debounce target for the HP bar.
    pending_hp: Option<f64>,
    /// HP value currently applied to the displayed bar.
    displayed_hp: Option<f64>,
}

/// Owns every timer in the system. Nothing else in the engine waits.
pub struct EffectScheduler {
    catalog: EffectCatalog,
    seed: u64,
    queue: TaskQueue,
    actors: HashMap<ActorId, ActorState>,
    /// Start time of the most recently started cue, across all actors and
    /// kinds. Only ever advances.
    last_effect_started_at: Option<u64>,
}

impl EffectScheduler {
    pub fn new(catalog: EffectCatalog, seed: u64) -> Self {
        Self {
            catalog,
            seed,
            queue: TaskQueue::new(),
            actors: HashMap::new(),
            last_effect_started_at: None,
        }
    }

    /// Intake change events from the delta detector, arming one flash per
    /// event at its relative offset. A newer event of the same kind for
    /// the same actor replaces the outstanding one.
    pub fn observe_events(&mut self, events: &[ChangeEvent], now_ms: u64) {
        for event in events {
            self.queue.arm(
                event.actor.clone(),
                TaskKind::FlashStart(event.kind.flash_kind()),
                now_ms + event.offset_ms,
            );
        }
    }

    /// Intake a freshly resolved HP value for one actor.
    ///
    /// The first value for an actor seeds the displayed bar silently; any
    /// later change is debounced so rapid bursts land as one visible drop.
    /// A value that returns to the displayed one before the debounce fires
    /// cancels it, so a drop-and-recover within the window shows nothing.
    pub fn observe_hp(&mut self, actor: &ActorId, hp: f64, now_ms: u64) {
        let state = self.actors.entry(actor.clone()).or_default();
        match state.displayed_hp {
            None => {
                state.displayed_hp = Some(hp);
            }
            Some(displayed) if (hp - displayed).abs() <= HP_EPS => {
                if state.pending_hp.take().is_some() {
                    self.queue.cancel(actor, TaskKind::HpDebounce);
                }
            }
            Some(displayed) => {
                let target = state.pending_hp.unwrap_or(displayed);
                if (hp - target).abs() > HP_EPS {
                    state.pending_hp = Some(hp);
                    self.queue
                        .arm(actor.clone(), TaskKind::HpDebounce, now_ms + HP_DEBOUNCE_MS);
                }
            }
        }
    }

    /// Fire everything due at or before `now_ms`, in scheduled order.
    pub fn tick(&mut self, now_ms: u64) -> Vec<SchedulerEvent> {
        let mut out = Vec::new();
        while let Some(task) = self.queue.pop_due(now_ms) {
            self.fire(task, &mut out);
        }
        out
    }

    /// Cancel every outstanding timer and forget all actor state. No cue
    /// or flash fires after this; safe to call more than once.
    pub fn teardown(&mut self) {
        self.queue.clear();
        self.actors.clear();
        self.last_effect_started_at = None;
    }

    /// Start of the most recently started cue, if any.
    pub fn last_effect_started_at(&self) -> Option<u64> {
        self.last_effect_started_at
    }

    /// Number of timers currently armed.
    pub fn outstanding_timers(&self) -> usize {
        self.queue.outstanding()
    }

    fn fire(&mut self, task: Task, out: &mut Vec<SchedulerEvent>) {
        let Task { fire_at_ms, actor, kind } = task;
        match kind {
            TaskKind::FlashStart(flash) => {
                let state = self.actors.entry(actor.clone()).or_default();
                // A newer flash replaces whatever was showing; the chain
                // restarts from here.
                state.pending_fx = Some(flash.cue_kind());
                out.push(SchedulerEvent::Flash(FlashRequest {
                    actor: actor.clone(),
                    kind: flash,
                    started_at_ms: fire_at_ms,
                    duration_ms: FLASH_DURATION_MS,
                }));
                self.queue
                    .arm(actor.clone(), TaskKind::FlashEnd, fire_at_ms + FLASH_DURATION_MS);
                self.queue
                    .arm(actor, TaskKind::FxStart, fire_at_ms + FLASH_TO_FX_DELAY_MS);
            }
            TaskKind::FlashEnd => {
                // Presentation clears the callout via the flash duration;
                // nothing to emit.
            }
            TaskKind::FxStart => {
                let Some(cue_kind) = self
                    .actors
                    .get_mut(&actor)
                    .and_then(|s| s.pending_fx.take())
                else {
                    return;
                };
                self.start_cue(actor, cue_kind, fire_at_ms, TaskKind::FxEnd, out);
            }
            TaskKind::FxEnd | TaskKind::DrainEnd => {
                // Cue stop is implicit via duration.
            }
            TaskKind::HpDebounce => {
                let Some(state) = self.actors.get_mut(&actor) else {
                    return;
                };
                let Some(target) = state.pending_hp.take() else {
                    return;
                };
                let previous = state.displayed_hp.unwrap_or(1.0);
                state.displayed_hp = Some(target);
                out.push(SchedulerEvent::Hp(HpUpdate {
                    actor: actor.clone(),
                    hp: target,
                    applied_at_ms: fire_at_ms,
                }));
                // Only a visible decrease triggers the drain branch.
                if target < previous - HP_EPS {
                    self.queue
                        .arm(actor, TaskKind::DrainStart, self.drain_not_before(fire_at_ms));
                }
            }
            TaskKind::DrainStart => {
                // Another cue may have started while this drain waited;
                // push it back instead of colliding.
                let not_before = self.drain_not_before(fire_at_ms);
                if not_before > fire_at_ms {
                    self.queue.arm(actor, TaskKind::DrainStart, not_before);
                    return;
                }
                self.start_cue(actor, CueKind::Drain, fire_at_ms, TaskKind::DrainEnd, out);
            }
        }
    }

    /// Earliest instant a drain may start, given the global cooldown.
    fn drain_not_before(&self, now_ms: u64) -> u64 {
        match self.last_effect_started_at {
            Some(last) => now_ms.max(last + GLOBAL_COOLDOWN_MS),
            None => now_ms,
        }
    }

    fn start_cue(
        &mut self,
        actor: ActorId,
        kind: CueKind,
        started_at_ms: u64,
        end_task: TaskKind,
        out: &mut Vec<SchedulerEvent>,
    ) {
        // No eligible catalog entry: skip the cue, keep everything else
        // intact. Playback is best-effort by contract.
        let Some(effect_key) = self.select_effect(&actor, kind) else {
            tracing::warn!(actor = %actor, ?kind, "no catalog entry for cue kind, skipping cue");
            return;
        };
        self.last_effect_started_at = Some(match self.last_effect_started_at {
            Some(last) => last.max(started_at_ms),
            None => started_at_ms,
        });
        out.push(SchedulerEvent::Cue(CueRequest {
            actor: actor.clone(),
            kind,
            effect_key,
            started_at_ms,
            duration_ms: CUE_DURATION_MS,
        }));
        self.queue.arm(actor, end_task, started_at_ms + CUE_DURATION_MS);
    }

    /// Deterministic effect selection: a seeded hash of actor id + cue
    /// kind picks from the catalog entries eligible for that kind, so the
    /// same actor always gets the same effect for the same kind.
    fn select_effect(&self, actor: &ActorId, kind: CueKind) -> Option<String> {
        let pool = self.catalog.for_kind(kind);
        if pool.is_empty() {
            return None;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.effect_seed(actor, kind));
        let idx = rng.gen_range(0..pool.len());
        Some(pool[idx].key.clone())
    }

    fn effect_seed(&self, actor: &ActorId, kind: CueKind) -> u64 {
        // FNV-1a over the actor id and kind, folded with the config seed.
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325 ^ self.seed;
        for byte in actor.to_string().bytes().chain([kind as u8]) {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x100_0000_01b3);
        }
        hash
    }
}
