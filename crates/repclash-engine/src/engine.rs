//! Battle engine facade — owns the resolve → delta → schedule pipeline
//! for one battle's lifetime.

use repclash_core::battle::Battle;
use repclash_core::catalog::EffectCatalog;
use repclash_core::views::BattleView;

use crate::delta;
use crate::resolver::{self, BattleResolution};
use crate::scheduler::{EffectScheduler, SchedulerEvent};

/// Configuration for a battle engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Seed folded into deterministic effect selection. Same seed, same
    /// catalog, same battle = same cue stream.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Drives one battle from polled snapshots to a timed cue stream.
///
/// The engine holds the previous snapshot and its resolution; observing a
/// snapshot equal to the previous one is a pure read (idempotent under
/// overlapping poll-timer and push-notification refreshes).
pub struct BattleEngine {
    scheduler: EffectScheduler,
    previous: Option<(Battle, BattleResolution)>,
    view: BattleView,
}

impl BattleEngine {
    pub fn new(catalog: EffectCatalog, config: EngineConfig) -> Self {
        Self {
            scheduler: EffectScheduler::new(catalog, config.seed),
            previous: None,
            view: BattleView::default(),
        }
    }

    /// Ingest one polled snapshot at `now_ms` and return the derived view.
    ///
    /// Re-observing an identical snapshot changes nothing and re-triggers
    /// no effects.
    pub fn observe(&mut self, battle: &Battle, now_ms: u64) -> &BattleView {
        if let Some((prev_battle, _)) = &self.previous {
            if prev_battle == battle {
                return &self.view;
            }
        }

        let resolution = resolver::resolve(battle);

        if let Some((prev_battle, prev_res)) = &self.previous {
            let events = delta::detect(prev_battle, prev_res, battle, &resolution);
            self.scheduler.observe_events(&events, now_ms);
        }
        for (actor, hp) in &resolution.hp {
            self.scheduler.observe_hp(actor, *hp, now_ms);
        }

        self.view = resolution.to_view(battle);
        self.previous = Some((battle.clone(), resolution));
        &self.view
    }

    /// Fire all scheduler work due at or before `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> Vec<SchedulerEvent> {
        self.scheduler.tick(now_ms)
    }

    /// The view derived from the most recent snapshot.
    pub fn view(&self) -> &BattleView {
        &self.view
    }

    /// Cancel every outstanding timer and drop all per-battle state.
    /// Nothing fires after teardown.
    pub fn teardown(&mut self) {
        self.scheduler.teardown();
        self.previous = None;
        self.view = BattleView::default();
    }

    pub fn scheduler(&self) -> &EffectScheduler {
        &self.scheduler
    }
}
