//! Events flowing between the delta detector, the effect scheduler, and
//! the presentation adapter.

use serde::{Deserialize, Serialize};

use crate::enums::{ActorId, CueKind, FlashKind};

/// Semantic classification of what changed between two snapshots.
///
/// Emitted by the delta detector with a relative offset; the scheduler
/// turns these into flashes and cues on its own clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeKind {
    /// A successful attempt landed: the actor's HP dropped.
    Hit,
    /// An attempt was fully absorbed — nothing dropped on either side.
    Blocked,
    /// Counter-damage: the attempter's own HP dropped on a failed attempt.
    Counter,
}

impl ChangeKind {
    pub fn flash_kind(&self) -> FlashKind {
        match self {
            ChangeKind::Hit => FlashKind::Hit,
            ChangeKind::Blocked => FlashKind::Blocked,
            ChangeKind::Counter => FlashKind::CounterAttack,
        }
    }
}

/// One semantic change event, addressed to the actor whose card reacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub actor: ActorId,
    pub kind: ChangeKind,
    /// Offset from the observation instant at which the flash should start.
    pub offset_ms: u64,
}

/// Request to show a textual callout on an actor's card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashRequest {
    pub actor: ActorId,
    pub kind: FlashKind,
    pub started_at_ms: u64,
    pub duration_ms: u64,
}

/// Request to play one concrete effect from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueRequest {
    pub actor: ActorId,
    pub kind: CueKind,
    /// Catalog key of the selected effect.
    pub effect_key: String,
    pub started_at_ms: u64,
    /// The cue stops implicitly after this duration; no stop event is sent.
    pub duration_ms: u64,
}

/// Debounced HP bar update for one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HpUpdate {
    pub actor: ActorId,
    /// Normalized HP in [0, 1] to display.
    pub hp: f64,
    pub applied_at_ms: u64,
}
