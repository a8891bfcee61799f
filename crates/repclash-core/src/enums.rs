//! Enumeration types used throughout the battle engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ParticipantId;

/// Competition topology of a battle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleMode {
    /// Two participants, head to head.
    #[default]
    Duel,
    /// Free-for-all: every participant against the best of the rest.
    Ffa,
    /// Two teams; HP and payouts aggregate per side.
    Teams,
}

/// Which side of a team battle an actor belongs to.
///
/// Sides are named after their card position on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Top,
    Bottom,
}

impl TeamSide {
    /// The opposing side.
    pub fn opponent(self) -> TeamSide {
        match self {
            TeamSide::Top => TeamSide::Bottom,
            TeamSide::Bottom => TeamSide::Top,
        }
    }
}

/// Semantic kind of an audio/visual cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    /// Looping strike effect played on a hit actor.
    Attack,
    /// Deflection effect for a blocked attempt.
    Block,
    /// Counter-damage effect on a failed attempt.
    Counter,
    /// HP bar drain visual, globally serialized behind other cues.
    Drain,
}

/// Textual callout shown before the corresponding cue fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Hit,
    Blocked,
    CounterAttack,
}

impl FlashKind {
    /// The cue kind the flash escalates into.
    pub fn cue_kind(self) -> CueKind {
        match self {
            FlashKind::Hit => CueKind::Attack,
            FlashKind::Blocked => CueKind::Block,
            FlashKind::CounterAttack => CueKind::Counter,
        }
    }
}

/// The unit that owns an HP bar, flashes, and plays cues.
///
/// In duel/FFA mode each participant is an actor; in team mode the two
/// sides are the actors and individual participants never cue directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorId {
    Participant(ParticipantId),
    Team(TeamSide),
}

impl ActorId {
    pub fn participant(id: impl Into<String>) -> Self {
        ActorId::Participant(ParticipantId::new(id))
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorId::Participant(id) => write!(f, "{id}"),
            ActorId::Team(TeamSide::Top) => f.write_str("top"),
            ActorId::Team(TeamSide::Bottom) => f.write_str("bottom"),
        }
    }
}
