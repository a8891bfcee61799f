//! Global effect catalog — the pool of visual/audio payloads the scheduler
//! selects cues from.

use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::CueKind;

/// One configured effect: a key plus the cue kinds it may play for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectEntry {
    /// Stable key the presentation adapter resolves assets by.
    pub key: String,
    /// Cue kinds this effect is eligible for.
    pub cue_kinds: Vec<CueKind>,
    /// Visual asset reference (sprite sheet, particle preset, ...).
    #[serde(default)]
    pub visual: Option<String>,
    /// Audio sample reference.
    #[serde(default)]
    pub audio: Option<String>,
}

/// The full effect catalog, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectCatalog {
    pub entries: Vec<EffectEntry>,
}

/// Errors from loading a catalog. Missing assets at play time are NOT
/// errors here — cue playback is best-effort and handled downstream.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EffectCatalog {
    pub fn new(entries: Vec<EffectEntry>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a JSON reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Entries eligible for the given cue kind, in catalog order.
    ///
    /// May be empty; the scheduler then skips the cue rather than failing.
    pub fn for_kind(&self, kind: CueKind) -> Vec<&EffectEntry> {
        self.entries
            .iter()
            .filter(|e| e.cue_kinds.contains(&kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
