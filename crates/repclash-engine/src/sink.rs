//! Presentation adapter seam.
//!
//! The engine never talks to a renderer or audio device directly; it
//! hands [`SchedulerEvent`]s to a [`CueSink`]. Playback is best-effort: a
//! sink failure (missing asset, device busy) is logged and dropped, and
//! scoring/resolution state is never affected by it.

use thiserror::Error;

use crate::scheduler::SchedulerEvent;

/// Why a sink could not act on an event.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("missing asset: {0}")]
    MissingAsset(String),
    #[error("playback failed: {0}")]
    Playback(String),
}

/// What the presentation adapter implements: render HP values, show
/// callouts, play effect cues. Cue stop is implicit via duration.
pub trait CueSink {
    fn handle(&mut self, event: &SchedulerEvent) -> Result<(), SinkError>;
}

/// Forward events to the sink, swallowing per-event failures.
///
/// Returns how many events the sink accepted.
pub fn drive(sink: &mut dyn CueSink, events: &[SchedulerEvent]) -> usize {
    let mut delivered = 0;
    for event in events {
        match sink.handle(event) {
            Ok(()) => delivered += 1,
            Err(err) => {
                tracing::warn!(?event, %err, "dropping cue event");
            }
        }
    }
    delivered
}
