//! Battle scoring and live-effects engine.
//!
//! `BattleEngine` consumes polled battle snapshots and produces derived
//! scoring state plus a temporally ordered cue stream. Completely headless
//! (no renderer or timer dependency): time is a `u64` millisecond value the
//! caller passes in, enabling deterministic testing with a fake clock.
//!
//! Pipeline per poll: snapshot → [`resolver`] (pure scoring) → [`delta`]
//! (semantic change events) → [`scheduler`] (timed, mutually exclusive
//! cues) → presentation adapter (external, via [`sink::CueSink`]).

pub mod delta;
pub mod engine;
pub mod resolver;
pub mod scheduler;
pub mod sink;
pub mod tasks;

pub use engine::{BattleEngine, EngineConfig};
pub use resolver::{resolve, BattleResolution};
pub use scheduler::{EffectScheduler, SchedulerEvent};
pub use sink::{drive, CueSink, SinkError};
