//! Engine constants and tuning parameters.
//!
//! All timings are milliseconds. These values are product-tunable: they
//! were lifted from observed behavior, and any of them may be promoted to
//! a configuration input if requirements diverge.

// --- Cue timing ---

/// How long a single audio/visual cue plays.
pub const CUE_DURATION_MS: u64 = 3000;

/// How long a textual flash callout (HIT / BLOCKED / COUNTER ATTACK) stays up.
pub const FLASH_DURATION_MS: u64 = 1600;

/// Delay between a flash starting and its attack fx starting.
pub const FLASH_TO_FX_DELAY_MS: u64 = 80;

/// Delay between an attempt being observed and hit/block classification
/// becoming visible.
pub const HIT_DETECT_DELAY_MS: u64 = 260;

/// Extra delay before a counter cue, relative to the blocked cue it answers.
pub const COUNTER_DELAY_MS: u64 = 900;

// --- Global coordination ---

/// A drain cue may not start until this long after the most recently
/// started cue of any kind, on any actor.
pub const GLOBAL_COOLDOWN_MS: u64 = 3000;

/// Debounce applied to HP bar changes so rapid bursts land as one drop.
pub const HP_DEBOUNCE_MS: u64 = 360;

// --- Scoring ---

/// Minimum success rate (successes / attempts) for MVP eligibility.
pub const MVP_SUCCESS_RATE: f64 = 0.6;

/// Default points credited per rep of lead when no wager is staked.
pub const DEFAULT_POINTS_PER_REP: u32 = 3;
