//! Replay binary — feeds a JSON poll script into the battle engine and
//! logs the resulting cue stream on a simulated clock.
//!
//! Usage: `repclash-app <catalog.json> <script.json>`
//!
//! This stands in for the presentation adapter: instead of rendering
//! cards and playing audio it logs every flash, cue, and HP update with
//! its firing time, which is enough to eyeball scheduling behavior.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use repclash_core::battle::Battle;
use repclash_core::catalog::EffectCatalog;
use repclash_engine::{drive, BattleEngine, CueSink, EngineConfig, SchedulerEvent, SinkError};

/// How far past the last sample the clock keeps running, so trailing
/// drains and counters still fire.
const TAIL_MS: u64 = 10_000;

/// Simulated clock granularity.
const STEP_MS: u64 = 20;

/// One polled snapshot at a point on the script clock.
#[derive(Debug, Deserialize)]
struct PollSample {
    at_ms: u64,
    battle: Battle,
}

/// A recorded poll sequence, as captured from the hosted store.
#[derive(Debug, Deserialize)]
struct PollScript {
    #[serde(default)]
    seed: Option<u64>,
    samples: Vec<PollSample>,
}

/// Sink that logs every event instead of rendering it.
struct LogSink;

impl CueSink for LogSink {
    fn handle(&mut self, event: &SchedulerEvent) -> Result<(), SinkError> {
        match event {
            SchedulerEvent::Flash(f) => {
                tracing::info!(actor = %f.actor, kind = ?f.kind, at = f.started_at_ms, "flash");
            }
            SchedulerEvent::Cue(c) => {
                tracing::info!(
                    actor = %c.actor,
                    kind = ?c.kind,
                    effect = %c.effect_key,
                    at = c.started_at_ms,
                    duration = c.duration_ms,
                    "cue"
                );
            }
            SchedulerEvent::Hp(u) => {
                tracing::info!(actor = %u.actor, hp = u.hp, at = u.applied_at_ms, "hp");
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let (catalog_path, script_path) = parse_args()?;

    let catalog = load_catalog(&catalog_path)
        .with_context(|| format!("loading catalog from {}", catalog_path.display()))?;
    let script = load_script(&script_path)
        .with_context(|| format!("loading poll script from {}", script_path.display()))?;

    let view = replay(catalog, &script);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn parse_args() -> Result<(PathBuf, PathBuf)> {
    let mut args = std::env::args_os().skip(1);
    match (args.next(), args.next()) {
        (Some(catalog), Some(script)) => Ok((catalog.into(), script.into())),
        _ => bail!("usage: repclash-app <catalog.json> <script.json>"),
    }
}

fn load_catalog(path: &PathBuf) -> Result<EffectCatalog> {
    let file = File::open(path)?;
    Ok(EffectCatalog::from_reader(BufReader::new(file))?)
}

fn load_script(path: &PathBuf) -> Result<PollScript> {
    let file = File::open(path)?;
    let script: PollScript = serde_json::from_reader(BufReader::new(file))?;
    if script.samples.is_empty() {
        bail!("poll script has no samples");
    }
    Ok(script)
}

/// Step the engine through the script on a simulated clock and return the
/// final derived view.
fn replay(catalog: EffectCatalog, script: &PollScript) -> repclash_core::views::BattleView {
    let config = EngineConfig {
        seed: script.seed.unwrap_or_else(|| EngineConfig::default().seed),
    };
    let mut engine = BattleEngine::new(catalog, config);
    let mut sink = LogSink;

    let end = script.samples.last().map(|s| s.at_ms).unwrap_or(0) + TAIL_MS;
    let mut next_sample = 0;
    let mut now = 0;
    while now <= end {
        while script
            .samples
            .get(next_sample)
            .is_some_and(|s| s.at_ms <= now)
        {
            let sample = &script.samples[next_sample];
            let view = engine.observe(&sample.battle, now);
            if let Some(winner) = &view.winner {
                tracing::info!(?winner, settled = view.settled, at = now, "resolution");
            }
            next_sample += 1;
        }
        let events = engine.tick(now);
        drive(&mut sink, &events);
        now += STEP_MS;
    }
    engine.view().clone()
}
