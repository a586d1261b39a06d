use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Context;
use instant::Instant;

use beer_glass::core::{GlassParams, GlassVariant, ImpactStrength, NotificationKind, TiltSample};
use beer_glass::{
    GlassSession, HapticError, HapticTrigger, SampleSink, SensorError, SensorSource,
};

const RUN_FOR: Duration = Duration::from_secs(45);
const FRAME_DT: Duration = Duration::from_micros(16_667);
const REFILL_DELAY: Duration = Duration::from_millis(1500);
const VIEWPORT: (f32, f32) = (390.0, 844.0);

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let params = GlassParams::for_variant(GlassVariant::Fullscreen);
    let seed: u64 = rand::random();
    log::info!("pouring glass with seed {seed:#x}");

    let mut session = GlassSession::start(
        params,
        seed,
        Box::new(SyntheticTilt::default()),
        LoggedHaptics::default(),
    )
    .context("invalid glass parameters")?;
    session.set_viewport(VIEWPORT.0, VIEWPORT.1);

    let emptied_at: Rc<Cell<Option<Instant>>> = Rc::new(Cell::new(None));
    {
        let emptied_at = Rc::clone(&emptied_at);
        session.on_empty(move || {
            log::info!("[glass] empty, tap to refill");
            emptied_at.set(Some(Instant::now()));
        });
    }
    session.on_drink(|level| log::debug!("[glass] drinking, level {level:.2}"));

    let start = Instant::now();
    let mut last_report = start;
    while start.elapsed() < RUN_FOR {
        let frame_start = Instant::now();
        let frame = session.frame(FRAME_DT);
        if last_report.elapsed() >= Duration::from_secs(1) {
            let visible = frame.bubbles.iter().filter(|b| b.opacity > 0.0).count();
            log::info!(
                "level {:5.1} (shown {:5.1}) drinking={} tilt_x {:+5.1} surface {:+5.1} \
                 foam band {:4.1}px bubbles visible {}/{}",
                frame.level,
                frame.displayed_level,
                frame.is_drinking,
                frame.tilt.tilt_x,
                frame.tilt.surface_tilt,
                frame.foam_band.height,
                visible,
                frame.bubbles.len()
            );
            last_report = Instant::now();
        }

        if let Some(at) = emptied_at.get() {
            if at.elapsed() >= REFILL_DELAY {
                emptied_at.set(None);
                session.tap();
            }
        }

        if let Some(rest) = FRAME_DT.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    log::info!(
        "done: generation {}, {} haptic pulses",
        session.engine().generation(),
        session.haptics().pulses
    );
    session.teardown();
    Ok(())
}

// ---------------- Synthetic accelerometer ----------------

/// Thread emitting a slow side-to-side sway with periodic tip-ups.
#[derive(Default)]
struct SyntheticTilt {
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SyntheticTilt {
    fn reading(t: f32) -> TiltSample {
        let x = 0.35 * (t * 0.8).sin();
        // 4 s cycle: tipped to drink for the last 1.5 s
        let y = if t.rem_euclid(4.0) > 2.5 { 0.95 } else { 0.15 };
        // a little sensor noise
        let noise = 0.02 * (t * 37.0).sin();
        TiltSample::new(x + noise, y + noise, -0.9)
    }
}

impl SensorSource for SyntheticTilt {
    fn start(&mut self, interval: Duration, sink: SampleSink) -> Result<(), SensorError> {
        if self.worker.is_some() {
            return Err(SensorError::AlreadyStarted);
        }
        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let handle = thread::Builder::new()
            .name("synthetic-tilt".into())
            .spawn(move || {
                let start = Instant::now();
                while running.load(Ordering::SeqCst) {
                    let at = start.elapsed();
                    if !sink.sample(Self::reading(at.as_secs_f32()), at) {
                        break;
                    }
                    thread::sleep(interval);
                }
            })
            .map_err(|e| SensorError::Backend(e.to_string()))?;
        self.worker = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::error!("synthetic tilt thread panicked");
            }
        }
    }
}

// ---------------- Haptics ----------------

#[derive(Default)]
struct LoggedHaptics {
    pulses: usize,
}

impl HapticTrigger for LoggedHaptics {
    fn impact_pulse(&mut self, strength: ImpactStrength) -> Result<(), HapticError> {
        self.pulses += 1;
        log::info!("[haptic] impact {strength:?}");
        Ok(())
    }

    fn notification_pulse(&mut self, kind: NotificationKind) -> Result<(), HapticError> {
        self.pulses += 1;
        log::info!("[haptic] notification {kind:?}");
        Ok(())
    }
}
