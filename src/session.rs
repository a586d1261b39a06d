use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use glass_core::{
    ConfigError, GlassEngine, GlassEvent, GlassFrame, GlassGeometry, GlassParams, Step,
};

use crate::haptics::{self, HapticTrigger};
use crate::sensor::{SampleSink, SensorMessage, SensorSource};

type DrinkListener = Box<dyn FnMut(f32)>;
type EmptyListener = Box<dyn FnMut()>;

/// One glass on screen: the engine plus its sensor subscription, haptics
/// and listeners.
///
/// Everything runs on the caller's thread. Sensor readings queue up in a
/// channel and are applied, in order, at the start of each `frame`.
pub struct GlassSession<H: HapticTrigger> {
    engine: GlassEngine,
    sensor: Box<dyn SensorSource>,
    rx: Option<Receiver<SensorMessage>>,
    haptics: H,
    on_drink: Option<DrinkListener>,
    on_empty: Option<EmptyListener>,
    frame: GlassFrame,
    torn_down: bool,
}

impl<H: HapticTrigger> GlassSession<H> {
    /// Build the engine and subscribe to `sensor`.
    ///
    /// A sensor that fails to start is not an error: the glass stays level
    /// and full until tapped.
    pub fn start(
        params: GlassParams,
        seed: u64,
        mut sensor: Box<dyn SensorSource>,
        haptics: H,
    ) -> Result<Self, ConfigError> {
        let mut engine = GlassEngine::new(params, seed)?;
        let (tx, rx) = mpsc::channel();
        let interval = engine.params().sample_interval;
        if let Err(e) = sensor.start(interval, SampleSink::new(tx)) {
            log::warn!("sensor start failed: {e}");
            engine.set_sensor_available(false);
        }
        let mut frame = GlassFrame::default();
        engine.frame_into(&mut frame);
        Ok(Self {
            engine,
            sensor,
            rx: Some(rx),
            haptics,
            on_drink: None,
            on_empty: None,
            frame,
            torn_down: false,
        })
    }

    /// Called with the level after each drinking sample.
    pub fn on_drink(&mut self, listener: impl FnMut(f32) + 'static) {
        self.on_drink = Some(Box::new(listener));
    }

    /// Called once each time the glass runs dry.
    pub fn on_empty(&mut self, listener: impl FnMut() + 'static) {
        self.on_empty = Some(Box::new(listener));
    }

    pub fn engine(&self) -> &GlassEngine {
        &self.engine
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    pub fn is_active(&self) -> bool {
        !self.torn_down
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.engine.set_geometry(GlassGeometry::fit(width, height));
    }

    /// Apply every queued sensor message in arrival order.
    /// Returns the number of samples accepted.
    pub fn pump(&mut self) -> usize {
        let mut accepted = 0;
        loop {
            let Some(rx) = self.rx.as_ref() else {
                return accepted;
            };
            let msg = match rx.try_recv() {
                Ok(msg) => msg,
                Err(TryRecvError::Empty) => return accepted,
                Err(TryRecvError::Disconnected) => {
                    // Source went quiet for good; the springs settle on
                    // their last targets.
                    log::debug!("sensor channel closed");
                    self.rx = None;
                    return accepted;
                }
            };
            match msg {
                SensorMessage::Sample { sample, at } => match self.engine.ingest(sample, at) {
                    Ok(step) => {
                        accepted += 1;
                        self.dispatch(step);
                    }
                    Err(e) => log::debug!("sample rejected: {e}"),
                },
                SensorMessage::Unavailable => self.engine.set_sensor_available(false),
            }
        }
    }

    /// Drain the sensor queue, advance the animation clock by `dt` and
    /// return the snapshot to draw. After teardown the last snapshot is
    /// returned unchanged.
    pub fn frame(&mut self, dt: Duration) -> &GlassFrame {
        if !self.torn_down {
            self.pump();
            self.engine.advance(dt);
            self.engine.frame_into(&mut self.frame);
        }
        &self.frame
    }

    /// Tap gesture: pour a fresh glass.
    pub fn tap(&mut self) {
        if self.torn_down {
            return;
        }
        let step = self.engine.refill();
        self.dispatch(step);
        self.engine.frame_into(&mut self.frame);
    }

    /// Unsubscribe from the sensor and silence every callback.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.sensor.stop();
        self.rx = None;
        self.on_drink = None;
        self.on_empty = None;
        log::info!("glass session torn down");
    }

    fn dispatch(&mut self, step: Step) {
        for request in step.haptics {
            haptics::play(&mut self.haptics, request);
        }
        for event in step.events {
            match event {
                GlassEvent::Drink { level } => {
                    if let Some(f) = self.on_drink.as_mut() {
                        f(level);
                    }
                }
                GlassEvent::Empty => {
                    if let Some(f) = self.on_empty.as_mut() {
                        f();
                    }
                }
                GlassEvent::DrinkStarted | GlassEvent::Refilled { .. } => {}
            }
        }
    }
}

impl<H: HapticTrigger> Drop for GlassSession<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
