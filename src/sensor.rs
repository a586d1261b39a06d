//! Accelerometer plumbing between a platform source and the session.
//!
//! Sources push `SensorMessage`s into a single-consumer channel; the
//! session drains it in arrival order on its own thread of control.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use glass_core::TiltSample;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SensorMessage {
    /// Reading taken `at` after the source started.
    Sample { sample: TiltSample, at: Duration },
    /// The device stopped (or never could) deliver readings.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("no accelerometer on this device")]
    Unavailable,
    #[error("sensor already started")]
    AlreadyStarted,
    #[error("sensor backend error: {0}")]
    Backend(String),
}

/// Sending half handed to a source on `start`.
#[derive(Clone, Debug)]
pub struct SampleSink {
    tx: Sender<SensorMessage>,
}

impl SampleSink {
    pub fn new(tx: Sender<SensorMessage>) -> Self {
        Self { tx }
    }

    /// Returns false once the session has gone away.
    pub fn sample(&self, sample: TiltSample, at: Duration) -> bool {
        self.tx.send(SensorMessage::Sample { sample, at }).is_ok()
    }

    pub fn unavailable(&self) -> bool {
        self.tx.send(SensorMessage::Unavailable).is_ok()
    }
}

/// Platform accelerometer binding.
pub trait SensorSource {
    /// Begin delivering readings roughly every `interval`.
    fn start(&mut self, interval: Duration, sink: SampleSink) -> Result<(), SensorError>;
    /// Stop delivering; no message may be sent after this returns.
    fn stop(&mut self);
}

/// Device without an accelerometer.
#[derive(Clone, Copy, Debug, Default)]
pub struct AbsentSensor;

impl SensorSource for AbsentSensor {
    fn start(&mut self, _interval: Duration, _sink: SampleSink) -> Result<(), SensorError> {
        Err(SensorError::Unavailable)
    }

    fn stop(&mut self) {}
}

type SharedSink = Arc<Mutex<Option<SampleSink>>>;

/// Source driven by hand through its paired `SensorFeed`.
///
/// Used by headless drivers and tests to replay readings with exact
/// timestamps.
#[derive(Debug, Default)]
pub struct ManualSensor {
    sink: SharedSink,
    interval: Arc<Mutex<Option<Duration>>>,
}

/// Pushing half of a `ManualSensor`.
#[derive(Clone, Debug)]
pub struct SensorFeed {
    sink: SharedSink,
    interval: Arc<Mutex<Option<Duration>>>,
}

impl ManualSensor {
    pub fn pair() -> (Self, SensorFeed) {
        let sensor = Self::default();
        let feed = SensorFeed {
            sink: Arc::clone(&sensor.sink),
            interval: Arc::clone(&sensor.interval),
        };
        (sensor, feed)
    }
}

impl SensorSource for ManualSensor {
    fn start(&mut self, interval: Duration, sink: SampleSink) -> Result<(), SensorError> {
        let mut slot = self
            .sink
            .lock()
            .map_err(|e| SensorError::Backend(e.to_string()))?;
        if slot.is_some() {
            return Err(SensorError::AlreadyStarted);
        }
        *slot = Some(sink);
        if let Ok(mut i) = self.interval.lock() {
            *i = Some(interval);
        }
        Ok(())
    }

    fn stop(&mut self) {
        if let Ok(mut slot) = self.sink.lock() {
            *slot = None;
        }
    }
}

impl SensorFeed {
    /// Interval requested by the session, once started.
    pub fn interval(&self) -> Option<Duration> {
        self.interval.lock().ok().and_then(|i| *i)
    }

    pub fn is_active(&self) -> bool {
        self.sink.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Deliver one reading; false when stopped or the session is gone.
    pub fn send(&self, sample: TiltSample, at: Duration) -> bool {
        match self.sink.lock() {
            Ok(slot) => slot.as_ref().is_some_and(|s| s.sample(sample, at)),
            Err(_) => false,
        }
    }

    /// Deliver `samples` spaced by the session's interval, starting at `start`.
    /// Returns the number delivered.
    pub fn send_all(&self, samples: &[TiltSample], start: Duration) -> usize {
        let step = self
            .interval()
            .unwrap_or(Duration::from_millis(glass_core::SAMPLE_INTERVAL_MS));
        samples
            .iter()
            .enumerate()
            .take_while(|(i, s)| self.send(**s, start + step * *i as u32))
            .count()
    }

    pub fn fail(&self) -> bool {
        match self.sink.lock() {
            Ok(slot) => slot.as_ref().is_some_and(|s| s.unavailable()),
            Err(_) => false,
        }
    }
}
