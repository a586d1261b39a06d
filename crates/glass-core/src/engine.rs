use std::time::Duration;

use crate::config::GlassParams;
use crate::constants::{BUBBLE_MIN_VISIBLE_LEVEL, FILL_SCALE_X, GLASS_ROTATION_GAIN, LEVEL_EMPTY};
use crate::error::{ConfigError, SampleError};
use crate::event::{GlassEvent, GlassEvents};
use crate::frame::{FillFrame, GlassFrame};
use crate::glass::{instance_seed, GlassGeometry, GlassInstance};
use crate::haptics::{HapticGate, HapticRequests};
use crate::level::{BeerState, LevelIntegrator};
use crate::tilt::{SmoothedTilt, TiltSample, TiltSmoother};

/// Coarse lifecycle of the glass; drinking is orthogonal to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlassPhase {
    /// `level > 0`, possibly being drunk.
    Filled,
    /// `level == 0` until the next refill.
    Empty,
}

/// Events plus the haptic pulses they map to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Step {
    pub events: GlassEvents,
    pub haptics: HapticRequests,
}

impl Step {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.haptics.is_empty()
    }
}

/// Sensor-to-state engine for one glass session.
///
/// Two independent clocks drive it:
/// - the sample clock, `ingest(sample, at)` once per sensor reading in
///   arrival order; only it moves the level and drink state
/// - the animation clock, `advance(dt)` once per frame; it integrates the
///   tilt springs, eases the displayed level and runs bubble time
///
/// Typical usage:
/// - Construct with `GlassEngine::new(params, seed)`
/// - Feed samples with `ingest` and frames with `advance`
/// - Read `frame()` for drawing and call `refill()` on tap
pub struct GlassEngine {
    params: GlassParams,
    base_seed: u64,
    tilt: TiltSmoother,
    level: LevelIntegrator,
    instance: GlassInstance,
    geometry: GlassGeometry,
    gate: HapticGate,
    anim_ms: f64,
    sensor_available: bool,
}

impl GlassEngine {
    pub fn new(params: GlassParams, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        let instance = GlassInstance::new(0, instance_seed(seed, 0), &params);
        Ok(Self {
            tilt: TiltSmoother::new(params.tilt),
            level: LevelIntegrator::new(params.drink),
            gate: HapticGate::new(params.haptic_min_interval),
            geometry: GlassGeometry::default(),
            params,
            base_seed: seed,
            instance,
            anim_ms: 0.0,
            sensor_available: true,
        })
    }

    pub fn params(&self) -> &GlassParams {
        &self.params
    }

    #[inline]
    pub fn state(&self) -> BeerState {
        self.level.state()
    }

    #[inline]
    pub fn tilt(&self) -> SmoothedTilt {
        self.tilt.current()
    }

    #[inline]
    pub fn displayed_level(&self) -> f32 {
        self.level.displayed_level()
    }

    #[inline]
    pub fn instance(&self) -> &GlassInstance {
        &self.instance
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.instance.generation
    }

    /// Animation time since the current instance was created.
    #[inline]
    pub fn animation_time_ms(&self) -> f64 {
        self.anim_ms
    }

    pub fn phase(&self) -> GlassPhase {
        if self.state().is_empty() {
            GlassPhase::Empty
        } else {
            GlassPhase::Filled
        }
    }

    pub fn geometry(&self) -> GlassGeometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: GlassGeometry) {
        self.geometry = geometry;
    }

    #[inline]
    pub fn sensor_available(&self) -> bool {
        self.sensor_available
    }

    /// Without a sensor the tilt relaxes to neutral and drinking stops.
    pub fn set_sensor_available(&mut self, available: bool) {
        if self.sensor_available && !available {
            log::warn!("tilt sensor unavailable, holding the glass level");
            self.tilt.neutralize();
            self.level.interrupt();
        }
        self.sensor_available = available;
    }

    /// Sample clock. `at` is the sample timestamp used for haptic limiting.
    pub fn ingest(&mut self, sample: TiltSample, at: Duration) -> Result<Step, SampleError> {
        if !self.sensor_available {
            return Err(SampleError::SensorAbsent);
        }
        let sample = sample.validated()?;
        self.tilt.update(sample)?;
        let transition = self.level.ingest(sample.y());
        let mut step = Step::default();
        for event in transition.events {
            if let Some(req) = self.gate.request_for(&event, at) {
                step.haptics.push(req);
            }
            if event == GlassEvent::Empty {
                log::info!("glass {} empty", self.instance.generation);
            }
            step.events.push(event);
        }
        Ok(step)
    }

    /// Animation clock.
    pub fn advance(&mut self, dt: Duration) {
        let dt_sec = dt.as_secs_f32();
        self.tilt.advance(dt_sec);
        self.level.advance(dt_sec);
        self.anim_ms += dt.as_secs_f64() * 1000.0;
    }

    /// Fill back to 100 with a freshly generated glass instance.
    pub fn refill(&mut self) -> Step {
        let generation = self.instance.generation + 1;
        self.level.refill();
        self.instance = GlassInstance::new(
            generation,
            instance_seed(self.base_seed, generation),
            &self.params,
        );
        // Bubble phase delays count from the moment a glass is poured.
        self.anim_ms = 0.0;
        log::info!("refilled glass, generation {generation}");

        let event = GlassEvent::Refilled { generation };
        let mut step = Step::default();
        if let Some(req) = self.gate.request_for(&event, Duration::ZERO) {
            step.haptics.push(req);
        }
        step.events.push(event);
        step
    }

    pub fn frame(&self) -> GlassFrame {
        let mut frame = GlassFrame::default();
        self.frame_into(&mut frame);
        frame
    }

    /// Fill `frame` in place, reusing its bubble and foam buffers.
    pub fn frame_into(&self, frame: &mut GlassFrame) {
        let state = self.state();
        let tilt = self.tilt();
        let shown = self.displayed_level();
        frame.generation = self.instance.generation;
        frame.level = state.level;
        frame.displayed_level = shown;
        frame.is_drinking = state.is_drinking;
        frame.tilt = tilt;
        frame.glass_rotation_deg = tilt.tilt_x * GLASS_ROTATION_GAIN;
        frame.fill = FillFrame {
            height_percent: shown,
            surface_rotation_deg: tilt.surface_tilt,
            scale_x: FILL_SCALE_X,
        };
        frame.foam_band = self.instance.foam.band(shown, tilt.surface_tilt);
        // No bubbles once the committed level is gone, even mid-tween.
        let bubble_level = if state.level <= BUBBLE_MIN_VISIBLE_LEVEL {
            LEVEL_EMPTY
        } else {
            shown
        };
        self.instance.bubbles.frames_into(
            self.anim_ms,
            bubble_level,
            self.geometry.height,
            &mut frame.bubbles,
        );
        self.instance
            .foam
            .frames_into(shown, tilt.tilt_x, &mut frame.foam);
    }
}
