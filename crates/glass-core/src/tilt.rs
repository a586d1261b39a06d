//! Accelerometer samples and the spring-smoothed tilt derived from them.

use glam::Vec3;

use crate::config::TiltParams;
use crate::error::SampleError;
use crate::spring::Spring;

/// One raw accelerometer reading (dimensionless, roughly in g).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltSample(pub Vec3);

impl TiltSample {
    pub const NEUTRAL: Self = Self(Vec3::ZERO);

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.0.z
    }

    /// Reject readings carrying NaN or infinity on any axis.
    pub fn validated(self) -> Result<Self, SampleError> {
        if self.0.is_finite() {
            Ok(self)
        } else {
            Err(SampleError::NonFinite {
                x: self.0.x,
                y: self.0.y,
                z: self.0.z,
            })
        }
    }
}

impl From<Vec3> for TiltSample {
    fn from(v: Vec3) -> Self {
        Self(v)
    }
}

/// Current smoothed tilt in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothedTilt {
    pub tilt_x: f32,
    pub tilt_y: f32,
    pub surface_tilt: f32,
}

/// Three independent springs following the latest sample.
///
/// `update` only moves spring targets (sample clock); `advance` integrates
/// them (animation clock). Between samples the springs keep converging on
/// the last accepted targets.
#[derive(Clone, Debug)]
pub struct TiltSmoother {
    params: TiltParams,
    tilt_x: Spring,
    tilt_y: Spring,
    surface: Spring,
}

impl TiltSmoother {
    pub fn new(params: TiltParams) -> Self {
        Self {
            tilt_x: Spring::new(params.tilt_x_spring),
            tilt_y: Spring::new(params.tilt_y_spring),
            surface: Spring::new(params.surface_spring),
            params,
        }
    }

    /// Retarget from a sample. Malformed samples leave everything unchanged.
    pub fn update(&mut self, sample: TiltSample) -> Result<SmoothedTilt, SampleError> {
        let sample = sample.validated()?;
        self.tilt_x.set_target(sample.x() * self.params.tilt_x_gain);
        self.surface.set_target(sample.x() * self.params.surface_gain);
        self.tilt_y.set_target(sample.y() * self.params.tilt_y_gain);
        Ok(self.current())
    }

    /// Aim every spring back at level (sensor lost).
    pub fn neutralize(&mut self) {
        self.tilt_x.set_target(0.0);
        self.tilt_y.set_target(0.0);
        self.surface.set_target(0.0);
    }

    pub fn advance(&mut self, dt_sec: f32) {
        self.tilt_x.step(dt_sec);
        self.tilt_y.step(dt_sec);
        self.surface.step(dt_sec);
    }

    pub fn current(&self) -> SmoothedTilt {
        SmoothedTilt {
            tilt_x: self.tilt_x.value(),
            tilt_y: self.tilt_y.value(),
            surface_tilt: self.surface.value(),
        }
    }

    /// Targets the springs are converging on.
    pub fn targets(&self) -> SmoothedTilt {
        SmoothedTilt {
            tilt_x: self.tilt_x.target(),
            tilt_y: self.tilt_y.target(),
            surface_tilt: self.surface.target(),
        }
    }
}
