//! Runtime configuration for a glass session.
//!
//! Defaults reproduce the card-sized glass; `GlassParams::for_variant`
//! switches to the fullscreen tuning (more bubbles and blobs, a taller rise
//! and a thicker foam band). Both are plain data and can be tweaked field by
//! field before calling `validate`.

use std::time::Duration;

use crate::constants::*;
use crate::error::ConfigError;
use crate::interp::is_strictly_increasing;
use crate::spring::SpringParams;

/// Layout family the glass is rendered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlassVariant {
    #[default]
    Card,
    Fullscreen,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltParams {
    pub tilt_x_gain: f32,
    pub surface_gain: f32,
    pub tilt_y_gain: f32,
    pub tilt_x_spring: SpringParams,
    pub surface_spring: SpringParams,
    pub tilt_y_spring: SpringParams,
}

impl Default for TiltParams {
    fn default() -> Self {
        Self {
            tilt_x_gain: TILT_X_GAIN,
            surface_gain: SURFACE_TILT_GAIN,
            tilt_y_gain: TILT_Y_GAIN,
            tilt_x_spring: SpringParams::new(TILT_X_DAMPING, TILT_X_STIFFNESS),
            surface_spring: SpringParams::new(SURFACE_TILT_DAMPING, SURFACE_TILT_STIFFNESS),
            tilt_y_spring: SpringParams::new(TILT_Y_DAMPING, TILT_Y_STIFFNESS),
        }
    }
}

/// Drink detection and depletion.
///
/// - `threshold`: sample `y` above which the glass counts as tipped to drink
/// - `rate_gain`: level points removed per unit of `y` above the threshold
/// - `tween_ms`: duration of the displayed-level ease after each sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrinkParams {
    pub threshold: f32,
    pub rate_gain: f32,
    pub tween_ms: f32,
}

impl Default for DrinkParams {
    fn default() -> Self {
        Self {
            threshold: DRINK_THRESHOLD,
            rate_gain: DRINK_RATE_GAIN,
            tween_ms: LEVEL_TWEEN_MS,
        }
    }
}

impl DrinkParams {
    /// Level drained by one sample at `y`; zero at or below the threshold.
    #[inline]
    pub fn drink_rate(&self, y: f32) -> f32 {
        ((y - self.threshold) * self.rate_gain).max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleParams {
    pub count: usize,
    pub rise_fraction: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoamParams {
    pub count: usize,
    pub band_levels: [f32; 3],
    pub band_heights: [f32; 3],
}

/// Everything a `GlassEngine` needs besides its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct GlassParams {
    pub variant: GlassVariant,
    pub sample_interval: Duration,
    pub haptic_min_interval: Duration,
    pub tilt: TiltParams,
    pub drink: DrinkParams,
    pub bubbles: BubbleParams,
    pub foam: FoamParams,
}

impl Default for GlassParams {
    fn default() -> Self {
        Self::for_variant(GlassVariant::Card)
    }
}

impl GlassParams {
    pub fn for_variant(variant: GlassVariant) -> Self {
        let (bubble_count, rise_fraction, foam_count, band_heights) = match variant {
            GlassVariant::Card => (
                BUBBLE_COUNT,
                BUBBLE_RISE_FRACTION,
                FOAM_BLOB_COUNT,
                FOAM_BAND_HEIGHTS,
            ),
            GlassVariant::Fullscreen => (
                BUBBLE_COUNT_FULLSCREEN,
                BUBBLE_RISE_FRACTION_FULLSCREEN,
                FOAM_BLOB_COUNT_FULLSCREEN,
                FOAM_BAND_HEIGHTS_FULLSCREEN,
            ),
        };
        Self {
            variant,
            sample_interval: Duration::from_millis(SAMPLE_INTERVAL_MS),
            haptic_min_interval: Duration::from_millis(HAPTIC_MIN_INTERVAL_MS),
            tilt: TiltParams::default(),
            drink: DrinkParams::default(),
            bubbles: BubbleParams {
                count: bubble_count,
                rise_fraction,
            },
            foam: FoamParams {
                count: foam_count,
                band_levels: FOAM_BAND_LEVELS,
                band_heights,
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.drink;
        if !(d.threshold > 0.0 && d.threshold < 1.0) {
            return Err(ConfigError::Threshold(d.threshold));
        }
        positive("drink rate gain", d.rate_gain)?;
        positive("level tween duration", d.tween_ms)?;
        if self.sample_interval.is_zero() {
            return Err(ConfigError::SampleInterval);
        }
        let t = &self.tilt;
        for (name, spring) in [
            ("tilt_x stiffness", t.tilt_x_spring),
            ("surface stiffness", t.surface_spring),
            ("tilt_y stiffness", t.tilt_y_spring),
        ] {
            positive(name, spring.stiffness)?;
            if !(spring.damping.is_finite() && spring.damping >= 0.0) {
                return Err(ConfigError::NotPositive {
                    name: "spring damping",
                    value: spring.damping,
                });
            }
        }
        if self.bubbles.count == 0 {
            return Err(ConfigError::EmptySet("bubble"));
        }
        positive("bubble rise fraction", self.bubbles.rise_fraction)?;
        if self.foam.count == 0 {
            return Err(ConfigError::EmptySet("foam blob"));
        }
        if !is_strictly_increasing(&self.foam.band_levels) {
            return Err(ConfigError::Breakpoints("foam band"));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
