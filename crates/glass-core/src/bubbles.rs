//! Procedural rising bubbles.
//!
//! Each bubble is generated once per glass instance and then loops forever:
//! after its phase delay it rises with an ease-out curve over
//! `rise_duration_ms`, fading in, holding and fading out, and jumps back to
//! the bottom to start again. The whole set fades with the fill level.

use bytemuck::{Pod, Zeroable};
use rand::Rng;

use crate::constants::*;
use crate::interp::{clamp_total, ease_out_quad};

/// Immutable per-instance bubble descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bubble {
    pub size: f32,
    pub left_percent: f32,
    pub phase_delay_ms: f32,
    pub rise_duration_ms: f32,
}

impl Bubble {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            size: rng.gen_range(BUBBLE_SIZE_RANGE.0..BUBBLE_SIZE_RANGE.1),
            left_percent: rng.gen_range(BUBBLE_LEFT_RANGE.0..BUBBLE_LEFT_RANGE.1),
            phase_delay_ms: rng.gen_range(BUBBLE_DELAY_RANGE_MS.0..BUBBLE_DELAY_RANGE_MS.1),
            rise_duration_ms: rng.gen_range(BUBBLE_RISE_RANGE_MS.0..BUBBLE_RISE_RANGE_MS.1),
        }
    }

    /// Position within the current rise cycle in \[0, 1), or `None` while the
    /// bubble is still waiting out its phase delay.
    pub fn cycle_phase(&self, t_ms: f64) -> Option<f32> {
        let since = t_ms - f64::from(self.phase_delay_ms);
        let rise = f64::from(self.rise_duration_ms);
        if !since.is_finite() || since < 0.0 || rise <= 0.0 {
            return None;
        }
        Some((since.rem_euclid(rise) / rise) as f32)
    }
}

/// Opacity over one rise cycle: ramp to the peak over the first 10%, hold
/// for 70%, ramp back to zero over the last 20%.
pub fn bubble_envelope(phase: f32) -> f32 {
    let p = clamp_total(phase, 0.0, 1.0);
    let hold_end = BUBBLE_FADE_IN + BUBBLE_HOLD;
    if p < BUBBLE_FADE_IN {
        BUBBLE_PEAK_OPACITY * p / BUBBLE_FADE_IN
    } else if p < hold_end {
        BUBBLE_PEAK_OPACITY
    } else {
        BUBBLE_PEAK_OPACITY * (1.0 - (p - hold_end) / BUBBLE_FADE_OUT).max(0.0)
    }
}

/// Level-driven visibility multiplier; exactly 0 for an empty glass.
pub fn bubble_visibility(level: f32) -> f32 {
    if level.is_nan() || level <= BUBBLE_MIN_VISIBLE_LEVEL {
        return 0.0;
    }
    (level / BUBBLE_FULL_VISIBILITY_LEVEL).min(1.0)
}

/// Per-frame bubble placement, laid out for direct upload as instance data.
///
/// `offset_y` is negative upwards from `bottom`, both in px; `left_percent`
/// is relative to the glass width and `offset_x` is a px nudge on top.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BubbleFrame {
    pub left_percent: f32,
    pub bottom: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub size: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug)]
pub struct BubbleField {
    pub bubbles: Vec<Bubble>,
    pub rise_fraction: f32,
}

impl BubbleField {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, rise_fraction: f32) -> Self {
        let bubbles = (0..count).map(|_| Bubble::random(rng)).collect();
        Self {
            bubbles,
            rise_fraction,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Animate bubble `index` at animation time `t_ms`.
    pub fn frame(
        &self,
        index: usize,
        t_ms: f64,
        level: f32,
        glass_height: f32,
    ) -> Option<BubbleFrame> {
        let bubble = self.bubbles.get(index)?;
        let (offset_y, envelope) = match bubble.cycle_phase(t_ms) {
            Some(p) => (
                -self.rise_fraction * glass_height * ease_out_quad(p),
                bubble_envelope(p),
            ),
            None => (0.0, 0.0),
        };
        Some(BubbleFrame {
            left_percent: bubble.left_percent,
            bottom: glass_height * BUBBLE_BASE_FRACTION,
            offset_x: (index as f32).sin() * BUBBLE_JITTER_PX,
            offset_y,
            size: bubble.size,
            opacity: envelope * bubble_visibility(level),
        })
    }

    pub fn frames_into(
        &self,
        t_ms: f64,
        level: f32,
        glass_height: f32,
        out: &mut Vec<BubbleFrame>,
    ) {
        out.clear();
        out.extend(
            (0..self.bubbles.len()).filter_map(|i| self.frame(i, t_ms, level, glass_height)),
        );
    }
}
