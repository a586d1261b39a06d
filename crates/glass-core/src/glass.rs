use rand::prelude::*;

use crate::bubbles::BubbleField;
use crate::config::GlassParams;
use crate::constants::*;
use crate::foam::FoamField;

/// On-screen glass size in px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlassGeometry {
    pub width: f32,
    pub height: f32,
}

impl Default for GlassGeometry {
    fn default() -> Self {
        Self {
            width: GLASS_MAX_WIDTH,
            height: GLASS_MAX_HEIGHT,
        }
    }
}

impl GlassGeometry {
    /// Size the glass for a viewport, capped at the design maximum.
    pub fn fit(viewport_width: f32, viewport_height: f32) -> Self {
        let w = viewport_width.max(0.0);
        let h = viewport_height.max(0.0);
        Self {
            width: (w * GLASS_WIDTH_FRACTION).min(GLASS_MAX_WIDTH),
            height: (h * GLASS_HEIGHT_FRACTION).min(GLASS_MAX_HEIGHT),
        }
    }
}

/// Seed for `generation`, derived from the session seed so instances can be
/// regenerated independently.
#[inline]
pub fn instance_seed(base_seed: u64, generation: u64) -> u64 {
    base_seed ^ generation.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// One glass "pour": its bubble and foam layout plus a generation id.
///
/// Never mutated after construction; a refill replaces it wholesale.
#[derive(Clone, Debug)]
pub struct GlassInstance {
    pub generation: u64,
    pub seed: u64,
    pub bubbles: BubbleField,
    pub foam: FoamField,
}

impl GlassInstance {
    pub fn new(generation: u64, seed: u64, params: &GlassParams) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let bubbles =
            BubbleField::generate(&mut rng, params.bubbles.count, params.bubbles.rise_fraction);
        let foam = FoamField::generate(&mut rng, params.foam);
        Self {
            generation,
            seed,
            bubbles,
            foam,
        }
    }
}
