//! Read-only per-frame snapshot handed to a presentation layer.

use crate::bubbles::BubbleFrame;
use crate::foam::{FoamBand, FoamBlobFrame};
use crate::tilt::SmoothedTilt;

/// Liquid body transform: height as percent of the glass, surface rotation
/// in degrees and horizontal overdraw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FillFrame {
    pub height_percent: f32,
    pub surface_rotation_deg: f32,
    pub scale_x: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlassFrame {
    pub generation: u64,
    /// Committed level (sample clock).
    pub level: f32,
    /// Eased level actually drawn.
    pub displayed_level: f32,
    pub is_drinking: bool,
    pub tilt: SmoothedTilt,
    pub glass_rotation_deg: f32,
    pub fill: FillFrame,
    pub foam_band: FoamBand,
    pub bubbles: Vec<BubbleFrame>,
    pub foam: Vec<FoamBlobFrame>,
}

impl GlassFrame {
    /// Bubble instance data as raw bytes for a vertex buffer upload.
    pub fn bubble_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.bubbles)
    }

    pub fn foam_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.foam)
    }
}
