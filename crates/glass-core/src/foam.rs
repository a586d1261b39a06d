//! Foam head: a band on top of the liquid plus a row of blobs.
//!
//! Both shrink with the level through piecewise-linear tables and follow the
//! smoothed tilt, the blobs sliding sideways and the band rotating.

use bytemuck::{Pod, Zeroable};
use rand::Rng;

use crate::config::FoamParams;
use crate::constants::*;
use crate::interp::interpolate;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoamBlob {
    pub size: f32,
    pub left_percent: f32,
    pub y_offset: f32,
}

impl FoamBlob {
    /// Blob `index` of `count`, placed in its even slot plus jitter.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, index: usize, count: usize) -> Self {
        let slot = index as f32 / count.max(1) as f32 * 100.0;
        Self {
            size: rng.gen_range(FOAM_SIZE_RANGE.0..FOAM_SIZE_RANGE.1),
            left_percent: slot + rng.gen_range(FOAM_LEFT_JITTER.0..FOAM_LEFT_JITTER.1),
            y_offset: rng.gen_range(FOAM_Y_OFFSET_RANGE.0..FOAM_Y_OFFSET_RANGE.1),
        }
    }
}

/// Blob scale (and opacity) for a fill level: 0 at empty, 0.5 at 20, 1 at 100.
pub fn foam_scale(level: f32) -> f32 {
    interpolate(level, &FOAM_SCALE_LEVELS, &FOAM_SCALE_VALUES)
}

/// Height of the foam band in px for a fill level.
pub fn band_height(level: f32, params: &FoamParams) -> f32 {
    interpolate(level, &params.band_levels, &params.band_heights)
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FoamBlobFrame {
    pub left_percent: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FoamBand {
    pub height: f32,
    pub rotation_deg: f32,
}

#[derive(Clone, Debug)]
pub struct FoamField {
    pub blobs: Vec<FoamBlob>,
    pub params: FoamParams,
}

impl FoamField {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: FoamParams) -> Self {
        let blobs = (0..params.count)
            .map(|i| FoamBlob::random(rng, i, params.count))
            .collect();
        Self { blobs, params }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn band(&self, level: f32, surface_tilt: f32) -> FoamBand {
        FoamBand {
            height: band_height(level, &self.params),
            rotation_deg: surface_tilt * FOAM_BAND_ROTATION_GAIN,
        }
    }

    pub fn blob_frame(blob: &FoamBlob, level: f32, tilt_x: f32) -> FoamBlobFrame {
        let scale = foam_scale(level);
        FoamBlobFrame {
            left_percent: blob.left_percent + tilt_x * FOAM_TILT_SHIFT,
            top: -blob.size * FOAM_BLOB_LIFT + blob.y_offset,
            width: blob.size,
            height: blob.size * FOAM_BLOB_ASPECT,
            scale,
            opacity: scale,
        }
    }

    pub fn frames_into(&self, level: f32, tilt_x: f32, out: &mut Vec<FoamBlobFrame>) {
        out.clear();
        out.extend(self.blobs.iter().map(|b| Self::blob_frame(b, level, tilt_x)));
    }
}
