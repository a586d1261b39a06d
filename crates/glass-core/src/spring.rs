use crate::constants::{MAX_FRAME_DT_SEC, SPRING_MAX_SUBSTEP_SEC};

/// Damping/stiffness pair for a unit-mass spring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub damping: f32,
    pub stiffness: f32,
}

impl SpringParams {
    pub const fn new(damping: f32, stiffness: f32) -> Self {
        Self { damping, stiffness }
    }

    /// Damping ratio; below 1.0 the spring overshoots before settling.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * self.stiffness.max(f32::EPSILON).sqrt())
    }
}

/// Second-order damped oscillator chasing a target value.
///
/// Retargeting leaves position and velocity untouched, so the output stays
/// continuous when the target jumps between sensor samples. `step` is driven
/// by the animation clock and keeps converging between target updates.
#[derive(Clone, Debug)]
pub struct Spring {
    pub params: SpringParams,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(params: SpringParams) -> Self {
        Self {
            params,
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Jump to `value` at rest.
    pub fn snap(&mut self, value: f32) {
        if value.is_finite() {
            self.value = value;
            self.target = value;
            self.velocity = 0.0;
        }
    }

    pub fn is_settled(&self, tolerance: f32) -> bool {
        (self.target - self.value).abs() <= tolerance && self.velocity.abs() <= tolerance
    }

    /// Integrate `dt_sec` of motion (semi-implicit Euler in bounded substeps).
    pub fn step(&mut self, dt_sec: f32) {
        if !dt_sec.is_finite() || dt_sec <= 0.0 {
            return;
        }
        let dt = dt_sec.min(MAX_FRAME_DT_SEC);
        let substeps = (dt / SPRING_MAX_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt / substeps as f32;
        let k = self.params.stiffness;
        let c = self.params.damping;
        for _ in 0..substeps {
            let accel = k * (self.target - self.value) - c * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }
        if !self.value.is_finite() || !self.velocity.is_finite() {
            // Degenerate params; fall back to resting on the target.
            log::debug!("spring diverged, snapping to target {}", self.target);
            self.value = self.target;
            self.velocity = 0.0;
        }
    }
}
