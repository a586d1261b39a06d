/// Whether the glass is currently tipped to the mouth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrinkPhase {
    #[default]
    Idle,
    Drinking,
}

/// Result of classifying one sample against the previous phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrinkEdge {
    /// Idle -> Drinking; the one sample per episode that requests a pulse.
    Started,
    Sustained,
    /// Drinking -> Idle.
    Stopped,
    Idle,
}

impl DrinkEdge {
    #[inline]
    pub fn is_drinking(self) -> bool {
        matches!(self, Self::Started | Self::Sustained)
    }
}

/// Edge detector over the sample stream.
///
/// Samples must be fed strictly in arrival order; the edge is computed from
/// the previous phase only.
#[derive(Clone, Debug)]
pub struct DrinkDetector {
    threshold: f32,
    phase: DrinkPhase,
}

impl DrinkDetector {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            phase: DrinkPhase::Idle,
        }
    }

    /// Resume detection from a known phase.
    pub fn with_phase(threshold: f32, phase: DrinkPhase) -> Self {
        Self { threshold, phase }
    }

    #[inline]
    pub fn phase(&self) -> DrinkPhase {
        self.phase
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn observe(&mut self, y: f32, level: f32) -> DrinkEdge {
        let tipped = y > self.threshold && level > 0.0;
        let edge = match (self.phase, tipped) {
            (DrinkPhase::Idle, true) => DrinkEdge::Started,
            (DrinkPhase::Drinking, true) => DrinkEdge::Sustained,
            (DrinkPhase::Drinking, false) => DrinkEdge::Stopped,
            (DrinkPhase::Idle, false) => DrinkEdge::Idle,
        };
        self.phase = if tipped {
            DrinkPhase::Drinking
        } else {
            DrinkPhase::Idle
        };
        edge
    }

    /// Force Idle, e.g. after the level ran out mid-episode or on refill.
    pub fn reset(&mut self) {
        self.phase = DrinkPhase::Idle;
    }
}
