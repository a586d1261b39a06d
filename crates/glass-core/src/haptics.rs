use std::time::Duration;

use smallvec::SmallVec;

use crate::event::GlassEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImpactStrength {
    Light,
    Medium,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
}

/// Feedback pulse the platform layer should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HapticRequest {
    Impact(ImpactStrength),
    Notification(NotificationKind),
}

pub type HapticRequests = SmallVec<[HapticRequest; 2]>;

/// Maps engine events to pulses and rate-limits drink-edge impacts.
///
/// Time is the sample-clock timestamp the caller passes in, so the limit
/// holds no matter how fast samples or edges arrive. A stamp earlier than
/// the last pulse counts as inside its window.
#[derive(Clone, Debug)]
pub struct HapticGate {
    min_interval: Duration,
    last_drink_pulse: Option<Duration>,
}

impl HapticGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_drink_pulse: None,
        }
    }

    /// True (and the window restarts) if a drink pulse may fire at `now`.
    pub fn try_drink_pulse(&mut self, now: Duration) -> bool {
        let open = match self.last_drink_pulse {
            Some(last) => now
                .checked_sub(last)
                .is_some_and(|gap| gap >= self.min_interval),
            None => true,
        };
        if open {
            self.last_drink_pulse = Some(now);
        }
        open
    }

    pub fn request_for(&mut self, event: &GlassEvent, now: Duration) -> Option<HapticRequest> {
        match event {
            GlassEvent::DrinkStarted => self
                .try_drink_pulse(now)
                .then_some(HapticRequest::Impact(ImpactStrength::Light)),
            GlassEvent::Empty => Some(HapticRequest::Notification(NotificationKind::Success)),
            // Refill is a direct tap and is always acknowledged.
            GlassEvent::Refilled { .. } => Some(HapticRequest::Impact(ImpactStrength::Medium)),
            GlassEvent::Drink { .. } => None,
        }
    }
}
