use glass_core::{HapticRequest, ImpactStrength, NotificationKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HapticError {
    #[error("haptics not supported on this platform")]
    Unsupported,
    #[error("haptic device error: {0}")]
    Device(String),
}

/// Fire-and-forget vibration feedback.
pub trait HapticTrigger {
    fn impact_pulse(&mut self, strength: ImpactStrength) -> Result<(), HapticError>;
    fn notification_pulse(&mut self, kind: NotificationKind) -> Result<(), HapticError>;
}

/// Platforms without a vibration motor.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHaptics;

impl HapticTrigger for NoopHaptics {
    fn impact_pulse(&mut self, _strength: ImpactStrength) -> Result<(), HapticError> {
        Ok(())
    }

    fn notification_pulse(&mut self, _kind: NotificationKind) -> Result<(), HapticError> {
        Ok(())
    }
}

/// Play a request, swallowing failures. Haptics are never worth a retry.
pub fn play<H: HapticTrigger + ?Sized>(haptics: &mut H, request: HapticRequest) {
    let result = match request {
        HapticRequest::Impact(strength) => haptics.impact_pulse(strength),
        HapticRequest::Notification(kind) => haptics.notification_pulse(kind),
    };
    if let Err(e) = result {
        log::debug!("haptic {request:?} dropped: {e}");
    }
}
