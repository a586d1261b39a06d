//! Tilt-to-drink glass session.
//!
//! Wires a platform accelerometer (`SensorSource`) and vibration motor
//! (`HapticTrigger`) to the `glass_core` engine and hands out per-frame
//! `GlassFrame` snapshots for whatever draws the glass.

pub mod haptics;
pub mod sensor;
pub mod session;

pub use glass_core as core;

pub use haptics::*;
pub use sensor::*;
pub use session::*;
