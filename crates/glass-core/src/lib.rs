//! Platform-free core of the tilt-to-drink glass.
//!
//! Turns accelerometer samples into smoothed tilt, a depleting fill level
//! with drink/empty events, and per-frame bubble and foam placement. Nothing
//! here touches a device, a window or a clock; callers pass time in.

pub mod bubbles;
pub mod config;
pub mod constants;
pub mod drink;
pub mod engine;
pub mod error;
pub mod event;
pub mod foam;
pub mod frame;
pub mod glass;
pub mod haptics;
pub mod interp;
pub mod level;
pub mod spring;
pub mod tilt;

pub use bubbles::*;
pub use config::*;
pub use constants::*;
pub use drink::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use foam::*;
pub use frame::*;
pub use glass::*;
pub use haptics::*;
pub use interp::*;
pub use level::*;
pub use spring::*;
pub use tilt::*;
