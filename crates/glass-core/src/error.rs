use thiserror::Error;

/// Rejected `GlassParams`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("drink threshold {0} must lie strictly between 0 and 1")]
    Threshold(f32),
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{0} count must be at least 1")]
    EmptySet(&'static str),
    #[error("{0} breakpoints must be finite and strictly increasing")]
    Breakpoints(&'static str),
    #[error("sample interval must be non-zero")]
    SampleInterval,
}

/// A sensor reading the core refused to ingest.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SampleError {
    #[error("non-finite sample ({x}, {y}, {z})")]
    NonFinite { x: f32, y: f32, z: f32 },
    #[error("sample ignored: sensor marked unavailable")]
    SensorAbsent,
}
