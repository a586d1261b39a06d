use smallvec::SmallVec;

/// Notifications raised by the engine, in emission order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlassEvent {
    /// First sample of a drinking episode.
    DrinkStarted,
    /// Every sample while drinking, carrying the level after depletion.
    Drink { level: f32 },
    /// The level reached 0 on this sample.
    Empty,
    /// A fresh glass instance replaced the previous one.
    Refilled { generation: u64 },
}

/// Per-call event buffer; a single sample raises at most three events.
pub type GlassEvents = SmallVec<[GlassEvent; 4]>;
