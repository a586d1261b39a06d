// Shared simulation tuning constants used by the session layer and drivers.

// Sensor sampling
pub const SAMPLE_INTERVAL_MS: u64 = 50; // nominal accelerometer delivery interval

// Drinking
pub const DRINK_THRESHOLD: f32 = 0.45; // y above this means the glass is tipped to the mouth
pub const DRINK_RATE_GAIN: f32 = 1.2; // level points drained per unit of y above threshold
pub const LEVEL_TWEEN_MS: f32 = 50.0; // displayed level eases to the committed level over this
pub const LEVEL_FULL: f32 = 100.0;
pub const LEVEL_EMPTY: f32 = 0.0;

// Tilt scaling (sensor axis -> degrees)
pub const TILT_X_GAIN: f32 = 15.0;
pub const SURFACE_TILT_GAIN: f32 = 12.0;
pub const TILT_Y_GAIN: f32 = 5.0;

// Spring parameters (unit mass)
pub const TILT_X_DAMPING: f32 = 8.0;
pub const TILT_X_STIFFNESS: f32 = 120.0;
pub const SURFACE_TILT_DAMPING: f32 = 6.0;
pub const SURFACE_TILT_STIFFNESS: f32 = 100.0;
pub const TILT_Y_DAMPING: f32 = 10.0;
pub const TILT_Y_STIFFNESS: f32 = 80.0;

// Spring integration limits
pub const SPRING_MAX_SUBSTEP_SEC: f32 = 1.0 / 240.0; // semi-implicit Euler substep
pub const MAX_FRAME_DT_SEC: f32 = 0.25; // longer frames (app paused, debugger) are clamped

// Haptics
pub const HAPTIC_MIN_INTERVAL_MS: u64 = 300; // drink-edge impacts never closer than this

// Bubbles
pub const BUBBLE_COUNT: usize = 20;
pub const BUBBLE_COUNT_FULLSCREEN: usize = 25;
pub const BUBBLE_SIZE_RANGE: (f32, f32) = (3.0, 9.0); // px
pub const BUBBLE_LEFT_RANGE: (f32, f32) = (10.0, 90.0); // percent of glass width
pub const BUBBLE_DELAY_RANGE_MS: (f32, f32) = (0.0, 4000.0);
pub const BUBBLE_RISE_RANGE_MS: (f32, f32) = (2000.0, 5000.0);
pub const BUBBLE_RISE_FRACTION: f32 = 0.6; // of glass height per cycle
pub const BUBBLE_RISE_FRACTION_FULLSCREEN: f32 = 0.7;
pub const BUBBLE_BASE_FRACTION: f32 = 0.05; // spawn height above the glass bottom
pub const BUBBLE_JITTER_PX: f32 = 3.0; // amplitude of sin(index) horizontal offset
pub const BUBBLE_PEAK_OPACITY: f32 = 0.7;
pub const BUBBLE_FADE_IN: f32 = 0.1; // cycle fractions: in, hold, out sum to 1
pub const BUBBLE_HOLD: f32 = 0.7;
pub const BUBBLE_FADE_OUT: f32 = 0.2;
pub const BUBBLE_FULL_VISIBILITY_LEVEL: f32 = 30.0; // bubbles dim below this level
pub const BUBBLE_MIN_VISIBLE_LEVEL: f32 = 1e-3; // at or below this the glass counts as empty

// Foam
pub const FOAM_BLOB_COUNT: usize = 8;
pub const FOAM_BLOB_COUNT_FULLSCREEN: usize = 10;
pub const FOAM_SIZE_RANGE: (f32, f32) = (25.0, 65.0); // px
pub const FOAM_LEFT_JITTER: (f32, f32) = (-10.0, 10.0); // percent around the even slot
pub const FOAM_Y_OFFSET_RANGE: (f32, f32) = (0.0, 15.0); // px
pub const FOAM_BLOB_ASPECT: f32 = 0.7; // height / width
pub const FOAM_BLOB_LIFT: f32 = 0.25; // blob top sits this fraction of its size above the band
pub const FOAM_TILT_SHIFT: f32 = 3.0; // percent of width per degree of tilt_x
pub const FOAM_BAND_ROTATION_GAIN: f32 = 0.5; // of surface tilt
pub const FOAM_SCALE_LEVELS: [f32; 3] = [0.0, 20.0, 100.0];
pub const FOAM_SCALE_VALUES: [f32; 3] = [0.0, 0.5, 1.0];
pub const FOAM_BAND_LEVELS: [f32; 3] = [0.0, 10.0, 100.0];
pub const FOAM_BAND_HEIGHTS: [f32; 3] = [0.0, 15.0, 40.0]; // px
pub const FOAM_BAND_HEIGHTS_FULLSCREEN: [f32; 3] = [0.0, 20.0, 50.0];

// Glass geometry
pub const GLASS_WIDTH_FRACTION: f32 = 0.7; // of viewport width
pub const GLASS_MAX_WIDTH: f32 = 280.0;
pub const GLASS_HEIGHT_FRACTION: f32 = 0.55; // of viewport height
pub const GLASS_MAX_HEIGHT: f32 = 480.0;
pub const GLASS_ROTATION_GAIN: f32 = -0.5; // glass body leans against tilt_x
pub const FILL_SCALE_X: f32 = 1.15; // fill overdraws the walls so a tilted surface has no gaps
