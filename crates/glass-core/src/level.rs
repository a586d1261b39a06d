//! Fill level bookkeeping.
//!
//! `BeerState` is the committed, per-sample truth: it only changes on the
//! sample clock (or on refill). `LevelTween` is the displayed level, which
//! eases towards the committed value on the animation clock so depletion
//! never shows up as a step.

use crate::config::DrinkParams;
use crate::constants::{LEVEL_EMPTY, LEVEL_FULL};
use crate::drink::{DrinkDetector, DrinkEdge, DrinkPhase};
use crate::event::{GlassEvent, GlassEvents};
use crate::interp::{clamp_total, ease_in_out_quad, lerp};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeerState {
    pub level: f32,
    pub is_drinking: bool,
}

impl Default for BeerState {
    fn default() -> Self {
        Self::full()
    }
}

/// Outcome of applying one sample to a `BeerState`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: BeerState,
    pub edge: DrinkEdge,
    pub events: GlassEvents,
}

impl BeerState {
    pub const fn full() -> Self {
        Self {
            level: LEVEL_FULL,
            is_drinking: false,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.level <= LEVEL_EMPTY
    }

    #[inline]
    pub fn phase(&self) -> DrinkPhase {
        if self.is_drinking {
            DrinkPhase::Drinking
        } else {
            DrinkPhase::Idle
        }
    }

    /// Pure sample transition.
    ///
    /// While drinking the level drops by `params.drink_rate(y)`, floored at 0.
    /// The sample that empties the glass emits `Empty` and leaves the state
    /// not drinking, so `is_drinking` never coexists with `level == 0`.
    pub fn apply(self, y: f32, params: &DrinkParams) -> Transition {
        let mut detector = DrinkDetector::with_phase(params.threshold, self.phase());
        let edge = detector.observe(y, self.level);
        let mut events = GlassEvents::new();

        if !edge.is_drinking() {
            return Transition {
                state: Self {
                    level: self.level,
                    is_drinking: false,
                },
                edge,
                events,
            };
        }

        if edge == DrinkEdge::Started {
            events.push(GlassEvent::DrinkStarted);
        }
        let level = clamp_total(self.level - params.drink_rate(y), LEVEL_EMPTY, LEVEL_FULL);
        events.push(GlassEvent::Drink { level });
        let emptied = level <= LEVEL_EMPTY;
        if emptied {
            events.push(GlassEvent::Empty);
        }
        Transition {
            state: Self {
                level,
                is_drinking: !emptied,
            },
            edge,
            events,
        }
    }
}

/// Displayed level easing towards the committed level.
#[derive(Clone, Debug)]
pub struct LevelTween {
    from: f32,
    to: f32,
    elapsed_ms: f32,
    duration_ms: f32,
}

impl LevelTween {
    pub fn new(level: f32, duration_ms: f32) -> Self {
        Self {
            from: level,
            to: level,
            elapsed_ms: duration_ms,
            duration_ms,
        }
    }

    /// Start a new ease from wherever the display currently is.
    pub fn retarget(&mut self, to: f32) {
        self.from = self.displayed();
        self.to = to;
        self.elapsed_ms = 0.0;
    }

    pub fn snap(&mut self, level: f32) {
        self.from = level;
        self.to = level;
        self.elapsed_ms = self.duration_ms;
    }

    pub fn advance(&mut self, dt_ms: f32) {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        }
    }

    pub fn displayed(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = ease_in_out_quad(self.elapsed_ms / self.duration_ms);
        lerp(self.from, self.to, t)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

/// Owns the session's `BeerState` and its displayed-level tween.
#[derive(Clone, Debug)]
pub struct LevelIntegrator {
    params: DrinkParams,
    state: BeerState,
    tween: LevelTween,
}

impl LevelIntegrator {
    pub fn new(params: DrinkParams) -> Self {
        Self {
            params,
            state: BeerState::full(),
            tween: LevelTween::new(LEVEL_FULL, params.tween_ms),
        }
    }

    #[inline]
    pub fn state(&self) -> BeerState {
        self.state
    }

    #[inline]
    pub fn displayed_level(&self) -> f32 {
        self.tween.displayed()
    }

    /// Sample clock: classify `y`, deplete and collect events.
    pub fn ingest(&mut self, y: f32) -> Transition {
        let transition = self.state.apply(y, &self.params);
        if transition.state.level != self.state.level {
            self.tween.retarget(transition.state.level);
        }
        self.state = transition.state;
        transition
    }

    /// Sensor lost: stop any drinking episode without touching the level.
    pub fn interrupt(&mut self) {
        self.state.is_drinking = false;
    }

    /// Animation clock.
    pub fn advance(&mut self, dt_sec: f32) {
        self.tween.advance(dt_sec * 1000.0);
    }

    pub fn refill(&mut self) {
        self.state = BeerState::full();
        self.tween.snap(LEVEL_FULL);
    }
}
