// Host-side tests for drink detection, level depletion and refill.

use std::time::Duration;

use glass_core::*;
use rand::prelude::*;

const TICK: Duration = Duration::from_millis(50);

fn engine() -> GlassEngine {
    match GlassEngine::new(GlassParams::default(), 42) {
        Ok(e) => e,
        Err(e) => panic!("default params rejected: {e}"),
    }
}

fn ingest(engine: &mut GlassEngine, y: f32, at: Duration) -> Step {
    engine
        .ingest(TiltSample::new(0.0, y, -0.8), at)
        .unwrap_or_else(|e| panic!("sample rejected: {e}"))
}

fn drain(engine: &mut GlassEngine) -> Duration {
    let mut at = Duration::ZERO;
    for _ in 0..1000 {
        let step = ingest(engine, 0.95, at);
        at += TICK;
        if step.events.contains(&GlassEvent::Empty) {
            return at;
        }
    }
    panic!("glass never emptied");
}

#[test]
fn detector_reports_edges_once_per_episode() {
    let mut d = DrinkDetector::new(DRINK_THRESHOLD);
    assert_eq!(d.observe(0.2, 100.0), DrinkEdge::Idle);
    assert_eq!(d.observe(0.6, 100.0), DrinkEdge::Started);
    assert_eq!(d.observe(0.7, 99.0), DrinkEdge::Sustained);
    assert_eq!(d.observe(0.6, 98.0), DrinkEdge::Sustained);
    assert_eq!(d.phase(), DrinkPhase::Drinking);
    assert_eq!(d.observe(0.45, 98.0), DrinkEdge::Stopped);
    assert_eq!(d.phase(), DrinkPhase::Idle);
    assert_eq!(d.observe(0.6, 98.0), DrinkEdge::Started);
}

#[test]
fn detector_threshold_is_exclusive_and_needs_liquid() {
    let mut d = DrinkDetector::new(DRINK_THRESHOLD);
    assert_eq!(d.threshold(), DRINK_THRESHOLD);
    assert_eq!(d.observe(DRINK_THRESHOLD, 100.0), DrinkEdge::Idle);
    assert_eq!(d.observe(0.9, 0.0), DrinkEdge::Idle);
    assert_eq!(d.observe(0.9, 50.0), DrinkEdge::Started);
    assert_eq!(d.observe(0.9, 0.0), DrinkEdge::Stopped);
    assert_eq!(d.observe(f32::NAN, 50.0), DrinkEdge::Idle);
}

#[test]
fn pure_transition_depletes_by_rate() {
    let params = DrinkParams::default();
    let t = BeerState::full().apply(0.95, &params);
    assert_eq!(t.edge, DrinkEdge::Started);
    assert!(t.state.is_drinking);
    assert!((t.state.level - 99.4).abs() < 1e-4);
    assert_eq!(t.events[0], GlassEvent::DrinkStarted);
    assert!(matches!(t.events[1], GlassEvent::Drink { level } if level == t.state.level));
    assert_eq!(t.events.len(), 2);
}

#[test]
fn pure_transition_never_depletes_while_idle() {
    let params = DrinkParams::default();
    let start = BeerState {
        level: 63.0,
        is_drinking: true,
    };
    for y in [0.45, 0.3, 0.0, -1.0, f32::NAN] {
        let t = start.apply(y, &params);
        assert_eq!(t.state.level, 63.0);
        assert!(!t.state.is_drinking);
        assert!(t.events.is_empty());
    }
}

#[test]
fn emptying_sample_emits_empty_and_stops_drinking() {
    let params = DrinkParams::default();
    let start = BeerState {
        level: 0.3,
        is_drinking: true,
    };
    let t = start.apply(0.95, &params);
    assert_eq!(t.state.level, 0.0);
    assert!(!t.state.is_drinking);
    assert_eq!(
        t.events.as_slice(),
        &[GlassEvent::Drink { level: 0.0 }, GlassEvent::Empty]
    );
}

#[test]
fn ten_samples_at_point_six_scenario() {
    let mut engine = engine();
    let mut levels = Vec::new();
    let mut pulses = 0;
    let mut drinks = 0;
    for i in 0..10 {
        let step = ingest(&mut engine, 0.6, TICK * i);
        if i == 0 {
            assert!(engine.state().is_drinking);
            assert_eq!(step.events[0], GlassEvent::DrinkStarted);
        }
        pulses += step
            .haptics
            .iter()
            .filter(|h| matches!(h, HapticRequest::Impact(_)))
            .count();
        drinks += step
            .events
            .iter()
            .filter(|e| matches!(e, GlassEvent::Drink { .. }))
            .count();
        levels.push(engine.state().level);
    }
    assert_eq!(pulses, 1);
    assert_eq!(drinks, 10);
    let mut prev = 100.0;
    for level in &levels {
        assert!(*level < prev, "level did not strictly decrease: {levels:?}");
        prev = *level;
    }
    let depleted = 100.0 - prev;
    assert!(depleted > 0.0);
    assert!(depleted <= 10.0 * (0.6 - 0.45) * 1.2 + 1e-4, "depleted {depleted}");
}

#[test]
fn empty_glass_ignores_tipping() {
    let mut engine = engine();
    let at = drain(&mut engine);
    assert_eq!(engine.state().level, 0.0);
    assert_eq!(engine.phase(), GlassPhase::Empty);

    let step = ingest(&mut engine, 0.9, at + Duration::from_secs(1));
    assert!(step.is_empty());
    assert!(!engine.state().is_drinking);
}

#[test]
fn empty_event_fires_exactly_once_per_episode() {
    let mut engine = engine();
    let mut at = Duration::ZERO;
    let mut empties = 0;
    for i in 0..600 {
        // Alternate drinking bursts and pauses until well past empty
        let y = if (i / 20) % 2 == 0 { 0.95 } else { 0.1 };
        let step = ingest(&mut engine, y, at);
        empties += step
            .events
            .iter()
            .filter(|e| **e == GlassEvent::Empty)
            .count();
        at += TICK;
    }
    assert_eq!(empties, 1);
    assert_eq!(engine.state().level, 0.0);
}

// Property: any run of above-threshold samples only ever lowers the level
// and keeps it inside [0, 100].
#[test]
fn level_is_non_increasing_and_bounded_under_tipping() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut engine = engine();
        let mut prev = engine.state().level;
        for i in 0..400 {
            let y = rng.gen_range(0.46..1.5);
            let _ = ingest(&mut engine, y, TICK * i);
            let level = engine.state().level;
            assert!(level <= prev);
            assert!((0.0..=100.0).contains(&level));
            if level == 0.0 {
                assert!(!engine.state().is_drinking);
            }
            prev = level;
        }
    }
}

#[test]
fn displayed_level_eases_between_samples() {
    let mut engine = engine();
    let _ = ingest(&mut engine, 0.95, Duration::ZERO);
    let committed = engine.state().level;
    assert!((committed - 99.4).abs() < 1e-4);
    // The display has not moved yet
    assert_eq!(engine.displayed_level(), 100.0);

    engine.advance(Duration::from_millis(25));
    let mid = engine.displayed_level();
    assert!(mid < 100.0 && mid > committed, "mid-tween level {mid}");
    assert!((mid - 99.7).abs() < 1e-3);

    engine.advance(Duration::from_millis(25));
    assert!((engine.displayed_level() - committed).abs() < 1e-4);
    engine.advance(Duration::from_millis(500));
    assert!((engine.displayed_level() - committed).abs() < 1e-4);
}

#[test]
fn level_tween_finishes_after_its_duration() {
    let mut tween = LevelTween::new(100.0, LEVEL_TWEEN_MS);
    assert!(tween.is_finished());
    tween.retarget(90.0);
    assert!(!tween.is_finished());
    assert_eq!(tween.displayed(), 100.0);
    tween.advance(LEVEL_TWEEN_MS / 2.0);
    assert!(!tween.is_finished());
    tween.advance(f32::NAN);
    tween.advance(LEVEL_TWEEN_MS);
    assert!(tween.is_finished());
    assert!((tween.displayed() - 90.0).abs() < 1e-4);
    tween.snap(100.0);
    assert!(tween.is_finished());
    assert_eq!(tween.displayed(), 100.0);
}

#[test]
fn refill_resets_state_and_pours_new_instance() {
    let mut engine = engine();
    let first = engine.instance().clone();
    let _ = drain(&mut engine);

    let step = engine.refill();
    assert_eq!(
        engine.state(),
        BeerState {
            level: 100.0,
            is_drinking: false
        }
    );
    assert_eq!(engine.displayed_level(), 100.0);
    assert_eq!(engine.phase(), GlassPhase::Filled);
    assert_eq!(step.events.as_slice(), &[GlassEvent::Refilled { generation: 1 }]);
    assert_eq!(
        step.haptics.as_slice(),
        &[HapticRequest::Impact(ImpactStrength::Medium)]
    );
    assert_ne!(engine.generation(), first.generation);
    assert_ne!(engine.instance().seed, first.seed);
}

#[test]
fn refill_twice_is_state_idempotent_but_looks_different() {
    let mut engine = engine();
    let _ = ingest(&mut engine, 0.8, Duration::ZERO);

    let _ = engine.refill();
    let state_a = engine.state();
    let bubbles_a = engine.instance().bubbles.bubbles.clone();
    let gen_a = engine.generation();

    let _ = engine.refill();
    assert_eq!(engine.state(), state_a);
    assert_eq!(state_a, BeerState::full());
    assert!(engine.generation() > gen_a);
    assert_ne!(engine.instance().bubbles.bubbles, bubbles_a);
}

#[test]
fn drinking_after_refill_starts_a_new_episode() {
    let mut engine = engine();
    let _ = ingest(&mut engine, 0.8, Duration::ZERO);
    let _ = engine.refill();
    let step = ingest(&mut engine, 0.8, Duration::from_secs(1));
    assert_eq!(step.events[0], GlassEvent::DrinkStarted);
    assert_eq!(
        step.haptics.as_slice(),
        &[HapticRequest::Impact(ImpactStrength::Light)]
    );
}

#[test]
fn drink_edge_impacts_are_rate_limited() {
    let mut engine = engine();
    let mut fired_at = Vec::new();
    // Samples every 40 ms flipping across the threshold: an edge every 80 ms
    for i in 0..100u32 {
        let at = Duration::from_millis(40) * i;
        let y = if i % 2 == 0 { 0.6 } else { 0.2 };
        let step = ingest(&mut engine, y, at);
        if step.haptics.contains(&HapticRequest::Impact(ImpactStrength::Light)) {
            fired_at.push(at);
        }
    }
    assert!(fired_at.len() > 1);
    for pair in fired_at.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_millis(300), "{fired_at:?}");
    }
}

#[test]
fn haptic_gate_maps_events_to_pulses() {
    let mut gate = HapticGate::new(Duration::from_millis(300));
    let t0 = Duration::from_secs(5);
    assert_eq!(
        gate.request_for(&GlassEvent::DrinkStarted, t0),
        Some(HapticRequest::Impact(ImpactStrength::Light))
    );
    assert_eq!(
        gate.request_for(&GlassEvent::DrinkStarted, t0 + Duration::from_millis(299)),
        None
    );
    assert_eq!(
        gate.request_for(&GlassEvent::DrinkStarted, t0 + Duration::from_millis(300)),
        Some(HapticRequest::Impact(ImpactStrength::Light))
    );
    assert_eq!(gate.request_for(&GlassEvent::Drink { level: 50.0 }, t0), None);
    assert_eq!(
        gate.request_for(&GlassEvent::Empty, t0),
        Some(HapticRequest::Notification(NotificationKind::Success))
    );
    assert_eq!(
        gate.request_for(&GlassEvent::Refilled { generation: 3 }, t0),
        Some(HapticRequest::Impact(ImpactStrength::Medium))
    );
    // Stamps earlier than the last pulse stay inside its window
    assert!(!gate.try_drink_pulse(Duration::ZERO));
    assert!(!gate.try_drink_pulse(t0));
    assert!(gate.try_drink_pulse(t0 + Duration::from_millis(600)));
}

#[test]
fn out_of_order_stamps_do_not_bypass_rate_limit() {
    let mut engine = engine();
    let stamps = [1000, 1040, 990, 1050, 980, 1060, 970];
    let mut impacts = 0;
    for (i, ms) in stamps.into_iter().enumerate() {
        let y = if i % 2 == 0 { 0.8 } else { 0.2 };
        let step = ingest(&mut engine, y, Duration::from_millis(ms));
        impacts += step
            .haptics
            .iter()
            .filter(|r| **r == HapticRequest::Impact(ImpactStrength::Light))
            .count();
    }
    assert_eq!(impacts, 1);
}

#[test]
fn sensor_loss_stops_drinking_and_rejects_samples() {
    let mut engine = engine();
    let _ = ingest(&mut engine, 0.8, Duration::ZERO);
    assert!(engine.state().is_drinking);
    let level = engine.state().level;

    engine.set_sensor_available(false);
    assert!(!engine.state().is_drinking);
    assert_eq!(
        engine.ingest(TiltSample::new(0.0, 0.9, 0.0), TICK),
        Err(SampleError::SensorAbsent)
    );
    assert_eq!(engine.state().level, level);
}

#[test]
fn non_finite_sample_is_rejected_without_side_effects() {
    let mut engine = engine();
    let _ = ingest(&mut engine, 0.7, Duration::ZERO);
    let before = engine.state();
    let result = engine.ingest(TiltSample::new(0.1, f32::NAN, 0.0), TICK);
    assert!(matches!(result, Err(SampleError::NonFinite { .. })));
    assert_eq!(engine.state(), before);
}

#[test]
fn invalid_params_are_rejected() {
    let mut params = GlassParams::default();
    params.drink.threshold = 1.5;
    assert_eq!(params.validate(), Err(ConfigError::Threshold(1.5)));

    let mut params = GlassParams::default();
    params.bubbles.count = 0;
    assert_eq!(params.validate(), Err(ConfigError::EmptySet("bubble")));

    let mut params = GlassParams::default();
    params.foam.band_levels = [0.0, 50.0, 50.0];
    assert!(matches!(
        GlassEngine::new(params, 1),
        Err(ConfigError::Breakpoints(_))
    ));

    let mut params = GlassParams::default();
    params.sample_interval = Duration::ZERO;
    assert_eq!(params.validate(), Err(ConfigError::SampleInterval));

    assert_eq!(GlassParams::default().validate(), Ok(()));
    assert_eq!(
        GlassParams::for_variant(GlassVariant::Fullscreen).validate(),
        Ok(())
    );
}
