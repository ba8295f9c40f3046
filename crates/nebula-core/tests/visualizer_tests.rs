// End-to-end tests for a visualization session: UI edits, camera toggling,
// gesture sampling on the scheduler and teardown.

use nebula_core::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn session(capacity: usize, ui: VisualConfig) -> Visualizer {
    let engine = ParticleEngine::with_seed(capacity, 11).expect("capacity");
    Visualizer::with_engine(engine, ui).expect("session")
}

/// Landmarks with all five fingertips `spread` pixels from the wrist.
fn landmarks_with_spread(spread: f32) -> HandLandmarks {
    let mut points = [glam::Vec3::ZERO; LANDMARK_COUNT];
    points[WRIST] = glam::Vec3::new(320.0, 400.0, 0.0);
    for &tip in &FINGERTIPS {
        points[tip] = points[WRIST] + glam::Vec3::new(0.0, -spread, 0.0);
    }
    HandLandmarks(points)
}

/// Test detector reporting a fixed hand, counting detections and releases.
struct FixedHand {
    spread: Option<f32>,
    fail: bool,
    detections: Rc<Cell<u32>>,
    releases: Rc<Cell<u32>>,
}

impl FixedHand {
    fn new(spread: Option<f32>) -> (Self, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let detections = Rc::new(Cell::new(0));
        let releases = Rc::new(Cell::new(0));
        (
            Self {
                spread,
                fail: false,
                detections: detections.clone(),
                releases: releases.clone(),
            },
            detections,
            releases,
        )
    }
}

impl HandDetector for FixedHand {
    fn detect(&mut self) -> anyhow::Result<Option<HandLandmarks>> {
        self.detections.set(self.detections.get() + 1);
        if self.fail {
            anyhow::bail!("camera unplugged");
        }
        Ok(self.spread.map(landmarks_with_spread))
    }

    fn release(&mut self) {
        self.releases.set(self.releases.get() + 1);
    }
}

#[test]
fn session_applies_initial_config() {
    let ui = VisualConfig::default()
        .with_density(0.5)
        .with_color(Color::rgb(1, 2, 3))
        .with_shape(Shape::Heart);
    let vis = session(MAX_PARTICLES, ui);
    assert_eq!(vis.engine().state(), EngineState::Ready);
    assert_eq!(vis.engine().shape(), Some(Shape::Heart));
    assert_eq!(vis.frame().visible_count, 25_000);
    assert_eq!(vis.frame().color, Color::rgb(1, 2, 3));
}

#[test]
fn ui_edits_only_run_changed_effects() {
    let mut vis = session(1_000, VisualConfig::default());
    let target_before = vis.engine().target().to_vec();
    let next = vis.ui_config().with_color(Color::WHITE).with_density(0.2);
    vis.set_ui_config(next).unwrap();
    // Shape unchanged, so targets are not regenerated.
    assert_eq!(vis.engine().target(), target_before.as_slice());
    assert_eq!(vis.frame().color, Color::WHITE);
    assert_eq!(vis.frame().visible_count, 200);

    vis.set_ui_config(next.with_shape(Shape::Heart)).unwrap();
    assert_ne!(vis.engine().target(), target_before.as_slice());
    assert_eq!(vis.engine().shape(), Some(Shape::Heart));
}

#[test]
fn tick_steps_engine_once_per_frame() {
    let mut vis = session(500, VisualConfig::default());
    for _ in 0..3 {
        vis.tick(FRAME);
    }
    assert_eq!(vis.engine().state(), EngineState::Animating);
    assert_eq!(vis.scheduler().frames(), 3);
    let rotation = vis.frame().rotation.group;
    assert!((rotation - 3.0 * GROUP_ROTATION_PER_FRAME).abs() < 1e-6);
}

#[test]
fn pushed_gesture_overrides_slider_when_camera_on() {
    let mut vis = session(100, VisualConfig::default().with_diffusion(0.1));
    vis.set_camera_enabled(true).unwrap();
    for _ in 0..50 {
        vis.push_gesture_sample(0.9).unwrap();
    }
    assert!((vis.effective_config().diffusion - 0.9).abs() < 1e-3);
    vis.set_camera_enabled(false).unwrap();
    assert_eq!(vis.effective_config().diffusion, 0.1);
}

#[test]
fn attached_detector_is_sampled_on_gesture_timer() {
    let mut vis = session(100, VisualConfig::default().with_diffusion(0.0));
    // Fingertips at the max distance: fully open hand.
    let (hand, detections, _) = FixedHand::new(Some(OPENNESS_MAX_DISTANCE));
    vis.attach_gesture_source(hand);
    vis.set_camera_enabled(true).unwrap();

    // 60 frames of 16 ms is 960 ms: nine 100 ms samples.
    for _ in 0..60 {
        vis.tick(FRAME);
    }
    assert_eq!(detections.get(), 9);
    let expected = 1.0 - 0.5 * GESTURE_SMOOTHING_RETAIN.powi(9);
    assert!((vis.gesture().smoothed_openness - expected).abs() < 1e-4);
    assert!((vis.effective_config().diffusion - expected).abs() < 1e-4);
}

#[test]
fn detector_is_idle_while_camera_off() {
    let mut vis = session(100, VisualConfig::default());
    let (hand, detections, _) = FixedHand::new(Some(200.0));
    vis.attach_gesture_source(hand);
    for _ in 0..30 {
        vis.tick(FRAME);
    }
    assert_eq!(detections.get(), 0);
    assert_eq!(vis.gesture().smoothed_openness, GESTURE_NEUTRAL_OPENNESS);
}

#[test]
fn missing_hand_and_failures_emit_neutral_samples() {
    let (mut hand, _, _) = FixedHand::new(None);
    let mut sampler = GestureSampler::new(FixedHand::new(None).0);
    assert_eq!(sampler.sample(), GESTURE_NEUTRAL_OPENNESS);
    hand.fail = true;
    let mut failing = GestureSampler::new(hand);
    assert_eq!(failing.sample(), GESTURE_NEUTRAL_OPENNESS);
    assert_eq!(failing.sample(), GESTURE_NEUTRAL_OPENNESS);
}

#[test]
fn sampler_releases_detector_exactly_once() {
    let (hand, _, releases) = FixedHand::new(Some(100.0));
    let mut sampler = GestureSampler::new(hand);
    sampler.shutdown();
    sampler.shutdown();
    assert_eq!(releases.get(), 1);
    assert!(!sampler.is_active());
    assert_eq!(sampler.sample(), GESTURE_NEUTRAL_OPENNESS);
    drop(sampler);
    assert_eq!(releases.get(), 1);

    let (hand, _, releases) = FixedHand::new(Some(100.0));
    {
        let _sampler = GestureSampler::new(hand);
    }
    assert_eq!(releases.get(), 1);
}

#[test]
fn failed_open_holds_nothing() {
    let result = GestureSampler::<FixedHand>::open(|| anyhow::bail!("no camera permission"));
    let err = result.err().expect("open should fail");
    assert!(format!("{err:#}").contains("no camera permission"));
}

#[test]
fn replacing_detector_releases_previous() {
    let mut vis = session(100, VisualConfig::default());
    let (first, _, first_releases) = FixedHand::new(None);
    let (second, _, second_releases) = FixedHand::new(None);
    vis.attach_gesture_source(first);
    vis.attach_gesture_source(second);
    assert_eq!(first_releases.get(), 1);
    assert_eq!(second_releases.get(), 0);
    vis.detach_gesture_source();
    assert_eq!(second_releases.get(), 1);
    assert!(!vis.has_gesture_source());
}

#[test]
fn dispose_tears_everything_down() {
    let mut vis = session(300, VisualConfig::default());
    let (hand, detections, releases) = FixedHand::new(Some(150.0));
    vis.attach_gesture_source(hand);
    vis.set_camera_enabled(true).unwrap();
    vis.tick(Duration::from_millis(100));
    assert_eq!(detections.get(), 1);

    vis.dispose();
    assert_eq!(releases.get(), 1);
    assert!(vis.scheduler().is_cancelled());
    assert_eq!(vis.engine().state(), EngineState::Disposed);

    let frame = vis.tick(Duration::from_secs(1));
    assert!(frame.positions.is_empty());
    assert_eq!(detections.get(), 1);
    assert_eq!(
        vis.set_ui_config(VisualConfig::default()),
        Err(ParticleError::Disposed)
    );
}

#[test]
fn disposed_session_ignores_input() {
    let ui = VisualConfig::default().with_diffusion(0.3);
    let mut vis = session(100, ui);
    vis.dispose();

    let edit = ui.with_shape(Shape::Heart).with_diffusion(0.9);
    assert_eq!(vis.set_ui_config(edit), Err(ParticleError::Disposed));
    assert_eq!(vis.set_camera_enabled(true), Err(ParticleError::Disposed));
    assert_eq!(vis.push_gesture_sample(1.0), Err(ParticleError::Disposed));

    assert_eq!(*vis.ui_config(), ui);
    assert_eq!(*vis.gesture(), GestureState::default());
    assert_eq!(vis.effective_config().diffusion, 0.3);
}

#[test]
fn custom_scheduler_sets_gesture_cadence() {
    let mut vis = session(100, VisualConfig::default())
        .with_scheduler(Scheduler::new(Duration::from_millis(32)));
    let (hand, detections, _) = FixedHand::new(Some(OPENNESS_MAX_DISTANCE));
    vis.attach_gesture_source(hand);
    vis.set_camera_enabled(true).unwrap();

    // 10 frames of 16 ms: one sample every other frame.
    for _ in 0..10 {
        vis.tick(FRAME);
    }
    assert_eq!(detections.get(), 5);
    assert_eq!(vis.scheduler().frames(), 10);
}

#[test]
fn openness_metric_follows_fingertip_spread() {
    assert_eq!(hand_openness(&landmarks_with_spread(0.0)), 0.0);
    assert_eq!(hand_openness(&landmarks_with_spread(OPENNESS_MIN_DISTANCE)), 0.0);
    assert!((hand_openness(&landmarks_with_spread(150.0)) - 0.5).abs() < 1e-5);
    assert_eq!(hand_openness(&landmarks_with_spread(OPENNESS_MAX_DISTANCE)), 1.0);
    assert_eq!(hand_openness(&landmarks_with_spread(900.0)), 1.0);
}

#[test]
fn openness_ignores_depth() {
    let mut hand = landmarks_with_spread(150.0);
    for &tip in &FINGERTIPS {
        hand.0[tip].z = 500.0;
    }
    assert!((hand_openness(&hand) - 0.5).abs() < 1e-5);
}

#[test]
fn scheduler_caps_catch_up_after_stall() {
    let mut scheduler = Scheduler::new(Duration::from_millis(100));
    let tick = scheduler.poll(Duration::from_secs(5));
    assert!(tick.step);
    assert_eq!(tick.gesture_samples, 3);
    assert_eq!(scheduler.poll(Duration::from_millis(50)).gesture_samples, 0);
    scheduler.cancel();
    assert_eq!(scheduler.poll(Duration::from_secs(1)), Tick::default());
}

#[test]
fn fixed_interval_accumulates_partial_periods() {
    let mut interval = FixedInterval::new(Duration::from_millis(100));
    assert_eq!(interval.advance(Duration::from_millis(60)), 0);
    assert_eq!(interval.advance(Duration::from_millis(60)), 1);
    assert_eq!(interval.advance(Duration::from_millis(80)), 1);
    assert_eq!(interval.advance(Duration::from_millis(10)), 0);
}
