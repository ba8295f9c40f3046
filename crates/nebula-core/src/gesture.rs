//! Boundary to the hand-tracking pipeline.
//!
//! The core never drives a camera. A frontend hands over an owned
//! [`HandDetector`] and the [`GestureSampler`] turns each detection into an
//! openness value, substituting the neutral value whenever the detector has
//! nothing to say. The detector is released exactly once, either through
//! [`GestureSampler::shutdown`] or when the sampler is dropped.

use crate::constants::{GESTURE_NEUTRAL_OPENNESS, OPENNESS_MAX_DISTANCE, OPENNESS_MIN_DISTANCE};
use anyhow::Context;
use glam::Vec3;

pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
/// Thumb, index, middle, ring and pinky tips.
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];

/// The 21 keypoints of one detected hand in image coordinates (pixels; z is
/// relative depth and ignored by the openness metric).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandLandmarks(pub [Vec3; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn wrist(&self) -> Vec3 {
        self.0[WRIST]
    }
}

/// Mean 2D wrist-to-fingertip distance mapped onto \[0, 1\].
pub fn hand_openness(landmarks: &HandLandmarks) -> f32 {
    let wrist = landmarks.wrist().truncate();
    let total: f32 = FINGERTIPS
        .iter()
        .map(|&i| landmarks.0[i].truncate().distance(wrist))
        .sum();
    let mean = total / FINGERTIPS.len() as f32;
    let openness = (mean - OPENNESS_MIN_DISTANCE) / (OPENNESS_MAX_DISTANCE - OPENNESS_MIN_DISTANCE);
    if openness.is_finite() {
        openness.clamp(0.0, 1.0)
    } else {
        GESTURE_NEUTRAL_OPENNESS
    }
}

/// A camera plus hand-landmark model, owned by whoever samples it.
pub trait HandDetector {
    /// Run one detection. `Ok(None)` means no hand is in view.
    fn detect(&mut self) -> anyhow::Result<Option<HandLandmarks>>;

    /// Stop the camera and drop the model. Called exactly once.
    fn release(&mut self) {}
}

impl<D: HandDetector + ?Sized> HandDetector for Box<D> {
    fn detect(&mut self) -> anyhow::Result<Option<HandLandmarks>> {
        (**self).detect()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

pub type BoxedDetector = Box<dyn HandDetector>;

pub struct GestureSampler<D: HandDetector> {
    detector: Option<D>,
    consecutive_failures: u32,
}

impl<D: HandDetector> GestureSampler<D> {
    pub fn new(detector: D) -> Self {
        Self {
            detector: Some(detector),
            consecutive_failures: 0,
        }
    }

    /// Acquire a detector through `open`. Nothing is held if it fails.
    pub fn open(open: impl FnOnce() -> anyhow::Result<D>) -> anyhow::Result<Self> {
        let detector = open().context("failed to start hand detector")?;
        log::info!("[gesture] hand detector started");
        Ok(Self::new(detector))
    }

    /// Produce one openness sample; never fails.
    pub fn sample(&mut self) -> f32 {
        let Some(detector) = self.detector.as_mut() else {
            return GESTURE_NEUTRAL_OPENNESS;
        };
        match detector.detect() {
            Ok(Some(landmarks)) => {
                self.consecutive_failures = 0;
                hand_openness(&landmarks)
            }
            Ok(None) => {
                self.consecutive_failures = 0;
                GESTURE_NEUTRAL_OPENNESS
            }
            Err(e) => {
                if self.consecutive_failures == 0 {
                    log::warn!("[gesture] detection failed: {e:#}");
                } else {
                    log::debug!("[gesture] detection failed again: {e:#}");
                }
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                GESTURE_NEUTRAL_OPENNESS
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.detector.is_some()
    }

    /// Release the detector now. Later samples are neutral.
    pub fn shutdown(&mut self) {
        if let Some(mut detector) = self.detector.take() {
            detector.release();
            log::info!("[gesture] hand detector released");
        }
    }
}

impl<D: HandDetector> Drop for GestureSampler<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
