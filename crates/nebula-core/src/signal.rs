//! Merging of UI parameters with the gesture signal.
//!
//! The UI and the gesture detector update on unrelated cadences. Both only
//! ever replace their own input here, and [`SignalCombiner::effective`]
//! derives the merged snapshot on demand, so a reader never observes a
//! half-applied update.

use crate::config::{clamp_unit, EffectiveConfig, VisualConfig};
use crate::constants::{GESTURE_NEUTRAL_OPENNESS, GESTURE_SMOOTHING_RETAIN};

/// Camera toggle plus the low-pass filtered hand openness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    pub enabled: bool,
    pub smoothed_openness: f32,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            enabled: false,
            smoothed_openness: GESTURE_NEUTRAL_OPENNESS,
        }
    }
}

impl GestureState {
    /// Fold one raw detector sample into the moving average.
    ///
    /// Raw samples are clamped before smoothing; non-finite samples count as
    /// the neutral openness so the filter keeps moving.
    pub fn push_sample(&mut self, raw_openness: f32) {
        self.smoothed_openness = smooth_openness(self.smoothed_openness, raw_openness);
    }
}

/// One step of the first-order low-pass filter applied to gesture samples.
#[inline]
pub fn smooth_openness(smoothed: f32, raw_openness: f32) -> f32 {
    let raw = if raw_openness.is_finite() {
        clamp_unit(raw_openness)
    } else {
        GESTURE_NEUTRAL_OPENNESS
    };
    smoothed * GESTURE_SMOOTHING_RETAIN + raw * (1.0 - GESTURE_SMOOTHING_RETAIN)
}

/// Pure merge rule: the camera, when enabled, owns the diffusion slot.
#[inline]
pub fn combine(ui: &VisualConfig, gesture: &GestureState) -> EffectiveConfig {
    let diffusion = if gesture.enabled {
        gesture.smoothed_openness
    } else {
        ui.diffusion
    };
    EffectiveConfig::from_visual(*ui, diffusion)
}

/// Holds the latest value of each input source.
#[derive(Clone, Debug, Default)]
pub struct SignalCombiner {
    ui: VisualConfig,
    gesture: GestureState,
}

impl SignalCombiner {
    pub fn new(ui: VisualConfig) -> Self {
        Self {
            ui,
            gesture: GestureState::default(),
        }
    }

    pub fn ui_config(&self) -> &VisualConfig {
        &self.ui
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn set_ui_config(&mut self, ui: VisualConfig) {
        self.ui = ui;
    }

    /// Toggling leaves the smoothed value alone so re-enabling resumes
    /// from where the filter was.
    pub fn set_camera_enabled(&mut self, enabled: bool) {
        self.gesture.enabled = enabled;
    }

    pub fn camera_enabled(&self) -> bool {
        self.gesture.enabled
    }

    pub fn push_gesture_sample(&mut self, raw_openness: f32) {
        self.gesture.push_sample(raw_openness);
    }

    pub fn effective(&self) -> EffectiveConfig {
        combine(&self.ui, &self.gesture)
    }
}
