//! Stand-in for a camera + hand model: the mouse cursor plays the hand.
//!
//! The cursor is the wrist and the fingertips fan out above it. Their
//! distance grows as the cursor moves toward the top of the window, so
//! "raising" the hand opens it. A cursor outside the window means no hand.

use nebula_core::{
    HandDetector, HandLandmarks, FINGERTIPS, LANDMARK_COUNT, OPENNESS_MAX_DISTANCE,
    OPENNESS_MIN_DISTANCE, WRIST,
};
use glam::Vec3;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default)]
pub struct CursorState {
    pub position: Option<[f32; 2]>,
    pub window_height: f32,
}

pub type SharedCursor = Rc<Cell<CursorState>>;

pub struct CursorHand {
    cursor: SharedCursor,
}

impl CursorHand {
    pub fn new(cursor: SharedCursor) -> Self {
        log::info!("[detector] simulated camera started (cursor height = hand openness)");
        Self { cursor }
    }
}

/// Fingertip spread for a cursor at `y` in a window `height` pixels tall.
pub fn spread_for_height(y: f32, height: f32) -> f32 {
    let raised = if height > 0.0 {
        (1.0 - y / height).clamp(0.0, 1.0)
    } else {
        0.5
    };
    OPENNESS_MIN_DISTANCE + raised * (OPENNESS_MAX_DISTANCE - OPENNESS_MIN_DISTANCE)
}

/// Landmarks for a hand whose wrist is at `wrist` with every fingertip
/// `spread` pixels away.
pub fn fanned_hand(wrist: [f32; 2], spread: f32) -> HandLandmarks {
    let wrist = Vec3::new(wrist[0], wrist[1], 0.0);
    let mut points = [wrist; LANDMARK_COUNT];
    points[WRIST] = wrist;
    for (i, &tip) in FINGERTIPS.iter().enumerate() {
        // Fan from 30 to 150 degrees, pointing up (screen y grows down).
        let angle = (30.0 + 30.0 * i as f32).to_radians();
        points[tip] = wrist + Vec3::new(angle.cos(), -angle.sin(), 0.0) * spread;
    }
    HandLandmarks(points)
}

impl HandDetector for CursorHand {
    fn detect(&mut self) -> anyhow::Result<Option<HandLandmarks>> {
        let state = self.cursor.get();
        Ok(state
            .position
            .map(|[x, y]| fanned_hand([x, y], spread_for_height(y, state.window_height))))
    }

    fn release(&mut self) {
        log::info!("[detector] simulated camera stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_core::hand_openness;

    #[test]
    fn top_of_window_is_open_hand() {
        let hand = fanned_hand([100.0, 0.0], spread_for_height(0.0, 600.0));
        assert!((hand_openness(&hand) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn bottom_of_window_is_closed_hand() {
        let hand = fanned_hand([100.0, 600.0], spread_for_height(600.0, 600.0));
        assert!(hand_openness(&hand) < 1e-4);
    }

    #[test]
    fn cursor_outside_window_means_no_hand() {
        let cursor = SharedCursor::default();
        let mut detector = CursorHand::new(cursor.clone());
        assert!(detector.detect().unwrap().is_none());
        cursor.set(CursorState {
            position: Some([10.0, 300.0]),
            window_height: 600.0,
        });
        let openness = hand_openness(&detector.detect().unwrap().unwrap());
        assert!((openness - 0.5).abs() < 1e-4);
    }
}
