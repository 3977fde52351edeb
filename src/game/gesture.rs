//! Hold-and-lift peek: turns a vertical drag into a revealed/hidden flag.
//!
//! The flag is recomputed on every move and always drops to hidden when the
//! gesture ends or is cancelled. Nothing is ever revealed permanently.

use serde::{Deserialize, Serialize};

use crate::game::RevealConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureReading {
    /// Upward distance from the origin, clamped to `[0, max_lift]`.
    pub lift_pixels: f32,
    pub should_reveal: bool,
}

impl GestureReading {
    pub const HIDDEN: GestureReading = GestureReading {
        lift_pixels: 0.0,
        should_reveal: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealGesture {
    config: RevealConfig,
    active: bool,
    origin_y: f32,
}

impl RevealGesture {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            active: false,
            origin_y: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn config(&self) -> RevealConfig {
        self.config
    }

    pub fn begin(&mut self, pointer_y: f32) {
        self.active = true;
        self.origin_y = pointer_y;
    }

    /// Screen y grows downward, so lifting means `pointer_y < origin_y`.
    pub fn update(&self, pointer_y: f32) -> GestureReading {
        if !self.active {
            return GestureReading::HIDDEN;
        }
        // A negative or NaN `max_lift` pins the lift at zero.
        let lift_pixels = (self.origin_y - pointer_y)
            .max(0.0)
            .min(self.config.max_lift.max(0.0));
        GestureReading {
            lift_pixels,
            should_reveal: self.origin_y - pointer_y >= self.config.threshold,
        }
    }

    pub fn end(&mut self) -> GestureReading {
        self.active = false;
        GestureReading::HIDDEN
    }

    pub fn cancel(&mut self) -> GestureReading {
        self.end()
    }
}

impl Default for RevealGesture {
    fn default() -> Self {
        Self::new(RevealConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_at(y: f32) -> RevealGesture {
        let mut gesture = RevealGesture::default();
        gesture.begin(y);
        gesture
    }

    #[test]
    fn test_below_threshold_stays_hidden() {
        let gesture = started_at(500.0);
        let reading = gesture.update(420.0);
        assert_eq!(reading.lift_pixels, 80.0);
        assert!(!reading.should_reveal);
    }

    #[test]
    fn test_at_and_above_threshold_reveals() {
        let gesture = started_at(500.0);
        assert!(gesture.update(410.0).should_reveal);
        assert!(gesture.update(300.0).should_reveal);
    }

    #[test]
    fn test_lift_is_clamped_but_reveal_is_not() {
        let gesture = started_at(500.0);
        let reading = gesture.update(0.0);
        assert_eq!(reading.lift_pixels, 140.0);
        assert!(reading.should_reveal);

        let reading = gesture.update(900.0);
        assert_eq!(reading.lift_pixels, 0.0);
        assert!(!reading.should_reveal);
    }

    #[test]
    fn test_dragging_back_down_hides_again() {
        let gesture = started_at(500.0);
        assert!(gesture.update(380.0).should_reveal);
        assert!(!gesture.update(450.0).should_reveal);
        assert!(gesture.update(400.0).should_reveal);
    }

    #[test]
    fn test_end_and_cancel_always_hide() {
        let mut gesture = started_at(500.0);
        assert!(gesture.update(100.0).should_reveal);
        assert_eq!(gesture.end(), GestureReading::HIDDEN);
        assert!(!gesture.is_active());
        assert!(!gesture.update(0.0).should_reveal);

        let mut gesture = started_at(500.0);
        assert!(gesture.update(100.0).should_reveal);
        assert_eq!(gesture.cancel(), GestureReading::HIDDEN);
        assert!(!gesture.update(0.0).should_reveal);
    }

    #[test]
    fn test_inactive_update_is_hidden() {
        let gesture = RevealGesture::default();
        assert_eq!(gesture.update(-1000.0), GestureReading::HIDDEN);
    }

    #[test]
    fn test_bad_max_lift_pins_lift_at_zero() {
        for max_lift in [-1.0, f32::NAN] {
            let mut gesture = RevealGesture::new(RevealConfig {
                threshold: 3.0,
                max_lift,
            });
            gesture.begin(10.0);
            let reading = gesture.update(5.0);
            assert_eq!(reading.lift_pixels, 0.0);
            assert!(reading.should_reveal);
        }
    }

    #[test]
    fn test_custom_units() {
        let mut gesture = RevealGesture::new(RevealConfig {
            threshold: 3.0,
            max_lift: 6.0,
        });
        gesture.begin(20.0);
        assert!(!gesture.update(18.0).should_reveal);
        assert!(gesture.update(17.0).should_reveal);
        assert_eq!(gesture.update(2.0).lift_pixels, 6.0);
    }
}
