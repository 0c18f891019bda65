//! Pointer input adapter
//!
//! Thin layer between macroquad's mouse/touch state and the spinner's four
//! boundary operations. Owns two policies that are deliberately not the
//! spinner's business:
//!
//! - move throttling (leading edge, fixed minimum interval) to bound how
//!   often the drag tracker runs, independent of native event frequency,
//! - treating a pointer that leaves the window while held as a release,
//!   so a grab can never get stuck.

use crate::spin::Spinner;
use macroquad::prelude::*;

/// Leading-edge rate limiter for pointer samples
pub struct Throttle {
    interval_ms: f64,
    last_passed_ms: f64,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            // Far enough in the past that the first sample always passes
            last_passed_ms: f64::MIN,
        }
    }

    /// Whether a sample at `now_ms` may pass; passing consumes the window
    pub fn allow(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_passed_ms >= self.interval_ms {
            self.last_passed_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Per-frame translator from platform pointer state to spinner calls
pub struct PointerAdapter {
    throttle: Throttle,
    last_mouse: (f32, f32),
}

impl PointerAdapter {
    pub fn new(throttle_ms: f64) -> Self {
        Self {
            throttle: Throttle::new(throttle_ms),
            last_mouse: (0.0, 0.0),
        }
    }

    /// Poll input and drive the spinner. Called once per frame, before
    /// `Spinner::advance`.
    pub fn update(&mut self, spinner: &mut Spinner) {
        let now_ms = get_time() * 1000.0;

        // A touch in flight takes priority over the mouse; only the first
        // touch drives the grab
        if let Some(touch) = touches().into_iter().next() {
            match touch.phase {
                TouchPhase::Started => spinner.grab_start(),
                TouchPhase::Moved | TouchPhase::Stationary => {
                    if spinner.is_grabbed() && self.throttle.allow(now_ms) {
                        spinner.pointer_move(touch.position.x, touch.position.y, now_ms);
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled => spinner.grab_end(),
            }
            return;
        }

        let (mx, my) = mouse_position();

        if is_mouse_button_pressed(MouseButton::Left) {
            spinner.grab_start();
        }

        if spinner.is_grabbed() {
            let left_window =
                mx < 0.0 || my < 0.0 || mx > screen_width() || my > screen_height();
            if is_mouse_button_released(MouseButton::Left) || left_window {
                // Leaving the window is a cancel, handled exactly like a release
                spinner.grab_end();
            } else if (mx, my) != self.last_mouse && self.throttle.allow(now_ms) {
                spinner.pointer_move(mx, my, now_ms);
            }
        }

        self.last_mouse = (mx, my);
    }
}
