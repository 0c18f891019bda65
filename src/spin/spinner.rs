//! Grab-and-spin orientation state machine
//!
//! One `Spinner` per rendered solid. Three cooperating pieces share its
//! state:
//!
//! - the drag tracker turns consecutive pointer samples into incremental
//!   world-space rotations, applies them immediately and keeps a short
//!   history of them,
//! - the release estimator averages that history (sign-consistently, so
//!   q and -q reinforce instead of cancelling) into a spin velocity,
//! - the per-frame integrator advances the idle spin about a fixed axis
//!   and relaxes the velocity toward its resting value.
//!
//! All of it runs on one thread; callers interleave pointer calls and
//! `advance` freely. The orientation is renormalized after every
//! composition so it stays unit length over arbitrarily long sessions.

use crate::config::SpinTuning;
use crate::mesh::ModelDef;
use crate::raster::Vec3;
use crate::spin::Quat;

/// Smallest elapsed time between two pointer samples, in milliseconds.
/// Guards the rate division against same-timestamp events.
const MIN_DT_MS: f64 = 0.001;

/// One pointer event: screen position plus timestamp
#[derive(Debug, Clone, Copy)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: f64,
}

/// Interactive rotation state for a single solid
pub struct Spinner {
    /// Current rotation relative to the rest pose, always unit length
    orientation: Quat,
    /// World-space axis of the idle spin, fixed for the session
    velocity_axis: Vec3,
    /// Spin rate about `velocity_axis`, radians per frame
    velocity: f32,
    /// Last pointer sample seen during the current grab
    prev_sample: Option<PointerSample>,
    /// Recent drag increments, oldest first; capacity + 1 entries are
    /// tolerated before eviction so the newest increment is never dropped
    /// before release reads it
    history: Vec<Quat>,
    grabbed: bool,
    /// From the model definition: whether the integrator relaxes velocity
    spin_decay: bool,
    tuning: SpinTuning,
}

impl Spinner {
    /// Build a spinner at the model's rest pose. The idle-spin axis is the
    /// canonical up vector leaned by the same start tilt as the mesh.
    pub fn new(model: &ModelDef, tuning: SpinTuning) -> Self {
        Self {
            orientation: Quat::IDENTITY.rotate_z(model.start_tilt),
            velocity_axis: Vec3::UP.rotate_z(model.start_tilt),
            velocity: tuning.resting_velocity,
            prev_sample: None,
            history: Vec::with_capacity(tuning.history_capacity + 2),
            grabbed: false,
            spin_decay: model.spin_decay,
            tuning,
        }
    }

    /// Pointer pressed on the solid: freeze the spin and start tracking
    pub fn grab_start(&mut self) {
        self.grabbed = true;
        self.velocity = 0.0;
        self.prev_sample = None;
        self.history.clear();
    }

    /// Feed one pointer sample. No-op unless grabbed. The first sample of
    /// a grab only seeds the delta baseline; every later sample becomes an
    /// incremental world-space rotation applied immediately.
    pub fn pointer_move(&mut self, x: f32, y: f32, timestamp_ms: f64) {
        if !self.grabbed {
            return;
        }
        if !x.is_finite() || !y.is_finite() {
            eprintln!("pointer_move: unusable pointer position ({}, {})", x, y);
            return;
        }

        if let Some(prev) = self.prev_sample {
            let dt = (timestamp_ms - prev.timestamp_ms).max(MIN_DT_MS);
            let dx = x - prev.x;
            let dy = y - prev.y;

            // Screen axes map crosswise onto rotation axes: horizontal
            // drag turns about the vertical axis and vice versa
            let mut pitch = (dy as f64 / dt) as f32 * self.tuning.rot_sensitivity;
            let mut yaw = (dx as f64 / dt) as f32 * self.tuning.rot_sensitivity;
            if !pitch.is_finite() {
                pitch = 0.0;
            }
            if !yaw.is_finite() {
                yaw = 0.0;
            }

            // Increment on the left: rotation applied in world space
            let increment = Quat::from_euler_deg(pitch, yaw, 0.0);
            self.orientation = increment.mul(self.orientation).normalize();

            self.history.push(increment);
            while self.history.len() > self.tuning.history_capacity + 1 {
                self.history.remove(0);
            }
        }

        self.prev_sample = Some(PointerSample { x, y, timestamp_ms });
    }

    /// Pointer released (or the grab was cancelled - same thing): estimate
    /// the release velocity from the recent increments and go back to idle
    /// spinning. With an empty history the velocity keeps its last value.
    pub fn grab_end(&mut self) {
        if !self.grabbed {
            return;
        }

        if !self.history.is_empty() {
            let take = self.history.len().min(self.tuning.history_capacity);
            let recent = &self.history[self.history.len() - take..];

            // Sign-consistent running sum: q and -q are the same rotation,
            // so entries on the far side of the double cover get negated
            // before adding instead of cancelling the sum
            let mut sum = Quat::IDENTITY;
            for &q in recent {
                let q = if q.dot(sum) < 0.0 { q.scale(-1.0) } else { q };
                sum = sum.add(q);
            }
            let average = sum.normalize();

            // Angle about the fixed spin axis, not the average's own axis
            let speed = average.twist_angle(self.velocity_axis).abs();
            self.velocity = speed.min(self.tuning.max_velocity);
        }

        self.grabbed = false;
        self.prev_sample = None;
        self.history.clear();
    }

    /// Per-frame tick, called before the renderer reads the orientation.
    ///
    /// The velocity is applied as one step per call rather than scaled by
    /// `dt_seconds` - the spin rate is deliberately coupled to the display
    /// refresh, and the feel constants are calibrated to that convention.
    /// The parameter stays in the signature so switching to true
    /// time-scaled integration is a local change.
    pub fn advance(&mut self, _dt_seconds: f32) {
        if self.spin_decay && self.velocity == 0.0 {
            // The relaxation below multiplies by the current velocity, so
            // an exact zero could never move again without this nudge
            self.velocity = if self.tuning.resting_velocity >= 0.0 {
                self.tuning.minimum_velocity
            } else {
                -self.tuning.minimum_velocity
            };
        }

        if !self.grabbed && self.velocity != 0.0 {
            let step = Quat::from_axis_angle(self.velocity_axis, self.velocity);
            self.orientation = step.mul(self.orientation).normalize();
        }

        // Relax toward the resting velocity, clamped so it never crosses.
        // Runs while grabbed too, so a long hold converges to resting.
        if self.spin_decay {
            let rest = self.tuning.resting_velocity;
            let coeff = self.tuning.velocity_change_coeff;
            if self.velocity > rest {
                self.velocity = rest.max(self.velocity - self.velocity * coeff);
            } else if self.velocity < rest {
                self.velocity = rest.min(self.velocity + self.velocity * coeff);
            }
        }
    }

    /// Current orientation, read once per frame by the renderer
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn velocity_axis(&self) -> Vec3 {
        self.velocity_axis
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }
}
