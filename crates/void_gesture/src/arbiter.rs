//! Gesture arbitration
//!
//! Decides each tick which single gesture owns the trackball. A hand is
//! "extended" when its depth differs from the torso's by at least the
//! configured distance:
//!
//! ```text
//! left extended, right resting   -> rotate with left
//! right extended, left resting   -> rotate with right
//! both extended                  -> zoom (tracked on the right hand)
//! ```
//!
//! The only memory carried between ticks is the current [`ControlMode`].

use glam::{Vec2, Vec3};

/// Which gesture currently owns the transform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControlMode {
    #[default]
    Idle,
    RotatingWithLeft,
    RotatingWithRight,
    Zooming,
}

impl ControlMode {
    /// True for either single-hand rotate mode
    #[inline]
    pub fn is_rotating(self) -> bool {
        matches!(self, Self::RotatingWithLeft | Self::RotatingWithRight)
    }
}

/// Per-tick hand eligibility. At most one flag is ever set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Eligibility {
    pub left: bool,
    pub right: bool,
    pub zoom: bool,
}

impl Eligibility {
    /// Compute eligibility from torso-relative hand depth
    pub fn evaluate(left_hand: Vec3, right_hand: Vec3, torso: Vec3, min_torso_distance: f32) -> Self {
        let left_extended = (torso.z - left_hand.z).abs() >= min_torso_distance;
        let right_extended = (torso.z - right_hand.z).abs() >= min_torso_distance;

        Self {
            left: left_extended && !right_extended,
            right: right_extended && !left_extended,
            zoom: left_extended && right_extended,
        }
    }

    /// Whether the hand driving `mode` is still eligible
    pub fn holds(&self, mode: ControlMode) -> bool {
        match mode {
            ControlMode::Idle => false,
            ControlMode::RotatingWithLeft => self.left,
            ControlMode::RotatingWithRight => self.right,
            ControlMode::Zooming => self.zoom,
        }
    }
}

/// Snapshot of the joints read for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandInput {
    pub left_hand: Vec3,
    pub right_hand: Vec3,
    pub torso: Vec3,
    /// Left hand in viewport pixels
    pub left_point: Vec2,
    /// Right hand in viewport pixels
    pub right_point: Vec2,
}

/// Stroke phase of a gesture event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// Stroke begins at the event point
    Start,
    /// Stroke moves to the event point
    Continue,
    /// Stroke ended; no point
    Stop,
}

/// A gesture event emitted by the arbiter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    /// Mode the stroke belongs to (the mode being left for `Stop`)
    pub mode: ControlMode,
    /// Display point for `Start`/`Continue`
    pub point: Option<Vec2>,
}

impl GestureEvent {
    fn start(mode: ControlMode, point: Vec2) -> Self {
        Self { phase: GesturePhase::Start, mode, point: Some(point) }
    }

    fn advance(mode: ControlMode, point: Vec2) -> Self {
        Self { phase: GesturePhase::Continue, mode, point: Some(point) }
    }

    fn stop(mode: ControlMode) -> Self {
        Self { phase: GesturePhase::Stop, mode, point: None }
    }

    /// Check if this is a start event
    pub fn is_start(&self) -> bool {
        self.phase == GesturePhase::Start
    }

    /// Check if this is a stop event
    pub fn is_stop(&self) -> bool {
        self.phase == GesturePhase::Stop
    }

    /// True if the stroke drives the zoom engine rather than the trackball
    pub fn is_zoom(&self) -> bool {
        self.mode == ControlMode::Zooming
    }
}

/// Outcome of one arbitration tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arbitration {
    /// Mode after the tick
    pub mode: ControlMode,
    /// Eligibility computed this tick
    pub eligibility: Eligibility,
    /// Event to forward to the engines, if any
    pub event: Option<GestureEvent>,
}

/// Control mode state machine
#[derive(Clone, Debug)]
pub struct GestureArbiter {
    mode: ControlMode,
    min_torso_distance: f32,
}

impl GestureArbiter {
    /// Create an idle arbiter
    pub fn new(min_torso_distance: f32) -> Self {
        Self {
            mode: ControlMode::Idle,
            min_torso_distance,
        }
    }

    /// Current mode
    #[inline]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Depth threshold in meters
    #[inline]
    pub fn min_torso_distance(&self) -> f32 {
        self.min_torso_distance
    }

    /// Run one tick. Conditions are tried in order and the first match wins.
    ///
    /// A running stroke is only ever ended by losing its own eligibility;
    /// another gesture becoming eligible does not preempt it.
    pub fn evaluate(&mut self, input: &HandInput) -> Arbitration {
        let eligibility = Eligibility::evaluate(
            input.left_hand,
            input.right_hand,
            input.torso,
            self.min_torso_distance,
        );
        let previous = self.mode;

        let (mode, event) = match previous {
            // An active stroke whose hands dropped out ends before anything else
            ControlMode::RotatingWithLeft
            | ControlMode::RotatingWithRight
            | ControlMode::Zooming
                if !eligibility.holds(previous) =>
            {
                (ControlMode::Idle, Some(GestureEvent::stop(previous)))
            }
            // Single-hand rotation is preferred over zoom
            ControlMode::Idle if eligibility.left => (
                ControlMode::RotatingWithLeft,
                Some(GestureEvent::start(ControlMode::RotatingWithLeft, input.left_point)),
            ),
            ControlMode::Idle if eligibility.right => (
                ControlMode::RotatingWithRight,
                Some(GestureEvent::start(ControlMode::RotatingWithRight, input.right_point)),
            ),
            ControlMode::Idle if eligibility.zoom => (
                ControlMode::Zooming,
                Some(GestureEvent::start(ControlMode::Zooming, input.right_point)),
            ),
            ControlMode::Idle => (ControlMode::Idle, None),
            // Still eligible
            ControlMode::RotatingWithLeft => (
                previous,
                Some(GestureEvent::advance(previous, input.left_point)),
            ),
            ControlMode::RotatingWithRight | ControlMode::Zooming => (
                previous,
                Some(GestureEvent::advance(previous, input.right_point)),
            ),
        };

        if mode != previous {
            log::debug!("Gesture mode {:?} -> {:?}", previous, mode);
        }
        self.mode = mode;

        Arbitration { mode, eligibility, event }
    }

    /// Drop any running stroke without emitting an event
    pub fn reset(&mut self) {
        self.mode = ControlMode::Idle;
    }
}

impl Default for GestureArbiter {
    fn default() -> Self {
        Self::new(0.4)
    }
}
