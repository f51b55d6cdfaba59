//! Skeleton sensor interface
//!
//! The controller never talks to hardware. It reads joint positions and a
//! tracking status from a [`PositionProvider`] snapshot once per tick. Capture code
//! that runs on its own thread can publish into a [`SharedSkeleton`], which
//! keeps only the latest frame.

use crate::arbiter::HandInput;
use crate::trackball::Viewport;
use glam::{Vec2, Vec3};
use parking_lot::RwLock;

/// Width of the sensor color frame that joint pixels are reported in
pub const COLOR_FRAME_WIDTH: f32 = 640.0;

/// Height of the sensor color frame that joint pixels are reported in
pub const COLOR_FRAME_HEIGHT: f32 = 480.0;

/// Sensor tracking status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrackingStatus {
    /// Sensor running, no user skeleton yet
    #[default]
    WaitingToAcquire,
    /// A user skeleton is tracked and joint data is live
    TrackingUser,
    /// No sensor, or the sensor failed to initialize
    NotConnected,
}

impl TrackingStatus {
    /// Only a tracked user produces usable joint data
    #[inline]
    pub fn is_tracking(self) -> bool {
        self == Self::TrackingUser
    }
}

/// Joints the controller consumes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Joint {
    LeftHand,
    RightHand,
    /// Spine / torso center used as the depth reference
    Torso,
}

/// Source of joint positions.
///
/// Positions are in sensor space (meters, +Z away from the sensor).
pub trait PositionProvider: Send + Sync {
    /// Current tracking status
    fn tracking_status(&self) -> TrackingStatus;

    /// Latest position of `joint`
    fn joint_position(&self, joint: Joint) -> Vec3;

    /// Map `joint` to a pixel position inside `viewport`
    fn project_to_display(&self, joint: Joint, viewport: Viewport) -> Vec2;

    /// Latest left hand position
    fn left_hand(&self) -> Vec3 {
        self.joint_position(Joint::LeftHand)
    }

    /// Latest right hand position
    fn right_hand(&self) -> Vec3 {
        self.joint_position(Joint::RightHand)
    }

    /// Latest torso position
    fn torso(&self) -> Vec3 {
        self.joint_position(Joint::Torso)
    }

    /// Status and every joint the arbiter needs, taken from one frame.
    ///
    /// The default reads each value separately. Providers that are written
    /// to concurrently must override this so the values cannot straddle two
    /// frames.
    fn snapshot(&self, viewport: Viewport) -> (TrackingStatus, HandInput) {
        let input = HandInput {
            left_hand: self.left_hand(),
            right_hand: self.right_hand(),
            torso: self.torso(),
            left_point: self.project_to_display(Joint::LeftHand, viewport),
            right_point: self.project_to_display(Joint::RightHand, viewport),
        };
        (self.tracking_status(), input)
    }
}

/// One joint as reported by the sensor
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JointSample {
    /// Sensor-space position
    pub position: Vec3,
    /// Pixel in the sensor color frame
    pub color_pixel: Vec2,
}

impl JointSample {
    /// Create a new joint sample
    pub const fn new(position: Vec3, color_pixel: Vec2) -> Self {
        Self { position, color_pixel }
    }
}

/// The joints of one tracked skeleton
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SkeletonFrame {
    pub left_hand: JointSample,
    pub right_hand: JointSample,
    pub torso: JointSample,
}

impl SkeletonFrame {
    /// Sample for `joint`
    pub fn joint(&self, joint: Joint) -> &JointSample {
        match joint {
            Joint::LeftHand => &self.left_hand,
            Joint::RightHand => &self.right_hand,
            Joint::Torso => &self.torso,
        }
    }
}

/// Scale a color-frame pixel into `viewport`, clamping to the frame first.
/// Results are truncated to whole pixels.
pub fn color_pixel_to_display(color_pixel: Vec2, viewport: Viewport) -> Vec2 {
    let cx = color_pixel.x.clamp(0.0, COLOR_FRAME_WIDTH);
    let cy = color_pixel.y.clamp(0.0, COLOR_FRAME_HEIGHT);
    Vec2::new(
        (viewport.width * cx / COLOR_FRAME_WIDTH).trunc(),
        (viewport.height * cy / COLOR_FRAME_HEIGHT).trunc(),
    )
}

#[derive(Default)]
struct SkeletonState {
    status: TrackingStatus,
    frame: SkeletonFrame,
}

/// Last-value-wins skeleton store.
///
/// Writers replace the whole frame; readers never block on each other.
/// Positions from the last tracked frame are kept while the user is lost.
#[derive(Default)]
pub struct SharedSkeleton {
    state: RwLock<SkeletonState>,
}

impl SharedSkeleton {
    /// Create an empty store waiting for a user
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a tracked skeleton. Status becomes `TrackingUser`.
    pub fn publish(&self, frame: SkeletonFrame) {
        let mut state = self.state.write();
        state.frame = frame;
        state.status = TrackingStatus::TrackingUser;
    }

    /// No skeleton in the latest sensor frame
    pub fn lose_user(&self) {
        let mut state = self.state.write();
        if state.status != TrackingStatus::NotConnected {
            state.status = TrackingStatus::WaitingToAcquire;
        }
    }

    /// Sensor is absent or failed to start. Sticky until the next publish.
    pub fn mark_disconnected(&self) {
        self.state.write().status = TrackingStatus::NotConnected;
        log::warn!("Skeleton sensor not connected");
    }

    /// Copy of the latest frame
    pub fn frame(&self) -> SkeletonFrame {
        self.state.read().frame
    }
}

impl PositionProvider for SharedSkeleton {
    fn tracking_status(&self) -> TrackingStatus {
        self.state.read().status
    }

    fn joint_position(&self, joint: Joint) -> Vec3 {
        self.state.read().frame.joint(joint).position
    }

    fn project_to_display(&self, joint: Joint, viewport: Viewport) -> Vec2 {
        let pixel = self.state.read().frame.joint(joint).color_pixel;
        color_pixel_to_display(pixel, viewport)
    }

    fn snapshot(&self, viewport: Viewport) -> (TrackingStatus, HandInput) {
        let state = self.state.read();
        let frame = &state.frame;
        let input = HandInput {
            left_hand: frame.left_hand.position,
            right_hand: frame.right_hand.position,
            torso: frame.torso.position,
            left_point: color_pixel_to_display(frame.left_hand.color_pixel, viewport),
            right_point: color_pixel_to_display(frame.right_hand.color_pixel, viewport),
        };
        (state.status, input)
    }
}
