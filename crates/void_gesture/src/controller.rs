//! Manipulation controller
//!
//! Owns the arbiter and both engines behind one mutex. Gesture ticks and
//! pointer events may arrive from different threads; each call holds the
//! lock for a single update only, never across a stroke.

use crate::arbiter::{Arbitration, ControlMode, GestureArbiter, GestureEvent, GesturePhase};
use crate::config::GestureConfig;
use crate::pointer::{PointerAction, PointerEvent, PointerTracker};
use crate::sensor::{PositionProvider, TrackingStatus};
use crate::trackball::{Trackball, Viewport};
use crate::transform::ComposedTransform;
use crate::zoom::Zoom;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use glam::{Quat, Vec2, Vec3};
use parking_lot::Mutex;

struct ControllerState {
    arbiter: GestureArbiter,
    trackball: Trackball,
    zoom: Zoom,
    pointer: PointerTracker,
    viewport: Viewport,
    last_status: TrackingStatus,
    transform: ComposedTransform,
}

impl ControllerState {
    fn refresh_transform(&mut self) {
        self.transform = ComposedTransform::new(self.zoom.scale(), self.trackball.orientation());
    }

    fn apply_gesture(&mut self, event: &GestureEvent) {
        let viewport = self.viewport;
        match (event.phase, event.point) {
            (GesturePhase::Start, Some(point)) => {
                if event.is_zoom() {
                    self.zoom.begin(point);
                }
                self.trackball.begin_stroke(point, viewport);
                log::debug!("Begin {:?} stroke at {:?}", event.mode, point);
            }
            (GesturePhase::Continue, Some(point)) => {
                if event.is_zoom() {
                    self.zoom.update_from_gesture(point);
                } else {
                    self.trackball.update_stroke(point, viewport);
                }
            }
            _ => {}
        }
        self.refresh_transform();
    }

    fn apply_pointer(&mut self, action: PointerAction) {
        let viewport = self.viewport;
        match action {
            PointerAction::BeginStroke(point) => {
                self.trackball.begin_stroke(point, viewport);
                log::debug!("Begin pointer stroke at {:?}", point);
            }
            PointerAction::Rotate(point) => {
                self.trackball.update_stroke(point, viewport);
            }
            PointerAction::Zoom { point, reference } => {
                self.zoom.update_from_pointer(point, reference);
            }
            PointerAction::EndStroke => {}
        }
        self.refresh_transform();
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        if viewport.is_degenerate() {
            log::warn!(
                "Degenerate viewport {}x{}; projections will sit at the pole",
                viewport.width,
                viewport.height
            );
        }
        self.viewport = viewport;
    }
}

/// Turns hand gestures and pointer drags into an object transform
pub struct ManipulationController {
    config: GestureConfig,
    state: Mutex<ControllerState>,
    subscribers: Mutex<Vec<Sender<GestureEvent>>>,
}

impl ManipulationController {
    /// Create a controller at identity transform
    pub fn new(config: GestureConfig) -> Self {
        let state = ControllerState {
            arbiter: GestureArbiter::new(config.min_torso_distance),
            trackball: Trackball::new(config.rotation_sensitivity),
            zoom: Zoom::new(config.zoom_divisor),
            pointer: PointerTracker::new(),
            viewport: Viewport::from(config.viewport),
            last_status: TrackingStatus::WaitingToAcquire,
            transform: ComposedTransform::IDENTITY,
        };

        Self {
            config,
            state: Mutex::new(state),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Run one arbitration tick against `provider`.
    ///
    /// Does nothing unless the provider reports a tracked user. Returns the
    /// event applied to the engines, if any.
    pub fn tick(&self, provider: &dyn PositionProvider) -> Option<GestureEvent> {
        let mut state = self.state.lock();
        let (status, input) = provider.snapshot(state.viewport);

        if status != state.last_status {
            if status.is_tracking() {
                log::info!("Tracking user");
            } else {
                log::info!("Tracking lost: {:?}", status);
            }
            state.last_status = status;
        }
        if !status.is_tracking() {
            return None;
        }

        let Arbitration { event, .. } = state.arbiter.evaluate(&input);
        let event = event?;
        state.apply_gesture(&event);
        drop(state);

        self.broadcast(event);
        Some(event)
    }

    /// Feed a pointer event. Returns the action applied, if any.
    pub fn handle_pointer(&self, event: PointerEvent) -> Option<PointerAction> {
        let mut state = self.state.lock();
        let action = state.pointer.handle(event)?;
        state.apply_pointer(action);
        Some(action)
    }

    /// Begin a trackball stroke directly
    pub fn begin_stroke(&self, point: Vec2) {
        self.state.lock().apply_pointer(PointerAction::BeginStroke(point));
    }

    /// Continue a trackball stroke directly and return the new orientation
    pub fn update_stroke(&self, point: Vec2) -> Quat {
        let mut state = self.state.lock();
        state.apply_pointer(PointerAction::Rotate(point));
        state.trackball.orientation()
    }

    /// Snapshot of the composed transform
    pub fn current_transform(&self) -> ComposedTransform {
        self.state.lock().transform
    }

    /// Rotation as axis and angle (radians)
    pub fn orientation_axis_angle(&self) -> (Vec3, f32) {
        self.current_transform().axis_angle()
    }

    /// Current gesture mode
    pub fn mode(&self) -> ControlMode {
        self.state.lock().arbiter.mode()
    }

    /// Current viewport
    pub fn viewport(&self) -> Viewport {
        self.state.lock().viewport
    }

    /// Set the render surface size used for projection
    pub fn set_viewport(&self, width: f32, height: f32) {
        self.state.lock().apply_viewport(Viewport::new(width, height));
    }

    /// Set the render surface width, keeping the current height
    pub fn set_width(&self, width: f32) {
        let mut state = self.state.lock();
        let height = state.viewport.height;
        state.apply_viewport(Viewport::new(width, height));
    }

    /// Set the render surface height, keeping the current width
    pub fn set_height(&self, height: f32) {
        let mut state = self.state.lock();
        let width = state.viewport.width;
        state.apply_viewport(Viewport::new(width, height));
    }

    /// Receive gesture events applied by [`tick`](Self::tick).
    ///
    /// Each receiver buffers up to `event_queue_capacity` events. While a
    /// receiver is full, new events are dropped for it alone.
    pub fn subscribe(&self) -> Receiver<GestureEvent> {
        let (sender, receiver) = crossbeam_channel::bounded(self.config.event_queue_capacity);
        self.subscribers.lock().push(sender);
        receiver
    }

    /// Back to identity rotation, unit scale and idle mode
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.arbiter.reset();
        state.trackball.reset();
        state.zoom.reset();
        state.pointer = PointerTracker::new();
        state.refresh_transform();
        log::debug!("Controller reset");
    }

    fn broadcast(&self, event: GestureEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|sender| match sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::trace!("Subscriber queue full, dropping {:?}", event.phase);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }
}

impl Default for ManipulationController {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
