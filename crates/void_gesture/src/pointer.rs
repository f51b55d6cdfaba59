//! Pointer (mouse) input path
//!
//! Normalizes raw press/motion/release events into trackball and zoom
//! actions. Primary drag rotates, secondary drag zooms, and primary wins
//! when both are held. Every primary or secondary press starts a new stroke
//! at its position; capture ends once both buttons are up.

use glam::Vec2;

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left button
    Primary,
    /// Usually the right button
    Secondary,
    Middle,
    /// Additional buttons (back, forward, etc.)
    Other(u32),
}

impl From<u32> for PointerButton {
    fn from(code: u32) -> Self {
        match code {
            0x110 => Self::Primary,   // BTN_LEFT
            0x111 => Self::Secondary, // BTN_RIGHT
            0x112 => Self::Middle,    // BTN_MIDDLE
            _ => Self::Other(code),
        }
    }
}

/// Buttons held during a motion event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldButtons {
    pub primary: bool,
    pub secondary: bool,
}

impl HeldButtons {
    /// Only the primary button
    pub const PRIMARY: Self = Self { primary: true, secondary: false };
    /// Only the secondary button
    pub const SECONDARY: Self = Self { primary: false, secondary: true };
    /// Nothing held
    pub const NONE: Self = Self { primary: false, secondary: false };
}

/// Pointer event in viewport pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed
    Press { position: Vec2, button: PointerButton },
    /// Pointer moved
    Motion { position: Vec2, held: HeldButtons },
    /// Button released
    Release { position: Vec2, button: PointerButton },
}

/// What the engines should do in response to a pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Begin a trackball stroke at the point
    BeginStroke(Vec2),
    /// Continue the trackball stroke
    Rotate(Vec2),
    /// Zoom relative to the stroke's press point
    Zoom { point: Vec2, reference: Vec2 },
    /// Pointer capture released
    EndStroke,
}

/// Capture and stroke-origin tracking for the pointer path
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    held: HeldButtons,
    origin: Vec2,
}

impl PointerTracker {
    /// Create a tracker with no capture
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pointer is captured by a stroke
    #[inline]
    pub fn is_captured(&self) -> bool {
        self.held.primary || self.held.secondary
    }

    /// Buttons currently holding the capture
    #[inline]
    pub fn held(&self) -> HeldButtons {
        self.held
    }

    /// Point the current stroke was pressed at
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Translate a raw event into an engine action
    pub fn handle(&mut self, event: PointerEvent) -> Option<PointerAction> {
        match event {
            PointerEvent::Press { position, button } => {
                self.set_held(button, true)?;
                self.origin = position;
                Some(PointerAction::BeginStroke(position))
            }
            PointerEvent::Motion { position, held } => {
                if !self.is_captured() {
                    return None;
                }
                if held.primary {
                    Some(PointerAction::Rotate(position))
                } else if held.secondary {
                    Some(PointerAction::Zoom {
                        point: position,
                        reference: self.origin,
                    })
                } else {
                    None
                }
            }
            PointerEvent::Release { button, .. } => {
                if !self.is_captured() {
                    return None;
                }
                self.set_held(button, false)?;
                if self.is_captured() {
                    return None;
                }
                Some(PointerAction::EndStroke)
            }
        }
    }

    /// Record a primary/secondary transition. `None` for other buttons.
    fn set_held(&mut self, button: PointerButton, down: bool) -> Option<()> {
        match button {
            PointerButton::Primary => self.held.primary = down,
            PointerButton::Secondary => self.held.secondary = down,
            _ => return None,
        }
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(x: f32, y: f32, button: PointerButton) -> PointerEvent {
        PointerEvent::Press { position: Vec2::new(x, y), button }
    }

    fn motion(x: f32, y: f32, held: HeldButtons) -> PointerEvent {
        PointerEvent::Motion { position: Vec2::new(x, y), held }
    }

    #[test]
    fn test_primary_drag_rotates() {
        let mut tracker = PointerTracker::new();
        assert_eq!(
            tracker.handle(press(10.0, 20.0, PointerButton::Primary)),
            Some(PointerAction::BeginStroke(Vec2::new(10.0, 20.0)))
        );
        assert!(tracker.is_captured());
        assert_eq!(
            tracker.handle(motion(15.0, 20.0, HeldButtons::PRIMARY)),
            Some(PointerAction::Rotate(Vec2::new(15.0, 20.0)))
        );
    }

    #[test]
    fn test_secondary_drag_zooms_against_press_point() {
        let mut tracker = PointerTracker::new();
        tracker.handle(press(10.0, 20.0, PointerButton::Secondary));
        tracker.handle(motion(10.0, 40.0, HeldButtons::SECONDARY));
        assert_eq!(
            tracker.handle(motion(10.0, 60.0, HeldButtons::SECONDARY)),
            Some(PointerAction::Zoom {
                point: Vec2::new(10.0, 60.0),
                reference: Vec2::new(10.0, 20.0),
            })
        );
    }

    #[test]
    fn test_primary_wins_when_both_held() {
        let mut tracker = PointerTracker::new();
        tracker.handle(press(0.0, 0.0, PointerButton::Secondary));
        assert_eq!(
            tracker.handle(press(50.0, 50.0, PointerButton::Primary)),
            Some(PointerAction::BeginStroke(Vec2::new(50.0, 50.0)))
        );
        assert_eq!(tracker.origin(), Vec2::new(50.0, 50.0));
        let both = HeldButtons { primary: true, secondary: true };
        assert_eq!(
            tracker.handle(motion(1.0, 1.0, both)),
            Some(PointerAction::Rotate(Vec2::new(1.0, 1.0)))
        );
    }

    #[test]
    fn test_motion_without_capture_or_buttons_is_ignored() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.handle(motion(1.0, 1.0, HeldButtons::PRIMARY)), None);

        tracker.handle(press(0.0, 0.0, PointerButton::Primary));
        assert_eq!(tracker.handle(motion(1.0, 1.0, HeldButtons::NONE)), None);
    }

    #[test]
    fn test_release_ends_capture() {
        let mut tracker = PointerTracker::new();
        tracker.handle(press(0.0, 0.0, PointerButton::Primary));
        let release = PointerEvent::Release { position: Vec2::ZERO, button: PointerButton::Primary };
        assert_eq!(tracker.handle(release), Some(PointerAction::EndStroke));
        assert!(!tracker.is_captured());
        assert_eq!(tracker.handle(release), None);
    }

    #[test]
    fn test_releasing_one_button_keeps_the_other_stroke() {
        let mut tracker = PointerTracker::new();
        tracker.handle(press(10.0, 10.0, PointerButton::Secondary));
        tracker.handle(press(10.0, 10.0, PointerButton::Primary));

        let release = PointerEvent::Release { position: Vec2::ZERO, button: PointerButton::Primary };
        assert_eq!(tracker.handle(release), None);
        assert!(tracker.is_captured());
        assert_eq!(tracker.held(), HeldButtons::SECONDARY);
        assert_eq!(
            tracker.handle(motion(10.0, 30.0, HeldButtons::SECONDARY)),
            Some(PointerAction::Zoom {
                point: Vec2::new(10.0, 30.0),
                reference: Vec2::new(10.0, 10.0),
            })
        );

        let release = PointerEvent::Release { position: Vec2::ZERO, button: PointerButton::Secondary };
        assert_eq!(tracker.handle(release), Some(PointerAction::EndStroke));
        assert!(!tracker.is_captured());
    }

    #[test]
    fn test_other_buttons_leave_capture_alone() {
        let mut tracker = PointerTracker::new();
        tracker.handle(press(0.0, 0.0, PointerButton::Primary));
        assert_eq!(tracker.handle(press(1.0, 1.0, PointerButton::Middle)), None);
        let release = PointerEvent::Release { position: Vec2::ZERO, button: PointerButton::Middle };
        assert_eq!(tracker.handle(release), None);
        assert!(tracker.is_captured());
        assert_eq!(tracker.origin(), Vec2::ZERO);
    }

    #[test]
    fn test_button_codes() {
        assert_eq!(PointerButton::from(0x110), PointerButton::Primary);
        assert_eq!(PointerButton::from(0x111), PointerButton::Secondary);
        assert_eq!(PointerButton::from(0x999), PointerButton::Other(0x999));
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.handle(press(0.0, 0.0, PointerButton::Middle)), None);
    }
}
