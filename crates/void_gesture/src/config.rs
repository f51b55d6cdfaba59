//! Gesture controller configuration

use crate::error::{GestureError, Result};
use serde::{Deserialize, Serialize};

/// Tuning values for the gesture controller.
///
/// `rotation_sensitivity` and `zoom_divisor` are empirical feel constants,
/// not physically derived; the defaults reproduce the reference behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum depth offset (meters) between a hand and the torso for the
    /// hand to count as extended
    pub min_torso_distance: f32,

    /// Interval between arbitration ticks, in milliseconds
    pub tick_interval_ms: u64,

    /// Multiplier applied to the arc angle between successive projections
    pub rotation_sensitivity: f32,

    /// Pixel distance that scales the object by a factor of `e`
    pub zoom_divisor: f32,

    /// Initial viewport size in pixels (width, height)
    pub viewport: [f32; 2],

    /// Events buffered per subscriber before new events are dropped for it
    pub event_queue_capacity: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_torso_distance: 0.4,
            tick_interval_ms: 10,
            rotation_sensitivity: 1.5,
            zoom_divisor: 100.0,
            viewport: [640.0, 480.0],
            event_queue_capacity: 256,
        }
    }
}

impl GestureConfig {
    /// Create a configuration tuned for small viewports (faster rotation and zoom)
    pub fn responsive() -> Self {
        Self {
            rotation_sensitivity: 3.0,
            zoom_divisor: 50.0,
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the torso distance threshold
    pub fn with_min_torso_distance(mut self, meters: f32) -> Self {
        self.min_torso_distance = meters;
        self
    }

    /// Set the tick interval
    pub fn with_tick_interval_ms(mut self, millis: u64) -> Self {
        self.tick_interval_ms = millis;
        self
    }

    /// Set the rotation sensitivity
    pub fn with_rotation_sensitivity(mut self, sensitivity: f32) -> Self {
        self.rotation_sensitivity = sensitivity;
        self
    }

    /// Set the zoom divisor
    pub fn with_zoom_divisor(mut self, divisor: f32) -> Self {
        self.zoom_divisor = divisor;
        self
    }

    /// Set the initial viewport size
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = [width, height];
        self
    }

    /// Set the per-subscriber event queue capacity
    pub fn with_event_queue_capacity(mut self, capacity: usize) -> Self {
        self.event_queue_capacity = capacity;
        self
    }

    /// Check that every value is finite and in range
    pub fn validate(&self) -> Result<()> {
        if !self.min_torso_distance.is_finite() || self.min_torso_distance < 0.0 {
            return Err(GestureError::InvalidConfig(format!(
                "min_torso_distance must be a non-negative number, got {}",
                self.min_torso_distance
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(GestureError::InvalidConfig(
                "tick_interval_ms must be at least 1".into(),
            ));
        }
        if !self.rotation_sensitivity.is_finite() || self.rotation_sensitivity <= 0.0 {
            return Err(GestureError::InvalidConfig(format!(
                "rotation_sensitivity must be positive, got {}",
                self.rotation_sensitivity
            )));
        }
        if !self.zoom_divisor.is_finite() || self.zoom_divisor <= 0.0 {
            return Err(GestureError::InvalidConfig(format!(
                "zoom_divisor must be positive, got {}",
                self.zoom_divisor
            )));
        }
        let [width, height] = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GestureError::InvalidConfig(format!(
                "viewport must be positive, got {}x{}",
                width, height
            )));
        }
        if self.event_queue_capacity == 0 {
            return Err(GestureError::InvalidConfig(
                "event_queue_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_tuning() {
        let config = GestureConfig::default();
        assert_eq!(config.min_torso_distance, 0.4);
        assert_eq!(config.tick_interval_ms, 10);
        assert_eq!(config.rotation_sensitivity, 1.5);
        assert_eq!(config.zoom_divisor, 100.0);
        assert_eq!(config.event_queue_capacity, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = GestureConfig::from_json(r#"{ "min_torso_distance": 0.3 }"#).unwrap();
        assert_eq!(config.min_torso_distance, 0.3);
        assert_eq!(config.zoom_divisor, 100.0);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = GestureConfig::from_json(r#"{ "zoom_divisor": 0.0 }"#).unwrap_err();
        assert!(matches!(err, GestureError::InvalidConfig(_)));

        let err = GestureConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, GestureError::ConfigParse(_)));
    }

    #[test]
    fn test_builder() {
        let config = GestureConfig::default()
            .with_viewport(1280.0, 720.0)
            .with_tick_interval_ms(16);
        assert_eq!(config.viewport, [1280.0, 720.0]);
        assert_eq!(config.tick_interval_ms, 16);

        let bad = GestureConfig::default().with_viewport(0.0, 720.0);
        assert!(bad.validate().is_err());

        let bad = GestureConfig::default().with_event_queue_capacity(0);
        assert!(bad.validate().is_err());
    }
}
