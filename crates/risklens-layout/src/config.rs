//! Configuration for the force-directed layout
//!
//! Canvas geometry, force constants and the frame rate of the worker.

use crate::LayoutError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Layout simulation parameters
///
/// # Examples
///
/// ```
/// use risklens_layout::LayoutConfig;
///
/// let config = LayoutConfig::default();
/// assert_eq!(config.width, 800.0);
/// assert_eq!(config.frame_interval().as_millis(), 16);
///
/// // Tighter springs and more damping settle faster
/// let calm = LayoutConfig::settled();
/// assert!(calm.damping < config.damping);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas width
    pub width: f64,

    /// Canvas height
    pub height: f64,

    /// Fraction of the offset from centre added to velocity each tick
    pub center_strength: f64,

    /// Numerator of the inverse-square repulsion
    pub repulsion: f64,

    /// Rest length of an edge spring
    pub link_distance: f64,

    /// Spring constant
    pub link_strength: f64,

    /// Velocity multiplier applied after forces
    pub damping: f64,

    /// Distance nodes keep from the canvas edge
    pub margin: f64,

    /// New nodes appear within ±spawn_spread/2 of the centre
    pub spawn_spread: f64,

    /// Milliseconds between worker frames
    pub frame_interval_ms: u64,
}

impl Default for LayoutConfig {
    /// 800×500 canvas at roughly 60 frames per second
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            center_strength: 0.005,
            repulsion: 2000.0,
            link_distance: 100.0,
            link_strength: 0.1,
            damping: 0.9,
            margin: 30.0,
            spawn_spread: 200.0,
            frame_interval_ms: 16,
        }
    }
}

impl LayoutConfig {
    /// Heavier damping and stronger centering for views that should stop moving quickly
    pub fn settled() -> Self {
        Self {
            center_strength: 0.01,
            damping: 0.7,
            ..Self::default()
        }
    }

    /// Canvas centre
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Frame interval as a Duration
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.margin < 0.0 {
            return Err(LayoutError::Config("margin must not be negative".into()));
        }
        if self.width <= 2.0 * self.margin || self.height <= 2.0 * self.margin {
            return Err(LayoutError::Config(format!(
                "canvas {}x{} leaves no room inside a {} margin",
                self.width, self.height, self.margin
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(LayoutError::Config(format!(
                "damping {} is outside [0.0, 1.0]",
                self.damping
            )));
        }
        if self.link_distance < 0.0 || self.repulsion < 0.0 || self.spawn_spread < 0.0 {
            return Err(LayoutError::Config(
                "link_distance, repulsion and spawn_spread must not be negative".into(),
            ));
        }
        // tokio's interval panics on a zero period
        if self.frame_interval_ms == 0 {
            return Err(LayoutError::Config("frame_interval_ms must be at least 1".into()));
        }
        Ok(())
    }
}
