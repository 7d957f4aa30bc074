use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// Delays used by the selection controller, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
    /// Wait after the first layout before the one-time centering
    #[serde(default = "default_first_layout_ms")]
    pub first_layout_ms: u64,

    /// Wait before re-centering on a changed selection
    #[serde(default = "default_recenter_ms")]
    pub recenter_ms: u64,

    /// How long a tap keeps the interaction flagged active
    #[serde(default = "default_tap_grace_ms")]
    pub tap_grace_ms: u64,

    /// How long a drag or momentum end keeps the interaction flagged active
    #[serde(default = "default_drag_grace_ms")]
    pub drag_grace_ms: u64,

    /// Idle time before the selection returns to the anchor
    #[serde(default = "default_auto_return_ms")]
    pub auto_return_ms: u64,
}

fn default_first_layout_ms() -> u64 {
    150
}

fn default_recenter_ms() -> u64 {
    50
}

fn default_tap_grace_ms() -> u64 {
    400
}

fn default_drag_grace_ms() -> u64 {
    500
}

fn default_auto_return_ms() -> u64 {
    6000
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            first_layout_ms: default_first_layout_ms(),
            recenter_ms: default_recenter_ms(),
            tap_grace_ms: default_tap_grace_ms(),
            drag_grace_ms: default_drag_grace_ms(),
            auto_return_ms: default_auto_return_ms(),
        }
    }
}

impl Timings {
    pub fn first_layout(&self) -> Duration {
        Duration::from_millis(self.first_layout_ms)
    }

    pub fn recenter(&self) -> Duration {
        Duration::from_millis(self.recenter_ms)
    }

    pub fn tap_grace(&self) -> Duration {
        Duration::from_millis(self.tap_grace_ms)
    }

    pub fn drag_grace(&self) -> Duration {
        Duration::from_millis(self.drag_grace_ms)
    }

    pub fn auto_return(&self) -> Duration {
        Duration::from_millis(self.auto_return_ms)
    }

    /// The auto-return must outlast both grace windows, or it would fire
    /// while the user is still considered to be interacting.
    pub fn validate(&self) -> CommonResult<()> {
        if self.auto_return_ms == 0 {
            return Err(CommonError::InvalidTimings(
                "autoReturnMs must be greater than zero".to_string(),
            ));
        }
        if self.auto_return_ms <= self.tap_grace_ms.max(self.drag_grace_ms) {
            return Err(CommonError::InvalidTimings(format!(
                "autoReturnMs ({}) must exceed the grace windows",
                self.auto_return_ms
            )));
        }
        Ok(())
    }
}
