use serde::{Deserialize, Serialize};

/// Current and maximum hit points.
///
/// `current` is free-form on the client; only the authority clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: i32,
    pub max: i32,
}

impl HitPoints {
    pub fn new(current: i32, max: i32) -> Self {
        Self { current, max }
    }

    /// Same max, `current` lowered to it when above.
    #[must_use]
    pub fn clamped_to_max(self) -> Self {
        Self {
            current: self.current.min(self.max),
            max: self.max,
        }
    }
}
