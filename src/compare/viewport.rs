//! Viewport geometry and the comparison capacity derived from it.

use serde::{Deserialize, Serialize};

/// Width below which a portrait viewport counts as a phone.
pub const DEFAULT_BREAKPOINT: u32 = 768;
pub const DEFAULT_NARROW_CAPACITY: usize = 2;
pub const DEFAULT_WIDE_CAPACITY: usize = 3;

/// Current viewport size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

/// How many vehicles fit side by side for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityPolicy {
    pub breakpoint: u32,
    pub narrow_capacity: usize,
    pub wide_capacity: usize,
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
            narrow_capacity: DEFAULT_NARROW_CAPACITY,
            wide_capacity: DEFAULT_WIDE_CAPACITY,
        }
    }
}

impl CapacityPolicy {
    /// Narrow capacity for a portrait viewport under the breakpoint, wide otherwise.
    pub fn capacity_for(&self, viewport: Viewport) -> usize {
        if viewport.width < self.breakpoint && viewport.is_portrait() {
            self.narrow_capacity
        } else {
            self.wide_capacity
        }
    }
}
