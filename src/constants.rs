//! Shared crate-wide constants.

use crate::geometry::Size;

/// Container size assumed when no embedding surface has reported one yet.
///
/// Headless hosts and tests rely on this; interactive hosts should call
/// `WindowStore::set_container_size` as soon as they know the real extent.
pub const HEADLESS_CONTAINER_SIZE: Size = Size {
    width: 800.0,
    height: 600.0,
};

/// Minimum window width applied when a window does not configure its own.
pub const DEFAULT_MIN_WIDTH: f64 = 200.0;

/// Minimum window height applied when a window does not configure its own.
pub const DEFAULT_MIN_HEIGHT: f64 = 120.0;

/// Fraction of the container used for each side of a window that was added
/// without explicit bounds.
pub const DEFAULT_BOUNDS_FRACTION: f64 = 0.4;

/// Lower/upper clamp for the width of default window bounds.
pub const DEFAULT_BOUNDS_WIDTH_RANGE: (f64, f64) = (280.0, 400.0);

/// Lower/upper clamp for the height of default window bounds.
pub const DEFAULT_BOUNDS_HEIGHT_RANGE: (f64, f64) = (200.0, 400.0);

/// Upper bound on collision resolution passes per drag frame.
pub const MAX_COLLISION_PASSES: usize = 10;

/// Wire version shared by both snapshot formats.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Floor applied to every split row/column ratio, in percent.
pub const DEFAULT_MIN_SPLIT_PERCENT: f64 = 8.0;

/// Thickness of a split-grid divider, in pixels.
pub const SPLIT_DIVIDER_THICKNESS: f64 = 8.0;

/// Smallest outer box the split grid can be resized down to.
pub const DEFAULT_MIN_OUTER_SIZE: Size = Size {
    width: 200.0,
    height: 160.0,
};

/// Scale factor applied by the "shrink all" toolbar action.
pub const SHRINK_ALL_FACTOR: f64 = 0.9;

/// Scale factor applied by the "grow all" toolbar action.
pub const GROW_ALL_FACTOR: f64 = 1.1;
