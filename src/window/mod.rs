pub mod interaction;
pub mod snapshot;
pub mod store;

pub use interaction::{InteractionState, PointerTarget, WindowInteraction, clamp_bounds};
pub use snapshot::LayoutSnapshot;
pub use store::{AddWindow, CloseOutcome, WindowCommand, WindowStore};

use crate::constants::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
use crate::geometry::Rect;

/// Caller-supplied window identity. Never regenerated by the store.
pub type WindowId = String;

/// Per-window behaviour switches and size limits.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    pub resizable: bool,
    pub minimizable: bool,
    pub collision_detection: bool,
    /// Whether the window takes part in "redistribute equal". Informational
    /// for hosts that render a per-window redistribute control.
    pub allow_redistribute: bool,
    pub close_on_backdrop_click: bool,
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    /// Windows sharing a group key get their scroll regions registered
    /// together with the scroll-sync collaborator.
    pub scroll_sync_group: Option<String>,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            resizable: true,
            minimizable: true,
            collision_detection: false,
            allow_redistribute: false,
            close_on_backdrop_click: false,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            max_width: None,
            max_height: None,
            scroll_sync_group: None,
        }
    }
}

/// A subset of rectangle fields; absent fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartialRect {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl PartialRect {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn merge_into(self, base: Rect) -> Rect {
        Rect {
            x: self.x.unwrap_or(base.x),
            y: self.y.unwrap_or(base.y),
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
        }
    }
}

impl From<Rect> for PartialRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Window<C> {
    pub id: WindowId,
    pub bounds: Rect,
    pub z_index: u64,
    pub minimized: bool,
    pub title: Option<String>,
    pub content: C,
    pub options: WindowOptions,
}

impl<C> Window<C> {
    pub fn is_open(&self) -> bool {
        !self.minimized
    }

    /// Title when present, id otherwise.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_rect_merges_only_present_fields() {
        let base = Rect::new(1.0, 2.0, 3.0, 4.0);
        let merged = PartialRect::position(10.0, 20.0).merge_into(base);
        assert_eq!(merged, Rect::new(10.0, 20.0, 3.0, 4.0));
        let merged = PartialRect::size(30.0, 40.0).merge_into(base);
        assert_eq!(merged, Rect::new(1.0, 2.0, 30.0, 40.0));
    }

    #[test]
    fn default_options_match_documented_values() {
        let opts = WindowOptions::default();
        assert!(opts.resizable && opts.minimizable);
        assert!(!opts.collision_detection);
        assert_eq!((opts.min_width, opts.min_height), (200.0, 120.0));
    }
}
