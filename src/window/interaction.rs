//! Per-window pointer state machine for header drags and corner resizes.
//!
//! Each window owns one [`WindowInteraction`]. A gesture starts on
//! pointer-down, commits clamped bounds to the store on every move, and ends
//! on pointer-up. There is no rollback: each move is already applied.

use super::{PartialRect, WindowId, WindowOptions, WindowStore};
use crate::geometry::{Point, Rect, Size, resolve_collisions_with_others};

/// Part of the window chrome that received the pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Header,
    /// A button inside the header; never starts a drag.
    HeaderButton,
    /// The south-east resize corner.
    ResizeHandle,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub pointer: Point,
    pub origin: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart {
    pub pointer: Point,
    pub bounds: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragStart),
    Resizing(ResizeStart),
}

#[derive(Debug, Clone)]
pub struct WindowInteraction {
    id: WindowId,
    state: InteractionState,
}

impl WindowInteraction {
    pub fn new(id: impl Into<WindowId>) -> Self {
        Self {
            id: id.into(),
            state: InteractionState::Idle,
        }
    }

    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != InteractionState::Idle
    }

    /// Starts a drag or resize. Returns `true` when a gesture began.
    pub fn pointer_down<C: Clone>(
        &mut self,
        store: &mut WindowStore<C>,
        target: PointerTarget,
        pointer: Point,
    ) -> bool {
        if self.is_active() {
            return false;
        }
        let Some(window) = store.window(&self.id) else {
            return false;
        };
        let bounds = window.bounds;
        let resizable = window.options.resizable;
        match target {
            PointerTarget::Header => {
                store.bring_to_front(&self.id);
                self.state = InteractionState::Dragging(DragStart {
                    pointer,
                    origin: bounds.origin(),
                });
                tracing::debug!(window_id = %self.id, "drag started");
                true
            }
            PointerTarget::ResizeHandle if resizable => {
                store.bring_to_front(&self.id);
                self.state = InteractionState::Resizing(ResizeStart { pointer, bounds });
                tracing::debug!(window_id = %self.id, "resize started");
                true
            }
            _ => false,
        }
    }

    /// Applies the pointer position to the active gesture. Returns `true`
    /// when bounds were committed.
    pub fn pointer_move<C: Clone>(&mut self, store: &mut WindowStore<C>, pointer: Point) -> bool {
        let Some(window) = store.window(&self.id) else {
            self.state = InteractionState::Idle;
            return false;
        };
        let options = window.options.clone();
        let current = window.bounds;
        let container = store.container_size();
        match self.state {
            InteractionState::Idle => false,
            InteractionState::Dragging(start) => {
                let delta = pointer.delta_from(start.pointer);
                let mut candidate = Rect {
                    x: start.origin.x + delta.dx,
                    y: start.origin.y + delta.dy,
                    ..current
                };
                if options.collision_detection {
                    let others: Vec<(WindowId, Rect)> = store
                        .open_windows()
                        .filter(|w| w.id != self.id)
                        .map(|w| (w.id.clone(), w.bounds))
                        .collect();
                    if !others.is_empty() {
                        let push = resolve_collisions_with_others(candidate, &others, &self.id);
                        candidate = candidate.translate(push);
                    }
                }
                let clamped = clamp_bounds(candidate, &options, container);
                store.update_bounds(&self.id, PartialRect::position(clamped.x, clamped.y));
                true
            }
            InteractionState::Resizing(start) => {
                let delta = pointer.delta_from(start.pointer);
                let resized = Rect {
                    width: (start.bounds.width + delta.dx).max(options.min_width),
                    height: (start.bounds.height + delta.dy).max(options.min_height),
                    ..start.bounds
                };
                let clamped = clamp_bounds(resized, &options, container);
                store.update_bounds(&self.id, clamped.into());
                true
            }
        }
    }

    /// Ends the active gesture. Returns `true` if one was active.
    pub fn pointer_up(&mut self) -> bool {
        let was_active = self.is_active();
        if was_active {
            tracing::debug!(window_id = %self.id, "interaction ended");
        }
        self.state = InteractionState::Idle;
        was_active
    }
}

/// Keeps `rect` inside the container and within the window's size limits.
///
/// When the container is smaller than the minimum size the position floor
/// of zero wins, so the window may extend past the container.
pub fn clamp_bounds(rect: Rect, options: &WindowOptions, container: Size) -> Rect {
    let min_w = options.min_width;
    let min_h = options.min_height;
    let max_w = options
        .max_width
        .map_or(container.width, |max| max.min(container.width));
    let max_h = options
        .max_height
        .map_or(container.height, |max| max.min(container.height));
    Rect {
        x: rect.x.min(container.width - min_w).max(0.0),
        y: rect.y.min(container.height - min_h).max(0.0),
        width: rect.width.min(max_w).max(min_w),
        height: rect.height.min(max_h).max(min_h),
    }
}
