use std::sync::Arc;

use super::{LayoutSnapshot, PartialRect, Window, WindowId, WindowOptions};
use crate::constants::{
    DEFAULT_BOUNDS_FRACTION, DEFAULT_BOUNDS_HEIGHT_RANGE, DEFAULT_BOUNDS_WIDTH_RANGE,
    HEADLESS_CONTAINER_SIZE,
};
use crate::error::StoreError;
use crate::geometry::{Rect, Size};

/// Payload for [`WindowStore::add_window`].
#[derive(Debug, Clone)]
pub struct AddWindow<C> {
    pub id: WindowId,
    pub content: C,
    pub title: Option<String>,
    pub options: WindowOptions,
    pub bounds: PartialRect,
}

impl<C> AddWindow<C> {
    pub fn new(id: impl Into<WindowId>, content: C) -> Self {
        Self {
            id: id.into(),
            content,
            title: None,
            options: WindowOptions::default(),
            bounds: PartialRect::default(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn options(mut self, options: WindowOptions) -> Self {
        self.options = options;
        self
    }

    pub fn bounds(mut self, bounds: impl Into<PartialRect>) -> Self {
        self.bounds = bounds.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Minimized(WindowId),
    Removed(WindowId),
}

impl CloseOutcome {
    pub fn id(&self) -> &WindowId {
        match self {
            CloseOutcome::Minimized(id) | CloseOutcome::Removed(id) => id,
        }
    }
}

/// Every mutation the store accepts, for hosts that funnel input through a
/// single writer instead of calling the methods directly.
#[derive(Debug, Clone)]
pub enum WindowCommand<C> {
    SetContainerSize(Size),
    Add(AddWindow<C>),
    Remove(WindowId),
    UpdateBounds { id: WindowId, bounds: PartialRect },
    SetMinimized { id: WindowId, minimized: bool },
    BringToFront(WindowId),
    RedistributeEqual,
    CloseTopmost,
    ScaleAll(f64),
    ApplySnapshot(LayoutSnapshot),
}

/// Authoritative state for the set of windows.
///
/// The collection lives behind an `Arc`; every command replaces it with a new
/// value, so a reader holding the result of [`WindowStore::windows`] keeps a
/// consistent view while the store moves on.
#[derive(Debug, Clone)]
pub struct WindowStore<C> {
    windows: Arc<Vec<Window<C>>>,
    container: Size,
    next_z: u64,
}

impl<C: Clone> Default for WindowStore<C> {
    fn default() -> Self {
        Self::new(HEADLESS_CONTAINER_SIZE)
    }
}

impl<C: Clone> WindowStore<C> {
    pub fn new(container: Size) -> Self {
        Self {
            windows: Arc::new(Vec::new()),
            container,
            next_z: 1,
        }
    }

    pub fn apply(&mut self, command: WindowCommand<C>) -> Result<(), StoreError> {
        match command {
            WindowCommand::SetContainerSize(size) => self.set_container_size(size),
            WindowCommand::Add(payload) => self.add_window(payload)?,
            WindowCommand::Remove(id) => self.remove_window(&id),
            WindowCommand::UpdateBounds { id, bounds } => self.update_bounds(&id, bounds),
            WindowCommand::SetMinimized { id, minimized } => self.set_minimized(&id, minimized),
            WindowCommand::BringToFront(id) => self.bring_to_front(&id),
            WindowCommand::RedistributeEqual => self.redistribute_equal(),
            WindowCommand::CloseTopmost => {
                self.close_topmost();
            }
            WindowCommand::ScaleAll(factor) => self.scale_all(factor),
            WindowCommand::ApplySnapshot(snapshot) => self.apply_layout_snapshot(&snapshot),
        }
        Ok(())
    }

    pub fn container_size(&self) -> Size {
        self.container
    }

    pub fn set_container_size(&mut self, size: Size) {
        tracing::debug!(width = size.width, height = size.height, "container resized");
        self.container = size;
    }

    /// Mints the next stacking value. Values are never reused.
    pub fn next_z_index(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z = self.next_z.saturating_add(1);
        z
    }

    /// Cheap shared handle to the current collection, in insertion order.
    pub fn windows(&self) -> Arc<Vec<Window<C>>> {
        Arc::clone(&self.windows)
    }

    pub fn window(&self, id: &str) -> Option<&Window<C>> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.window(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn open_windows(&self) -> impl Iterator<Item = &Window<C>> {
        self.windows.iter().filter(|w| w.is_open())
    }

    pub fn minimized_windows(&self) -> impl Iterator<Item = &Window<C>> {
        self.windows.iter().filter(|w| w.minimized)
    }

    pub fn topmost_open(&self) -> Option<&Window<C>> {
        self.open_windows().max_by_key(|w| w.z_index)
    }

    pub fn add_window(&mut self, payload: AddWindow<C>) -> Result<(), StoreError> {
        if self.contains(&payload.id) {
            tracing::debug!(window_id = %payload.id, "rejected duplicate window id");
            return Err(StoreError::DuplicateId(payload.id));
        }
        let bounds = payload.bounds.merge_into(default_bounds(self.container));
        let z_index = self.next_z_index();
        tracing::debug!(window_id = %payload.id, z_index, ?bounds, "added window");
        let window = Window {
            id: payload.id,
            bounds,
            z_index,
            minimized: false,
            title: payload.title,
            content: payload.content,
            options: payload.options,
        };
        Arc::make_mut(&mut self.windows).push(window);
        Ok(())
    }

    pub fn remove_window(&mut self, id: &str) {
        if !self.contains(id) {
            return;
        }
        tracing::debug!(window_id = %id, "removed window");
        Arc::make_mut(&mut self.windows).retain(|w| w.id != id);
    }

    /// Merges `partial` into the window's bounds without clamping.
    pub fn update_bounds(&mut self, id: &str, partial: PartialRect) {
        if let Some(window) = self.window_mut(id) {
            window.bounds = partial.merge_into(window.bounds);
            tracing::trace!(window_id = %id, bounds = ?window.bounds, "updated bounds");
        }
    }

    pub fn set_minimized(&mut self, id: &str, minimized: bool) {
        if let Some(window) = self.window_mut(id) {
            window.minimized = minimized;
            tracing::debug!(window_id = %id, minimized, "set minimized");
        }
    }

    pub fn bring_to_front(&mut self, id: &str) {
        if !self.contains(id) {
            return;
        }
        let z = self.next_z_index();
        if let Some(window) = self.window_mut(id) {
            window.z_index = z;
            tracing::debug!(window_id = %id, z_index = z, "brought to front");
        }
    }

    /// Tiles the open windows row-major over the full container in a
    /// `ceil(sqrt(n))`-column grid.
    pub fn redistribute_equal(&mut self) {
        let open = self.open_windows().count();
        if open == 0 {
            return;
        }
        let cols = (open as f64).sqrt().ceil() as usize;
        let rows = open.div_ceil(cols);
        let cell_w = self.container.width / cols as f64;
        let cell_h = self.container.height / rows as f64;
        tracing::debug!(open, cols, rows, "redistributing windows");
        let windows = Arc::make_mut(&mut self.windows);
        for (slot, window) in windows.iter_mut().filter(|w| w.is_open()).enumerate() {
            let col = slot % cols;
            let row = slot / cols;
            window.bounds = Rect::new(col as f64 * cell_w, row as f64 * cell_h, cell_w, cell_h);
        }
    }

    /// Minimizes the front-most open window, or removes it when it cannot be
    /// minimized. Returns what happened, if anything.
    pub fn close_topmost(&mut self) -> Option<CloseOutcome> {
        let top = self.topmost_open()?;
        let id = top.id.clone();
        if top.options.minimizable {
            self.set_minimized(&id, true);
            Some(CloseOutcome::Minimized(id))
        } else {
            self.remove_window(&id);
            Some(CloseOutcome::Removed(id))
        }
    }

    /// Scales every open window about the origin, then keeps it inside the
    /// container and above its own minimum size.
    pub fn scale_all(&mut self, factor: f64) {
        if self.open_windows().next().is_none() {
            return;
        }
        let container = self.container;
        tracing::debug!(factor, "scaling all windows");
        let windows = Arc::make_mut(&mut self.windows);
        for window in windows.iter_mut().filter(|w| w.is_open()) {
            let b = window.bounds;
            let min_w = window.options.min_width;
            let min_h = window.options.min_height;
            let x = (b.x * factor).min(container.width - min_w).max(0.0);
            let y = (b.y * factor).min(container.height - min_h).max(0.0);
            let width = (b.width * factor).min(container.width - x).max(min_w);
            let height = (b.height * factor).min(container.height - y).max(min_h);
            window.bounds = Rect::new(x, y, width, height);
        }
    }

    pub fn layout_snapshot(&self) -> LayoutSnapshot {
        let mut snapshot = LayoutSnapshot::default();
        for window in self.open_windows() {
            snapshot
                .bounds_by_id
                .insert(window.id.clone(), window.bounds);
        }
        snapshot
    }

    /// Restores bounds for open windows named in `snapshot`; everything else
    /// is left alone. Unsupported versions are ignored.
    pub fn apply_layout_snapshot(&mut self, snapshot: &LayoutSnapshot) {
        if !snapshot.is_supported() {
            tracing::debug!(version = snapshot.version, "ignored layout snapshot");
            return;
        }
        let container = self.container;
        let windows = Arc::make_mut(&mut self.windows);
        for window in windows.iter_mut().filter(|w| w.is_open()) {
            let Some(b) = snapshot.bounds_by_id.get(&window.id) else {
                continue;
            };
            let min_w = window.options.min_width;
            let min_h = window.options.min_height;
            window.bounds = Rect {
                x: b.x.min(container.width - min_w).max(0.0),
                y: b.y.min(container.height - min_h).max(0.0),
                width: b.width.min(container.width - b.x).max(min_w),
                height: b.height.min(container.height - b.y).max(min_h),
            };
            tracing::trace!(window_id = %window.id, bounds = ?window.bounds, "applied snapshot bounds");
        }
    }

    fn window_mut(&mut self, id: &str) -> Option<&mut Window<C>> {
        if !self.contains(id) {
            return None;
        }
        Arc::make_mut(&mut self.windows)
            .iter_mut()
            .find(|w| w.id == id)
    }
}

/// Centered rectangle covering 40% of each container side, clamped to the
/// documented pixel ranges.
pub fn default_bounds(container: Size) -> Rect {
    let (min_w, max_w) = DEFAULT_BOUNDS_WIDTH_RANGE;
    let (min_h, max_h) = DEFAULT_BOUNDS_HEIGHT_RANGE;
    let width = (container.width * DEFAULT_BOUNDS_FRACTION).max(min_w).min(max_w);
    let height = (container.height * DEFAULT_BOUNDS_FRACTION)
        .max(min_h)
        .min(max_h);
    Rect {
        x: (container.width - width) / 2.0,
        y: (container.height - height) / 2.0,
        width,
        height,
    }
}
