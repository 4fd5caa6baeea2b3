//! Container-level coordination around a [`WindowStore`].
//!
//! The controller routes the single pointer to whichever window it hits,
//! runs toolbar and keyboard actions, and keeps scroll-sync registrations in
//! step with the window set.

use std::collections::HashMap;

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::clipboard::{LayoutClipboard, SystemClipboard};
use crate::constants::{GROW_ALL_FACTOR, SHRINK_ALL_FACTOR};
use crate::error::{StoreError, WmError};
use crate::geometry::{Point, Rect, Size};
use crate::keybindings::{Action, KeyBindings};
use crate::scroll_sync::{ScrollSync, ScrollSyncRegistry, ScrollSyncToken};
use crate::window::{
    AddWindow, CloseOutcome, LayoutSnapshot, PointerTarget, Window, WindowId, WindowInteraction,
    WindowOptions, WindowStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinimizedBarPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl MinimizedBarPosition {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Pixel geometry of the decorations drawn around every window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowChrome {
    pub header_height: f64,
    pub button_size: f64,
    pub button_inset: f64,
    pub resize_handle: f64,
}

impl Default for WindowChrome {
    fn default() -> Self {
        Self {
            header_height: 36.0,
            button_size: 24.0,
            button_inset: 6.0,
            resize_handle: 20.0,
        }
    }
}

impl WindowChrome {
    pub fn header_rect(&self, bounds: Rect) -> Rect {
        Rect::new(
            bounds.x,
            bounds.y,
            bounds.width,
            self.header_height.min(bounds.height),
        )
    }

    pub fn minimize_button_rect(&self, bounds: Rect) -> Rect {
        let header = self.header_rect(bounds);
        Rect::new(
            header.right() - self.button_inset - self.button_size,
            header.y + (header.height - self.button_size) / 2.0,
            self.button_size,
            self.button_size,
        )
    }

    pub fn resize_handle_rect(&self, bounds: Rect) -> Rect {
        Rect::new(
            bounds.right() - self.resize_handle,
            bounds.bottom() - self.resize_handle,
            self.resize_handle,
            self.resize_handle,
        )
    }

    /// Classifies `point` against a window. Buttons and handles only exist
    /// when the matching option is enabled.
    pub fn hit_test(&self, bounds: Rect, options: &WindowOptions, point: Point) -> Option<PointerTarget> {
        if !bounds.contains(point) {
            return None;
        }
        if options.minimizable && self.minimize_button_rect(bounds).contains(point) {
            return Some(PointerTarget::HeaderButton);
        }
        if self.header_rect(bounds).contains(point) {
            return Some(PointerTarget::Header);
        }
        if options.resizable && self.resize_handle_rect(bounds).contains(point) {
            return Some(PointerTarget::ResizeHandle);
        }
        Some(PointerTarget::Body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    pub minimized_bar_position: MinimizedBarPosition,
    pub shrink_factor: f64,
    pub grow_factor: f64,
    pub chrome: WindowChrome,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            minimized_bar_position: MinimizedBarPosition::default(),
            shrink_factor: SHRINK_ALL_FACTOR,
            grow_factor: GROW_ALL_FACTOR,
            chrome: WindowChrome::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    ShrinkAll,
    GrowAll,
    Redistribute,
    CopyLayout,
    PasteLayout,
}

impl ToolbarAction {
    pub const ALL: [ToolbarAction; 5] = [
        ToolbarAction::ShrinkAll,
        ToolbarAction::GrowAll,
        ToolbarAction::Redistribute,
        ToolbarAction::CopyLayout,
        ToolbarAction::PasteLayout,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolbarAction::ShrinkAll => "Shrink",
            ToolbarAction::GrowAll => "Grow",
            ToolbarAction::Redistribute => "Tile",
            ToolbarAction::CopyLayout => "Copy",
            ToolbarAction::PasteLayout => "Paste",
        }
    }

    fn from_action(action: Action) -> Option<Self> {
        match action {
            Action::ShrinkAll => Some(Self::ShrinkAll),
            Action::GrowAll => Some(Self::GrowAll),
            Action::Redistribute => Some(Self::Redistribute),
            Action::CopyLayout => Some(Self::CopyLayout),
            Action::PasteLayout => Some(Self::PasteLayout),
            _ => None,
        }
    }
}

/// What a pointer-down did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    /// A drag or resize began on the window.
    Started(WindowId),
    /// The window's minimize button was pressed.
    Minimized(WindowId),
    /// The pointer landed on a window without starting anything.
    Absorbed(WindowId),
    /// No window was hit; carries the close, if the backdrop triggered one.
    Backdrop(Option<CloseOutcome>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizedEntry {
    pub id: WindowId,
    pub label: String,
}

pub struct ModalController<C> {
    store: WindowStore<C>,
    interactions: HashMap<WindowId, WindowInteraction>,
    active: Option<WindowId>,
    scroll_sync: Box<dyn ScrollSync>,
    scroll_tokens: HashMap<WindowId, ScrollSyncToken>,
    clipboard: Box<dyn LayoutClipboard>,
    options: ControllerOptions,
    bindings: KeyBindings,
}

impl<C: Clone> ModalController<C> {
    pub fn new(container: Size, options: ControllerOptions) -> Self {
        Self {
            store: WindowStore::new(container),
            interactions: HashMap::new(),
            active: None,
            scroll_sync: Box::new(ScrollSyncRegistry::new()),
            scroll_tokens: HashMap::new(),
            clipboard: Box::new(SystemClipboard),
            options,
            bindings: KeyBindings::standard(),
        }
    }

    pub fn with_clipboard(mut self, clipboard: impl LayoutClipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_scroll_sync(mut self, scroll_sync: impl ScrollSync + 'static) -> Self {
        self.scroll_sync = Box::new(scroll_sync);
        self
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn store(&self) -> &WindowStore<C> {
        &self.store
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn scroll_sync(&self) -> &dyn ScrollSync {
        self.scroll_sync.as_ref()
    }

    pub fn active_window(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }

    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.store.set_container_size(Size::new(width, height));
    }

    pub fn add_window(&mut self, payload: AddWindow<C>) -> Result<(), StoreError> {
        let id = payload.id.clone();
        let group = payload.options.scroll_sync_group.clone();
        self.store.add_window(payload)?;
        self.interactions
            .insert(id.clone(), WindowInteraction::new(id.clone()));
        if let Some(group) = group {
            let token = self.scroll_sync.register(&group, &id);
            self.scroll_tokens.insert(id, token);
        }
        Ok(())
    }

    pub fn remove_window(&mut self, id: &str) {
        self.store.remove_window(id);
        self.forget(id);
    }

    /// Keyboard close signal: minimizes or removes the front-most window.
    pub fn request_close_topmost(&mut self) -> Option<CloseOutcome> {
        let outcome = self.store.close_topmost()?;
        self.after_close(&outcome);
        Some(outcome)
    }

    /// Maps a key press through the bindings and runs the controller-level
    /// part of the action. Host-level actions are returned untouched.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let action = self.bindings.action_for_key(key)?;
        if action == Action::CloseTopmost {
            self.request_close_topmost();
        } else if let Some(toolbar) = ToolbarAction::from_action(action) {
            if let Err(err) = self.toolbar(toolbar) {
                tracing::debug!(%err, ?toolbar, "toolbar action failed");
            }
        }
        Some(action)
    }

    /// Closes the topmost window when it opted into backdrop dismissal.
    pub fn backdrop_click(&mut self) -> Option<CloseOutcome> {
        let top = self.store.topmost_open()?;
        if !top.options.close_on_backdrop_click {
            return None;
        }
        self.request_close_topmost()
    }

    pub fn toolbar(&mut self, action: ToolbarAction) -> Result<(), WmError> {
        tracing::debug!(?action, "toolbar action");
        match action {
            ToolbarAction::ShrinkAll => self.store.scale_all(self.options.shrink_factor),
            ToolbarAction::GrowAll => self.store.scale_all(self.options.grow_factor),
            ToolbarAction::Redistribute => self.store.redistribute_equal(),
            ToolbarAction::CopyLayout => {
                self.copy_layout()?;
            }
            ToolbarAction::PasteLayout => self.paste_layout()?,
        }
        Ok(())
    }

    /// Writes the open-window layout to the clipboard. Returns `false` when
    /// there was nothing to copy.
    pub fn copy_layout(&mut self) -> Result<bool, WmError> {
        let snapshot = self.store.layout_snapshot();
        if snapshot.is_empty() {
            return Ok(false);
        }
        let text = snapshot.to_json()?;
        self.clipboard.write_text(&text)?;
        Ok(true)
    }

    /// Reads a layout from the clipboard and applies it. Text that is not a
    /// supported snapshot is ignored; only clipboard failures are errors.
    pub fn paste_layout(&mut self) -> Result<(), WmError> {
        let text = self.clipboard.read_text()?;
        match LayoutSnapshot::from_json(&text) {
            Ok(snapshot) => self.store.apply_layout_snapshot(&snapshot),
            Err(err) => tracing::debug!(%err, "ignored pasted layout"),
        }
        Ok(())
    }

    pub fn restore(&mut self, id: &str) {
        self.store.set_minimized(id, false);
    }

    pub fn minimized_entries(&self) -> Vec<MinimizedEntry> {
        self.store
            .minimized_windows()
            .map(|w| MinimizedEntry {
                id: w.id.clone(),
                label: w.label().to_string(),
            })
            .collect()
    }

    /// Open windows in paint order, back to front.
    pub fn ordered_open_windows(&self) -> Vec<&Window<C>> {
        let mut open: Vec<&Window<C>> = self.store.open_windows().collect();
        open.sort_by_key(|w| w.z_index);
        open
    }

    /// Routes a press to the topmost window under `point`. A gesture still
    /// in flight from a lost release is ended first.
    pub fn pointer_down(&mut self, point: Point) -> PointerOutcome {
        if let Some(stale) = self.active.take() {
            tracing::debug!(window_id = %stale, "ended gesture without release");
            if let Some(interaction) = self.interactions.get_mut(&stale) {
                interaction.pointer_up();
            }
        }
        let chrome = self.options.chrome;
        let hit = self
            .ordered_open_windows()
            .into_iter()
            .rev()
            .find_map(|w| {
                chrome
                    .hit_test(w.bounds, &w.options, point)
                    .map(|target| (w.id.clone(), target))
            });
        let Some((id, target)) = hit else {
            return PointerOutcome::Backdrop(self.backdrop_click());
        };
        if target == PointerTarget::HeaderButton {
            self.store.set_minimized(&id, true);
            return PointerOutcome::Minimized(id);
        }
        let interaction = self
            .interactions
            .entry(id.clone())
            .or_insert_with(|| WindowInteraction::new(id.clone()));
        if interaction.pointer_down(&mut self.store, target, point) {
            self.active = Some(id.clone());
            PointerOutcome::Started(id)
        } else {
            PointerOutcome::Absorbed(id)
        }
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        let Some(id) = self.active.as_ref() else {
            return false;
        };
        match self.interactions.get_mut(id) {
            Some(interaction) => interaction.pointer_move(&mut self.store, point),
            None => false,
        }
    }

    pub fn pointer_up(&mut self) -> bool {
        let Some(id) = self.active.take() else {
            return false;
        };
        self.interactions
            .get_mut(&id)
            .is_some_and(|interaction| interaction.pointer_up())
    }

    fn after_close(&mut self, outcome: &CloseOutcome) {
        if let CloseOutcome::Removed(id) = outcome {
            self.forget(id);
        }
    }

    fn forget(&mut self, id: &str) {
        self.interactions.remove(id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        if let Some(token) = self.scroll_tokens.remove(id) {
            self.scroll_sync.unregister(&token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn controller() -> ModalController<()> {
        ModalController::new(Size::new(800.0, 600.0), ControllerOptions::default())
            .with_clipboard(MemoryClipboard::new())
    }

    fn add(ctl: &mut ModalController<()>, id: &str, bounds: Rect, options: WindowOptions) {
        ctl.add_window(AddWindow::new(id, ()).bounds(bounds).options(options))
            .unwrap();
    }

    #[test]
    fn chrome_hit_regions() {
        let chrome = WindowChrome::default();
        let bounds = Rect::new(100.0, 100.0, 300.0, 200.0);
        let opts = WindowOptions::default();
        assert_eq!(chrome.hit_test(bounds, &opts, Point::new(150.0, 110.0)), Some(PointerTarget::Header));
        assert_eq!(chrome.hit_test(bounds, &opts, Point::new(380.0, 118.0)), Some(PointerTarget::HeaderButton));
        assert_eq!(chrome.hit_test(bounds, &opts, Point::new(395.0, 295.0)), Some(PointerTarget::ResizeHandle));
        assert_eq!(chrome.hit_test(bounds, &opts, Point::new(200.0, 200.0)), Some(PointerTarget::Body));
        assert_eq!(chrome.hit_test(bounds, &opts, Point::new(50.0, 50.0)), None);
        let fixed = WindowOptions {
            minimizable: false,
            resizable: false,
            ..WindowOptions::default()
        };
        assert_eq!(chrome.hit_test(bounds, &fixed, Point::new(380.0, 118.0)), Some(PointerTarget::Header));
        assert_eq!(chrome.hit_test(bounds, &fixed, Point::new(395.0, 295.0)), Some(PointerTarget::Body));
    }

    #[test]
    fn pointer_routes_to_topmost_hit() {
        let mut ctl = controller();
        add(&mut ctl, "a", Rect::new(0.0, 0.0, 300.0, 200.0), WindowOptions::default());
        add(&mut ctl, "b", Rect::new(0.0, 0.0, 300.0, 200.0), WindowOptions::default());
        assert_eq!(ctl.pointer_down(Point::new(10.0, 10.0)), PointerOutcome::Started("b".into()));
        ctl.pointer_move(Point::new(60.0, 40.0));
        assert!(ctl.pointer_up());
        assert_eq!(ctl.store().window("b").unwrap().bounds.origin(), Point::new(50.0, 30.0));
        assert_eq!(ctl.store().window("a").unwrap().bounds.origin(), Point::new(0.0, 0.0));
        assert!(!ctl.pointer_move(Point::new(0.0, 0.0)));
    }

    #[test]
    fn press_without_release_ends_previous_gesture() {
        let mut ctl = controller();
        add(&mut ctl, "a", Rect::new(0.0, 0.0, 300.0, 200.0), WindowOptions::default());
        add(&mut ctl, "b", Rect::new(400.0, 300.0, 300.0, 200.0), WindowOptions::default());
        assert_eq!(ctl.pointer_down(Point::new(20.0, 10.0)), PointerOutcome::Started("a".into()));
        assert_eq!(ctl.pointer_down(Point::new(420.0, 310.0)), PointerOutcome::Started("b".into()));
        assert_eq!(ctl.active_window(), Some(&"b".to_string()));
        assert!(ctl.pointer_up());

        assert_eq!(ctl.pointer_down(Point::new(20.0, 10.0)), PointerOutcome::Started("a".into()));
        ctl.pointer_move(Point::new(120.0, 110.0));
        ctl.pointer_up();
        assert_eq!(ctl.store().window("a").unwrap().bounds, Rect::new(100.0, 100.0, 300.0, 200.0));
    }

    #[test]
    fn minimize_button_minimizes() {
        let mut ctl = controller();
        add(&mut ctl, "a", Rect::new(0.0, 0.0, 300.0, 200.0), WindowOptions::default());
        assert_eq!(ctl.pointer_down(Point::new(280.0, 18.0)), PointerOutcome::Minimized("a".into()));
        assert_eq!(
            ctl.minimized_entries(),
            vec![MinimizedEntry { id: "a".into(), label: "a".into() }]
        );
        ctl.restore("a");
        assert!(ctl.minimized_entries().is_empty());
    }

    #[test]
    fn backdrop_respects_topmost_option() {
        let mut ctl = controller();
        add(&mut ctl, "a", Rect::new(0.0, 0.0, 300.0, 200.0), WindowOptions::default());
        assert_eq!(ctl.pointer_down(Point::new(700.0, 500.0)), PointerOutcome::Backdrop(None));
        let opts = WindowOptions {
            close_on_backdrop_click: true,
            ..WindowOptions::default()
        };
        add(&mut ctl, "b", Rect::new(0.0, 300.0, 300.0, 200.0), opts);
        assert_eq!(
            ctl.pointer_down(Point::new(700.0, 500.0)),
            PointerOutcome::Backdrop(Some(CloseOutcome::Minimized("b".into())))
        );
    }

    #[test]
    fn escape_closes_topmost_and_ignores_release() {
        let mut ctl = controller();
        add(&mut ctl, "a", Rect::new(0.0, 0.0, 300.0, 200.0), WindowOptions::default());
        let mut release = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(ctl.handle_key(&release), None);
        let press = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(ctl.handle_key(&press), Some(Action::CloseTopmost));
        assert!(ctl.store().window("a").unwrap().minimized);
    }

    #[test]
    fn removed_window_releases_scroll_sync() {
        let mut ctl = controller();
        let opts = WindowOptions {
            minimizable: false,
            scroll_sync_group: Some("logs".into()),
            ..WindowOptions::default()
        };
        add(&mut ctl, "a", Rect::new(0.0, 0.0, 300.0, 200.0), opts);
        assert_eq!(ctl.scroll_sync().members("logs"), vec!["a"]);
        assert_eq!(ctl.request_close_topmost(), Some(CloseOutcome::Removed("a".into())));
        assert!(ctl.scroll_sync().members("logs").is_empty());
    }

    #[test]
    fn copy_skips_empty_and_paste_ignores_garbage() {
        let mut ctl = ModalController::<()>::new(Size::new(800.0, 600.0), ControllerOptions::default())
            .with_clipboard(MemoryClipboard::with_text("not json"));
        assert!(!ctl.copy_layout().unwrap());
        add(&mut ctl, "a", Rect::new(10.0, 10.0, 300.0, 200.0), WindowOptions::default());
        ctl.toolbar(ToolbarAction::PasteLayout).unwrap();
        assert_eq!(ctl.store().window("a").unwrap().bounds, Rect::new(10.0, 10.0, 300.0, 200.0));
        assert!(ctl.copy_layout().unwrap());
        ctl.toolbar(ToolbarAction::Redistribute).unwrap();
        ctl.toolbar(ToolbarAction::PasteLayout).unwrap();
        assert_eq!(ctl.store().window("a").unwrap().bounds, Rect::new(10.0, 10.0, 300.0, 200.0));
    }
}
