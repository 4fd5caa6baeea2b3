//! Overlapping pane management with collision-aware dragging, plus a
//! proportional row/column split grid.
//!
//! The engine is pure geometry over `f64` pixels: [`window::WindowStore`]
//! owns the panes, [`window::WindowInteraction`] turns pointer gestures into
//! bounds updates, [`split::SplitGrid`] keeps split ratios, and
//! [`controller::ModalController`] ties them to keyboard, toolbar and
//! clipboard input. The `drivers`, `event_loop` and `ui` modules host the
//! engine in a terminal.

pub mod clipboard;
pub mod constants;
pub mod controller;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod keybindings;
pub mod scroll_sync;
pub mod split;
pub mod tracing_sub;
pub mod ui;
pub mod window;

pub use error::{SnapshotError, StoreError, WmError};
