//! Proportional row/column grid with draggable dividers.
//!
//! Ratios are percentages per axis that always sum to 100 and never drop
//! below the configured floor. A divider drag only rebalances the two cells
//! it separates, using the pointer delta since the previous move. Resizing
//! the outer box changes the pixels the percentages apply to, never the
//! percentages themselves.

pub mod ratios;
pub mod snapshot;

pub use snapshot::SplitLayoutSnapshot;

use std::fmt;

use crate::constants::{DEFAULT_MIN_OUTER_SIZE, DEFAULT_MIN_SPLIT_PERCENT, SPLIT_DIVIDER_THICKNESS};
use crate::geometry::{Point, Rect, Size};
use ratios::{equal_split, normalize_percent, shift_divider};

/// Which set of ratios a divider adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Horizontal divider between two rows; dragged vertically.
    Rows,
    /// Vertical divider between two columns; dragged horizontally.
    Columns,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitOptions {
    pub rows: usize,
    pub cols: usize,
    pub initial_row_heights: Option<Vec<f64>>,
    pub initial_col_widths: Option<Vec<f64>>,
    pub min_row_height_percent: f64,
    pub min_col_width_percent: f64,
    /// Whether the outer box exposes its corner resize handle.
    pub resizable: bool,
    pub min_outer: Size,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            initial_row_heights: None,
            initial_col_widths: None,
            min_row_height_percent: DEFAULT_MIN_SPLIT_PERCENT,
            min_col_width_percent: DEFAULT_MIN_SPLIT_PERCENT,
            resizable: true,
            min_outer: DEFAULT_MIN_OUTER_SIZE,
        }
    }
}

impl SplitOptions {
    pub fn grid(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerHit {
    pub axis: SplitAxis,
    pub index: usize,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SplitDrag {
    #[default]
    Idle,
    Divider {
        axis: SplitAxis,
        index: usize,
        last: Point,
    },
    OuterResize {
        pointer: Point,
        size: Size,
    },
}

type LayoutListener = Box<dyn FnMut(&SplitLayoutSnapshot)>;
type ResizeListener = Box<dyn FnMut(Size)>;

pub struct SplitGrid {
    rows: usize,
    cols: usize,
    row_heights: Vec<f64>,
    col_widths: Vec<f64>,
    min_row_percent: f64,
    min_col_percent: f64,
    resizable: bool,
    min_outer: Size,
    extent: Size,
    outer_size: Option<Size>,
    drag: SplitDrag,
    on_layout_change: Option<LayoutListener>,
    on_resize: Option<ResizeListener>,
}

impl fmt::Debug for SplitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitGrid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("row_heights", &self.row_heights)
            .field("col_widths", &self.col_widths)
            .field("extent", &self.extent)
            .field("outer_size", &self.outer_size)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl SplitGrid {
    pub fn new(options: SplitOptions) -> Self {
        let rows = options.rows.max(1);
        let cols = options.cols.max(1);
        let row_heights = initial_ratios(
            options.initial_row_heights.as_deref(),
            rows,
            options.min_row_height_percent,
        );
        let col_widths = initial_ratios(
            options.initial_col_widths.as_deref(),
            cols,
            options.min_col_width_percent,
        );
        Self {
            rows,
            cols,
            row_heights,
            col_widths,
            min_row_percent: options.min_row_height_percent,
            min_col_percent: options.min_col_width_percent,
            resizable: options.resizable,
            min_outer: options.min_outer,
            extent: Size::default(),
            outer_size: None,
            drag: SplitDrag::Idle,
            on_layout_change: None,
            on_resize: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row_heights(&self) -> &[f64] {
        &self.row_heights
    }

    pub fn col_widths(&self) -> &[f64] {
        &self.col_widths
    }

    pub fn drag(&self) -> SplitDrag {
        self.drag
    }

    pub fn resizable(&self) -> bool {
        self.resizable
    }

    /// Registers the listener invoked once per completed divider drag and on
    /// every paste.
    pub fn on_layout_change(&mut self, listener: impl FnMut(&SplitLayoutSnapshot) + 'static) {
        self.on_layout_change = Some(Box::new(listener));
    }

    /// Registers the listener invoked whenever the grid's pixel extent changes.
    pub fn on_resize(&mut self, listener: impl FnMut(Size) + 'static) {
        self.on_resize = Some(Box::new(listener));
    }

    pub fn container_extent(&self) -> Size {
        self.extent
    }

    /// Records the rendered pixel size that percentages are resolved against.
    pub fn set_container_extent(&mut self, extent: Size) {
        if self.extent == extent {
            return;
        }
        self.extent = extent;
        if let Some(listener) = self.on_resize.as_mut() {
            listener(extent);
        }
    }

    /// Size set by the outer corner handle, if it was ever dragged.
    pub fn outer_size(&self) -> Option<Size> {
        self.outer_size
    }

    pub fn begin_divider_drag(&mut self, axis: SplitAxis, index: usize, pointer: Point) -> bool {
        let count = match axis {
            SplitAxis::Rows => self.rows,
            SplitAxis::Columns => self.cols,
        };
        if index + 1 >= count || self.drag != SplitDrag::Idle {
            return false;
        }
        tracing::debug!(?axis, index, "divider drag started");
        self.drag = SplitDrag::Divider {
            axis,
            index,
            last: pointer,
        };
        true
    }

    /// Starts dragging the outer corner from the box's current rendered size.
    pub fn begin_outer_resize(&mut self, pointer: Point, current: Size) -> bool {
        if !self.resizable || self.drag != SplitDrag::Idle {
            return false;
        }
        self.outer_size = Some(current);
        self.drag = SplitDrag::OuterResize {
            pointer,
            size: current,
        };
        true
    }

    /// Hit-tests the dividers of `area` and starts a divider drag on a hit.
    pub fn pointer_down(&mut self, area: Rect, pointer: Point) -> bool {
        match self.divider_at(area, pointer) {
            Some(hit) => self.begin_divider_drag(hit.axis, hit.index, pointer),
            None => false,
        }
    }

    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        match self.drag {
            SplitDrag::Idle => false,
            SplitDrag::Divider { axis, index, last } => {
                let delta = pointer.delta_from(last);
                match axis {
                    SplitAxis::Rows if self.extent.height > 0.0 => {
                        let percent = delta.dy / self.extent.height * 100.0;
                        shift_divider(&mut self.row_heights, index, percent, self.min_row_percent);
                    }
                    SplitAxis::Columns if self.extent.width > 0.0 => {
                        let percent = delta.dx / self.extent.width * 100.0;
                        shift_divider(&mut self.col_widths, index, percent, self.min_col_percent);
                    }
                    _ => {}
                }
                self.drag = SplitDrag::Divider {
                    axis,
                    index,
                    last: pointer,
                };
                true
            }
            SplitDrag::OuterResize { pointer: start, size } => {
                let delta = pointer.delta_from(start);
                self.outer_size = Some(Size {
                    width: (size.width + delta.dx).max(self.min_outer.width),
                    height: (size.height + delta.dy).max(self.min_outer.height),
                });
                true
            }
        }
    }

    /// Ends the active drag. A finished divider drag notifies the layout
    /// listener exactly once.
    pub fn pointer_up(&mut self) -> bool {
        let previous = std::mem::take(&mut self.drag);
        match previous {
            SplitDrag::Idle => false,
            SplitDrag::Divider { .. } => {
                let snapshot = self.layout_snapshot();
                tracing::debug!(rows = ?snapshot.row_heights, cols = ?snapshot.col_widths, "divider drag finished");
                self.notify_layout_change(&snapshot);
                true
            }
            SplitDrag::OuterResize { .. } => true,
        }
    }

    pub fn layout_snapshot(&self) -> SplitLayoutSnapshot {
        SplitLayoutSnapshot::new(self.row_heights.clone(), self.col_widths.clone())
    }

    /// Applies each axis independently, and only when its length matches the
    /// live row/column count.
    pub fn apply_layout_snapshot(&mut self, snapshot: &SplitLayoutSnapshot) {
        if !snapshot.is_supported() {
            tracing::debug!(version = snapshot.version, "ignored split snapshot");
            return;
        }
        if snapshot.row_heights.len() == self.rows {
            self.row_heights = normalize_percent(&snapshot.row_heights, self.min_row_percent);
        }
        if snapshot.col_widths.len() == self.cols {
            self.col_widths = normalize_percent(&snapshot.col_widths, self.min_col_percent);
        }
    }

    /// Applies a pasted snapshot and forwards it to the layout listener.
    pub fn paste_layout(&mut self, snapshot: &SplitLayoutSnapshot) {
        if !snapshot.is_supported() {
            return;
        }
        self.apply_layout_snapshot(snapshot);
        self.notify_layout_change(snapshot);
    }

    /// Pixel rectangles for every cell of `area`, row-major.
    pub fn cell_rects(&self, area: Rect) -> Vec<Rect> {
        let rows = spans(area.y, area.height, &self.row_heights);
        let cols = spans(area.x, area.width, &self.col_widths);
        let mut cells = Vec::with_capacity(self.rows * self.cols);
        for &(y, height) in &rows {
            for &(x, width) in &cols {
                cells.push(Rect::new(x, y, width, height));
            }
        }
        cells
    }

    pub fn divider_rects(&self, area: Rect) -> Vec<DividerHit> {
        let rows = spans(area.y, area.height, &self.row_heights);
        let cols = spans(area.x, area.width, &self.col_widths);
        let mut hits = Vec::new();
        for (index, &(y, height)) in rows.iter().enumerate().take(self.rows - 1) {
            hits.push(DividerHit {
                axis: SplitAxis::Rows,
                index,
                rect: Rect::new(area.x, y + height, area.width, SPLIT_DIVIDER_THICKNESS),
            });
        }
        for &(y, height) in &rows {
            for (index, &(x, width)) in cols.iter().enumerate().take(self.cols - 1) {
                hits.push(DividerHit {
                    axis: SplitAxis::Columns,
                    index,
                    rect: Rect::new(x + width, y, SPLIT_DIVIDER_THICKNESS, height),
                });
            }
        }
        hits
    }

    pub fn divider_at(&self, area: Rect, point: Point) -> Option<DividerHit> {
        self.divider_rects(area)
            .into_iter()
            .find(|hit| hit.rect.contains(point))
    }

    fn notify_layout_change(&mut self, snapshot: &SplitLayoutSnapshot) {
        if let Some(listener) = self.on_layout_change.as_mut() {
            listener(snapshot);
        }
    }
}

fn initial_ratios(initial: Option<&[f64]>, count: usize, min: f64) -> Vec<f64> {
    match initial {
        Some(values) if values.len() == count => normalize_percent(values, min),
        _ => equal_split(count),
    }
}

/// (offset, length) of each cell along one axis, leaving divider gaps.
fn spans(start: f64, length: f64, ratios: &[f64]) -> Vec<(f64, f64)> {
    let gaps = ratios.len().saturating_sub(1) as f64 * SPLIT_DIVIDER_THICKNESS;
    let available = (length - gaps).max(0.0);
    let mut offset = start;
    ratios
        .iter()
        .map(|pct| {
            let size = available * pct / 100.0;
            let span = (offset, size);
            offset += size + SPLIT_DIVIDER_THICKNESS;
            span
        })
        .collect()
}
