//! Terminal rendering for the demo host.
//!
//! The engine works in pixels; the terminal works in cells. [`CellMetrics`]
//! converts between the two so pointer events can be fed to the engine and
//! window bounds can be painted. Everything draws straight into a ratatui
//! `Buffer`, clipped to the target area.

use std::fmt;

use indoc::indoc;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::controller::{
    MinimizedBarPosition, MinimizedEntry, ModalController, ToolbarAction, WindowChrome,
};
use crate::geometry::{Point, Rect, Size};
use crate::keybindings::KeyBindings;
use crate::split::{SplitAxis, SplitGrid};
use crate::window::WindowId;

pub const HELP_TEXT: &str = indoc! {"
    Drag a window by its title bar and resize it from the corner marked with a
    triangle. Click [-] to minimize; minimized windows are listed in the bar
    and restored by clicking them. Toolbar buttons act on every open window.
"};

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

impl CellMetrics {
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    pub fn area_size(&self, area: CellRect) -> Size {
        Size::new(
            f64::from(area.width) * self.cell_width,
            f64::from(area.height) * self.cell_height,
        )
    }

    /// Pixel position of the centre of cell (`column`, `row`), relative to
    /// the top-left of `area`.
    pub fn cell_to_px(&self, area: CellRect, column: u16, row: u16) -> Point {
        let col = f64::from(column.saturating_sub(area.x));
        let row = f64::from(row.saturating_sub(area.y));
        Point::new(
            (col + 0.5) * self.cell_width,
            (row + 0.5) * self.cell_height,
        )
    }

    /// Window decorations sized to what the renderer draws: a one-row title
    /// bar, a three-column `[-]` button one column in from the right edge,
    /// and a one-cell resize corner.
    pub fn window_chrome(&self) -> WindowChrome {
        WindowChrome {
            header_height: self.cell_height,
            button_size: 3.0 * self.cell_width,
            button_inset: self.cell_width,
            resize_handle: self.cell_width.max(self.cell_height),
        }
    }

    /// Cells covering `rect`, offset into `area` and clipped to it.
    pub fn px_to_cells(&self, area: CellRect, rect: Rect) -> CellRect {
        let x0 = (rect.x / self.cell_width).round().max(0.0);
        let y0 = (rect.y / self.cell_height).round().max(0.0);
        let x1 = (rect.right() / self.cell_width).round().max(x0 + 1.0);
        let y1 = (rect.bottom() / self.cell_height).round().max(y0 + 1.0);
        let cells = CellRect {
            x: area.x.saturating_add(to_u16(x0)),
            y: area.y.saturating_add(to_u16(y0)),
            width: to_u16(x1 - x0),
            height: to_u16(y1 - y0),
        };
        cells.intersection(area)
    }
}

fn to_u16(value: f64) -> u16 {
    value.clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Clickable overlay regions produced by the last render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayHits {
    pub toolbar: Vec<(ToolbarAction, CellRect)>,
    pub minimized: Vec<(WindowId, CellRect)>,
}

impl OverlayHits {
    pub fn toolbar_at(&self, column: u16, row: u16) -> Option<ToolbarAction> {
        self.toolbar
            .iter()
            .find(|(_, r)| cell_contains(*r, column, row))
            .map(|(action, _)| *action)
    }

    pub fn minimized_at(&self, column: u16, row: u16) -> Option<&WindowId> {
        self.minimized
            .iter()
            .find(|(_, r)| cell_contains(*r, column, row))
            .map(|(id, _)| id)
    }
}

fn cell_contains(rect: CellRect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Toolbar buttons centred on the top row of `area`.
pub fn toolbar_layout(area: CellRect) -> Vec<(ToolbarAction, CellRect)> {
    if area.height == 0 {
        return Vec::new();
    }
    let widths: Vec<u16> = ToolbarAction::ALL
        .iter()
        .map(|a| a.label().len() as u16 + 2)
        .collect();
    let total: u16 = widths.iter().sum::<u16>() + widths.len().saturating_sub(1) as u16;
    let mut x = area.x + area.width.saturating_sub(total) / 2;
    let mut out = Vec::with_capacity(widths.len());
    for (action, width) in ToolbarAction::ALL.iter().zip(widths) {
        let rect = CellRect::new(x, area.y, width, 1).intersection(area);
        if rect.width > 0 {
            out.push((*action, rect));
        }
        x = x.saturating_add(width + 1);
    }
    out
}

/// One button per minimized window along the configured edge of `area`.
pub fn minimized_bar_layout(
    area: CellRect,
    entries: &[MinimizedEntry],
    position: MinimizedBarPosition,
) -> Vec<(WindowId, CellRect)> {
    const MAX_LABEL: usize = 16;
    if area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(entries.len());
    let mut cursor = 0u16;
    for entry in entries {
        let width = (entry.label.chars().count().min(MAX_LABEL) + 2) as u16;
        let rect = match position {
            MinimizedBarPosition::Top => CellRect::new(area.x + cursor, area.y + 1, width, 1),
            MinimizedBarPosition::Bottom => {
                CellRect::new(area.x + cursor, area.bottom().saturating_sub(1), width, 1)
            }
            MinimizedBarPosition::Left => {
                CellRect::new(area.x, area.y + 1 + cursor, MAX_LABEL as u16 + 2, 1)
            }
            MinimizedBarPosition::Right => CellRect::new(
                area.right().saturating_sub(MAX_LABEL as u16 + 2),
                area.y + 1 + cursor,
                MAX_LABEL as u16 + 2,
                1,
            ),
        }
        .intersection(area);
        if rect.width == 0 || rect.height == 0 {
            break;
        }
        out.push((entry.id.clone(), rect));
        cursor = if position.is_vertical() {
            cursor.saturating_add(1)
        } else {
            cursor.saturating_add(width + 1)
        };
    }
    out
}

/// Paints every open window back to front, then the toolbar and the
/// minimized bar. Returns the overlay hit regions for the host.
pub fn render_controller<C: Clone + fmt::Display>(
    buf: &mut Buffer,
    area: CellRect,
    controller: &ModalController<C>,
    metrics: CellMetrics,
) -> OverlayHits {
    Clear.render(area, buf);
    for window in controller.ordered_open_windows() {
        let rect = metrics.px_to_cells(area, window.bounds);
        if rect.width < 2 || rect.height < 2 {
            continue;
        }
        let focused = controller.active_window() == Some(&window.id)
            || controller.store().topmost_open().map(|w| &w.id) == Some(&window.id);
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Clear.render(rect, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", window.label()));
        let inner = block.inner(rect);
        block.render(rect, buf);
        Paragraph::new(window.content.to_string())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
        if window.options.minimizable && rect.width >= 8 {
            buf.set_string(rect.right() - 4, rect.y, "[-]", border.add_modifier(Modifier::BOLD));
        }
        if window.options.resizable {
            buf.set_string(rect.right() - 1, rect.bottom() - 1, "◢", border);
        }
    }

    let mut hits = OverlayHits::default();
    if controller.store().open_windows().next().is_some() {
        hits.toolbar = toolbar_layout(area);
        let style = Style::default().fg(Color::Black).bg(Color::Gray);
        for (action, rect) in &hits.toolbar {
            buf.set_stringn(
                rect.x,
                rect.y,
                format!("[{}]", action.label()),
                usize::from(rect.width),
                style,
            );
        }
    }

    let entries = controller.minimized_entries();
    hits.minimized = minimized_bar_layout(area, &entries, controller.options().minimized_bar_position);
    let style = Style::default().fg(Color::White).bg(Color::Blue);
    for ((_, rect), entry) in hits.minimized.iter().zip(&entries) {
        buf.set_stringn(
            rect.x,
            rect.y,
            format!(" {} ", entry.label),
            usize::from(rect.width),
            style,
        );
    }
    hits
}

/// Paints the grid cells and dividers of `grid` filling `area`.
pub fn render_split(buf: &mut Buffer, area: CellRect, grid: &SplitGrid, metrics: CellMetrics) {
    Clear.render(area, buf);
    let px = Rect::new(0.0, 0.0, metrics.area_size(area).width, metrics.area_size(area).height);
    for (index, cell) in grid.cell_rects(px).into_iter().enumerate() {
        let rect = metrics.px_to_cells(area, cell);
        if rect.width < 2 || rect.height < 2 {
            continue;
        }
        let row = index / grid.cols();
        let col = index % grid.cols();
        let title = format!(
            " {row},{col} {:.0}%x{:.0}% ",
            grid.row_heights()[row],
            grid.col_widths()[col]
        );
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .render(rect, buf);
    }
    let divider = Style::default().fg(Color::Yellow);
    for hit in grid.divider_rects(px) {
        let rect = metrics.px_to_cells(area, hit.rect);
        let glyph = match hit.axis {
            SplitAxis::Rows => "─",
            SplitAxis::Columns => "│",
        };
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                buf.set_string(x, y, glyph, divider);
            }
        }
    }
}

/// Key hints for the status line, in action order.
pub fn status_line(bindings: &KeyBindings) -> String {
    bindings
        .help_entries()
        .into_iter()
        .map(|(action, combos)| format!("{}: {}", combos.join("/"), action))
        .collect::<Vec<_>>()
        .join("  ")
}
