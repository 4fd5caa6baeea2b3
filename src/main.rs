use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Color, Style};
use tracing::Level;

use pane_wm::clipboard::{LayoutClipboard, SystemClipboard};
use pane_wm::controller::{ControllerOptions, ModalController};
use pane_wm::drivers::{ConsoleInputDriver, ConsoleOutputDriver, InputDriver};
use pane_wm::event_loop::{ControlFlow, EventLoop};
use pane_wm::geometry::Rect;
use pane_wm::keybindings::Action;
use pane_wm::split::{SplitGrid, SplitLayoutSnapshot, SplitOptions};
use pane_wm::tracing_sub::{self, LogTarget};
use pane_wm::ui::{self, CellMetrics, OverlayHits};
use pane_wm::window::{AddWindow, WindowOptions};

const MAX_WINDOWS: usize = 32;
const MAX_SPLIT: usize = 8;

#[derive(Parser, Debug)]
#[command(
    name = "pane-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Overlapping panes and a split grid in the terminal",
    after_help = ui::HELP_TEXT
)]
struct Cli {
    /// Number of windows opened at startup.
    #[arg(short = 'w', long = "windows", value_name = "N", default_value_t = 3)]
    windows: usize,

    /// Push dragged windows out of the ones they overlap.
    #[arg(long = "collision")]
    collision: bool,

    /// Shape of the split view.
    #[arg(long = "split", value_name = "ROWSxCOLS", default_value = "2x2")]
    split: String,

    /// Pixels per terminal column.
    #[arg(long = "cell-width", value_name = "PX", default_value_t = 8.0)]
    cell_width: f64,

    /// Pixels per terminal row.
    #[arg(long = "cell-height", value_name = "PX", default_value_t = 16.0)]
    cell_height: f64,

    /// Append debug logs to this file. Logging is discarded otherwise.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

struct HostConfig {
    windows: usize,
    collision: bool,
    rows: usize,
    cols: usize,
    metrics: CellMetrics,
    log_target: LogTarget,
}

impl TryFrom<&Cli> for HostConfig {
    type Error = String;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.windows > MAX_WINDOWS {
            return Err(format!("windows must be at most {MAX_WINDOWS}"));
        }
        let (rows, cols) = parse_split(&cli.split)?;
        if !(cli.cell_width > 0.0 && cli.cell_height > 0.0) {
            return Err("cell sizes must be positive".to_string());
        }
        Ok(Self {
            windows: cli.windows,
            collision: cli.collision,
            rows,
            cols,
            metrics: CellMetrics::new(cli.cell_width, cli.cell_height),
            log_target: cli
                .log_file
                .clone()
                .map_or(LogTarget::Discard, LogTarget::File),
        })
    }
}

fn parse_split(raw: &str) -> Result<(usize, usize), String> {
    let (rows, cols) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("split must look like ROWSxCOLS, got `{raw}`"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=MAX_SPLIT).contains(n))
            .ok_or_else(|| format!("split dimensions must be between 1 and {MAX_SPLIT}"))
    };
    Ok((parse(rows)?, parse(cols)?))
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = HostConfig::try_from(&cli)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    tracing_sub::init(&config.log_target, Level::DEBUG)?;

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let (columns, rows) = crossterm::terminal::size()?;
    let mut app = App::new(&config, CellRect::new(0, 0, columns, rows.saturating_sub(1)));
    let mut input = ConsoleInputDriver::new();
    input.set_mouse_capture(true)?;

    let mut event_loop = EventLoop::new(input, Duration::from_millis(16));
    let result = event_loop.run(|_, event| match event {
        None => {
            output.draw(|frame| app.render(frame))?;
            Ok(ControlFlow::Continue)
        }
        Some(event) => Ok(app.handle_event(&event)),
    });

    output.exit()?;
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Windows,
    Split,
}

struct App {
    controller: ModalController<String>,
    grid: SplitGrid,
    clipboard: SystemClipboard,
    view: View,
    metrics: CellMetrics,
    collision: bool,
    opened: usize,
    workspace: CellRect,
    hits: OverlayHits,
}

impl App {
    fn new(config: &HostConfig, workspace: CellRect) -> Self {
        let mut grid = SplitGrid::new(SplitOptions::grid(config.rows, config.cols));
        grid.on_layout_change(|snapshot| {
            tracing::info!(rows = ?snapshot.row_heights, cols = ?snapshot.col_widths, "split layout changed");
        });
        grid.on_resize(|size| {
            tracing::debug!(width = size.width, height = size.height, "split grid resized");
        });
        let mut app = Self {
            controller: ModalController::new(
                config.metrics.area_size(workspace),
                ControllerOptions {
                    chrome: config.metrics.window_chrome(),
                    ..ControllerOptions::default()
                },
            ),
            grid,
            clipboard: SystemClipboard,
            view: View::Windows,
            metrics: config.metrics,
            collision: config.collision,
            opened: 0,
            workspace,
            hits: OverlayHits::default(),
        };
        for _ in 0..config.windows {
            app.open_window();
        }
        app
    }

    fn open_window(&mut self) {
        self.opened += 1;
        let n = self.opened;
        let options = WindowOptions {
            collision_detection: self.collision,
            close_on_backdrop_click: n % 2 == 0,
            ..WindowOptions::default()
        };
        let payload = AddWindow::new(format!("pane-{n}"), format!("Pane number {n}.\n\n{}", ui::HELP_TEXT))
            .title(format!("Pane {n}"))
            .options(options);
        if let Err(err) = self.controller.add_window(payload) {
            tracing::warn!(%err, "could not open window");
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let workspace = CellRect {
            height: area.height.saturating_sub(1),
            ..area
        };
        self.workspace = workspace;
        let buf = frame.buffer_mut();
        match self.view {
            View::Windows => {
                let size = self.metrics.area_size(workspace);
                if self.controller.store().container_size() != size {
                    self.controller.set_container_size(size.width, size.height);
                }
                self.hits = ui::render_controller(buf, workspace, &self.controller, self.metrics);
            }
            View::Split => {
                let split_area = self.split_area();
                self.grid.set_container_extent(self.metrics.area_size(split_area));
                ui::render_split(buf, split_area, &self.grid, self.metrics);
            }
        }
        if area.height > 0 {
            let status = ui::status_line(self.controller.bindings());
            buf.set_stringn(
                area.x,
                area.bottom() - 1,
                status,
                usize::from(area.width),
                Style::default().fg(Color::DarkGray),
            );
        }
    }

    /// Workspace cells covered by the split view, honouring a dragged outer size.
    fn split_area(&self) -> CellRect {
        match self.grid.outer_size() {
            Some(size) => self
                .metrics
                .px_to_cells(self.workspace, Rect::new(0.0, 0.0, size.width, size.height)),
            None => self.workspace,
        }
    }

    fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                match self.view {
                    View::Windows => self.handle_window_mouse(mouse),
                    View::Split => self.handle_split_mouse(mouse),
                }
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        let action = match self.view {
            View::Windows => self.controller.handle_key(key),
            View::Split => self.controller.bindings().action_for_key(key),
        };
        match action {
            Some(Action::Quit) => return ControlFlow::Quit,
            Some(Action::NewWindow) if self.view == View::Windows => self.open_window(),
            Some(Action::ToggleSplitView) => {
                self.view = match self.view {
                    View::Windows => View::Split,
                    View::Split => View::Windows,
                };
            }
            Some(Action::CopyLayout) if self.view == View::Split => self.copy_split_layout(),
            Some(Action::PasteLayout) if self.view == View::Split => self.paste_split_layout(),
            _ => {}
        }
        ControlFlow::Continue
    }

    fn handle_window_mouse(&mut self, mouse: &MouseEvent) {
        let point = self
            .metrics
            .cell_to_px(self.workspace, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) = self.hits.toolbar_at(mouse.column, mouse.row) {
                    if let Err(err) = self.controller.toolbar(action) {
                        tracing::warn!(%err, ?action, "toolbar action failed");
                    }
                } else if let Some(id) = self.hits.minimized_at(mouse.column, mouse.row).cloned() {
                    self.controller.restore(&id);
                } else {
                    let outcome = self.controller.pointer_down(point);
                    tracing::trace!(?outcome, "pointer down");
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.controller.pointer_move(point);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.controller.pointer_up();
            }
            _ => {}
        }
    }

    fn handle_split_mouse(&mut self, mouse: &MouseEvent) {
        let area = self.split_area();
        let point = self.metrics.cell_to_px(area, mouse.column, mouse.row);
        let size = self.metrics.area_size(area);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let px = Rect::new(0.0, 0.0, size.width, size.height);
                if self.grid.pointer_down(px, point) {
                    return;
                }
                let in_corner = mouse.column.saturating_add(1) == area.right()
                    && mouse.row.saturating_add(1) == area.bottom();
                if in_corner {
                    self.grid.begin_outer_resize(point, size);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.grid.pointer_move(point);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.grid.pointer_up();
            }
            _ => {}
        }
    }

    fn copy_split_layout(&mut self) {
        let text = match self.grid.layout_snapshot().to_json() {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "could not encode split layout");
                return;
            }
        };
        if let Err(err) = self.clipboard.write_text(&text) {
            tracing::warn!(%err, "could not copy split layout");
        }
    }

    fn paste_split_layout(&mut self) {
        let text = match self.clipboard.read_text() {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "could not read clipboard");
                return;
            }
        };
        match SplitLayoutSnapshot::from_json(&text) {
            Ok(snapshot) => self.grid.paste_layout(&snapshot),
            Err(err) => tracing::debug!(%err, "ignored pasted split layout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_argument_parses() {
        assert_eq!(parse_split("2x3"), Ok((2, 3)));
        assert_eq!(parse_split(" 1 X 4 "), Ok((1, 4)));
        assert!(parse_split("0x2").is_err());
        assert!(parse_split("9x1").is_err());
        assert!(parse_split("22").is_err());
    }

    #[test]
    fn cli_validation_rejects_bad_cells() {
        let cli = Cli::parse_from(["pane-wm", "--cell-width", "0"]);
        assert!(HostConfig::try_from(&cli).is_err());
        let cli = Cli::parse_from(["pane-wm", "--windows", "4", "--collision"]);
        let config = HostConfig::try_from(&cli).unwrap();
        assert_eq!((config.windows, config.rows, config.cols), (4, 2, 2));
        assert!(config.collision);
    }
}
