use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use pane_wm::geometry::{Point, Rect, Size};
use pane_wm::window::{AddWindow, PointerTarget, WindowInteraction, WindowOptions, WindowStore};

#[derive(Parser, Debug)]
#[command(
    name = "pane-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drag-frame benchmark for collision-aware window moves"
)]
struct BenchCli {
    /// Windows scattered across the container besides the dragged one.
    #[arg(short = 'w', long = "windows", value_name = "N", default_value_t = 24)]
    windows: usize,

    /// Pointer moves to simulate.
    #[arg(short = 'f', long = "frames", value_name = "FRAMES", default_value_t = 100_000)]
    frames: u64,

    /// Disable collision resolution to measure the clamp-only baseline.
    #[arg(long = "no-collision")]
    no_collision: bool,
}

struct BenchConfig {
    windows: usize,
    frames: u64,
    collision: bool,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=512).contains(&cli.windows) {
            return Err("windows must be between 1 and 512".to_string());
        }
        if !(1..=10_000_000).contains(&cli.frames) {
            return Err("frames must be between 1 and 10000000".to_string());
        }
        Ok(Self {
            windows: cli.windows,
            frames: cli.frames,
            collision: !cli.no_collision,
        })
    }
}

const CONTAINER: Size = Size {
    width: 1920.0,
    height: 1080.0,
};

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let mut store = build_store(&config).map_err(io::Error::other)?;
    let stats = run_benchmark(&mut store, &config);
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn build_store(config: &BenchConfig) -> Result<WindowStore<()>, pane_wm::StoreError> {
    let mut store = WindowStore::new(CONTAINER);
    let options = WindowOptions {
        collision_detection: config.collision,
        ..WindowOptions::default()
    };
    let cols = (config.windows as f64).sqrt().ceil() as usize;
    let cell_w = CONTAINER.width / cols as f64;
    let cell_h = CONTAINER.height / config.windows.div_ceil(cols) as f64;
    for i in 0..config.windows {
        let x = (i % cols) as f64 * cell_w;
        let y = (i / cols) as f64 * cell_h;
        store.add_window(
            AddWindow::new(format!("static-{i}"), ())
                .bounds(Rect::new(x, y, cell_w * 0.6, cell_h * 0.6)),
        )?;
    }
    store.add_window(
        AddWindow::new("dragged", ())
            .options(options)
            .bounds(Rect::new(0.0, 0.0, 240.0, 160.0)),
    )?;
    Ok(store)
}

fn run_benchmark(store: &mut WindowStore<()>, config: &BenchConfig) -> BenchStats {
    let mut stats = BenchStats::default();
    let mut interaction = WindowInteraction::new("dragged");
    interaction.pointer_down(store, PointerTarget::Header, Point::new(10.0, 10.0));
    let started = Instant::now();
    for frame in 0..config.frames {
        // Lissajous path so the window sweeps the whole container.
        let t = frame as f64 / 500.0;
        let pointer = Point::new(
            CONTAINER.width / 2.0 + (t * 3.0).sin() * CONTAINER.width / 2.0,
            CONTAINER.height / 2.0 + (t * 2.0).cos() * CONTAINER.height / 2.0,
        );
        let frame_start = Instant::now();
        interaction.pointer_move(store, pointer);
        stats.record(frame_start.elapsed());
    }
    interaction.pointer_up();
    stats.total = started.elapsed();
    stats
}

#[derive(Default)]
struct BenchStats {
    frames: u64,
    total: Duration,
    fastest: Option<Duration>,
    slowest: Duration,
}

impl BenchStats {
    fn record(&mut self, frame: Duration) {
        self.frames += 1;
        self.fastest = Some(self.fastest.map_or(frame, |f| f.min(frame)));
        self.slowest = self.slowest.max(frame);
    }

    fn average_us(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.total.as_secs_f64() * 1e6 / self.frames as f64
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        indoc::formatdoc!(
            r#"
            Drag bench finished.
            Windows: {windows} (+1 dragged) | Collision: {collision}
            Frames: {frames} in {elapsed:.3}s
            Avg move: {avg:.2} us | Best: {best:.2} us | Worst: {worst:.2} us
            "#,
            windows = config.windows,
            collision = if config.collision { "on" } else { "off" },
            frames = self.frames,
            elapsed = self.total.as_secs_f64(),
            avg = self.average_us(),
            best = self.fastest.unwrap_or_default().as_secs_f64() * 1e6,
            worst = self.slowest.as_secs_f64() * 1e6,
        )
    }
}
