use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tracing::Level;

/// Where formatted log lines go. The terminal host owns stdout/stderr, so
/// the fallback is a sink rather than stderr.
#[derive(Debug, Clone)]
pub enum LogTarget {
    File(PathBuf),
    Discard,
}

static LOG_FILE: OnceLock<Arc<File>> = OnceLock::new();

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<File>),
    Sink(io::Sink),
}

impl DelegatingWriter {
    fn new() -> Self {
        match LOG_FILE.get() {
            Some(file) => DelegatingWriter {
                inner: DelegatingInner::File(Arc::clone(file)),
            },
            None => DelegatingWriter {
                inner: DelegatingInner::Sink(io::sink()),
            },
        }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).write(buf),
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).flush(),
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberMakeWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new()
    }
}

/// Opens the log target and installs the global fmt subscriber.
///
/// Safe to call multiple times; only the first log file and the first
/// subscriber win, later calls still report file-open errors.
pub fn init(target: &LogTarget, level: Level) -> io::Result<()> {
    if let LogTarget::File(path) = target {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let _ = LOG_FILE.set(Arc::new(file));
    }
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(SubscriberMakeWriter)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .try_init();
    Ok(())
}
