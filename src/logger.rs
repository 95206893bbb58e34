use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global `tracing` subscriber.
///
/// The filter comes from `SITEPULSE_LOG`, then `RUST_LOG`, then
/// `default_level` (`debug` with `verbose`). Events go to stderr. The
/// returned [`LogHold`] lets the caller keep them back while live rows are
/// on screen, since stdout and stderr usually share one terminal.
pub fn init_logging(verbose: bool, default_level: &str, no_color: bool) -> LogHold {
    let filter = std::env::var("SITEPULSE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::new(default_level)
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let hold = LogHold::default();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(HoldWriter::new(io::stderr, hold.clone()))
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
    hold
}

/// Switch shared between the caller and a [`HoldWriter`]. While held,
/// formatted events are buffered in arrival order instead of written.
#[derive(Debug, Clone, Default)]
pub struct LogHold {
    state: Arc<Mutex<HoldState>>,
}

#[derive(Debug, Default)]
struct HoldState {
    held: bool,
    pending: Vec<u8>,
}

impl LogHold {
    pub fn hold(&self) {
        self.lock().held = true;
    }

    pub fn is_held(&self) -> bool {
        self.lock().held
    }

    /// Stops holding and writes everything buffered so far to `out`.
    ///
    /// The lock stays taken while writing, so an event logged concurrently
    /// lands after the buffered ones.
    pub fn release_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut state = self.lock();
        state.held = false;
        let pending = std::mem::take(&mut state.pending);
        out.write_all(&pending)?;
        out.flush()
    }

    fn lock(&self) -> MutexGuard<'_, HoldState> {
        // A panic while holding the lock leaves the buffer intact.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// [`MakeWriter`] wrapper that diverts output into a [`LogHold`] while it
/// is held.
#[derive(Debug)]
pub struct HoldWriter<M> {
    inner: M,
    hold: LogHold,
}

impl<M> HoldWriter<M> {
    pub fn new(inner: M, hold: LogHold) -> Self {
        Self { inner, hold }
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for HoldWriter<M> {
    type Writer = HeldWriter<'a, M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        HeldWriter {
            inner: self.inner.make_writer(),
            hold: &self.hold,
        }
    }
}

pub struct HeldWriter<'a, W> {
    inner: W,
    hold: &'a LogHold,
}

impl<W: Write> Write for HeldWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        {
            let mut state = self.hold.lock();
            if state.held {
                state.pending.extend_from_slice(buf);
                return Ok(buf.len());
            }
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
