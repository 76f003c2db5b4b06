//! Captures tracing events as JSON for assertions in unit tests.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing_subscriber::{fmt, layer::SubscriberExt};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a scoped subscriber and return its result together with
/// every event it emitted, one JSON object per event.
pub(crate) fn capture_events<R>(f: impl FnOnce() -> R) -> (R, Vec<serde_json::Value>) {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .json(),
    );

    let result = tracing::subscriber::with_default(subscriber, f);

    let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    let events = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (result, events)
}

/// The first WARN event, if any.
pub(crate) fn first_warning(events: &[serde_json::Value]) -> Option<&serde_json::Value> {
    events.iter().find(|e| e["level"] == "WARN")
}
