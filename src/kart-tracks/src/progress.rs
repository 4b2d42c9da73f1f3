//! Progress reporting channel
//!
//! The aggregator emits human-readable status lines after each major step.
//! Callers pass anything implementing [`Progress`]: a closure feeding a UI,
//! or [`LogProgress`] to forward into `tracing`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "INFO"),
            Level::Warning => write!(f, "WARNING"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

/// Receiver of progress events
pub trait Progress {
    fn report(&mut self, message: &str, level: Level);

    fn info(&mut self, message: &str) {
        self.report(message, Level::Info);
    }

    fn warning(&mut self, message: &str) {
        self.report(message, Level::Warning);
    }

    fn error(&mut self, message: &str) {
        self.report(message, Level::Error);
    }
}

impl<F: FnMut(&str, Level)> Progress for F {
    fn report(&mut self, message: &str, level: Level) {
        self(message, level)
    }
}

/// Forwards progress events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn report(&mut self, message: &str, level: Level) {
        match level {
            Level::Info => tracing::info!("{}", message),
            Level::Warning => tracing::warn!("{}", message),
            Level::Error => tracing::error!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn test_closure_sink() {
        let mut events = Vec::new();
        {
            let mut sink = |message: &str, level: Level| events.push((message.to_string(), level));
            sink.info("parsed");
            sink.warning("missing");
            sink.error("broken");
        }
        assert_eq!(
            events,
            [
                ("parsed".to_string(), Level::Info),
                ("missing".to_string(), Level::Warning),
                ("broken".to_string(), Level::Error),
            ]
        );
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Info.to_string(), "INFO");
        assert_eq!(Level::Warning.to_string(), "WARNING");
        assert_eq!(Level::Error.to_string(), "ERROR");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_log_progress_forwards_levels() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut sink = LogProgress;
            sink.report("parsed base", Level::Info);
            sink.report("skipped locale", Level::Warning);
            sink.report("broken base", Level::Error);
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("INFO") && lines[0].ends_with("parsed base"));
        assert!(lines[1].contains("WARN") && lines[1].ends_with("skipped locale"));
        assert!(lines[2].contains("ERROR") && lines[2].ends_with("broken base"));
    }
}
