//! Console Logger
//!
//! A `tracing` subscriber for browser apps. Every event is written to the
//! devtools console at its matching level and the last few hundred lines are
//! kept in a circular buffer so the app can show them on screen.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Default number of lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

static BUFFER: OnceLock<Arc<LogBuffer>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
}

/// Circular buffer of formatted log lines
#[derive(Debug)]
pub struct LogBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, line: String) {
        let Ok(mut lines) = self.lines.lock() else { return };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

/// Layer that formats events, forwards them to the console and records them
pub struct ConsoleLayer {
    app_name: String,
    max_level: Level,
    buffer: Arc<LogBuffer>,
}

impl ConsoleLayer {
    pub fn new(app_name: &str, max_level: Level, buffer: Arc<LogBuffer>) -> Self {
        Self {
            app_name: app_name.to_string(),
            max_level,
            buffer,
        }
    }

    fn format_line(&self, level: &Level, target: &str, visitor: &FieldVisitor) -> String {
        let mut line = format!(
            "{} {:<5} {} {}: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            level,
            self.app_name,
            target,
            visitor.message
        );
        for (name, value) in &visitor.fields {
            let _ = write!(line, " {}={}", name, value);
        }
        line
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        // Level ordering: TRACE > DEBUG > ... > ERROR
        if *meta.level() > self.max_level {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let line = self.format_line(meta.level(), meta.target(), &visitor);
        emit(meta.level(), &line);
        self.buffer.push(line);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push((field.name(), format!("{:?}", value)));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: &Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match *level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        Level::INFO => web_sys::console::info_1(&value),
        _ => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: &Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global subscriber. Call once at startup.
pub fn init_logger(app_name: &str, max_level: Level) -> Result<(), LoggerError> {
    let buffer = Arc::new(LogBuffer::new(DEFAULT_CAPACITY));
    BUFFER
        .set(buffer.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new(app_name, max_level, buffer));
    tracing::subscriber::set_global_default(subscriber).map_err(|_| LoggerError::AlreadyInitialized)
}

/// Recent log lines, oldest first. Empty before `init_logger`.
pub fn recent_lines() -> Vec<String> {
    BUFFER.get().map(|b| b.snapshot()).unwrap_or_default()
}

/// Drop everything held in the ring buffer
pub fn clear_recent() {
    if let Some(buffer) = BUFFER.get() {
        buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        // Only the first install in a process succeeds
        let _ = init_logger("Test", Level::DEBUG);
        let err = init_logger("Test", Level::DEBUG).unwrap_err();
        assert!(matches!(err, LoggerError::AlreadyInitialized));
        assert_eq!(err.to_string(), "logger already initialized");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let buffer = LogBuffer::new(2);
        buffer.push("a".to_string());
        buffer.push("b".to_string());
        buffer.push("c".to_string());
        assert_eq!(buffer.snapshot(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_layer_records_message_and_fields() {
        let buffer = Arc::new(LogBuffer::new(10));
        let subscriber = tracing_subscriber::registry()
            .with(ConsoleLayer::new("Judge", Level::INFO, buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(contest = 7, "[SYNC] started");
            tracing::debug!("filtered out");
        });

        let lines = buffer.snapshot();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("[SYNC] started"));
        assert!(lines[0].contains("contest=7"));
    }

    #[test]
    fn test_clear() {
        let buffer = LogBuffer::new(3);
        buffer.push("x".to_string());
        buffer.clear();
        assert!(buffer.snapshot().is_empty());
    }
}
