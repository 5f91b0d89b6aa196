//! Unit tests for engine.rs (logging hub)
//!
//! All tests are marked with #[serial] because they swap the global logger.
//! Other unit tests may log concurrently, so assertions filter on a unique source.

use crate::galaxy3d::Engine;
use crate::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use serial_test::serial;

const SOURCE: &str = "galaxy3d::EngineTests";

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source == SOURCE {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

// ============================================================================
// LOGGER REPLACEMENT
// ============================================================================

#[test]
#[serial]
fn test_set_logger_receives_entries() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);

    crate::engine_info!(SOURCE, "hello {}", 1);
    crate::engine_warn!(SOURCE, "careful");

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].message, "hello 1");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_error_entries_carry_location() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);

    crate::engine_error!(SOURCE, "boom");

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert!(captured[0].file.is_some());
        assert!(captured[0].line.is_some());
    }

    Engine::reset_logger();
}

// ============================================================================
// SEVERITY THRESHOLD
// ============================================================================

#[test]
#[serial]
fn test_default_threshold_drops_debug_and_trace() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);

    crate::engine_trace!(SOURCE, "trace");
    crate::engine_debug!(SOURCE, "debug");
    crate::engine_info!(SOURCE, "info");

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].message, "info");
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_lowered_threshold_forwards_trace() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Trace);

    assert!(Engine::is_enabled(LogSeverity::Trace));
    crate::engine_trace!(SOURCE, "trace");

    assert_eq!(entries.lock().unwrap().len(), 1);

    Engine::reset_logger();
    assert_eq!(Engine::min_severity(), LogSeverity::Info);
}

/// Counts how many times it is formatted
struct CountingArg(AtomicUsize);

impl fmt::Display for CountingArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fetch_add(1, Ordering::SeqCst);
        write!(f, "arg")
    }
}

#[test]
#[serial]
fn test_filtered_messages_are_not_formatted() {
    Engine::reset_logger();
    let arg = CountingArg(AtomicUsize::new(0));

    crate::engine_trace!(SOURCE, "trace {}", arg);
    crate::engine_debug!(SOURCE, "debug {}", arg);
    assert_eq!(arg.0.load(Ordering::SeqCst), 0);

    Engine::set_min_severity(LogSeverity::Trace);
    crate::engine_trace!(SOURCE, "trace {}", arg);
    assert_eq!(arg.0.load(Ordering::SeqCst), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_raised_threshold_drops_warnings() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Error);

    crate::engine_warn!(SOURCE, "dropped");
    crate::engine_error!(SOURCE, "kept");

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].message, "kept");
    }

    Engine::reset_logger();
}
