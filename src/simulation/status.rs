//! Status sinks
//!
//! A status sink receives the human-readable lines the dispatcher produces:
//! one per single-floor step and one per explicit status query, in the order
//! they happen. Emitting is fire-and-forget.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Destination for dispatcher status lines
pub trait StatusSink {
    /// Emit one status line
    fn emit(&mut self, line: &str);
}

/// Writes each status line to standard output
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Create a console sink
    pub fn new() -> Self {
        Self
    }
}

impl StatusSink for ConsoleSink {
    fn emit(&mut self, line: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line) {
            warn!("Failed to write status line: {}", e);
        }
    }
}

/// Routes status lines to the `info` log level
#[derive(Debug, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn emit(&mut self, line: &str) {
        info!(target: "elevator_simulator::status", "{}", line);
    }
}

/// Collects status lines in memory
///
/// Clones share the same buffer, so a clone can be handed to a dispatcher
/// while another clone is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of lines emitted so far
    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether nothing has been emitted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every collected line
    pub fn clear(&self) {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl StatusSink for MemorySink {
    fn emit(&mut self, line: &str) {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).push(line.to_string());
    }
}
