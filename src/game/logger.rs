//! Advisor logger
//!
//! Diagnostic output only. Recommendations never go through here; they flow
//! through the `MessageQueue`. Entries can be printed, captured in memory for
//! tests, or both.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;
use std::str::FromStr;

/// How much diagnostic output to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// No output
    Silent = 0,
    /// Game results and invariant violations
    Minimal = 1,
    /// Turn headers and planner choices (default)
    #[default]
    Normal = 2,
    /// Every event and planner step
    Verbose = 3,
}

impl FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!("Invalid verbosity level: {s}")),
        }
    }
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category ("event", "plan_choice", "invariant")
    pub category: Option<String>,
}

/// Read-only access to captured entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl LogGuard<'_> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }

    /// Entries with the given category
    pub fn in_category<'s>(&'s self, category: &'s str) -> impl Iterator<Item = &'s LogEntry> + 's {
        self.guard
            .iter()
            .filter(move |e| e.category.as_deref() == Some(category))
    }
}

impl Deref for LogGuard<'_> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Logger shared by the tracker and (through `PlanView`) the planner
///
/// Logging takes `&self`; the capture buffer sits behind a `RefCell`. The
/// advisor is single-threaded, so this never contends.
pub struct AdvisorLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl AdvisorLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        AdvisorLogger {
            verbosity,
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Print buffered entries the verbosity allows, then clear the buffer
    pub fn flush_buffer(&mut self) {
        for entry in self.log_buffer.borrow().iter() {
            if entry.level <= self.verbosity {
                Self::log_to_stdout(entry.level, &entry.message);
            }
        }
        self.clear_logs();
    }

    /// Captured entries
    ///
    /// ```ignore
    /// let plays = logger.logs().iter()
    ///     .filter(|log| log.message.contains("Alleycat"))
    ///     .count();
    /// ```
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    #[inline]
    fn log_to_stdout(level: VerbosityLevel, message: &str) {
        if level == VerbosityLevel::Minimal {
            println!("{message}");
        } else {
            println!("  {message}");
        }
    }

    fn record(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        let should_capture = self.is_capturing();
        let should_output =
            matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) && level <= self.verbosity;

        if !should_capture && !should_output {
            return;
        }
        if should_capture {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(str::to_string),
            });
        }
        if should_output {
            Self::log_to_stdout(level, message);
        }
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.record(VerbosityLevel::Minimal, message, None);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.record(VerbosityLevel::Normal, message, None);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.record(VerbosityLevel::Verbose, message, None);
    }

    /// An incoming zone event
    #[inline]
    pub fn event(&self, message: &str) {
        self.record(VerbosityLevel::Verbose, message, Some("event"));
    }

    /// A planner decision, tagged with the planner that made it
    #[inline]
    pub fn plan_choice(&self, planner_name: &str, message: &str) {
        let formatted = format!("[{planner_name}] {message}");
        self.record(VerbosityLevel::Normal, &formatted, Some("plan_choice"));
    }

    /// A broken invariant; always shown unless Silent, and echoed to stderr
    pub fn invariant(&self, message: &str) {
        if self.verbosity > VerbosityLevel::Silent {
            eprintln!("INVARIANT VIOLATION: {message}");
        }
        self.record(VerbosityLevel::Minimal, message, Some("invariant"));
    }
}

impl Default for AdvisorLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AdvisorLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisorLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}
