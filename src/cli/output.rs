//! Handles all user-facing output for the harness.
//!
//! Reports are written line by line to an [`OutputSink`], and styled with
//! ANSI colour only when the sink is an interactive terminal. Centralizing
//! this here keeps the stdout runner and the in-memory capture used by tests
//! producing the same text.

// ============================================================================
// OUTPUT SINKS: OutputBuffer and StdoutSink implementations
// ============================================================================

use termcolor::{Ansi, Color, ColorSpec, WriteColor};
use std::io::Write;

/// Destination for report lines.
pub trait OutputSink {
    /// Writes one line of text.
    fn emit(&mut self, text: &str);

    /// Whether the destination is an interactive terminal that can render colour.
    fn is_terminal(&self) -> bool {
        false
    }
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn emit(&mut self, text: &str) {
        (**self).emit(text)
    }

    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }
}

/// OutputBuffer: collects output into a String for testing or programmatic capture.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub buffer: String,
    terminal: bool,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer that claims to be a terminal, so colour stays enabled.
    pub fn terminal() -> Self {
        Self {
            buffer: String::new(),
            terminal: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}

/// StdoutSink: writes output to stdout for the CLI and the default harness.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{}", text);
    }

    fn is_terminal(&self) -> bool {
        atty::is(atty::Stream::Stdout)
    }
}

// ============================================================================
// STYLES: colour bands used in reports
// ============================================================================

/// Semantic styles used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Success,
    Warning,
    Failure,
    Header,
}

impl Style {
    fn spec(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Style::Success => spec.set_fg(Some(Color::Green)),
            Style::Warning => spec.set_fg(Some(Color::Yellow)),
            Style::Failure => spec.set_fg(Some(Color::Red)),
            Style::Header => spec.set_fg(Some(Color::Cyan)).set_bold(true),
        };
        spec
    }
}

/// Wraps `text` in ANSI escape codes for `style` when `enabled`, otherwise returns it unchanged.
///
/// ```rust
/// use testbench::cli::output::{colorize, Style};
/// assert_eq!(colorize("PASSED", Style::Success, false), "PASSED");
/// assert!(colorize("PASSED", Style::Success, true).starts_with("\x1b["));
/// ```
pub fn colorize(text: &str, style: Style, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    let mut out = Ansi::new(Vec::with_capacity(text.len() + 16));
    let _ = out.set_color(&style.spec());
    let _ = out.write_all(text.as_bytes());
    let _ = out.reset();
    String::from_utf8_lossy(&out.into_inner()).into_owned()
}
