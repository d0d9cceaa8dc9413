use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};

use colored::Colorize;
use tracing::debug;

/// A human-readable progress line. Names are quoted the way `Debug` quotes
/// them so that whitespace and control characters stay visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Checking { name: OsString },
    Renaming { from: OsString, to: OsString },
}

/// Line prefixes are coloured only while `colored` has colours enabled.
impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::Checking { name } => write!(f, "{} {name:?}", "Checking:".dimmed()),
            ProgressEvent::Renaming { from, to } => {
                write!(f, "{} {from:?} to {to:?}", "Renaming".green().bold())
            }
        }
    }
}

pub trait ProgressSink {
    fn report(&mut self, event: ProgressEvent);
}

/// Writes one line per event.
#[derive(Debug)]
pub struct WriterProgress<W> {
    writer: W,
}

impl<W: Write> WriterProgress<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl WriterProgress<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ProgressSink for WriterProgress<W> {
    fn report(&mut self, event: ProgressEvent) {
        // A closed stdout must not stop the renaming itself
        if let Err(error) = writeln!(self.writer, "{event}") {
            debug!("Failed to write progress line: {}", error);
        }
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    fn report(&mut self, event: ProgressEvent) {
        (**self).report(event);
    }
}

impl ProgressSink for Vec<ProgressEvent> {
    fn report(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}
