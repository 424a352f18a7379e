//! Output seam for the simulator

use std::io;

/// Destination for simulator output.
///
/// Receives the title and region list as plain lines, then a single status
/// line that is rewritten in place. A run that reaches its deadline calls
/// `finish`; one cut short by the caller calls `abandon` instead.
/// Write failures are returned to the runner, which propagates them.
pub trait ProgressSink: Send {
    /// Print a line of informational output
    fn print_line(&mut self, line: &str) -> io::Result<()>;

    /// Start the in-place status indicator with an initial label
    fn start(&mut self, message: &str) -> io::Result<()>;

    /// Replace the status line
    fn update(&mut self, status: &str) -> io::Result<()>;

    /// Stop the status indicator, leaving `message` behind
    fn finish(&mut self, message: &str) -> io::Result<()>;

    /// Stop the status indicator early, leaving `message` behind
    fn abandon(&mut self, message: &str) -> io::Result<()>;
}

/// Event captured by a `RecordingSink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Line(String),
    Start(String),
    Update(String),
    Finish(String),
    Abandon(String),
}

/// A sink that records every event in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    /// All status updates, in order
    pub fn updates(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Update(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Printed lines, in order
    pub fn lines(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Line(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ProgressSink for RecordingSink {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        self.events.push(SinkEvent::Line(line.to_string()));
        Ok(())
    }

    fn start(&mut self, message: &str) -> io::Result<()> {
        self.events.push(SinkEvent::Start(message.to_string()));
        Ok(())
    }

    fn update(&mut self, status: &str) -> io::Result<()> {
        self.events.push(SinkEvent::Update(status.to_string()));
        Ok(())
    }

    fn finish(&mut self, message: &str) -> io::Result<()> {
        self.events.push(SinkEvent::Finish(message.to_string()));
        Ok(())
    }

    fn abandon(&mut self, message: &str) -> io::Result<()> {
        self.events.push(SinkEvent::Abandon(message.to_string()));
        Ok(())
    }
}
