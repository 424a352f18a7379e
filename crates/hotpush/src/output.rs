//! Terminal output utilities
//!
//! Human mode prints styled lines; JSON mode prints one JSON record per line
//! (`{"level", "message", "timestamp"}`) so wrapping tools can parse output.

use std::io::{self, Write};
use std::sync::OnceLock;

use chrono::{SecondsFormat, Utc};
use console::{style, Term};
use hotpush_core::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// How user-facing output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

static MODE: OnceLock<OutputMode> = OnceLock::new();

/// Set the output mode. Only the first call has an effect.
pub fn set_mode(mode: OutputMode) {
    let _ = MODE.set(mode);
}

pub fn mode() -> OutputMode {
    MODE.get().copied().unwrap_or(OutputMode::Human)
}

pub fn is_json() -> bool {
    mode() == OutputMode::Json
}

#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    level: &'a str,
    message: &'a str,
    timestamp: String,
}

/// Render a single JSON log line
fn json_record(level: &str, message: &str) -> String {
    let record = LogRecord {
        level,
        message,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    // Serializing a struct of strings cannot fail
    serde_json::to_string(&record).unwrap_or_default()
}

fn write_record(out: &mut dyn Write, level: &str, message: &str) -> io::Result<()> {
    writeln!(out, "{}", json_record(level, message))
}

fn emit(level: &str, message: &str, human: impl FnOnce()) {
    if is_json() {
        let result = if level == "error" || level == "warn" {
            write_record(&mut io::stderr().lock(), level, message)
        } else {
            write_record(&mut io::stdout().lock(), level, message)
        };
        if let Err(e) = result {
            tracing::debug!("Failed to write output record: {}", e);
        }
    } else {
        human();
    }
}

/// Print a success message
pub fn success(msg: &str) {
    emit("success", msg, || {
        println!("{} {}", style("✓").green().bold(), msg)
    });
}

/// Print an error message
pub fn error(msg: &str) {
    emit("error", msg, || {
        eprintln!("{} {}", style("✗").red().bold(), msg)
    });
}

/// Print a warning message
pub fn warning(msg: &str) {
    emit("warn", msg, || {
        eprintln!("{} {}", style("⚠").yellow().bold(), msg)
    });
}

/// Print an info message
pub fn info(msg: &str) {
    emit("info", msg, || println!("{} {}", style("ℹ").blue().bold(), msg));
}

/// Print a header
pub fn header(msg: &str) {
    emit("info", msg, || println!("\n{}", style(msg).bold().underlined()));
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    if is_json() {
        emit("info", &format!("{}: {}", key, value), || {});
    } else {
        println!("  {}: {}", style(key).dim(), value);
    }
}

/// Print a serializable value as pretty JSON on stdout
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Create a spinner. Hidden in JSON mode.
pub fn spinner(msg: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Replication progress on a terminal: plain lines, then an indicatif spinner
/// whose message is replaced on every tick.
pub struct TerminalSink {
    term: Term,
    bar: Option<ProgressBar>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            bar: None,
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalSink {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        self.term
            .write_line(&format!("{} {}", style("ℹ").blue().bold(), line))
    }

    fn start(&mut self, message: &str) -> io::Result<()> {
        self.bar = Some(spinner(message));
        Ok(())
    }

    fn update(&mut self, status: &str) -> io::Result<()> {
        if let Some(bar) = &self.bar {
            bar.set_message(status.to_string());
        }
        Ok(())
    }

    fn finish(&mut self, message: &str) -> io::Result<()> {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message(format!("{} {}", style("✓").green().bold(), message));
        }
        Ok(())
    }

    fn abandon(&mut self, message: &str) -> io::Result<()> {
        if let Some(bar) = self.bar.take() {
            bar.abandon_with_message(format!("{} {}", style("⚠").yellow().bold(), message));
        }
        Ok(())
    }
}

/// Replication progress as JSON records, one per event
pub struct JsonSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ProgressSink for JsonSink<W> {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        write_record(&mut self.out, "info", line)
    }

    fn start(&mut self, message: &str) -> io::Result<()> {
        write_record(&mut self.out, "progress", message)
    }

    fn update(&mut self, status: &str) -> io::Result<()> {
        write_record(&mut self.out, "progress", status)
    }

    fn finish(&mut self, message: &str) -> io::Result<()> {
        write_record(&mut self.out, "success", message)
    }

    fn abandon(&mut self, message: &str) -> io::Result<()> {
        write_record(&mut self.out, "warn", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_record_shape() {
        let line = json_record("info", "Bundle \"v2\" uploaded");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["level"], "info");
        assert_eq!(value["message"], "Bundle \"v2\" uploaded");
        let ts = value["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_json_sink_writes_one_record_per_event() {
        let mut sink = JsonSink::new(Vec::new());
        sink.print_line("Replicating").unwrap();
        sink.start("Replicating").unwrap();
        sink.update("1/9 regions updated").unwrap();
        sink.finish("Done").unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let levels: Vec<String> = text
            .lines()
            .map(|l| {
                let v: serde_json::Value = serde_json::from_str(l).unwrap();
                v["level"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(levels, vec!["info", "progress", "progress", "success"]);
    }

    #[test]
    fn test_json_sink_abandon_is_a_warning() {
        let mut sink = JsonSink::new(Vec::new());
        sink.start("Replicating").unwrap();
        sink.abandon("Replication progress interrupted").unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let last: serde_json::Value =
            serde_json::from_str(text.lines().last().unwrap()).unwrap();
        assert_eq!(last["level"], "warn");
        assert_eq!(last["message"], "Replication progress interrupted");
        assert!(!text.contains("\"success\""));
    }

    #[test]
    fn test_terminal_sink_finish_without_start() {
        let mut sink = TerminalSink::new();
        assert!(sink.update("ignored").is_ok());
        assert!(sink.finish("done").is_ok());
    }
}
