//! Replay source: feeds fixation events from a JSONL trace.
//!
//! The live eye-tracker transport is out of scope; any device bridge that
//! can emit one JSON fixation event per line (to a file or a pipe) can
//! drive the agent. Events are delivered over a bounded channel from a
//! background reader thread.

use crate::event::types::FixationEvent;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Errors that can occur while replaying a trace.
#[derive(Debug)]
pub enum SourceError {
    AlreadyRunning,
    Io(String),
    Parse { line: usize, message: String },
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::AlreadyRunning => write!(f, "Replay source is already running"),
            SourceError::Io(e) => write!(f, "IO error: {e}"),
            SourceError::Parse { line, message } => {
                write!(f, "Trace parse error on line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Where the trace is read from.
#[derive(Debug, Clone)]
pub enum TraceInput {
    /// A JSONL file on disk.
    File(PathBuf),
    /// Standard input (a device bridge piping events).
    Stdin,
}

impl TraceInput {
    /// Interpret a CLI path argument; `-` selects stdin.
    pub fn from_arg(path: &str) -> Self {
        if path == "-" {
            TraceInput::Stdin
        } else {
            TraceInput::File(PathBuf::from(path))
        }
    }
}

/// A trace replay source delivering fixation events over a channel.
pub struct ReplaySource {
    input: TraceInput,
    /// Pace event delivery by timestamp deltas instead of sending at once.
    realtime: bool,
    sender: Sender<FixationEvent>,
    receiver: Receiver<FixationEvent>,
    running: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl ReplaySource {
    /// Create a replay source for the given input.
    pub fn new(input: TraceInput, realtime: bool) -> Self {
        // Bounded channel to prevent unbounded memory growth on large traces
        let (sender, receiver) = bounded(10_000);

        Self {
            input,
            realtime,
            sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Start delivering events in a background thread.
    ///
    /// Returns an error if the source is already running or the trace file
    /// cannot be opened.
    pub fn start(&mut self) -> Result<(), SourceError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(SourceError::AlreadyRunning);
        }

        let reader: Box<dyn BufRead + Send> = match &self.input {
            TraceInput::File(path) => {
                let file = File::open(path).map_err(|e| SourceError::Io(e.to_string()))?;
                Box::new(BufReader::new(file))
            }
            TraceInput::Stdin => Box::new(BufReader::new(std::io::stdin())),
        };

        self.running.store(true, Ordering::SeqCst);

        let sender = self.sender.clone();
        let running = self.running.clone();
        let realtime = self.realtime;

        let handle = thread::spawn(move || {
            run_replay_loop(reader, sender, running.clone(), realtime);
            running.store(false, Ordering::SeqCst);
        });

        self.thread_handle = Some(handle);
        Ok(())
    }

    /// Stop delivering events.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            // A reader blocked on stdin cannot be interrupted; detach it
            // instead of hanging the shutdown. File readers notice the flag
            // within one sleep chunk.
            if handle.is_finished() {
                let _ = handle.join();
            }
        }
    }

    /// Check if the source is currently delivering events.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the receiver for fixation events.
    pub fn receiver(&self) -> &Receiver<FixationEvent> {
        &self.receiver
    }
}

impl Drop for ReplaySource {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Parse one JSONL trace line into a fixation event.
pub(crate) fn parse_line(line_no: usize, line: &str) -> Result<FixationEvent, SourceError> {
    serde_json::from_str(line).map_err(|e| SourceError::Parse {
        line: line_no,
        message: e.to_string(),
    })
}

fn run_replay_loop(
    reader: Box<dyn BufRead + Send>,
    sender: Sender<FixationEvent>,
    running: Arc<AtomicBool>,
    realtime: bool,
) {
    let mut prev_timestamp: Option<f64> = None;

    for (index, line) in reader.lines().enumerate() {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!(error = %e, "Trace read failed, stopping replay");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let event = match parse_line(index + 1, &line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Stopping replay on malformed trace line");
                break;
            }
        };

        if realtime {
            if let Some(prev) = prev_timestamp {
                let gap_ms = (event.timestamp_ms - prev).max(0.0);
                if !sleep_interruptible(gap_ms, &running) {
                    break;
                }
            }
            prev_timestamp = Some(event.timestamp_ms);
        }

        if sender.send(event).is_err() {
            // Receiver dropped, nothing left to deliver to
            break;
        }
    }

    tracing::debug!("Replay source finished");
}

/// Sleep for `ms`, waking early if the running flag clears.
/// Returns false if the sleep was interrupted.
fn sleep_interruptible(ms: f64, running: &AtomicBool) -> bool {
    let mut remaining = ms;
    while remaining > 0.0 {
        if !running.load(Ordering::SeqCst) {
            return false;
        }
        let chunk = remaining.min(100.0);
        thread::sleep(Duration::from_millis(chunk as u64));
        remaining -= chunk;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::types::KIND_BEGIN;
    use std::io::Write;

    #[test]
    fn test_parse_line() {
        let event =
            parse_line(1, r#"{"kind":0,"x":50.0,"y":50.0,"timestamp_ms":1000.0}"#).unwrap();
        assert_eq!(event.kind, KIND_BEGIN);
        assert_eq!(event.x, 50.0);
    }

    #[test]
    fn test_parse_line_reports_line_number() {
        let err = parse_line(7, "not json").unwrap_err();
        match err {
            SourceError::Parse { line, .. } => assert_eq!(line, 7),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_replay_from_file() {
        let dir = std::env::temp_dir().join("gaze-pointer-replay-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("trace.jsonl");

        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{"kind":0,"x":50.0,"y":50.0,"timestamp_ms":1000.0}}"#).unwrap();
        writeln!(file, r#"{{"kind":1,"x":52.0,"y":51.0,"timestamp_ms":1500.0}}"#).unwrap();
        writeln!(file, r#"{{"kind":2,"x":52.0,"y":51.0,"timestamp_ms":3000.0}}"#).unwrap();

        let mut source = ReplaySource::new(TraceInput::File(path), false);
        source.start().unwrap();

        let receiver = source.receiver().clone();
        let mut kinds = Vec::new();
        while let Ok(event) = receiver.recv_timeout(Duration::from_secs(1)) {
            kinds.push(event.kind);
            if kinds.len() == 3 {
                break;
            }
        }
        assert_eq!(kinds, vec![0, 1, 2]);

        source.stop();
        assert!(!source.is_running());
    }

    #[test]
    fn test_missing_file_fails_to_start() {
        let mut source = ReplaySource::new(
            TraceInput::File(PathBuf::from("/nonexistent/trace.jsonl")),
            false,
        );
        assert!(matches!(source.start(), Err(SourceError::Io(_))));
    }

    #[test]
    fn test_double_start_rejected() {
        let dir = std::env::temp_dir().join("gaze-pointer-replay-test-double");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("trace.jsonl");

        // A huge timestamp gap keeps the realtime reader alive in its
        // inter-event sleep until stop() is called.
        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{"kind":0,"x":0.0,"y":0.0,"timestamp_ms":0.0}}"#).unwrap();
        writeln!(
            file,
            r#"{{"kind":2,"x":0.0,"y":0.0,"timestamp_ms":600000.0}}"#
        )
        .unwrap();

        let mut source = ReplaySource::new(TraceInput::File(path), true);
        source.start().unwrap();
        assert!(matches!(source.start(), Err(SourceError::AlreadyRunning)));
        source.stop();
        assert!(!source.is_running());
    }
}
