//! Session telemetry log.
//!
//! Counts what the agent did during a session (fixations, samples, speed
//! changes, host failures) so users can inspect a run after the fact.
//! Counters are atomic: the run loop and any status reader may share the
//! log through an `Arc`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Telemetry counters for the current session.
#[derive(Debug)]
pub struct SessionLog {
    fixations_begun: AtomicU64,
    fixations_ended: AtomicU64,
    samples_processed: AtomicU64,
    speed_changes: AtomicU64,
    query_failures: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
    /// Unique session identifier
    session_id: Uuid,
    /// Path for persisting cumulative stats
    persist_path: Option<PathBuf>,
}

impl SessionLog {
    /// Create a new session log.
    pub fn new() -> Self {
        Self {
            fixations_begun: AtomicU64::new(0),
            fixations_ended: AtomicU64::new(0),
            samples_processed: AtomicU64::new(0),
            speed_changes: AtomicU64::new(0),
            query_failures: AtomicU64::new(0),
            session_start: Utc::now(),
            session_id: Uuid::new_v4(),
            persist_path: None,
        }
    }

    /// Create a session log that persists cumulative stats to disk.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut log = Self::new();
        log.persist_path = Some(path);

        if let Err(e) = log.load() {
            tracing::debug!(error = %e, "No previous telemetry stats loaded");
        }

        log
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Record a fixation begin.
    pub fn record_fixation_begun(&self) {
        self.fixations_begun.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fixation end.
    pub fn record_fixation_ended(&self) {
        self.fixations_ended.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a processed in-fixation sample.
    pub fn record_sample(&self) {
        self.samples_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an applied speed change.
    pub fn record_speed_change(&self) {
        self.speed_changes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a skipped decision due to a cursor-query failure.
    pub fn record_query_failure(&self) {
        self.query_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            fixations_begun: self.fixations_begun.load(Ordering::Relaxed),
            fixations_ended: self.fixations_ended.load(Ordering::Relaxed),
            samples_processed: self.samples_processed.load(Ordering::Relaxed),
            speed_changes: self.speed_changes.load(Ordering::Relaxed),
            query_failures: self.query_failures.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_id: self.session_id,
            device: device_name(),
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Fixations begun: {}\n\
             - Fixations ended: {}\n\
             - Samples processed: {}\n\
             - Speed changes applied: {}\n\
             - Skipped decisions (cursor query failures): {}\n\
             - Session duration: {} seconds",
            stats.fixations_begun,
            stats.fixations_ended,
            stats.samples_processed,
            stats.speed_changes,
            stats.query_failures,
            stats.session_duration_secs
        )
    }

    /// Save cumulative stats to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let stats = self.stats();
            let persisted = PersistedStats {
                fixations_begun: stats.fixations_begun,
                fixations_ended: stats.fixations_ended,
                samples_processed: stats.samples_processed,
                speed_changes: stats.speed_changes,
                query_failures: stats.query_failures,
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Load cumulative stats from disk.
    fn load(&mut self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;

                self.fixations_begun
                    .store(persisted.fixations_begun, Ordering::Relaxed);
                self.fixations_ended
                    .store(persisted.fixations_ended, Ordering::Relaxed);
                self.samples_processed
                    .store(persisted.samples_processed, Ordering::Relaxed);
                self.speed_changes
                    .store(persisted.speed_changes, Ordering::Relaxed);
                self.query_failures
                    .store(persisted.query_failures, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.fixations_begun.store(0, Ordering::Relaxed);
        self.fixations_ended.store(0, Ordering::Relaxed);
        self.samples_processed.store(0, Ordering::Relaxed);
        self.speed_changes.store(0, Ordering::Relaxed);
        self.query_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of session statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub fixations_begun: u64,
    pub fixations_ended: u64,
    pub samples_processed: u64,
    pub speed_changes: u64,
    pub query_failures: u64,
    pub session_start: DateTime<Utc>,
    pub session_id: Uuid,
    pub device: String,
    pub session_duration_secs: u64,
}

/// Stats format for persistence.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedStats {
    fixations_begun: u64,
    fixations_ended: u64,
    samples_processed: u64,
    speed_changes: u64,
    query_failures: u64,
    last_updated: DateTime<Utc>,
}

/// Thread-safe shared session log.
pub type SharedSessionLog = Arc<SessionLog>;

/// Create a new shared session log.
pub fn create_shared_log() -> SharedSessionLog {
    Arc::new(SessionLog::new())
}

/// Create a new shared session log with persistence.
pub fn create_shared_log_with_persistence(path: PathBuf) -> SharedSessionLog {
    Arc::new(SessionLog::with_persistence(path))
}

fn device_name() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_log_counting() {
        let log = SessionLog::new();

        log.record_fixation_begun();
        log.record_sample();
        log.record_sample();
        log.record_speed_change();
        log.record_fixation_ended();

        let stats = log.stats();
        assert_eq!(stats.fixations_begun, 1);
        assert_eq!(stats.samples_processed, 2);
        assert_eq!(stats.speed_changes, 1);
        assert_eq!(stats.fixations_ended, 1);
        assert_eq!(stats.query_failures, 0);
    }

    #[test]
    fn test_reset() {
        let log = SessionLog::new();
        log.record_fixation_begun();
        log.reset();
        assert_eq!(log.stats().fixations_begun, 0);
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = std::env::temp_dir().join("gaze-pointer-telemetry-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("telemetry.json");
        let _ = std::fs::remove_file(&path);

        let log = SessionLog::with_persistence(path.clone());
        log.record_fixation_begun();
        log.record_speed_change();
        log.save().unwrap();

        let reloaded = SessionLog::with_persistence(path);
        let stats = reloaded.stats();
        assert_eq!(stats.fixations_begun, 1);
        assert_eq!(stats.speed_changes, 1);
    }
}
