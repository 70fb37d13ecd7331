use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::IngestionError;

use super::unified::IngestionFormat;

/// Severity of a failed ingestion, used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// The input was reachable but unusable (unsupported or malformed).
    Error,
    /// Critical error (missing input or other I/O failures).
    Critical,
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// The input path used for ingestion.
    pub path: PathBuf,
    /// Format used for ingestion. `None` if the attempt failed before a format was chosen.
    pub format: Option<IngestionFormat>,
}

impl IngestionContext {
    fn format_label(&self) -> &'static str {
        self.format.map_or("-", IngestionFormat::as_str)
    }
}

/// Stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of ingested rows.
    pub rows: usize,
    /// Number of columns in the resulting table.
    pub columns: usize,
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when ingestion succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when ingestion fails.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestionError) {}

    /// Called when an ingestion failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Fan out to every observer in the list, in order.
impl IngestionObserver for Vec<Arc<dyn IngestionObserver>> {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.iter().for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.iter().for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Emits ingestion events through `tracing`.
///
/// Successes are logged at `info`, failures at `warn` (or `error` for `Critical`), alerts at
/// `error`. Nothing is printed unless the application installs a subscriber.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::info!(
            format = ctx.format_label(),
            path = %ctx.path.display(),
            rows = stats.rows,
            columns = stats.columns,
            "ingest ok"
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        if severity >= IngestionSeverity::Critical {
            tracing::error!(
                severity = ?severity,
                format = ctx.format_label(),
                path = %ctx.path.display(),
                error = %error,
                "ingest failed"
            );
        } else {
            tracing::warn!(
                severity = ?severity,
                format = ctx.format_label(),
                path = %ctx.path.display(),
                error = %error,
                "ingest failed"
            );
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        tracing::error!(
            alert = true,
            severity = ?severity,
            format = ctx.format_label(),
            path = %ctx.path.display(),
            error = %error,
            "ingest alert"
        );
    }
}

/// Appends one line per ingestion event to a local log file.
///
/// Line shape: `<unix secs> <event> format=<fmt> path=<path> <details>`, where `<event>` is `ok`,
/// `fail` or `ALERT`. Writes are best-effort; a log file that cannot be opened is skipped.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn record(&self, event: &str, ctx: &IngestionContext, details: fmt::Arguments<'_>) {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        let _guard = self.lock.lock().ok();
        let opened = OpenOptions::new().create(true).append(true).open(&self.path);
        if let Ok(mut log) = opened {
            let _ = writeln!(
                log,
                "{ts} {event} format={} path={} {details}",
                ctx.format_label(),
                ctx.path.display()
            );
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.record("ok", ctx, format_args!("rows={} columns={}", stats.rows, stats.columns));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.record("fail", ctx, format_args!("severity={severity:?} err={error}"));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.record("ALERT", ctx, format_args!("severity={severity:?} err={error}"));
    }
}
