use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::json;

use crate::logging::{LogEvent, LogFields, LogLevel};

/// Sink for the critical first-render window marked around screen creation.
pub trait RenderSink: Send + Sync {
    fn critical_render_start(&self);
    fn critical_render_end(&self);
}

/// Discards render marks. Used when startup telemetry is disabled.
#[derive(Debug, Default)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn critical_render_start(&self) {}
    fn critical_render_end(&self) {}
}

/// Accumulates critical-render windows for startup telemetry.
#[derive(Debug, Default)]
pub struct StartupMetrics {
    windows: u64,
    total: Duration,
    slowest: Duration,
    open: Option<Instant>,
}

impl StartupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_start(&mut self) {
        self.open = Some(Instant::now());
    }

    /// Close the open window. An end without a matching start is ignored.
    pub fn mark_end(&mut self) {
        if let Some(start) = self.open.take() {
            let elapsed = start.elapsed();
            self.windows = self.windows.saturating_add(1);
            self.total += elapsed;
            if elapsed > self.slowest {
                self.slowest = elapsed;
            }
        }
    }

    pub fn snapshot(&self) -> StartupSnapshot {
        StartupSnapshot {
            windows: self.windows,
            total_ms: self.total.as_millis() as u64,
            slowest_ms: self.slowest.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupSnapshot {
    pub windows: u64,
    pub total_ms: u64,
    pub slowest_ms: u64,
}

impl StartupSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        let mut fields = LogFields::new();
        fields.insert("windows".to_string(), json!(self.windows));
        fields.insert("total_ms".to_string(), json!(self.total_ms));
        fields.insert("slowest_ms".to_string(), json!(self.slowest_ms));
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "startup_metrics".to_string(),
            fields,
        )
    }
}

/// Shared [`RenderSink`] backed by a metrics accumulator.
#[derive(Clone, Default)]
pub struct StartupInstrumentation {
    metrics: Arc<Mutex<StartupMetrics>>,
}

impl StartupInstrumentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StartupSnapshot {
        self.metrics
            .lock()
            .expect("metrics mutex poisoned")
            .snapshot()
    }
}

impl RenderSink for StartupInstrumentation {
    fn critical_render_start(&self) {
        self.metrics
            .lock()
            .expect("metrics mutex poisoned")
            .mark_start();
    }

    fn critical_render_end(&self) {
        self.metrics
            .lock()
            .expect("metrics mutex poisoned")
            .mark_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paired_marks_count_one_window() {
        let instrumentation = StartupInstrumentation::new();
        instrumentation.critical_render_start();
        instrumentation.critical_render_end();
        let snapshot = instrumentation.snapshot();
        assert_eq!(snapshot.windows, 1);
    }

    #[test]
    fn unmatched_end_is_ignored() {
        let mut metrics = StartupMetrics::new();
        metrics.mark_end();
        assert_eq!(metrics.snapshot().windows, 0);
    }

    #[test]
    fn snapshot_converts_to_log_event() {
        let snapshot = StartupSnapshot {
            windows: 2,
            total_ms: 12,
            slowest_ms: 9,
        };
        let event = snapshot.to_log_event("foyer::shell.startup");
        assert_eq!(event.message, "startup_metrics");
        assert_eq!(event.fields.get("windows"), Some(&json!(2)));
    }
}
