//! Shake-to-report diagnostics: a registry of live screens and the state
//! capture behind the bug-report gesture.

use std::sync::{Arc, Mutex, RwLock, Weak};

use crate::shell::LifecycleState;
use crate::width::sanitize_to_width;

/// Captured status lines are cut to one switcher-friendly row.
const STATUS_LINE_WIDTH: usize = 80;

/// Shared record of one live screen. The shell owns the strong handle and
/// keeps it current; the collector only ever holds it weakly.
#[derive(Debug)]
pub struct ScreenRecord {
    name: String,
    state: RwLock<LifecycleState>,
    status_line: RwLock<String>,
}

impl ScreenRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(LifecycleState::Initial),
            status_line: RwLock::new(String::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_state(&self, state: LifecycleState) {
        if let Ok(mut guard) = self.state.write() {
            *guard = state;
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
            .read()
            .map(|guard| *guard)
            .unwrap_or(LifecycleState::Initial)
    }

    pub fn set_status_line(&self, line: impl Into<String>) {
        if let Ok(mut guard) = self.status_line.write() {
            *guard = line.into();
        }
    }

    pub fn status_line(&self) -> String {
        self.status_line
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// One screen's entry in a captured report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedScreen {
    pub name: String,
    pub state: LifecycleState,
    pub status_line: String,
}

/// Snapshot of every live screen at capture time.
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    pub screens: Vec<CapturedScreen>,
    pub fingerprint: String,
}

/// Aggregates active screens so the shake gesture can capture current UI
/// state. Registration is weak: a dropped screen disappears from the next
/// capture without unregistering.
#[derive(Default)]
pub struct ShakeToReportCollector {
    screens: Mutex<Vec<Weak<ScreenRecord>>>,
    last_fingerprint: Mutex<Option<blake3::Hash>>,
}

impl ShakeToReportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_screen(&self, record: &Arc<ScreenRecord>) {
        let mut guard = self.screens.lock().expect("collector mutex poisoned");
        guard.push(Arc::downgrade(record));
    }

    /// Live records, pruning entries whose screens have been dropped.
    pub fn live_screens(&self) -> Vec<Arc<ScreenRecord>> {
        let mut guard = self.screens.lock().expect("collector mutex poisoned");
        guard.retain(|weak| weak.strong_count() > 0);
        guard.iter().filter_map(Weak::upgrade).collect()
    }

    /// Capture the current UI state. Returns `None` when nothing changed
    /// since the previous capture, so repeated shakes don't produce
    /// duplicate reports.
    pub fn capture(&self) -> Option<ReportSnapshot> {
        let screens: Vec<CapturedScreen> = self
            .live_screens()
            .iter()
            .map(|record| CapturedScreen {
                name: record.name().to_string(),
                state: record.state(),
                status_line: sanitize_to_width(&record.status_line(), STATUS_LINE_WIDTH),
            })
            .collect();

        let mut hasher = blake3::Hasher::new();
        for screen in &screens {
            hasher.update(screen.name.as_bytes());
            hasher.update(&[0, screen.state as u8, 0]);
            hasher.update(screen.status_line.as_bytes());
            hasher.update(&[0]);
        }
        let fingerprint = hasher.finalize();

        let mut last = self
            .last_fingerprint
            .lock()
            .expect("collector mutex poisoned");
        if last.as_ref().is_some_and(|previous| *previous == fingerprint) {
            return None;
        }
        *last = Some(fingerprint);

        Some(ReportSnapshot {
            screens,
            fingerprint: fingerprint.to_hex().to_string(),
        })
    }
}
