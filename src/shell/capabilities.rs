//! The standard capability stack composed by [`ScreenShell::standard`],
//! plus in-memory providers for the security collaborators.
//!
//! [`ScreenShell::standard`]: super::ScreenShell::standard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde_json::json;

use crate::config::NightMode;
use crate::container::ServiceContainer;
use crate::error::Result;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::RenderSink;
use crate::report::{ScreenRecord, ShakeToReportCollector};
use crate::window::WindowFlags;

use super::{LockStateProvider, ScreenCapability, ScreenContext, SettingsStore};

/// Log target for screen lifecycle diagnostics.
pub const LIFECYCLE_TARGET: &str = "foyer::shell.lifecycle";

/// Marks the critical first-render window around screen creation for
/// startup telemetry.
pub struct CriticalRenderProbe {
    sink: Arc<dyn RenderSink>,
}

impl CriticalRenderProbe {
    pub fn new(sink: Arc<dyn RenderSink>) -> Self {
        Self { sink }
    }
}

impl ScreenCapability for CriticalRenderProbe {
    fn name(&self) -> &str {
        "shell.critical_render_probe"
    }

    fn before_create(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        self.sink.critical_render_start();
        Ok(())
    }

    fn after_create(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        self.sink.critical_render_end();
        Ok(())
    }
}

/// Emits one structured debug event per logged lifecycle transition,
/// tagged with the screen name.
pub struct LifecycleLogger {
    logger: Logger,
    level: LogLevel,
}

impl LifecycleLogger {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            level: LogLevel::Debug,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn emit(&self, cx: &ScreenContext<'_>, event: &str) {
        let log_event = event_with_fields(
            self.level,
            LIFECYCLE_TARGET,
            event,
            [json_kv("screen", json!(cx.screen()))],
        );
        let _ = self.logger.log_event(log_event);
    }
}

impl ScreenCapability for LifecycleLogger {
    fn name(&self) -> &str {
        "shell.lifecycle_logger"
    }

    fn before_create(&mut self, cx: &mut ScreenContext<'_>) -> Result<()> {
        self.emit(cx, "on_create");
        Ok(())
    }

    fn before_start(&mut self, cx: &mut ScreenContext<'_>) -> Result<()> {
        self.emit(cx, "on_start");
        Ok(())
    }

    fn before_stop(&mut self, cx: &mut ScreenContext<'_>) -> Result<()> {
        self.emit(cx, "on_stop");
        Ok(())
    }

    fn before_destroy(&mut self, cx: &mut ScreenContext<'_>) -> Result<()> {
        self.emit(cx, "on_destroy");
        Ok(())
    }
}

/// Registers the screen with the shake-to-report collector once the service
/// container is ready at a start edge. A container that is not yet ready
/// skips the registration silently; readiness is checked again at the next
/// start.
pub struct ReportRegistration {
    container: ServiceContainer,
    record: Arc<ScreenRecord>,
    registered: bool,
}

impl ReportRegistration {
    pub fn new(container: ServiceContainer, record: Arc<ScreenRecord>) -> Self {
        Self {
            container,
            record,
            registered: false,
        }
    }
}

impl ScreenCapability for ReportRegistration {
    fn name(&self) -> &str {
        "shell.report_registration"
    }

    fn before_start(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        if self.registered || !self.container.is_ready() {
            return Ok(());
        }
        if let Ok(collector) = self.container.get::<ShakeToReportCollector>() {
            collector.register_screen(&self.record);
            self.registered = true;
        }
        Ok(())
    }
}

/// Re-evaluates screenshot privacy on every resume: the window carries the
/// secure flag iff the session is locked or the user preference is on.
pub struct ScreenshotSecurityPolicy {
    lock_state: Arc<dyn LockStateProvider>,
    settings: Arc<dyn SettingsStore>,
}

impl ScreenshotSecurityPolicy {
    pub fn new(lock_state: Arc<dyn LockStateProvider>, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            lock_state,
            settings,
        }
    }
}

impl ScreenCapability for ScreenshotSecurityPolicy {
    fn name(&self) -> &str {
        "shell.screenshot_security"
    }

    fn after_resume(&mut self, cx: &mut ScreenContext<'_>) -> Result<()> {
        if self.lock_state.is_locked() || self.settings.screen_security_enabled() {
            cx.window().add_flags(WindowFlags::SECURE);
        } else {
            cx.window().clear_flags(WindowFlags::SECURE);
        }
        Ok(())
    }
}

/// In-memory key cache standing in for the screen-lock service: the session
/// counts as locked until the cache holds a passphrase-derived key.
#[derive(Debug, Default)]
pub struct KeyCache {
    locked: AtomicBool,
}

impl KeyCache {
    pub fn new(locked: bool) -> Self {
        Self {
            locked: AtomicBool::new(locked),
        }
    }

    pub fn lock(&self) {
        self.locked.store(true, Ordering::SeqCst);
    }

    pub fn unlock(&self) {
        self.locked.store(false, Ordering::SeqCst);
    }
}

impl LockStateProvider for KeyCache {
    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }
}

/// Settings store holding the global security and theme preferences.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    screen_security: AtomicBool,
    night_mode: RwLock<NightMode>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_screen_security(&self, enabled: bool) {
        self.screen_security.store(enabled, Ordering::SeqCst);
    }

    pub fn set_night_mode(&self, mode: NightMode) {
        if let Ok(mut guard) = self.night_mode.write() {
            *guard = mode;
        }
    }
}

impl SettingsStore for InMemorySettings {
    fn screen_security_enabled(&self) -> bool {
        self.screen_security.load(Ordering::SeqCst)
    }

    fn default_night_mode(&self) -> NightMode {
        self.night_mode
            .read()
            .map(|guard| *guard)
            .unwrap_or(NightMode::Unspecified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_cache_tracks_lock_state() {
        let cache = KeyCache::new(true);
        assert!(cache.is_locked());
        cache.unlock();
        assert!(!cache.is_locked());
        cache.lock();
        assert!(cache.is_locked());
    }

    #[test]
    fn settings_default_to_open_and_unspecified() {
        let settings = InMemorySettings::new();
        assert!(!settings.screen_security_enabled());
        assert_eq!(settings.default_night_mode(), NightMode::Unspecified);

        settings.set_screen_security(true);
        settings.set_night_mode(NightMode::Yes);
        assert!(settings.screen_security_enabled());
        assert_eq!(settings.default_night_mode(), NightMode::Yes);
    }
}
