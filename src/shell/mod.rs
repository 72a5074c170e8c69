use std::sync::Arc;

use serde_json::{Map, Value};

use crate::assets::{AssetManager, Resources};
use crate::config::{
    Configuration, LocaleOverride, NightMode, NightModeResolver, shape_override_configuration,
};
use crate::container::ServiceContainer;
use crate::error::{Result, ShellError};
use crate::logging::Logger;
use crate::metrics::RenderSink;
use crate::platform::PlatformProfile;
use crate::report::ScreenRecord;
use crate::tasks::{TaskId, TaskRegistry};
use crate::window::Window;

use self::capabilities::{
    CriticalRenderProbe, LifecycleLogger, ReportRegistration, ScreenshotSecurityPolicy,
};
use self::transitions::{Navigator, ScreenRequest, TransitionOptions, ViewHandle};

pub mod capabilities;
pub mod driver;
pub mod host;
pub mod transitions;

/// Saved state restored into `on_create`.
pub type SavedState = Map<String, Value>;

/// Host-controlled lifecycle states, in their linear order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Initial,
    Attached,
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
}

/// One navigable unit of user interface. Implementations carry only the
/// screen's own behavior; the shell wraps every hook with the cross-cutting
/// capability pipeline.
pub trait Screen: Send {
    fn name(&self) -> &str;

    fn on_create(
        &mut self,
        _cx: &mut ScreenContext<'_>,
        _saved: Option<&SavedState>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_start(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_resume(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_pause(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_stop(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_destroy(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Per-hook view handed to capabilities and to the screen itself.
pub struct ScreenContext<'a> {
    screen: &'a str,
    state: LifecycleState,
    window: &'a mut Window,
    record: &'a ScreenRecord,
}

impl<'a> ScreenContext<'a> {
    pub fn screen(&self) -> &str {
        self.screen
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn window(&mut self) -> &mut Window {
        self.window
    }

    /// Publish a short status line into the screen's diagnostic record. The
    /// shake-to-report capture picks it up on the next shake.
    pub fn set_status_line(&mut self, line: impl Into<String>) {
        self.record.set_status_line(line);
    }
}

/// Cross-cutting behavior composed around the screen's own hooks. Hooks run
/// in registration order and default to no-ops, so a capability implements
/// only the edges it cares about.
pub trait ScreenCapability: Send {
    fn name(&self) -> &str {
        "capability"
    }

    fn before_create(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }

    fn after_create(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }

    fn before_start(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }

    fn after_resume(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }

    fn before_stop(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }

    fn before_destroy(&mut self, _cx: &mut ScreenContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Session lock query backed by the key-caching service.
pub trait LockStateProvider: Send + Sync {
    fn is_locked(&self) -> bool;
}

/// Persisted global settings consulted by the shell. Read fresh on each
/// callback, never cached across them.
pub trait SettingsStore: Send + Sync {
    fn screen_security_enabled(&self) -> bool;
    fn default_night_mode(&self) -> NightMode;
}

/// Collaborators injected into every shell at construction.
#[derive(Clone)]
pub struct ShellDeps {
    pub lock_state: Arc<dyn LockStateProvider>,
    pub settings: Arc<dyn SettingsStore>,
    pub container: ServiceContainer,
    pub render_sink: Arc<dyn RenderSink>,
    pub locale_override: Arc<dyn LocaleOverride>,
    pub night_mode_resolver: Arc<dyn NightModeResolver>,
    pub logger: Logger,
    pub profile: PlatformProfile,
}

/// Top app bar configured by screens that present one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBar {
    title: String,
}

impl ActionBar {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

/// Shell around one concrete screen. Owns the window, the lifecycle state
/// machine, and the capability pipeline; the host drives it through the
/// platform callback order.
pub struct ScreenShell<S: Screen> {
    screen: S,
    capabilities: Vec<Box<dyn ScreenCapability>>,
    deps: ShellDeps,
    window: Window,
    record: Arc<ScreenRecord>,
    state: LifecycleState,
    base_configuration: Option<Configuration>,
    resources: Option<Resources>,
    override_applied: bool,
    local_night_mode: NightMode,
    action_bar: Option<ActionBar>,
    task_id: Option<TaskId>,
}

impl<S: Screen> ScreenShell<S> {
    /// Shell with no capabilities installed. Most screens want [`standard`].
    ///
    /// [`standard`]: ScreenShell::standard
    pub fn bare(screen: S, deps: ShellDeps) -> Self {
        let record = Arc::new(ScreenRecord::new(screen.name()));
        Self {
            screen,
            capabilities: Vec::new(),
            deps,
            window: Window::new(),
            record,
            state: LifecycleState::Initial,
            base_configuration: None,
            resources: None,
            override_applied: false,
            local_night_mode: NightMode::Unspecified,
            action_bar: None,
            task_id: None,
        }
    }

    /// Shell with the standard capability stack: critical-render probe,
    /// lifecycle logger, report registration, screenshot security.
    pub fn standard(screen: S, deps: ShellDeps) -> Self {
        let shell = Self::bare(screen, deps);
        let render_sink = shell.deps.render_sink.clone();
        let logger = shell.deps.logger.clone();
        let container = shell.deps.container.clone();
        let record = shell.record.clone();
        let lock_state = shell.deps.lock_state.clone();
        let settings = shell.deps.settings.clone();
        shell
            .with_capability(CriticalRenderProbe::new(render_sink))
            .with_capability(LifecycleLogger::new(logger))
            .with_capability(ReportRegistration::new(container, record))
            .with_capability(ScreenshotSecurityPolicy::new(lock_state, settings))
    }

    pub fn with_capability<C>(mut self, capability: C) -> Self
    where
        C: ScreenCapability + 'static,
    {
        self.capabilities.push(Box::new(capability));
        self
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn record(&self) -> &Arc<ScreenRecord> {
        &self.record
    }

    pub fn deps(&self) -> &ShellDeps {
        &self.deps
    }

    pub fn base_configuration(&self) -> Option<&Configuration> {
        self.base_configuration.as_ref()
    }

    /// The override configuration currently in effect, if an attach has
    /// installed one.
    pub fn override_configuration(&self) -> Option<&Configuration> {
        self.resources
            .as_ref()
            .filter(|resources| resources.has_override())
            .map(|resources| resources.assets().configuration())
    }

    /// Per-screen night-mode override. Takes effect at the next attach.
    pub fn set_local_night_mode(&mut self, mode: NightMode) {
        self.local_night_mode = mode;
    }

    pub fn set_task_id(&mut self, id: TaskId) {
        self.task_id = Some(id);
    }

    pub fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    pub fn set_action_bar(&mut self, bar: ActionBar) {
        self.action_bar = Some(bar);
    }

    pub fn action_bar(&self) -> Option<&ActionBar> {
        self.action_bar.as_ref()
    }

    /// The configured action bar. Panics when the screen has none; asking
    /// for a bar that was never configured is a programming error, not a
    /// runtime condition.
    pub fn require_action_bar(&self) -> &ActionBar {
        self.action_bar
            .as_ref()
            .expect("screen has no action bar configured")
    }

    /// Attach the inherited configuration and derive this screen's override:
    /// night mode resolved to an explicit value, orientation neutralized,
    /// locale override given its rewrite pass.
    pub fn attach_base_context(&mut self, base: &Configuration) -> Result<()> {
        self.transition(LifecycleState::Attached)?;
        self.resources = Some(Resources::new(base.clone()));
        self.base_configuration = Some(base.clone());
        self.override_applied = false;

        let shaped = shape_override_configuration(
            base,
            self.local_night_mode,
            self.deps.settings.default_night_mode(),
            self.deps.night_mode_resolver.as_ref(),
        );
        self.apply_override_configuration(shaped)
    }

    /// Hand the configuration to the locale override, then install it as the
    /// screen's override configuration. Runs once per attach cycle.
    pub fn apply_override_configuration(&mut self, mut configuration: Configuration) -> Result<()> {
        if self.override_applied {
            return Err(ShellError::OverrideAlreadyApplied);
        }
        let resources = self
            .resources
            .as_mut()
            .ok_or(ShellError::BaseContextMissing)?;
        self.deps
            .locale_override
            .prepare_override_configuration(self.record.name(), &mut configuration);
        resources.apply_override(configuration);
        self.override_applied = true;
        Ok(())
    }

    /// Asset manager for this screen. On platform revisions with the
    /// defective override asset path this bypasses the override
    /// configuration and resolves against the unmodified resources.
    pub fn assets(&self) -> Result<&AssetManager> {
        let resources = self
            .resources
            .as_ref()
            .ok_or(ShellError::BaseContextMissing)?;
        if self.deps.profile.override_assets_defective {
            Ok(resources.base_assets())
        } else {
            Ok(resources.assets())
        }
    }

    pub fn create(&mut self, saved: Option<&SavedState>) -> Result<()> {
        self.transition(LifecycleState::Created)?;
        self.each_capability(|capability, cx| capability.before_create(cx))?;
        self.run_screen(|screen, cx| screen.on_create(cx, saved))?;
        self.each_capability(|capability, cx| capability.after_create(cx))
    }

    pub fn start(&mut self) -> Result<()> {
        self.transition(LifecycleState::Started)?;
        self.each_capability(|capability, cx| capability.before_start(cx))?;
        self.run_screen(|screen, cx| screen.on_start(cx))
    }

    pub fn resume(&mut self) -> Result<()> {
        self.transition(LifecycleState::Resumed)?;
        self.run_screen(|screen, cx| screen.on_resume(cx))?;
        self.each_capability(|capability, cx| capability.after_resume(cx))
    }

    pub fn pause(&mut self) -> Result<()> {
        self.transition(LifecycleState::Paused)?;
        self.run_screen(|screen, cx| screen.on_pause(cx))
    }

    pub fn stop(&mut self) -> Result<()> {
        self.transition(LifecycleState::Stopped)?;
        self.each_capability(|capability, cx| capability.before_stop(cx))?;
        self.run_screen(|screen, cx| screen.on_stop(cx))
    }

    pub fn destroy(&mut self) -> Result<()> {
        self.transition(LifecycleState::Destroyed)?;
        self.each_capability(|capability, cx| capability.before_destroy(cx))?;
        self.run_screen(|screen, cx| screen.on_destroy(cx))
    }

    /// Exclude or include this screen's task in the recents switcher. A task
    /// id that matches nothing leaves the registry untouched; platforms
    /// below the capability floor skip the whole operation.
    pub fn set_exclude_from_recents(&self, registry: &mut TaskRegistry, exclude: bool) {
        if !self.deps.profile.supports_recents_exclusion {
            return;
        }
        let Some(task_id) = self.task_id else {
            return;
        };
        for task in registry.entries_mut() {
            if task.id == task_id {
                task.excluded_from_recents = exclude;
            }
        }
    }

    /// Launch another screen with a shared-element transition keyed by the
    /// given view and transition name.
    pub fn start_screen_with_transition(
        &self,
        navigator: &mut dyn Navigator,
        request: ScreenRequest,
        shared_view: &ViewHandle,
        transition_name: &str,
    ) -> Result<()> {
        let options = TransitionOptions::scene(shared_view, transition_name);
        navigator.start_screen(request, Some(options))
    }

    fn transition(&mut self, to: LifecycleState) -> Result<()> {
        use LifecycleState::*;
        let allowed = matches!(
            (self.state, to),
            (Initial, Attached)
                | (Attached, Created)
                | (Created, Started)
                | (Stopped, Started)
                | (Started, Resumed)
                | (Paused, Resumed)
                | (Resumed, Paused)
                | (Started, Stopped)
                | (Paused, Stopped)
                | (Created, Destroyed)
                | (Stopped, Destroyed)
        );
        if !allowed {
            return Err(ShellError::Lifecycle {
                from: self.state,
                to,
            });
        }
        self.state = to;
        self.record.set_state(to);
        Ok(())
    }

    fn each_capability<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&mut dyn ScreenCapability, &mut ScreenContext<'_>) -> Result<()>,
    {
        let Self {
            capabilities,
            window,
            record,
            state,
            ..
        } = self;
        let record = &**record;
        let mut cx = ScreenContext {
            screen: record.name(),
            state: *state,
            window,
            record,
        };
        for capability in capabilities.iter_mut() {
            f(capability.as_mut(), &mut cx)?;
        }
        Ok(())
    }

    fn run_screen<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut S, &mut ScreenContext<'_>) -> Result<()>,
    {
        let Self {
            screen,
            window,
            record,
            state,
            ..
        } = self;
        let record = &**record;
        let mut cx = ScreenContext {
            screen: record.name(),
            state: *state,
            window,
            record,
        };
        f(screen, &mut cx)
    }
}
