//! Host-side driver translating visibility and focus changes into the
//! canonical lifecycle callback order.

use serde_json::json;

use crate::config::Configuration;
use crate::error::Result;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::tasks::TaskRegistry;

use super::{LifecycleState, SavedState, Screen, ScreenShell};

const HOST_TARGET: &str = "foyer::shell.host";

/// Events a host delivers to a foregrounded screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    FocusGained,
    FocusLost,
    Hidden,
    Visible,
    Finish,
}

/// Drives one shell through the platform callback order and tracks its task
/// in the recents registry.
pub struct ScreenHost<S: Screen> {
    shell: ScreenShell<S>,
    tasks: TaskRegistry,
    logger: Logger,
}

impl<S: Screen> ScreenHost<S> {
    pub fn new(shell: ScreenShell<S>, logger: Logger) -> Self {
        Self {
            shell,
            tasks: TaskRegistry::new(),
            logger,
        }
    }

    pub fn shell(&self) -> &ScreenShell<S> {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut ScreenShell<S> {
        &mut self.shell
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskRegistry {
        &mut self.tasks
    }

    /// Bring the screen on stage: track its task, attach, create, start,
    /// resume.
    pub fn launch(&mut self, base: &Configuration, saved: Option<&SavedState>) -> Result<()> {
        let task_id = self.tasks.create_task(self.shell.name().to_string());
        self.shell.set_task_id(task_id);
        self.shell.attach_base_context(base)?;
        self.shell.create(saved)?;
        self.shell.start()?;
        self.shell.resume()?;
        self.log("host_started");
        Ok(())
    }

    /// Apply one host event to the screen.
    pub fn handle_event(&mut self, event: HostEvent) -> Result<()> {
        match event {
            HostEvent::FocusLost => {
                if self.shell.state() == LifecycleState::Resumed {
                    self.shell.pause()?;
                }
            }
            HostEvent::FocusGained => {
                if matches!(
                    self.shell.state(),
                    LifecycleState::Paused | LifecycleState::Started
                ) {
                    self.shell.resume()?;
                }
            }
            HostEvent::Hidden => {
                if self.shell.state() == LifecycleState::Resumed {
                    self.shell.pause()?;
                }
                if matches!(
                    self.shell.state(),
                    LifecycleState::Started | LifecycleState::Paused
                ) {
                    self.shell.stop()?;
                }
            }
            HostEvent::Visible => {
                if self.shell.state() == LifecycleState::Stopped {
                    self.shell.start()?;
                    self.shell.resume()?;
                }
            }
            HostEvent::Finish => self.finish()?,
        }
        Ok(())
    }

    /// Wind the screen down from wherever it currently is.
    pub fn finish(&mut self) -> Result<()> {
        if self.shell.state() == LifecycleState::Resumed {
            self.shell.pause()?;
        }
        if matches!(
            self.shell.state(),
            LifecycleState::Started | LifecycleState::Paused
        ) {
            self.shell.stop()?;
        }
        if matches!(
            self.shell.state(),
            LifecycleState::Created | LifecycleState::Stopped
        ) {
            self.shell.destroy()?;
            self.log("host_stopped");
        }
        Ok(())
    }

    /// Launch, replay the scripted events, then finish. Mirrors a live host
    /// session without a terminal attached.
    pub fn run_scripted<I>(&mut self, base: &Configuration, events: I) -> Result<()>
    where
        I: IntoIterator<Item = HostEvent>,
    {
        self.launch(base, None)?;
        for event in events {
            let finished = event == HostEvent::Finish;
            self.handle_event(event)?;
            if finished {
                return Ok(());
            }
        }
        self.finish()
    }

    fn log(&self, message: &str) {
        let event = event_with_fields(
            LogLevel::Info,
            HOST_TARGET,
            message,
            [json_kv("screen", json!(self.shell.name()))],
        );
        let _ = self.logger.log_event(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{FixedNightModeResolver, NoLocaleOverride, ResolvedNight};
    use crate::container::ServiceContainer;
    use crate::logging::{Logger, MemorySink};
    use crate::metrics::NullRenderSink;
    use crate::platform::PlatformProfile;
    use crate::shell::ShellDeps;
    use crate::shell::capabilities::{InMemorySettings, KeyCache};

    #[derive(Default)]
    struct CountingScreen;

    impl Screen for CountingScreen {
        fn name(&self) -> &str {
            "counting"
        }
    }

    fn host() -> ScreenHost<CountingScreen> {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::from_shared(sink);
        let deps = ShellDeps {
            lock_state: Arc::new(KeyCache::new(false)),
            settings: Arc::new(InMemorySettings::new()),
            container: ServiceContainer::new(),
            render_sink: Arc::new(NullRenderSink),
            locale_override: Arc::new(NoLocaleOverride),
            night_mode_resolver: Arc::new(FixedNightModeResolver(ResolvedNight::No)),
            logger: logger.clone(),
            profile: PlatformProfile::modern(),
        };
        ScreenHost::new(
            ScreenShell::standard(CountingScreen::default(), deps),
            logger,
        )
    }

    #[test]
    fn launch_brings_the_screen_to_resumed() {
        let mut host = host();
        host.launch(&Configuration::default(), None).unwrap();
        assert_eq!(host.shell().state(), LifecycleState::Resumed);
        assert_eq!(host.tasks().entries().len(), 1);
        assert_eq!(host.tasks().entries()[0].label, "counting");
    }

    #[test]
    fn focus_round_trip_pauses_and_resumes() {
        let mut host = host();
        host.launch(&Configuration::default(), None).unwrap();
        host.handle_event(HostEvent::FocusLost).unwrap();
        assert_eq!(host.shell().state(), LifecycleState::Paused);
        host.handle_event(HostEvent::FocusGained).unwrap();
        assert_eq!(host.shell().state(), LifecycleState::Resumed);
    }

    #[test]
    fn hidden_then_visible_stops_and_restarts() {
        let mut host = host();
        host.launch(&Configuration::default(), None).unwrap();
        host.handle_event(HostEvent::Hidden).unwrap();
        assert_eq!(host.shell().state(), LifecycleState::Stopped);
        host.handle_event(HostEvent::Visible).unwrap();
        assert_eq!(host.shell().state(), LifecycleState::Resumed);
    }

    #[test]
    fn redundant_events_are_ignored() {
        let mut host = host();
        host.launch(&Configuration::default(), None).unwrap();
        host.handle_event(HostEvent::FocusGained).unwrap();
        assert_eq!(host.shell().state(), LifecycleState::Resumed);
        host.handle_event(HostEvent::Visible).unwrap();
        assert_eq!(host.shell().state(), LifecycleState::Resumed);
    }

    #[test]
    fn run_scripted_finishes_in_destroyed() {
        let mut host = host();
        host.run_scripted(
            &Configuration::default(),
            [
                HostEvent::FocusLost,
                HostEvent::FocusGained,
                HostEvent::Hidden,
                HostEvent::Visible,
                HostEvent::Finish,
            ],
        )
        .unwrap();
        assert_eq!(host.shell().state(), LifecycleState::Destroyed);
    }

    #[test]
    fn run_scripted_without_finish_still_winds_down() {
        let mut host = host();
        host.run_scripted(&Configuration::default(), [HostEvent::FocusLost])
            .unwrap();
        assert_eq!(host.shell().state(), LifecycleState::Destroyed);
    }
}
