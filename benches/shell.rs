use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use foyer_mvp::logging::{LogEvent, LogSink, Logger, LoggingResult};
use foyer_mvp::{
    Configuration, FixedNightModeResolver, HostEvent, InMemorySettings, KeyCache, NightMode,
    NoLocaleOverride, NullRenderSink, PlatformProfile, ResolvedNight, Screen, ScreenHost,
    ScreenShell, ServiceContainer, ShellDeps,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

struct ChatScreen;

impl Screen for ChatScreen {
    fn name(&self) -> &str {
        "chat"
    }
}

fn deps(logger: Logger) -> ShellDeps {
    ShellDeps {
        lock_state: Arc::new(KeyCache::new(false)),
        settings: Arc::new(InMemorySettings::new()),
        container: ServiceContainer::new(),
        render_sink: Arc::new(NullRenderSink),
        locale_override: Arc::new(NoLocaleOverride),
        night_mode_resolver: Arc::new(FixedNightModeResolver(ResolvedNight::No)),
        logger,
        profile: PlatformProfile::modern(),
    }
}

fn scripted_events() -> Vec<HostEvent> {
    vec![
        HostEvent::FocusLost,
        HostEvent::FocusGained,
        HostEvent::Hidden,
        HostEvent::Visible,
        HostEvent::Finish,
    ]
}

fn shell_lifecycle_script(c: &mut Criterion) {
    let script = scripted_events();
    c.bench_function("shell_lifecycle_script", |b| {
        b.iter(|| {
            let logger = Logger::new(NullSink);
            let mut host = ScreenHost::new(
                ScreenShell::standard(ChatScreen, deps(logger.clone())),
                logger,
            );
            host.run_scripted(&Configuration::default(), black_box(script.clone()))
                .expect("scripted run");
        });
    });
}

fn shell_attach_shaping(c: &mut Criterion) {
    let base = Configuration::default();
    c.bench_function("shell_attach_shaping", |b| {
        b.iter(|| {
            let logger = Logger::new(NullSink);
            let mut shell = ScreenShell::standard(ChatScreen, deps(logger));
            shell.set_local_night_mode(NightMode::Yes);
            shell
                .attach_base_context(black_box(&base))
                .expect("attach");
        });
    });
}

criterion_group!(benches, shell_lifecycle_script, shell_attach_shaping);
criterion_main!(benches);
