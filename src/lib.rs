//! Screen shell for the messaging client UI.
//!
//! Every navigable screen shares the same cross-cutting lifecycle behavior:
//! critical-render instrumentation, screenshot privacy, locale/theme
//! configuration override, and recents visibility. This crate centralizes
//! that behavior as capability modules composed around a [`ScreenShell`],
//! with every collaborator injected at construction. The modules follow the
//! RSB `MODULE_SPEC` pattern.

pub mod assets;
pub mod config;
pub mod container;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod platform;
pub mod report;
pub mod shell;
pub mod tasks;
pub mod width;
pub mod window;

pub use assets::{AssetManager, Resources};
pub use config::{
    Configuration, FixedLocaleOverride, FixedNightModeResolver, LocaleOverride, NightMode,
    NightModeResolver, NoLocaleOverride, Orientation, ResolvedNight, UiModeFlags,
    shape_override_configuration,
};
pub use container::{ContainerError, ServiceContainer};
pub use error::{Result, ShellError};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{
    NullRenderSink, RenderSink, StartupInstrumentation, StartupMetrics, StartupSnapshot,
};
pub use platform::PlatformProfile;
pub use report::{CapturedScreen, ReportSnapshot, ScreenRecord, ShakeToReportCollector};
pub use shell::capabilities::{
    CriticalRenderProbe, InMemorySettings, KeyCache, LifecycleLogger, ReportRegistration,
    ScreenshotSecurityPolicy,
};
pub use shell::driver::cli::{CliDriverError, CliShellDriver, DriverResult};
pub use shell::host::{HostEvent, ScreenHost};
pub use shell::transitions::{
    Navigator, RecordingNavigator, ScreenRequest, TransitionOptions, ViewHandle,
};
pub use shell::{
    ActionBar, LifecycleState, LockStateProvider, SavedState, Screen, ScreenCapability,
    ScreenContext, ScreenShell, SettingsStore, ShellDeps,
};
pub use tasks::{TaskEntry, TaskId, TaskRegistry};
pub use width::display_width;
pub use window::{Window, WindowFlags};
