//! Configuration module orchestrator following the RSB module specification.
//!
//! Downstream code imports configuration types from here while the
//! implementation details live in the private `core` module.

mod core;

pub use self::core::{
    Configuration, FixedLocaleOverride, FixedNightModeResolver, LocaleOverride, NightMode,
    NightModeResolver, NoLocaleOverride, Orientation, ResolvedNight, UiModeFlags,
    shape_override_configuration,
};
