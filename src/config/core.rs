use bitflags::bitflags;

bitflags! {
    /// Packed ui-mode field of a configuration snapshot. The night bits live
    /// under their own mask so they can be replaced without disturbing the
    /// mode type bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UiModeFlags: u32 {
        const TYPE_NORMAL = 0x01;
        const NIGHT_NO = 0x10;
        const NIGHT_YES = 0x20;
        const NIGHT_MASK = 0x30;
    }
}

/// Device orientation as carried by a configuration snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Undefined,
    Portrait,
    Landscape,
}

/// Tri-state dark-theme setting held by the delegate layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NightMode {
    Yes,
    No,
    #[default]
    Unspecified,
}

impl NightMode {
    /// First specified value wins; `Unspecified` defers to `other`.
    pub fn or(self, other: NightMode) -> NightMode {
        match self {
            NightMode::Unspecified => other,
            specified => specified,
        }
    }
}

/// A night-mode decision that can no longer be "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedNight {
    Yes,
    No,
}

impl ResolvedNight {
    pub fn ui_mode_bits(self) -> UiModeFlags {
        match self {
            ResolvedNight::Yes => UiModeFlags::NIGHT_YES,
            ResolvedNight::No => UiModeFlags::NIGHT_NO,
        }
    }
}

/// System-derived fallback consulted when neither the screen nor the
/// application carries an explicit night-mode choice.
pub trait NightModeResolver: Send + Sync {
    fn night_mode(&self) -> ResolvedNight;
}

/// Fixed resolver for hosts that already know the system theme.
#[derive(Debug, Clone, Copy)]
pub struct FixedNightModeResolver(pub ResolvedNight);

impl NightModeResolver for FixedNightModeResolver {
    fn night_mode(&self) -> ResolvedNight {
        self.0
    }
}

/// Snapshot of the display/locale configuration inherited from the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub ui_mode: UiModeFlags,
    pub orientation: Orientation,
    pub locale: String,
    pub font_scale: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            ui_mode: UiModeFlags::TYPE_NORMAL,
            orientation: Orientation::Undefined,
            locale: "en-US".to_string(),
            font_scale: 1.0,
        }
    }
}

impl Configuration {
    pub fn night_bits(&self) -> UiModeFlags {
        self.ui_mode & UiModeFlags::NIGHT_MASK
    }

    pub fn is_night(&self) -> bool {
        self.ui_mode.contains(UiModeFlags::NIGHT_YES)
    }
}

/// Build the override configuration for a screen: resolve the effective
/// night mode, replace the night bits, and neutralize orientation so it
/// cannot influence resource resolution.
pub fn shape_override_configuration(
    base: &Configuration,
    local_night_mode: NightMode,
    default_night_mode: NightMode,
    resolver: &dyn NightModeResolver,
) -> Configuration {
    let night = match local_night_mode.or(default_night_mode) {
        NightMode::Yes => ResolvedNight::Yes,
        NightMode::No => ResolvedNight::No,
        NightMode::Unspecified => resolver.night_mode(),
    };

    let mut configuration = base.clone();
    configuration.ui_mode = (configuration.ui_mode - UiModeFlags::NIGHT_MASK) | night.ui_mode_bits();
    configuration.orientation = Orientation::Undefined;
    configuration
}

/// Locale override seam. Given first chance to rewrite the override
/// configuration before it is applied to a screen.
pub trait LocaleOverride: Send + Sync {
    fn prepare_override_configuration(&self, screen: &str, configuration: &mut Configuration);
}

/// Leaves the configuration untouched.
#[derive(Debug, Default)]
pub struct NoLocaleOverride;

impl LocaleOverride for NoLocaleOverride {
    fn prepare_override_configuration(&self, _screen: &str, _configuration: &mut Configuration) {}
}

/// Forces every screen onto one language tag, the way the client's
/// in-app language setting overrides the system locale.
#[derive(Debug, Clone)]
pub struct FixedLocaleOverride {
    tag: String,
}

impl FixedLocaleOverride {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl LocaleOverride for FixedLocaleOverride {
    fn prepare_override_configuration(&self, _screen: &str, configuration: &mut Configuration) {
        configuration.locale = self.tag.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_with(bits: UiModeFlags, orientation: Orientation) -> Configuration {
        Configuration {
            ui_mode: UiModeFlags::TYPE_NORMAL | bits,
            orientation,
            ..Configuration::default()
        }
    }

    #[test]
    fn explicit_yes_wins_over_default_and_system() {
        let base = base_with(UiModeFlags::NIGHT_NO, Orientation::Portrait);
        let shaped = shape_override_configuration(
            &base,
            NightMode::Yes,
            NightMode::No,
            &FixedNightModeResolver(ResolvedNight::No),
        );
        assert_eq!(shaped.night_bits(), UiModeFlags::NIGHT_YES);
        assert_eq!(shaped.orientation, Orientation::Undefined);
    }

    #[test]
    fn unspecified_local_falls_back_to_default() {
        let base = base_with(UiModeFlags::NIGHT_YES, Orientation::Landscape);
        let shaped = shape_override_configuration(
            &base,
            NightMode::Unspecified,
            NightMode::No,
            &FixedNightModeResolver(ResolvedNight::Yes),
        );
        assert_eq!(shaped.night_bits(), UiModeFlags::NIGHT_NO);
    }

    #[test]
    fn fully_unspecified_uses_the_system_resolver() {
        let base = base_with(UiModeFlags::empty(), Orientation::Portrait);
        let shaped = shape_override_configuration(
            &base,
            NightMode::Unspecified,
            NightMode::Unspecified,
            &FixedNightModeResolver(ResolvedNight::Yes),
        );
        assert_eq!(shaped.night_bits(), UiModeFlags::NIGHT_YES);
        assert_eq!(shaped.orientation, Orientation::Undefined);
    }

    #[test]
    fn shaping_never_mutates_the_base_snapshot() {
        let base = base_with(UiModeFlags::NIGHT_NO, Orientation::Portrait);
        let before = base.clone();
        let _ = shape_override_configuration(
            &base,
            NightMode::Yes,
            NightMode::Unspecified,
            &FixedNightModeResolver(ResolvedNight::No),
        );
        assert_eq!(base, before);
    }

    #[test]
    fn type_bits_survive_night_replacement() {
        let base = base_with(UiModeFlags::NIGHT_NO, Orientation::Undefined);
        let shaped = shape_override_configuration(
            &base,
            NightMode::Yes,
            NightMode::Unspecified,
            &FixedNightModeResolver(ResolvedNight::No),
        );
        assert!(shaped.ui_mode.contains(UiModeFlags::TYPE_NORMAL));
    }

    #[test]
    fn fixed_locale_override_rewrites_the_tag() {
        let mut configuration = Configuration::default();
        FixedLocaleOverride::new("de-DE")
            .prepare_override_configuration("chat", &mut configuration);
        assert_eq!(configuration.locale, "de-DE");
    }
}
