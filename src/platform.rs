//! Platform quirk profile resolved once at startup.

/// Capability profile derived from the host platform revision. Resolved once
/// and injected, so lifecycle code branches on capabilities instead of raw
/// version numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    version: u32,
    pub supports_recents_exclusion: bool,
    pub override_assets_defective: bool,
}

impl PlatformProfile {
    /// Task exclusion from the recents switcher arrived with revision 21.
    const RECENTS_EXCLUSION_FLOOR: u32 = 21;
    /// Revisions up to 25 resolve assets against the wrong configuration
    /// once an override is applied.
    const DEFECTIVE_OVERRIDE_ASSETS_CEILING: u32 = 25;

    pub fn detect(version: u32) -> Self {
        Self {
            version,
            supports_recents_exclusion: version >= Self::RECENTS_EXCLUSION_FLOOR,
            override_assets_defective: version <= Self::DEFECTIVE_OVERRIDE_ASSETS_CEILING,
        }
    }

    /// Profile with no known quirks.
    pub fn modern() -> Self {
        Self::detect(33)
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recents_exclusion_floor() {
        assert!(!PlatformProfile::detect(20).supports_recents_exclusion);
        assert!(PlatformProfile::detect(21).supports_recents_exclusion);
    }

    #[test]
    fn defective_override_assets_ceiling() {
        assert!(PlatformProfile::detect(25).override_assets_defective);
        assert!(!PlatformProfile::detect(26).override_assets_defective);
    }

    #[test]
    fn modern_profile_has_no_quirks() {
        let profile = PlatformProfile::modern();
        assert!(profile.supports_recents_exclusion);
        assert!(!profile.override_assets_defective);
    }
}
