//! Asset resolution under base and override configurations.

use crate::config::Configuration;

/// Resolves asset lookups under one fixed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetManager {
    configuration: Configuration,
}

impl AssetManager {
    pub fn new(configuration: Configuration) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Locale- and theme-qualified path for a named asset, e.g. `strings`
    /// under a German night configuration resolves to `de-DE/night/strings`.
    pub fn lookup(&self, name: &str) -> String {
        let theme = if self.configuration.is_night() {
            "night"
        } else {
            "day"
        };
        format!("{}/{}/{}", self.configuration.locale, theme, name)
    }
}

/// Base resources for a screen plus the optional override-configured
/// variant installed during context attach.
#[derive(Debug)]
pub struct Resources {
    base: AssetManager,
    overridden: Option<AssetManager>,
}

impl Resources {
    pub fn new(base_configuration: Configuration) -> Self {
        Self {
            base: AssetManager::new(base_configuration),
            overridden: None,
        }
    }

    /// Install the override-configured asset manager. A later override
    /// replaces an earlier one; the base manager is never touched.
    pub fn apply_override(&mut self, configuration: Configuration) {
        self.overridden = Some(AssetManager::new(configuration));
    }

    /// Override-aware manager; the base manager until an override exists.
    pub fn assets(&self) -> &AssetManager {
        self.overridden.as_ref().unwrap_or(&self.base)
    }

    /// The unmodified manager, ignoring any override configuration.
    pub fn base_assets(&self) -> &AssetManager {
        &self.base
    }

    pub fn has_override(&self) -> bool {
        self.overridden.is_some()
    }
}
