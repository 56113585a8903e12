//! Resolver configuration.
//!
//! A host can describe its resource setup in TOML:
//!
//! ```toml
//! asset_root = "assets"
//! theme = "cyberpunk"
//! theme_folder = "theme"
//! locale = "zh_TW"
//! i18n_base = "i18n/strings"
//! fallback_strings = "xml/strings.xml"
//! texture_cache_limit = 128
//! ```
//!
//! and build a resolver with
//! [`ResourceResolver::from_config`](crate::ResourceResolver::from_config).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::locale::Locale;

/// Resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Base directory of the asset tree.
    pub asset_root: PathBuf,
    /// Theme to apply at startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Theme root folder inside the asset tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_folder: Option<String>,
    /// Default locale tag; the system locale when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Base path of the shared language files (without suffix).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i18n_base: Option<String>,
    /// Path of the fallback strings document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_strings: Option<String>,
    /// Maximum number of cached textures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_cache_limit: Option<usize>,
}

impl ResolverConfig {
    /// Create a configuration rooted at `asset_root`.
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::config(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    ///
    /// A relative `asset_root` is resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        let mut config = Self::from_toml_str(&text)?;
        if config.asset_root.is_relative()
            && let Some(dir) = path.parent()
        {
            config.asset_root = dir.join(&config.asset_root);
        }
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Set the startup theme and its root folder.
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>, folder: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self.theme_folder = Some(folder.into());
        self
    }

    /// Set the default locale tag.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the shared language file base path.
    #[must_use]
    pub fn with_i18n_base(mut self, base: impl Into<String>) -> Self {
        self.i18n_base = Some(base.into());
        self
    }

    /// Set the fallback strings document path.
    #[must_use]
    pub fn with_fallback_strings(mut self, path: impl Into<String>) -> Self {
        self.fallback_strings = Some(path.into());
        self
    }

    /// Set the texture cache limit.
    #[must_use]
    pub fn with_texture_cache_limit(mut self, limit: usize) -> Self {
        self.texture_cache_limit = Some(limit);
        self
    }

    /// The configured locale, or the system locale.
    pub fn resolved_locale(&self) -> Locale {
        self.locale
            .as_deref()
            .map(Locale::parse)
            .unwrap_or_else(Locale::system)
    }
}
