//! Active theme and theme folder state.

use crate::error::{Error, Result};

/// The theme root folder, which can be configured exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ThemeFolder {
    /// No folder has been configured yet.
    #[default]
    Unconfigured,
    /// The folder has been configured and is locked. `None` means it was
    /// configured empty, which locks it while leaving theming disabled.
    Configured(Option<String>),
}

impl ThemeFolder {
    /// The folder path, if configured and non-empty.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Configured(Some(folder)) => Some(folder),
            _ => None,
        }
    }

    /// Returns true once the folder has been configured.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

/// Active theme name and theme folder.
#[derive(Debug, Clone, Default)]
pub struct ThemeState {
    active: Option<String>,
    folder: ThemeFolder,
}

impl ThemeState {
    /// Create state with no theme and an unconfigured folder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active theme name, or `None` when no theme is active.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The theme folder state.
    pub fn folder(&self) -> &ThemeFolder {
        &self.folder
    }

    /// Set the active theme. Empty names clear it.
    ///
    /// Returns true if the active theme changed.
    pub fn set_active(&mut self, theme: Option<&str>) -> bool {
        let theme = theme.filter(|t| !t.is_empty());
        if self.active.as_deref() == theme {
            return false;
        }
        self.active = theme.map(str::to_string);
        true
    }

    /// Configure the theme folder.
    ///
    /// Fails with [`Error::ThemeAlreadyConfigured`] if the folder was already
    /// configured, whatever the old and new values are.
    pub fn configure_folder(&mut self, folder: Option<&str>) -> Result<()> {
        if let ThemeFolder::Configured(current) = &self.folder {
            return Err(Error::theme_already_configured(
                current.as_deref().unwrap_or_default(),
            ));
        }
        let folder = folder.filter(|f| !f.is_empty()).map(str::to_string);
        self.folder = ThemeFolder::Configured(folder);
        Ok(())
    }

    /// The `(folder, theme)` pair when both are set.
    pub fn themed_root(&self) -> Option<(&str, &str)> {
        Some((self.folder.path()?, self.active()?))
    }

    /// Compose `<folder>/<theme>/<relative>` when both are set.
    pub fn themed_path(&self, relative: &str) -> Option<String> {
        self.themed_root()
            .map(|(folder, theme)| format!("{}/{}/{}", folder, theme, relative))
    }
}
