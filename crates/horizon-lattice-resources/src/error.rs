//! Error types for resource resolution.

/// Result type alias for resource operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring the resolver or loading resources.
///
/// Only [`Error::ThemeAlreadyConfigured`] ever escapes the lookup APIs of
/// [`ResourceResolver`](crate::ResourceResolver); the remaining variants are
/// produced by the lower-level loaders and reported through `tracing` when the
/// resolver degrades to a default.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The theme folder was configured more than once.
    #[error("Theme folder already set (current: '{current}')")]
    ThemeAlreadyConfigured { current: String },

    /// A resource does not exist in the asset source.
    #[error("Resource not found: '{path}'")]
    NotFound { path: String },

    /// Reading a resource failed.
    #[error("Failed to read resource '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Markup document could not be parsed.
    #[error("Markup error in '{origin}': {message}")]
    Markup { origin: String, message: String },

    /// Properties file could not be parsed.
    #[error("Properties error at line {line}: {message}")]
    Properties { line: usize, message: String },

    /// A localized bundle has no entry for the key.
    #[error("Missing localized string for key '{key}'")]
    MissingKey { key: String },

    /// Placeholder substitution failed.
    #[error("Cannot format '{template}': {message}")]
    Format { template: String, message: String },

    /// A color literal matched none of the accepted forms.
    #[error("Invalid color literal '{literal}'")]
    InvalidColor { literal: String },

    /// Resolver configuration could not be loaded.
    #[error("Invalid resolver configuration: {message}")]
    Config { message: String },
}

impl Error {
    /// Create a theme-folder conflict error.
    pub fn theme_already_configured(current: impl Into<String>) -> Self {
        Self::ThemeAlreadyConfigured {
            current: current.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an I/O error, folding `NotFound` into [`Error::NotFound`].
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Io { path, source }
    }

    /// Create a markup error.
    pub fn markup(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Markup {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Create a properties error.
    pub fn properties(line: usize, message: impl Into<String>) -> Self {
        Self::Properties {
            line,
            message: message.into(),
        }
    }

    /// Create a missing-key error.
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Create a format error.
    pub fn format(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create an invalid color error.
    pub fn invalid_color(literal: impl Into<String>) -> Self {
        Self::InvalidColor {
            literal: literal.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Stable numeric code for errors surfaced to host applications.
    pub fn code(&self) -> u32 {
        match self {
            Self::ThemeAlreadyConfigured { .. } => 1001,
            Self::NotFound { .. } => 2001,
            Self::Io { .. } => 2002,
            Self::Markup { .. } => 3001,
            Self::Properties { .. } => 3002,
            Self::InvalidColor { .. } => 3003,
            Self::MissingKey { .. } => 4001,
            Self::Format { .. } => 4002,
            Self::Config { .. } => 5001,
        }
    }

    /// Returns true if this error means the resource was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
