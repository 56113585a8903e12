//! Theme-aware resource resolution for Horizon Lattice.
//!
//! This crate maps logical resource references to concrete values:
//!
//! - **Asset paths**: `picture/icon.png` resolves to
//!   `<theme folder>/<theme>/picture/icon.png` when the active theme ships an
//!   override
//! - **Colors**: `@color/<id>` expressions, hex literals, and `r,g,b[,a]`
//!   literals, with per-theme color tables loaded from markup
//! - **Strings**: `@string/<key>` expressions resolved through a locale
//!   bundle chain, then a fallback table, with `{n}` placeholder substitution
//!
//! Lookups never fail. A miss degrades to a documented default, and the
//! `*_detailed` lookups report which source supplied the value.
//!
//! # Example
//!
//! ```ignore
//! use horizon_lattice_resources::prelude::*;
//!
//! let mut resolver = ResourceResolver::new(DirectorySource::new("assets"));
//! resolver.apply_theme("cyberpunk", "theme")?;
//!
//! let icon = resolver.resolve_asset_path("picture/icon.png");
//! let accent = resolver.resolve_color(Some("@color/accent"));
//! let title = resolver.resolve_text(Some("@string/welcome"), &[&"Ada"]);
//! ```

pub mod bundle;
pub mod color;
pub mod colors;
pub mod config;
pub mod expr;
pub mod locale;
pub mod markup;
pub mod properties;
pub mod resolved;
pub mod resolver;
pub mod source;
pub mod strings;
pub mod texture;
pub mod theme;

mod error;

pub use error::{Error, Result};
pub use resolver::ResourceResolver;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::bundle::LocaleBundle;
    pub use crate::color::Color;
    pub use crate::config::ResolverConfig;
    pub use crate::locale::Locale;
    pub use crate::resolved::{Origin, Resolved};
    pub use crate::resolver::ResourceResolver;
    pub use crate::source::{AssetSource, DirectorySource, EmbeddedSource, MemorySource};
    pub use crate::texture::Texture;
    pub use crate::{Error, Result};
}
