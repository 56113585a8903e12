//! The theme-aware resource resolver.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::bundle::LocaleBundle;
use crate::color::Color;
use crate::colors::ColorTable;
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::expr::{ColorExpr, TextExpr};
use crate::locale::Locale;
use crate::resolved::{Origin, Resolved};
use crate::source::{AssetSource, DirectorySource};
use crate::strings::FallbackStrings;
use crate::texture::{Texture, TextureCache};
use crate::theme::ThemeState;

/// Path of a theme's color table, relative to `<folder>/<theme>/`.
pub const THEME_COLORS_PATH: &str = "values/color.xml";

/// Resolves asset paths, colors, and strings against the active theme.
///
/// Loading methods take `&mut self` and lookups take `&self`, so loads cannot
/// interleave with reads. Hosts typically perform every load during startup
/// and then share the resolver immutably.
///
/// Lookups never fail: a miss degrades to the original path, opaque white,
/// the key itself, or the unformatted template. The `*_detailed` variants
/// report which of those happened through [`Resolved::origin`].
pub struct ResourceResolver {
    source: Arc<dyn AssetSource>,
    theme: ThemeState,
    colors: ColorTable,
    bundle: Option<LocaleBundle>,
    fallback: FallbackStrings,
    textures: TextureCache,
    locale: Locale,
}

impl ResourceResolver {
    /// Create a resolver over `source` using the system locale.
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self::with_source(Arc::new(source))
    }

    /// Create a resolver over a shared source.
    pub fn with_source(source: Arc<dyn AssetSource>) -> Self {
        Self {
            source,
            theme: ThemeState::new(),
            colors: ColorTable::new(),
            bundle: None,
            fallback: FallbackStrings::new(),
            textures: TextureCache::new(),
            locale: Locale::system(),
        }
    }

    /// Build a resolver from configuration.
    ///
    /// Loads happen in the order shared strings, fallback strings, theme, so
    /// a theme language file replaces the shared bundle.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        let mut resolver = Self::new(DirectorySource::new(&config.asset_root));
        resolver.locale = config.resolved_locale();
        if let Some(limit) = config.texture_cache_limit {
            resolver.textures = TextureCache::with_limit(limit);
        }

        if let Some(base) = &config.i18n_base {
            let locale = resolver.locale.clone();
            resolver.load_localized_bundle(base, &locale);
        }
        if let Some(path) = &config.fallback_strings {
            resolver.load_fallback_strings(path);
        }

        match (&config.theme, &config.theme_folder) {
            (Some(theme), Some(folder)) => resolver.apply_theme(theme, folder)?,
            (Some(theme), None) => {
                resolver.set_active_color_theme(theme);
            }
            (None, Some(folder)) => resolver.set_theme_folder(folder)?,
            (None, None) => {}
        }

        Ok(resolver)
    }

    /// The asset source.
    pub fn source(&self) -> &dyn AssetSource {
        self.source.as_ref()
    }

    // =========================================================================
    // Theme state
    // =========================================================================

    /// Set the active theme. An empty name deactivates theming.
    ///
    /// Switching to a different theme clears the texture cache, since cached
    /// textures may have been resolved against the old theme. Setting the
    /// current theme again does nothing. Returns true if the theme changed.
    pub fn set_active_color_theme(&mut self, theme: &str) -> bool {
        if !self.theme.set_active(Some(theme)) {
            return false;
        }
        self.textures.clear();
        debug!(
            target: "horizon_lattice_resources::resolver",
            theme = self.theme.active().unwrap_or("none"),
            "active theme changed"
        );
        true
    }

    /// Set the theme root folder. Only the first call succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ThemeAlreadyConfigured`](crate::Error::ThemeAlreadyConfigured)
    /// on every call after the first, even when the folder is unchanged.
    pub fn set_theme_folder(&mut self, folder: &str) -> Result<()> {
        self.theme.configure_folder(Some(folder))
    }

    /// The active theme, if any.
    pub fn active_theme(&self) -> Option<&str> {
        self.theme.active()
    }

    /// The theme root folder, if configured and non-empty.
    pub fn theme_folder(&self) -> Option<&str> {
        self.theme.folder().path()
    }

    /// Returns true once the theme folder has been configured.
    pub fn is_theme_folder_locked(&self) -> bool {
        self.theme.folder().is_locked()
    }

    /// Set the theme, lock the theme folder, then load the theme's colors
    /// and language file.
    ///
    /// Steps already taken are not rolled back when a later one fails.
    pub fn apply_theme(&mut self, theme: &str, root_folder: &str) -> Result<()> {
        self.set_active_color_theme(theme);
        self.set_theme_folder(root_folder)?;
        self.load_theme_colors_from_values_folder();
        self.load_localized_strings_from_theme();
        Ok(())
    }

    // =========================================================================
    // Asset paths and textures
    // =========================================================================

    /// Map `original` to its themed override if one exists.
    pub fn resolve_asset_path(&self, original: &str) -> String {
        self.resolve_asset_path_detailed(original).value
    }

    /// Like [`resolve_asset_path`](Self::resolve_asset_path), with origin.
    pub fn resolve_asset_path_detailed(&self, original: &str) -> Resolved<String> {
        match self.theme.themed_path(original) {
            Some(themed) if self.source.exists(&themed) => Resolved::new(themed, Origin::Theme),
            _ => Resolved::new(original.to_string(), Origin::Default),
        }
    }

    /// Load the texture for `original`, preferring the themed override.
    ///
    /// # Errors
    ///
    /// Fails when the resolved file cannot be read.
    pub fn texture(&self, original: &str) -> Result<Texture> {
        let path = self.resolve_asset_path(original);
        self.textures.load(self.source.as_ref(), &path)
    }

    /// The texture cache.
    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    // =========================================================================
    // Colors
    // =========================================================================

    /// Load a color table for `theme` from `path`, replacing any previous
    /// table for that theme.
    ///
    /// A missing file is silently ignored. Returns true if a table was loaded.
    pub fn load_colors_from_xml(&mut self, path: &str, theme: &str) -> bool {
        if !self.source.exists(path) {
            return false;
        }
        match self.source.read_text(path) {
            Ok(xml) => self.load_colors_from_str_with_origin(&xml, path, theme),
            Err(e) => {
                error!(target: "horizon_lattice_resources::colors", path, "Error loading color xml: {}", e);
                false
            }
        }
    }

    /// Load a color table for `theme` from a document in memory.
    pub fn load_colors_from_str(&mut self, xml: &str, theme: &str) -> bool {
        self.load_colors_from_str_with_origin(xml, "<memory>", theme)
    }

    fn load_colors_from_str_with_origin(&mut self, xml: &str, origin: &str, theme: &str) -> bool {
        match self.colors.load_markup(xml, origin, theme) {
            Ok(count) => {
                debug!(target: "horizon_lattice_resources::colors", origin, theme, count, "loaded color table");
                true
            }
            Err(e) => {
                error!(target: "horizon_lattice_resources::colors", origin, "Error loading color xml: {}", e);
                false
            }
        }
    }

    /// Load `<folder>/<theme>/values/color.xml` for the active theme.
    ///
    /// Does nothing unless both theme and folder are set. A missing file is
    /// logged as an error. Returns true if a table was loaded.
    pub fn load_theme_colors_from_values_folder(&mut self) -> bool {
        let (Some(path), Some(theme)) = (
            self.theme.themed_path(THEME_COLORS_PATH),
            self.theme.active().map(str::to_string),
        ) else {
            return false;
        };

        if !self.source.exists(&path) {
            error!(
                target: "horizon_lattice_resources::resolver",
                path,
                "[Theme] Color XML not found for theme: {}",
                theme
            );
            return false;
        }
        self.load_colors_from_xml(&path, &theme)
    }

    /// Look up `id` in the active theme's color table; white on a miss.
    pub fn get_color(&self, id: &str) -> Color {
        self.get_color_detailed(id).value
    }

    /// Like [`get_color`](Self::get_color), with origin.
    pub fn get_color_detailed(&self, id: &str) -> Resolved<Color> {
        self.theme
            .active()
            .and_then(|theme| self.colors.get(theme, id))
            .map_or_else(
                || Resolved::new(Color::default(), Origin::Default),
                |color| Resolved::new(color, Origin::Theme),
            )
    }

    /// Resolve a color expression: `@color/<id>`, hex, or `r,g,b[,a]`.
    ///
    /// `None` and unrecognized input resolve to white.
    pub fn resolve_color(&self, raw: Option<&str>) -> Color {
        self.resolve_color_detailed(raw).value
    }

    /// Like [`resolve_color`](Self::resolve_color), with origin.
    pub fn resolve_color_detailed(&self, raw: Option<&str>) -> Resolved<Color> {
        let Some(raw) = raw else {
            return Resolved::new(Color::default(), Origin::Default);
        };
        match ColorExpr::parse(raw) {
            ColorExpr::Reference(id) => self.get_color_detailed(id),
            ColorExpr::Hex(color) | ColorExpr::Csv(color) => Resolved::new(color, Origin::Literal),
            ColorExpr::Invalid => Resolved::new(Color::default(), Origin::Default),
        }
    }

    /// The color tables.
    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// The locale used for theme language files.
    pub fn default_locale(&self) -> &Locale {
        &self.locale
    }

    /// Change the locale used for theme language files.
    pub fn set_default_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Load the language file chain for `base_path` and `locale`, replacing
    /// the current bundle.
    ///
    /// When `locale` has no file of its own, the default locale's files are
    /// tried before the root file. When no language file exists the error is
    /// logged and the current bundle is kept. Returns true if a bundle was
    /// loaded.
    pub fn load_localized_bundle(&mut self, base_path: &str, locale: &Locale) -> bool {
        let loaded =
            LocaleBundle::load_with_fallback(self.source.as_ref(), base_path, locale, &self.locale);
        match loaded {
            Ok(bundle) => {
                self.bundle = Some(bundle);
                true
            }
            Err(e) => {
                error!(
                    target: "horizon_lattice_resources::bundle",
                    base_path,
                    %locale,
                    "Error loading localized strings: {}",
                    e
                );
                false
            }
        }
    }

    /// Load `<folder>/<theme>/lang/strings_<locale>.properties`, replacing
    /// the current bundle.
    ///
    /// Does nothing unless both theme and folder are set. When the file is
    /// missing an error is logged and the current bundle is kept. Returns
    /// true if the bundle was replaced.
    pub fn load_localized_strings_from_theme(&mut self) -> bool {
        let relative = format!("lang/strings_{}.properties", self.locale.file_suffix());
        let Some(path) = self.theme.themed_path(&relative) else {
            return false;
        };

        if !self.source.exists(&path) {
            error!(
                target: "horizon_lattice_resources::bundle",
                path,
                "[Theme] Language file not found for theme: {}",
                self.theme.active().unwrap_or("none")
            );
            return false;
        }

        match LocaleBundle::from_source(self.source.as_ref(), &path) {
            Ok(bundle) => {
                self.bundle = Some(bundle);
                true
            }
            Err(e) => {
                error!(target: "horizon_lattice_resources::bundle", path, "Error loading theme strings: {}", e);
                false
            }
        }
    }

    /// Merge fallback strings from `path` into the fallback table.
    ///
    /// Returns true if the document was read and merged.
    pub fn load_fallback_strings(&mut self, path: &str) -> bool {
        match self.source.read_text(path) {
            Ok(xml) => self.merge_fallback_strings(&xml, path),
            Err(e) => {
                error!(target: "horizon_lattice_resources::strings", path, "Error loading fallback strings xml: {}", e);
                false
            }
        }
    }

    /// Merge fallback strings from a document in memory.
    pub fn load_fallback_strings_from_str(&mut self, xml: &str) -> bool {
        self.merge_fallback_strings(xml, "<memory>")
    }

    fn merge_fallback_strings(&mut self, xml: &str, origin: &str) -> bool {
        match self.fallback.merge_markup(xml, origin) {
            Ok(count) => {
                debug!(target: "horizon_lattice_resources::strings", origin, count, "merged fallback strings");
                true
            }
            Err(e) => {
                error!(target: "horizon_lattice_resources::strings", origin, "Error loading fallback strings xml: {}", e);
                false
            }
        }
    }

    /// Load the shared language files and the fallback strings together.
    pub fn load_all_localized_resources(
        &mut self,
        base_path: &str,
        fallback_path: &str,
        locale: &Locale,
    ) {
        self.load_localized_bundle(base_path, locale);
        self.load_fallback_strings(fallback_path);
    }

    /// Replace the current bundle.
    pub fn set_bundle(&mut self, bundle: LocaleBundle) {
        self.bundle = Some(bundle);
    }

    /// The current bundle, if one is loaded.
    pub fn bundle(&self) -> Option<&LocaleBundle> {
        self.bundle.as_ref()
    }

    /// Returns true if a bundle is loaded.
    pub fn has_bundle(&self) -> bool {
        self.bundle.is_some()
    }

    /// The fallback string table.
    pub fn fallback_strings(&self) -> &FallbackStrings {
        &self.fallback
    }

    /// Look up `key` in the bundle, then the fallback table; the key itself
    /// when both miss.
    pub fn get_string(&self, key: &str) -> String {
        self.get_string_detailed(key).value
    }

    /// Like [`get_string`](Self::get_string), with origin.
    pub fn get_string_detailed(&self, key: &str) -> Resolved<String> {
        if let Some(value) = self.bundle.as_ref().and_then(|b| b.get(key).ok()) {
            return Resolved::new(value.to_string(), Origin::Bundle);
        }
        match self.fallback.get(key) {
            Some(value) => Resolved::new(value.to_string(), Origin::FallbackTable),
            None => Resolved::new(key.to_string(), Origin::Default),
        }
    }

    /// Resolve a text expression and substitute `{n}` placeholders.
    ///
    /// `@string/<key>` is looked up with [`get_string`](Self::get_string);
    /// anything else is the template itself. Substitution only happens while
    /// a bundle is loaded; a formatting failure is logged and the template is
    /// returned unformatted. `None` resolves to an empty string.
    pub fn resolve_text(&self, raw: Option<&str>, args: &[&dyn fmt::Display]) -> String {
        self.resolve_text_detailed(raw, args).value
    }

    /// Like [`resolve_text`](Self::resolve_text), with origin.
    pub fn resolve_text_detailed(
        &self,
        raw: Option<&str>,
        args: &[&dyn fmt::Display],
    ) -> Resolved<String> {
        let Some(raw) = raw else {
            return Resolved::new(String::new(), Origin::Default);
        };

        let template = match TextExpr::parse(raw) {
            TextExpr::Reference(key) => self.get_string_detailed(key),
            TextExpr::Literal(text) => Resolved::new(text.to_string(), Origin::Literal),
        };

        let Some(bundle) = &self.bundle else {
            return template;
        };

        match bundle.format(&template.value, args) {
            Ok(text) => Resolved::new(text, template.origin),
            Err(e) => {
                warn!(target: "horizon_lattice_resources::resolver", raw, "Error formatting string: {}", e);
                Resolved::new(template.value, Origin::Unformatted)
            }
        }
    }
}

impl fmt::Debug for ResourceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceResolver")
            .field("source", &self.source)
            .field("theme", &self.theme)
            .field("locale", &self.locale)
            .field("has_bundle", &self.bundle.is_some())
            .field("fallback_strings", &self.fallback.len())
            .field("cached_textures", &self.textures.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn themed_source() -> MemorySource {
        MemorySource::new()
            .with_file("picture/icon.png", b"base".to_vec())
            .with_file("theme/dark/picture/icon.png", b"dark".to_vec())
            .with_file(
                "theme/dark/values/color.xml",
                r##"<resources><color name="primary" value="#0A84FF"/></resources>"##,
            )
    }

    #[test]
    fn asset_path_passthrough_until_configured() {
        let mut resolver = ResourceResolver::new(themed_source());
        assert_eq!(resolver.resolve_asset_path("picture/icon.png"), "picture/icon.png");

        resolver.set_active_color_theme("dark");
        assert_eq!(resolver.resolve_asset_path("picture/icon.png"), "picture/icon.png");

        resolver.set_theme_folder("theme").unwrap();
        let resolved = resolver.resolve_asset_path_detailed("picture/icon.png");
        assert_eq!(resolved.value, "theme/dark/picture/icon.png");
        assert_eq!(resolved.origin, Origin::Theme);

        let missing = resolver.resolve_asset_path_detailed("picture/other.png");
        assert_eq!(missing.value, "picture/other.png");
        assert!(missing.is_degraded());
    }

    #[test]
    fn color_lookup_uses_active_theme_only() {
        let mut resolver = ResourceResolver::new(themed_source());
        resolver.apply_theme("dark", "theme").unwrap();
        assert_eq!(resolver.get_color("primary"), Color::from_hex("#0A84FF").unwrap());

        resolver.set_active_color_theme("light");
        assert_eq!(resolver.get_color("primary"), Color::WHITE);
        assert!(resolver.get_color_detailed("primary").is_degraded());
    }

    #[test]
    fn load_colors_missing_file_is_silent() {
        let mut resolver = ResourceResolver::new(MemorySource::new());
        assert!(!resolver.load_colors_from_xml("nope.xml", "dark"));
        assert!(!resolver.colors().has_theme("dark"));
    }

    #[test]
    fn resolve_text_without_bundle_is_unformatted() {
        let mut resolver = ResourceResolver::new(MemorySource::new());
        resolver.load_fallback_strings_from_str(r#"<r><string name="greeting" value="Hello {0}"/></r>"#);

        let text = resolver.resolve_text_detailed(Some("@string/greeting"), &[&"Kuan"]);
        assert_eq!(text.value, "Hello {0}");
        assert_eq!(text.origin, Origin::FallbackTable);
        assert_eq!(resolver.resolve_text(None, &[]), "");
    }

    #[test]
    fn debug_output_is_compact() {
        let resolver = ResourceResolver::new(MemorySource::new());
        let debug = format!("{:?}", resolver);
        assert!(debug.contains("ResourceResolver"));
        assert!(debug.contains("has_bundle: false"));
    }
}
