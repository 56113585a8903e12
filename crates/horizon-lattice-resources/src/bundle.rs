//! Localized string bundles.
//!
//! A [`LocaleBundle`] maps keys to message templates for one locale. Bundles
//! form a chain from most to least specific locale, so a key missing from
//! `strings_zh_TW.properties` is looked up in `strings_zh.properties` and
//! then in `strings.properties`.
//!
//! # Templates
//!
//! [`LocaleBundle::format`] substitutes positional placeholders:
//!
//! ```ignore
//! let text = bundle.format("Hello {0}, you have {1} messages", &[&"Kuan", &3])?;
//! assert_eq!(text, "Hello Kuan, you have 3 messages");
//! ```
//!
//! Single quotes escape: `''` renders a single `'`, and text between single
//! quotes is copied literally, so `'{0}'` prints `{0}`.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use tracing::debug;

use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::properties::parse_properties;
use crate::source::AssetSource;

/// A key → template map for one locale, with an optional parent.
#[derive(Debug, Clone)]
pub struct LocaleBundle {
    locale: Locale,
    entries: HashMap<String, String>,
    parent: Option<Box<LocaleBundle>>,
}

impl LocaleBundle {
    /// Create a bundle from entries.
    pub fn new(locale: Locale, entries: HashMap<String, String>) -> Self {
        Self {
            locale,
            entries,
            parent: None,
        }
    }

    /// Parse a bundle from properties text.
    pub fn from_properties(locale: Locale, input: &str) -> Result<Self> {
        Ok(Self::new(locale, parse_properties(input)?))
    }

    /// Load a single properties file as a parentless bundle.
    ///
    /// The locale is taken from the file name suffix when it follows the
    /// `name_lang_REGION.properties` convention, else the root locale.
    pub fn from_source(source: &dyn AssetSource, path: &str) -> Result<Self> {
        Self::read(source, path, locale_from_file_name(path))
    }

    fn read(source: &dyn AssetSource, path: &str, locale: Locale) -> Result<Self> {
        let text = source.read_text(path)?;
        let bundle = Self::from_properties(locale, &text)?;
        debug!(
            target: "horizon_lattice_resources::bundle",
            path,
            entries = bundle.entries.len(),
            "loaded language file"
        );
        Ok(bundle)
    }

    /// Load the bundle chain for `base_path` and `locale`.
    ///
    /// Candidate files are `<base>_<lang>_<REGION>.properties`,
    /// `<base>_<lang>.properties`, and `<base>.properties`. Every existing
    /// candidate joins the chain; at least one must exist.
    pub fn load(source: &dyn AssetSource, base_path: &str, locale: &Locale) -> Result<Self> {
        let mut chain: Option<LocaleBundle> = None;

        // Least specific first so each more specific file wraps its parent.
        for suffix in locale.candidate_suffixes().iter().rev() {
            let path = format!("{}{}.properties", base_path, suffix);
            if !source.exists(&path) {
                continue;
            }
            let mut bundle = Self::read(source, &path, Locale::parse(suffix))?;
            bundle.parent = chain.take().map(Box::new);
            chain = Some(bundle);
        }

        chain.ok_or_else(|| Error::not_found(format!("{}.properties", base_path)))
    }

    /// Like [`load`](Self::load), but when no file specific to `locale`
    /// exists, the chain for `fallback` is tried before settling on the
    /// root file.
    pub fn load_with_fallback(
        source: &dyn AssetSource,
        base_path: &str,
        locale: &Locale,
        fallback: &Locale,
    ) -> Result<Self> {
        let primary = Self::load(source, base_path, locale);
        if matches!(&primary, Ok(bundle) if !bundle.locale().is_root())
            || fallback == locale
            || fallback.is_root()
        {
            return primary;
        }

        match Self::load(source, base_path, fallback) {
            Ok(bundle) if !bundle.locale().is_root() => Ok(bundle),
            _ => primary,
        }
    }

    /// The locale of the most specific file in the chain.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The next less specific bundle, if any.
    pub fn parent(&self) -> Option<&LocaleBundle> {
        self.parent.as_deref()
    }

    /// Look up a template, walking the parent chain.
    pub fn get(&self, key: &str) -> Result<&str> {
        let mut bundle = Some(self);
        while let Some(current) = bundle {
            if let Some(value) = current.entries.get(key) {
                return Ok(value);
            }
            bundle = current.parent();
        }
        Err(Error::missing_key(key))
    }

    /// Returns true if `key` resolves anywhere in the chain.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// Number of entries in this bundle, excluding parents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this bundle has no entries of its own.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Substitute `{n}` placeholders in `template` with `args[n]`.
    ///
    /// Fails on an unterminated or non-numeric placeholder, or when a
    /// placeholder index has no matching argument.
    pub fn format(&self, template: &str, args: &[&dyn fmt::Display]) -> Result<String> {
        format_template(template, args)
    }
}

/// Positional placeholder substitution shared by every bundle.
pub fn format_template(template: &str, args: &[&dyn fmt::Display]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\'');
            }
            '\'' => quoted = !quoted,
            '{' if !quoted => {
                let mut index = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    index.push(c);
                }
                if !closed {
                    return Err(Error::format(template, "unterminated placeholder"));
                }
                let index: usize = index.trim().parse().map_err(|_| {
                    Error::format(template, format!("invalid placeholder '{{{}}}'", index))
                })?;
                let arg = args.get(index).ok_or_else(|| {
                    Error::format(
                        template,
                        format!("placeholder {{{}}} but only {} argument(s)", index, args.len()),
                    )
                })?;
                write!(out, "{}", arg).map_err(|_| {
                    Error::format(template, format!("argument {} failed to display", index))
                })?;
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

fn locale_from_file_name(path: &str) -> Locale {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = file.strip_suffix(".properties").unwrap_or(file);
    match stem.split_once('_') {
        Some((_, tag)) => Locale::parse(tag),
        None => Locale::root(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_file("i18n/strings.properties", "greeting=Hello {0}\nquit=Quit\nok=OK")
            .with_file("i18n/strings_zh.properties", "greeting=你好 {0}\nquit=離開")
            .with_file("i18n/strings_zh_TW.properties", "greeting=您好 {0}")
    }

    #[test]
    fn chain_falls_back_to_parents() {
        let bundle = LocaleBundle::load(&source(), "i18n/strings", &Locale::parse("zh_TW")).unwrap();
        assert_eq!(bundle.locale(), &Locale::parse("zh_TW"));
        assert_eq!(bundle.get("greeting").unwrap(), "您好 {0}");
        assert_eq!(bundle.get("quit").unwrap(), "離開");
        assert_eq!(bundle.get("ok").unwrap(), "OK");
        assert!(bundle.get("missing").is_err());
    }

    #[test]
    fn unknown_locale_uses_root_file() {
        let bundle = LocaleBundle::load(&source(), "i18n/strings", &Locale::parse("fr_FR")).unwrap();
        assert!(bundle.locale().is_root());
        assert!(bundle.parent().is_none());
        assert_eq!(bundle.get("quit").unwrap(), "Quit");
    }

    #[test]
    fn load_without_any_file_fails() {
        let err = LocaleBundle::load(&source(), "lang/none", &Locale::parse("en")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn from_source_reads_locale_from_name() {
        let bundle = LocaleBundle::from_source(&source(), "i18n/strings_zh_TW.properties").unwrap();
        assert_eq!(bundle.locale().file_suffix(), "zh_TW");
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn fallback_locale_before_root() {
        let bundle = LocaleBundle::load_with_fallback(
            &source(),
            "i18n/strings",
            &Locale::parse("fr"),
            &Locale::parse("zh_TW"),
        )
        .unwrap();
        assert_eq!(bundle.locale(), &Locale::parse("zh_TW"));
        assert_eq!(bundle.get("quit").unwrap(), "離開");

        // A locale with its own file never consults the fallback.
        let bundle = LocaleBundle::load_with_fallback(
            &source(),
            "i18n/strings",
            &Locale::parse("zh"),
            &Locale::parse("zh_TW"),
        )
        .unwrap();
        assert_eq!(bundle.locale(), &Locale::parse("zh"));
    }

    #[test]
    fn fallback_without_files_uses_root() {
        let bundle = LocaleBundle::load_with_fallback(
            &source(),
            "i18n/strings",
            &Locale::parse("fr"),
            &Locale::parse("de"),
        )
        .unwrap();
        assert!(bundle.locale().is_root());
        assert_eq!(bundle.get("quit").unwrap(), "Quit");
    }

    #[test]
    fn format_placeholders() {
        assert_eq!(format_template("Hello {0}", &[&"Kuan"]).unwrap(), "Hello Kuan");
        assert_eq!(format_template("{1}-{0}-{1}", &[&1, &"b"]).unwrap(), "b-1-b");
        assert_eq!(format_template("no args", &[&"extra"]).unwrap(), "no args");
    }

    #[test]
    fn format_quotes() {
        assert_eq!(format_template("it''s {0}", &[&"ok"]).unwrap(), "it's ok");
        assert_eq!(format_template("'{0}' is {0}", &[&"x"]).unwrap(), "{0} is x");
    }

    #[test]
    fn format_errors() {
        assert!(format_template("Hello {0}", &[]).is_err());
        assert!(format_template("Hello {name}", &[&"x"]).is_err());
        assert!(format_template("Hello {0", &[&"x"]).is_err());
    }

    struct Unprintable;

    impl fmt::Display for Unprintable {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn format_reports_display_failure() {
        let err = format_template("value: {0}", &[&Unprintable]).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }
}
