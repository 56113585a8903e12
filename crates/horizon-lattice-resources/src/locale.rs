//! Locale identifiers.
//!
//! Locale tags are accepted in both BCP 47 (`zh-Hant-TW`) and POSIX
//! (`zh_TW.UTF-8`) spellings. Language files are named with the underscore
//! form produced by [`Locale::file_suffix`], e.g. `strings_zh_TW.properties`.

use std::fmt;

/// A parsed locale identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
    variant: Option<String>,
}

impl Locale {
    /// Parse a locale tag.
    ///
    /// Any encoding (`.UTF-8`) or modifier (`@euro`) suffix is ignored.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.split(['.', '@']).next().unwrap_or(tag).trim();
        let mut parts = tag.split(['-', '_']).filter(|p| !p.is_empty());

        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let mut script = None;
        let mut region = None;
        let mut variant = None;

        for part in parts {
            if script.is_none()
                && region.is_none()
                && part.len() == 4
                && part.chars().all(|c| c.is_ascii_alphabetic())
            {
                // Scripts are 4 letters, title case (e.g., "Hant")
                let mut chars = part.chars();
                let first = chars.next().map(|c| c.to_ascii_uppercase());
                script = first.map(|f| f.to_string() + &chars.as_str().to_ascii_lowercase());
            } else if region.is_none()
                && ((part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
                    || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit())))
            {
                region = Some(part.to_ascii_uppercase());
            } else if variant.is_none() {
                variant = Some(part.to_string());
            }
        }

        Self {
            language,
            script,
            region,
            variant,
        }
    }

    /// The root locale, matching only unsuffixed files.
    pub fn root() -> Self {
        Self::parse("")
    }

    /// The operating system's current locale, or `en-US` when undetectable.
    #[cfg(feature = "system-locale")]
    pub fn system() -> Self {
        Self::parse(&sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string()))
    }

    #[cfg(not(feature = "system-locale"))]
    pub fn system() -> Self {
        Self::parse("en-US")
    }

    /// The lowercase language code (e.g., "zh"); empty for the root locale.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The script code (e.g., "Hant"), if present.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// The uppercase region code (e.g., "TW"), if present.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The variant, if present.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Returns true for the root locale.
    pub fn is_root(&self) -> bool {
        self.language.is_empty()
    }

    /// Underscore-joined `language_REGION_variant` used in language file names.
    pub fn file_suffix(&self) -> String {
        let mut suffix = self.language.clone();
        for part in [&self.region, &self.variant].into_iter().flatten() {
            suffix.push('_');
            suffix.push_str(part);
        }
        suffix
    }

    /// File-name suffixes from most to least specific, ending with the root.
    ///
    /// `zh_TW` yields `["_zh_TW", "_zh", ""]`.
    pub fn candidate_suffixes(&self) -> Vec<String> {
        let mut suffixes = Vec::new();
        if !self.is_root() {
            let lang = &self.language;
            match (&self.region, &self.variant) {
                (Some(region), Some(variant)) => {
                    suffixes.push(format!("_{}_{}_{}", lang, region, variant));
                    suffixes.push(format!("_{}_{}", lang, region));
                }
                (Some(region), None) => suffixes.push(format!("_{}_{}", lang, region)),
                (None, Some(variant)) => suffixes.push(format!("_{}__{}", lang, variant)),
                (None, None) => {}
            }
            suffixes.push(format!("_{}", lang));
        }
        suffixes.push(String::new());
        suffixes
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::parse("en-US")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_suffix())
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}
