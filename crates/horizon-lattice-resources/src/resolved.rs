//! Resolution results that record where a value came from.

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The active theme supplied it (themed asset path or theme color table).
    Theme,
    /// The loaded locale bundle supplied it.
    Bundle,
    /// The fallback string table supplied it.
    FallbackTable,
    /// It was written literally in the expression (hex, CSV, or plain text).
    Literal,
    /// Nothing matched; the documented default was used (original path,
    /// white, or the key itself).
    Default,
    /// Placeholder substitution failed; the template is returned unformatted.
    Unformatted,
}

/// A resolved value together with its [`Origin`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Resolved<T> {
    /// Wrap a value.
    pub fn new(value: T, origin: Origin) -> Self {
        Self { value, origin }
    }

    /// Returns true when resolution degraded to a default.
    pub fn is_degraded(&self) -> bool {
        matches!(self.origin, Origin::Default | Origin::Unformatted)
    }

    /// Map the value, keeping the origin.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            origin: self.origin,
        }
    }
}
