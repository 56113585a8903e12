//! Resource expressions.
//!
//! Widgets describe colors and text with short expressions:
//!
//! | Expression       | Meaning                                   |
//! |------------------|-------------------------------------------|
//! | `@color/primary` | color `primary` of the active theme       |
//! | `#FF8800`        | hex color (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`) |
//! | `1,0.5,0,0.8`    | `r,g,b[,a]` floats, alpha defaults to 1.0 |
//! | `@string/title`  | localized string `title`                  |
//! | anything else    | literal text                              |
//!
//! This module only classifies expressions; lookups happen in
//! [`ResourceResolver`](crate::ResourceResolver).

use crate::color::Color;

/// Prefix of color references.
pub const COLOR_PREFIX: &str = "@color/";
/// Prefix of string references.
pub const STRING_PREFIX: &str = "@string/";

/// A classified color expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorExpr<'a> {
    /// `@color/<id>`.
    Reference(&'a str),
    /// A hex literal.
    Hex(Color),
    /// A CSV literal.
    Csv(Color),
    /// Matched no form.
    Invalid,
}

impl<'a> ColorExpr<'a> {
    /// Classify `raw`, trying each form in priority order.
    pub fn parse(raw: &'a str) -> Self {
        if let Some(id) = raw.strip_prefix(COLOR_PREFIX) {
            return Self::Reference(id);
        }
        if let Some(color) = Color::from_hex(raw.trim()) {
            return Self::Hex(color);
        }
        if let Some(color) = Color::from_csv(raw) {
            return Self::Csv(color);
        }
        Self::Invalid
    }
}

/// A classified text expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextExpr<'a> {
    /// `@string/<key>`.
    Reference(&'a str),
    /// Literal text, used as the template verbatim.
    Literal(&'a str),
}

impl<'a> TextExpr<'a> {
    /// Classify `raw`.
    pub fn parse(raw: &'a str) -> Self {
        match raw.strip_prefix(STRING_PREFIX) {
            Some(key) => Self::Reference(key),
            None => Self::Literal(raw),
        }
    }
}
