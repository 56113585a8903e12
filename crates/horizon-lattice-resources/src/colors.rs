//! Per-theme color tables.

use std::collections::HashMap;

use tracing::warn;

use crate::color::Color;
use crate::error::Result;
use crate::markup::parse_markup;

/// Color ids to colors, grouped by theme name.
///
/// Loading a table for a theme replaces that theme's previous table
/// entirely; entries are never merged across loads.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    themes: HashMap<String, HashMap<String, Color>>,
}

impl ColorTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table for `theme` with `colors`.
    pub fn insert_theme(&mut self, theme: impl Into<String>, colors: HashMap<String, Color>) {
        self.themes.insert(theme.into(), colors);
    }

    /// Parse a color document and replace the table for `theme`.
    ///
    /// Entries whose literal does not parse are logged and dropped. Returns
    /// the number of colors in the new table. A document that fails to parse
    /// leaves the existing table untouched.
    pub fn load_markup(&mut self, xml: &str, origin: &str, theme: &str) -> Result<usize> {
        let colors = parse_color_markup(xml, origin)?;
        let count = colors.len();
        self.insert_theme(theme, colors);
        Ok(count)
    }

    /// Look up a color in one theme's table.
    pub fn get(&self, theme: &str, id: &str) -> Option<Color> {
        self.themes.get(theme)?.get(id).copied()
    }

    /// Returns true if a table was loaded for `theme`.
    pub fn has_theme(&self, theme: &str) -> bool {
        self.themes.contains_key(theme)
    }

    /// Number of colors loaded for `theme`.
    pub fn theme_len(&self, theme: &str) -> usize {
        self.themes.get(theme).map_or(0, HashMap::len)
    }
}

fn parse_color_markup(xml: &str, origin: &str) -> Result<HashMap<String, Color>> {
    let root = parse_markup(xml, origin)?;
    let mut colors = HashMap::new();

    for element in root.children_named("color") {
        let (Some(id), Some(literal)) = (element.attribute("name"), element.value_or_text()) else {
            continue;
        };
        match Color::from_hex(literal.trim()) {
            Some(color) => {
                colors.insert(id.to_string(), color);
            }
            None => warn!(
                target: "horizon_lattice_resources::colors",
                origin,
                id,
                literal,
                "invalid color literal, entry skipped"
            ),
        }
    }

    Ok(colors)
}
