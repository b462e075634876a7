//! Terminal colour theme for ayatscope output.
//!
//! Each logical output element maps to an optional 16-colour ANSI foreground.
//! A YAML theme file may override any subset of entries; the rest keep their
//! defaults.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ayatscope_core::Category;

pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Section titles above tables.
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// Makkiyah category labels.
    Makkiyah,
    /// Madaniyah category labels.
    Madaniyah,
    /// A p-value below 0.05.
    Significant,
    /// A p-value of 0.05 or more.
    NotSignificant,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 9] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::Makkiyah,
        ThemeEntry::Madaniyah,
        ThemeEntry::Significant,
        ThemeEntry::NotSignificant,
    ];

    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Makkiyah => ThemeEntry::Makkiyah,
            Category::Madaniyah => ThemeEntry::Madaniyah,
        }
    }
}

/// A named ANSI colour such as `red` or `brightgreen`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    Named(String),
}

#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white"
            | "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue"
            | "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor::Named(name.to_string())
    }

    /// Names are checked on load; anything else falls back to white.
    pub fn to_ansi_color(&self) -> AnsiColors {
        let ThemeColor::Named(name) = self;
        match name.to_lowercase().as_str() {
            "black" => AnsiColors::Black,
            "red" => AnsiColors::Red,
            "green" => AnsiColors::Green,
            "yellow" => AnsiColors::Yellow,
            "blue" => AnsiColors::Blue,
            "magenta" => AnsiColors::Magenta,
            "cyan" => AnsiColors::Cyan,
            "brightblack" => AnsiColors::BrightBlack,
            "brightred" => AnsiColors::BrightRed,
            "brightgreen" => AnsiColors::BrightGreen,
            "brightyellow" => AnsiColors::BrightYellow,
            "brightblue" => AnsiColors::BrightBlue,
            "brightmagenta" => AnsiColors::BrightMagenta,
            "brightcyan" => AnsiColors::BrightCyan,
            "brightwhite" => AnsiColors::BrightWhite,
            _ => AnsiColors::White,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    fn fg(name: &str) -> Self {
        ThemeStyle {
            fg: Some(ThemeColor::named(name)),
        }
    }

    /// Loads a theme file and fills any missing entries from the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let mut custom: ThemeMap = if text.trim().is_empty() {
            ThemeMap::new()
        } else {
            serde_yaml::from_str(&text)
                .with_context(|| format!("Failed to parse theme file {}", path.display()))?
        };

        for (entry, style) in custom.iter_mut() {
            if let Some(ThemeColor::Named(name)) = &style.fg {
                let color = name.parse::<ThemeColor>().with_context(|| {
                    format!(
                        "Invalid color '{}' for theme entry {:?} in {}",
                        name,
                        entry,
                        path.display()
                    )
                })?;
                style.fg = Some(color);
            }
        }

        for (entry, style) in Self::default_theme_map() {
            custom.entry(entry).or_insert(style);
        }
        Ok(custom)
    }

    pub fn default_theme_map() -> ThemeMap {
        let mut theme = ThemeMap::new();
        theme.insert(ThemeEntry::Header, ThemeStyle::fg("brightcyan"));
        theme.insert(ThemeEntry::Success, ThemeStyle::fg("green"));
        theme.insert(ThemeEntry::Info, ThemeStyle::fg("white"));
        theme.insert(ThemeEntry::Warn, ThemeStyle::fg("yellow"));
        theme.insert(ThemeEntry::Error, ThemeStyle::fg("red"));
        theme.insert(ThemeEntry::Makkiyah, ThemeStyle::fg("brightyellow"));
        theme.insert(ThemeEntry::Madaniyah, ThemeStyle::fg("brightblue"));
        theme.insert(ThemeEntry::Significant, ThemeStyle::fg("brightgreen"));
        theme.insert(ThemeEntry::NotSignificant, ThemeStyle::fg("brightblack"));
        theme
    }
}

/// Loads a theme from `theme_path`, or returns the default theme.
pub fn build_theme_map(theme_path: Option<&Path>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => ThemeStyle::load_from_file(path),
        None => Ok(ThemeStyle::default_theme_map()),
    }
}

/// The foreground colour configured for `entry`, if any.
pub fn color_for(theme: &ThemeMap, entry: ThemeEntry) -> Option<AnsiColors> {
    theme
        .get(&entry)
        .and_then(|style| style.fg.as_ref())
        .map(ThemeColor::to_ansi_color)
}
