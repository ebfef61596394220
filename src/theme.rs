//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Category table --
    pub table_header: Style,
    pub row_normal: Style,
    pub row_selected: Style,
    pub row_inactive: Style,
    pub badge_active: Style,
    pub badge_inactive: Style,
    pub thumb_spinner: Style,
    pub thumb_placeholder: Style,
    pub empty_state: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub pager: Style,

    // -- Overlays (confirm dialog, form) --
    pub overlay_text: Style,
    pub overlay_border: Style,
    pub overlay_field_active: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            table_header: Style::default().add_modifier(Modifier::BOLD),
            row_normal: Style::default(),
            row_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            row_inactive: Style::default().fg(Color::DarkGray),
            badge_active: Style::default().fg(Color::Green),
            badge_inactive: Style::default().fg(Color::Red),
            thumb_spinner: Style::default().fg(Color::Yellow),
            thumb_placeholder: Style::default().fg(Color::Cyan),
            empty_state: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            pager: Style::default().fg(Color::DarkGray),

            overlay_text: Style::default(),
            overlay_border: Style::default().fg(Color::Cyan),
            overlay_field_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light palette — adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            table_header: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            row_normal: Style::default().fg(Color::Black),
            row_selected: Style::default().bg(Color::Blue).fg(Color::White),
            row_inactive: Style::default().fg(Color::DarkGray),
            badge_active: Style::default().fg(Color::Green),
            badge_inactive: Style::default().fg(Color::Red),
            thumb_spinner: Style::default().fg(Color::Magenta),
            thumb_placeholder: Style::default().fg(Color::Blue),
            empty_state: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            pager: Style::default().fg(Color::DarkGray),

            overlay_text: Style::default().fg(Color::Black),
            overlay_border: Style::default().fg(Color::Blue),
            overlay_field_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }
}

// ============================================================================
// Style Map — string-keyed lookup
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`, resolving role
/// names (e.g. `"row_selected"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 16] = [
    "table_header",
    "row_normal",
    "row_selected",
    "row_inactive",
    "badge_active",
    "badge_inactive",
    "thumb_spinner",
    "thumb_placeholder",
    "empty_state",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "pager",
    "overlay_text",
    "overlay_border",
    "overlay_field_active",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 16] = [
            p.table_header,
            p.row_normal,
            p.row_selected,
            p.row_inactive,
            p.badge_active,
            p.badge_inactive,
            p.thumb_spinner,
            p.thumb_placeholder,
            p.empty_state,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.pager,
            p.overlay_text,
            p.overlay_border,
            p.overlay_field_active,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
