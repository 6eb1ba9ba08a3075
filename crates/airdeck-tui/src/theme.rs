//! Palette and semantic styling for the dashboard.

use airdeck_core::Tier;
use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Border for the active overlay.
pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

/// Border for device cells and the log panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Plain body text.
pub fn text() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Secondary text (timestamps, placeholders, "Connecting…").
pub fn muted() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn error() -> Style {
    Style::default().fg(ERROR_RED)
}

/// Key hint text (e.g., "q Quit  r Refresh").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Foreground color for a quality tier.
pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Good => SUCCESS_GREEN,
        Tier::Fair => ELECTRIC_YELLOW,
        Tier::Poor => ERROR_RED,
    }
}

pub fn tier_style(tier: Tier) -> Style {
    Style::default().fg(tier_color(tier))
}
