//! Theme and Colors
//!
//! The menagerie palette: a cyan accent for the animal itself, one signature
//! color per derived-content section, and muted slate tones for chrome.

use ratatui::style::Color;

/// Primary accent - animal name, generate control, history highlight
pub const ACCENT_CYAN: Color = Color::Rgb(34, 211, 238);

/// YouTube content section
pub const SECTION_PURPLE: Color = Color::Rgb(168, 85, 247);

/// Tags section
pub const SECTION_EMERALD: Color = Color::Rgb(16, 185, 129);

/// Video prompts section
pub const SECTION_SKY: Color = Color::Rgb(14, 165, 233);

/// Error text
pub const ERROR_RED: Color = Color::Rgb(248, 113, 113);

/// Copied confirmation
pub const SUCCESS_GREEN: Color = Color::Rgb(74, 222, 128);

/// Body text
pub const TEXT: Color = Color::Rgb(203, 213, 225);

/// Dim chrome text (help line, separators, inactive toggles)
pub const DIM_GRAY: Color = Color::Rgb(100, 116, 139);
