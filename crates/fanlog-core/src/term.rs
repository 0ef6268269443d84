//! Terminal utilities for colored output.

use colored::{Color, ColoredString, Colorize};
use fanlog_types::{LevelColor, LogLevel};
use std::io::{self, IsTerminal};

/// Check if we're running in a controlling terminal.
pub fn in_controlling_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Whether standard error is a terminal.
pub fn stderr_is_terminal() -> bool {
    io::stderr().is_terminal()
}

/// Terminal color for a level's rendering hint.
pub fn terminal_color(color: LevelColor) -> Color {
    match color {
        LevelColor::Grey => Color::BrightBlack,
        LevelColor::Blue => Color::Blue,
        LevelColor::Green => Color::Green,
        LevelColor::Yellow => Color::Yellow,
        LevelColor::Red => Color::Red,
        LevelColor::BrightRed => Color::BrightRed,
        LevelColor::Magenta => Color::Magenta,
    }
}

/// Paint `text` in the color of `level`. Fatal and wtf are also bold.
pub fn paint(text: &str, level: LogLevel) -> ColoredString {
    let painted = text.color(terminal_color(level.color()));
    if level >= LogLevel::Fatal {
        painted.bold()
    } else {
        painted
    }
}

/// The fixed-width level tag, colored when `colors` is set.
pub fn level_tag(level: LogLevel, colors: bool) -> String {
    let tag = level.short_label();
    if colors {
        paint(tag, level).to_string()
    } else {
        tag.to_string()
    }
}
