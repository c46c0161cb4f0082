use std::fmt::Display;

use colored::{ColoredString, Colorize};

pub mod progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Info,
    Success,
}

impl Level {
    fn tag(self) -> ColoredString {
        match self {
            Level::Error => ">> e:".bold().red(),
            Level::Info => ">> i:".bold().bright_blue(),
            Level::Success => ">> s:".bold().green(),
        }
    }
}

/// Render one status line: a coloured level tag followed by the message.
pub fn format_line(level: Level, message: impl Display) -> String {
    format!("{} {}", level.tag(), message.to_string().bold())
}

pub fn error(message: impl Display) {
    eprintln!("{}", format_line(Level::Error, message));
}

pub fn info(message: impl Display) {
    println!("{}", format_line(Level::Info, message));
}

pub fn success(message: impl Display) {
    println!("{}", format_line(Level::Success, message));
}

pub fn critical() {
    eprintln!(
        "\n{}",
        "Critical error detected, quitting...".bold().red()
    );
}
