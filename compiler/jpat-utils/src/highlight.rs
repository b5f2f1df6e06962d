//! Terminal highlighting utilities, used by the logger and the report
//! writer. Colours can be switched off globally, for example when the output
//! is being piped into a file.
use std::{
    ops::BitOr,
    sync::atomic::{AtomicBool, Ordering},
};

static COLOURS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Enable or disable the emission of ANSI escape codes.
pub fn set_colours_enabled(enabled: bool) {
    COLOURS_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Variants of highlighter colour that can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Colour {
    fn escape_code(self) -> &'static str {
        match self {
            Colour::Red => "\u{001b}[31;1m",
            Colour::Green => "\u{001b}[32;1m",
            Colour::Yellow => "\u{001b}[33;1m",
            Colour::Blue => "\u{001b}[34;1m",
            Colour::Magenta => "\u{001b}[35;1m",
            Colour::Cyan => "\u{001b}[36;1m",
        }
    }
}

/// Colour modifiers specifying if the colour should also
/// apply a text effect such as bold or underlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Bold,
    Underline,
}

impl Modifier {
    fn escape_code(self) -> &'static str {
        match self {
            Modifier::Bold => "\u{001b}[1m",
            Modifier::Underline => "\u{001b}[4m",
        }
    }
}

/// A combination of an optional colour and an optional modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub colour: Option<Colour>,
    pub modifier: Option<Modifier>,
}

impl From<Colour> for Style {
    fn from(colour: Colour) -> Self {
        Style { colour: Some(colour), modifier: None }
    }
}

impl From<Modifier> for Style {
    fn from(modifier: Modifier) -> Self {
        Style { colour: None, modifier: Some(modifier) }
    }
}

impl BitOr<Modifier> for Colour {
    type Output = Style;

    fn bitor(self, rhs: Modifier) -> Self::Output {
        Style { colour: Some(self), modifier: Some(rhs) }
    }
}

impl BitOr<Colour> for Modifier {
    type Output = Style;

    fn bitor(self, rhs: Colour) -> Self::Output {
        rhs | self
    }
}

/// Apply a [Style] on a message, resetting the effect at the end of the
/// message. When colours are disabled, the message is returned untouched.
pub fn highlight(style: impl Into<Style>, message: impl ToString) -> String {
    const RESET: &str = "\u{001b}[0m";

    let message = message.to_string();
    if !COLOURS_ENABLED.load(Ordering::Relaxed) {
        return message;
    }

    let Style { colour, modifier } = style.into();
    let colour = colour.map_or("", Colour::escape_code);
    let modifier = modifier.map_or("", Modifier::escape_code);

    format!("{colour}{modifier}{message}{RESET}")
}
