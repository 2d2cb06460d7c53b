//! Contains the ANSI escape codes used to decorate console output.

use std::fmt::Display;

/// Is implemented by every kind of ANSI decoration.
pub trait Paint: Copy {
    /// Gets the ANSI escape sequence that turns the decoration on.
    fn code(self) -> &'static str;

    /// Applies the decoration to the given displayable object.
    fn with<T>(self, display: T) -> Painted<T> {
        Painted {
            code: self.code(),
            display,
        }
    }
}

/// Represents a style that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Style {
    Bold,
    Dim,
    Underline,
}

impl Paint for Style {
    fn code(self) -> &'static str {
        match self {
            Self::Bold => "\x1B[1m",
            Self::Dim => "\x1B[2m",
            Self::Underline => "\x1B[4m",
        }
    }
}

/// Represents a foreground color that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl Paint for Color {
    fn code(self) -> &'static str {
        match self {
            Self::Red => "\x1B[31m",
            Self::Green => "\x1B[32m",
            Self::Yellow => "\x1B[33m",
            Self::Blue => "\x1B[34m",
            Self::Magenta => "\x1B[35m",
            Self::Cyan => "\x1B[36m",
            Self::White => "\x1B[37m",
            Self::Gray => "\x1B[90m",
        }
    }
}

/// Is a struct implementing [`Display`] that writes the wrapped object between an escape sequence
/// and the reset sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Painted<T> {
    /// The escape sequence written before the object.
    pub code: &'static str,

    /// The displayable object.
    pub display: T,
}

impl<T: Display> Display for Painted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}\x1B[0m", self.code, self.display)
    }
}
