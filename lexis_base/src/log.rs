//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::{Color, Paint, Style};

use crate::source_file::{Location, SourceFile};

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = Style::Bold.with(match self.severity {
            Severity::Error => Color::Red.with("[error]:"),
            Severity::Info => Color::Green.with("[info]:"),
            Severity::Warning => Color::Yellow.with("[warning]:"),
        });

        let message_part = Style::Bold.with(&self.display);

        write!(f, "{log_header} {message_part}")
    }
}

fn get_digit(mut number: usize) -> usize {
    let mut digit = 0;

    while number > 0 {
        number /= 10;
        digit += 1;
    }

    digit
}

/// Structure implementing [`Display`] that prints the source line of a lexeme, underlining the
/// lexeme itself.
///
/// The line before and the line after are printed as context. A lexeme spanning several lines is
/// underlined up to the end of its first line.
#[derive(Debug, Clone, Copy, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The source file containing the lexeme.
    pub source_file: &'a SourceFile,

    /// The location of the first character of the lexeme.
    pub location: Location,

    /// The number of characters in the lexeme.
    pub length: usize,

    /// The help message to be displayed under the underlined lexeme.
    pub help_display: Option<T>,
}

impl<'a, T> SourceCodeDisplay<'a, T> {
    fn write_gutter(
        f: &mut std::fmt::Formatter<'_>,
        line_number: Option<usize>,
        width: usize,
    ) -> std::fmt::Result {
        match line_number {
            Some(line_number) => write!(
                f,
                "{}{:pad$} {} ",
                Style::Bold.with(Color::Cyan.with(line_number)),
                "",
                Style::Bold.with(Color::Cyan.with("┃")),
                pad = width - get_digit(line_number),
            ),
            None => write!(
                f,
                "{:pad$} {} ",
                "",
                Style::Bold.with(Color::Cyan.with("┃")),
                pad = width
            ),
        }
    }

    fn write_context_line(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        line_number: usize,
        width: usize,
    ) -> std::fmt::Result {
        let Some(line) = self.source_file.get_line(line_number) else {
            return Ok(());
        };

        Self::write_gutter(f, Some(line_number), width)?;
        for char in line.chars() {
            // tabs are printed as 4 spaces
            if char == '\t' {
                write!(f, "    ")?;
            } else if char != '\n' && char != '\r' {
                write!(f, "{char}")?;
            }
        }
        writeln!(f)
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line_number = self.location.line;
        let width = get_digit(line_number + 1);

        writeln!(
            f,
            "{:width$} {} {}:{}",
            "",
            Style::Bold.with(Color::Cyan.with("-->")),
            self.source_file.full_path().display(),
            self.location
        )?;

        Self::write_gutter(f, None, width)?;
        writeln!(f)?;

        if line_number > 1 {
            self.write_context_line(f, line_number - 1, width)?;
        }

        let first_column = self.location.column;
        let last_column = first_column + self.length.max(1);
        let mut marker_indent = 0;

        Self::write_gutter(f, Some(line_number), width)?;
        for (index, char) in self
            .source_file
            .get_line(line_number)
            .unwrap_or_default()
            .chars()
            .enumerate()
        {
            let column = index + 1;
            let rendered = if char == '\t' { "    " } else { " " };

            if char == '\n' || char == '\r' {
                continue;
            }

            if column < first_column {
                marker_indent += rendered.len();
            }

            if (first_column..last_column).contains(&column) {
                write!(
                    f,
                    "{}",
                    Style::Underline.with(Style::Bold.with(Color::Red.with(char)))
                )?;
            } else if char == '\t' {
                write!(f, "    ")?;
            } else {
                write!(f, "{char}")?;
            }
        }
        writeln!(f)?;

        if let Some(help) = &self.help_display {
            Self::write_gutter(f, None, width)?;
            writeln!(
                f,
                "{:marker_indent$}{} {}: {help}",
                "",
                Style::Bold.with(Color::Red.with("^")),
                Style::Bold.with("help"),
            )?;
        }

        self.write_context_line(f, line_number + 1, width)?;

        Self::write_gutter(f, None, width)?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::{get_digit, Message, Severity, SourceCodeDisplay};
    use crate::source_file::{Location, SourceFile};

    #[test]
    fn digits_of_line_numbers() {
        assert_eq!(get_digit(0), 0);
        assert_eq!(get_digit(9), 1);
        assert_eq!(get_digit(10), 2);
        assert_eq!(get_digit(120), 3);
    }

    #[test]
    fn message_contains_display() {
        let message = Message::new(Severity::Error, "Invalid character: '@'");
        assert!(message.to_string().contains("[error]:"));
        assert!(message.to_string().contains("Invalid character: '@'"));
    }

    #[test]
    fn source_code_display_shows_surrounding_lines() {
        let source_file = SourceFile::temp("let a = 1;\nlet b = @;\nlet c = 3;").unwrap();
        let display = SourceCodeDisplay::new(
            &source_file,
            Location::new(2, 9),
            1,
            Some("this character does not start any token"),
        )
        .to_string();

        assert!(display.contains("2:9"));
        assert!(display.contains("let a = 1;"));
        assert!(display.contains("let c = 3;"));
        assert!(display.contains("help"));
    }

    #[test]
    fn source_code_display_is_copied_by_reference() {
        let source_file = SourceFile::temp("x = \"open").unwrap();
        let display = SourceCodeDisplay::new(&source_file, Location::new(1, 5), 5, None::<&str>);
        let copied = display;

        assert!(std::ptr::eq(display.source_file, copied.source_file));
        assert_eq!(display.to_string(), copied.to_string());
        assert!(!copied.to_string().contains("help"));
    }
}
