//! Contains all kinds of lexical errors that can occur while tokenizing the source code.
//!
//! Lexical errors never stop the tokenization: they are reported to a
//! [`lexis_base::diagnostic::Handler`] and scanning resumes right after the offending text.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use lexis_base::source_file::Location;

/// The source code contains a character that starts no token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[error("Invalid character: '{character}'")]
pub struct InvalidCharacter {
    /// The offending character.
    pub character: char,

    /// The location of the offending character.
    pub location: Location,
}

/// The source code contains a string literal whose closing delimiter is never found.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[error("Unterminated string literal")]
pub struct UnterminatedString {
    /// The text from the opening delimiter up to the end of the source code.
    pub lexeme: String,

    /// The location of the opening delimiter.
    pub location: Location,
}

/// Is an enumeration containing all kinds of lexical errors that can occur while tokenizing the
/// source code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    InvalidCharacter(InvalidCharacter),
    UnterminatedString(UnterminatedString),
}

impl Error {
    /// Gets the human-readable description of the error.
    #[must_use]
    pub fn message(&self) -> String { self.to_string() }

    /// Gets the offending text.
    #[must_use]
    pub fn lexeme(&self) -> String {
        match self {
            Self::InvalidCharacter(error) => error.character.to_string(),
            Self::UnterminatedString(error) => error.lexeme.clone(),
        }
    }

    /// Gets the location where the offending text starts.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::InvalidCharacter(error) => error.location,
            Self::UnterminatedString(error) => error.location,
        }
    }

    /// Gets the line where the offending text starts.
    #[must_use]
    pub fn line(&self) -> usize { self.location().line }

    /// Gets the column where the offending text starts.
    #[must_use]
    pub fn column(&self) -> usize { self.location().column }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter(err) => write!(f, "{err}"),
            Self::UnterminatedString(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use lexis_base::source_file::Location;

    use super::{Error, InvalidCharacter, UnterminatedString};

    #[test]
    fn messages() {
        let invalid: Error = InvalidCharacter {
            character: '@',
            location: Location::new(1, 9),
        }
        .into();
        let unterminated: Error = UnterminatedString {
            lexeme: "\"abc".to_string(),
            location: Location::new(3, 2),
        }
        .into();

        assert_eq!(invalid.message(), "Invalid character: '@'");
        assert_eq!(invalid.lexeme(), "@");
        assert_eq!((invalid.line(), invalid.column()), (1, 9));

        assert_eq!(unterminated.message(), "Unterminated string literal");
        assert_eq!(unterminated.lexeme(), "\"abc");
        assert_eq!(unterminated.location(), Location::new(3, 2));
        assert!(unterminated.as_unterminated_string().is_some());
        assert!(invalid.as_invalid_character().is_some());
    }
}
