//! Is a module containing the [`Token`] type and all of its related types.

use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
    str::FromStr,
};

use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use lazy_static::lazy_static;
use lexis_base::{diagnostic::Handler, source_file::Location};
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

use crate::{
    character,
    cursor::{ByteIndex, Cursor},
    error::{self, InvalidCharacter, UnterminatedString},
};

/// Is an enumeration representing the reserved words of the analyzed language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    If,
    Else,
    While,
    For,
    Return,
    Function,
    Var,
    Let,
    Const,
    Int,
    Float,
    String,
    Boolean,
    True,
    False,
    Null,
    Undefined,
    Class,
    This,
    New,
    Void,
    Break,
    Continue,
    Switch,
    Case,
    Default,
    Do,
    Try,
    Catch,
    Finally,
    Throw,
    Import,
    Export,
    From,
    As,
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref STRING_KEYWORD_MAP: HashMap<&'static str, KeywordKind> = {
                let mut map = HashMap::new();

                for keyword in KeywordKind::iter() {
                    map.insert(keyword.as_str(), keyword);
                }

                map
            };
        }
        STRING_KEYWORD_MAP.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the string representation of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Return => "return",
            Self::Function => "function",
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Class => "class",
            Self::This => "this",
            Self::New => "new",
            Self::Void => "void",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Default => "default",
            Self::Do => "do",
            Self::Try => "try",
            Self::Catch => "catch",
            Self::Finally => "finally",
            Self::Throw => "throw",
            Self::Import => "import",
            Self::Export => "export",
            Self::From => "from",
            Self::As => "as",
        }
    }

    /// Checks if the word is exactly one of the reserved words.
    #[must_use]
    pub fn is_keyword(word: &str) -> bool { Self::from_str(word).is_ok() }
}

/// The operators made of more than one character.
///
/// An operator is extended one character at a time and only while the extension is one of these.
pub const MULTI_CHARACTER_OPERATORS: [&str; 17] = [
    "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=", "%=", "<<", ">>",
    "===", "!==",
];

/// Checks if the text is one of the [`MULTI_CHARACTER_OPERATORS`].
#[must_use]
pub fn is_multi_character_operator(text: &str) -> bool {
    lazy_static! {
        static ref OPERATOR_SET: HashSet<&'static str> =
            MULTI_CHARACTER_OPERATORS.into_iter().collect();
    }
    OPERATOR_SET.contains(text)
}

/// Is an enumeration of the classifications a [`Token`] can have.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    Serialize,
    strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum TokenType {
    Keyword,
    Identifier,
    Number,
    Float,
    String,
    Operator,
    Punctuation,
    Comment,
    Whitespace,
    Error,
}

impl TokenType {
    /// Gets the coarser [`TokenCategory`] the token type belongs to.
    #[must_use]
    pub fn category(self) -> TokenCategory {
        match self {
            Self::Keyword => TokenCategory::Keyword,
            Self::Identifier => TokenCategory::Identifier,
            Self::Number | Self::Float | Self::String => TokenCategory::Literal,
            Self::Operator => TokenCategory::Operator,
            Self::Punctuation => TokenCategory::Punctuation,
            Self::Comment => TokenCategory::Comment,
            Self::Whitespace => TokenCategory::Whitespace,
            Self::Error => TokenCategory::Error,
        }
    }
}

/// Is an enumeration grouping the [`TokenType`]s.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    Serialize,
    strum_macros::Display,
)]
#[allow(missing_docs)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    Literal,
    Operator,
    Punctuation,
    Comment,
    Whitespace,
    Error,
}

/// Represents one recognized lexical unit of the source code.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters, Serialize,
)]
pub struct Token {
    /// Gets the position of the token in the emission order (starts at 0).
    #[get_copy = "pub"]
    index: usize,

    /// Gets the exact source text the token was made of.
    #[get = "pub"]
    lexeme: String,

    /// Gets the classification of the token.
    #[get_copy = "pub"]
    #[serde(rename = "type")]
    token_type: TokenType,

    /// Gets the category of the token, always derived from its type.
    #[get_copy = "pub"]
    category: TokenCategory,

    /// Gets the line of the first character of the token (starts at 1).
    #[get_copy = "pub"]
    line: usize,

    /// Gets the column of the first character of the token (starts at 1).
    #[get_copy = "pub"]
    column: usize,
}

impl Token {
    /// Creates a new token; the category is derived from `token_type`.
    #[must_use]
    pub fn new(
        index: usize,
        lexeme: impl Into<String>,
        token_type: TokenType,
        location: Location,
    ) -> Self {
        Self {
            index,
            lexeme: lexeme.into(),
            token_type,
            category: token_type.category(),
            line: location.line,
            column: location.column,
        }
    }

    /// Gets the location of the first character of the token.
    #[must_use]
    pub fn location(&self) -> Location { Location::new(self.line, self.column) }
}

/// Is an error that can occur when invoking the [`Token::lex`] method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("encountered an invalid character that makes no token.")]
    InvalidCharacter,

    #[error("the cursor argument is at the end of the source code.")]
    EndOfSourceCode,
}

/// Holds what every scanning helper needs to build the token it is scanning.
#[derive(Debug, Clone, Copy)]
struct Start {
    index: usize,
    byte: ByteIndex,
    location: Location,
}

impl Token {
    /// Increments the cursor until the predicate returns false.
    fn walk_iter(cursor: &mut Cursor, predicate: impl Fn(char) -> bool) {
        while let Some((_, character)) = cursor.peek() {
            if !predicate(character) {
                break;
            }

            cursor.next();
        }
    }

    /// Creates a token from the given start up to the current location of the cursor.
    fn create(cursor: &mut Cursor, start: Start, token_type: TokenType) -> Self {
        Self::new(
            start.index,
            cursor.slice_from(start.byte),
            token_type,
            start.location,
        )
    }

    fn handle_whitespace(cursor: &mut Cursor, start: Start) -> Self {
        Self::walk_iter(cursor, character::is_whitespace);

        Self::create(cursor, start, TokenType::Whitespace)
    }

    fn handle_comment(cursor: &mut Cursor, start: Start) -> Self {
        // the second slash
        cursor.next();

        Self::walk_iter(cursor, |character| character != '\n');

        Self::create(cursor, start, TokenType::Comment)
    }

    fn handle_string(
        cursor: &mut Cursor,
        start: Start,
        delimiter: char,
        handler: &dyn Handler<error::Error>,
    ) -> Self {
        let mut is_terminated = false;

        while let Some((_, character)) = cursor.next() {
            if character == delimiter {
                is_terminated = true;
                break;
            }

            // the escaped character is kept verbatim, whatever it is
            if character == '\\' {
                cursor.next();
            }
        }

        if is_terminated {
            Self::create(cursor, start, TokenType::String)
        } else {
            let token = Self::create(cursor, start, TokenType::Error);

            handler.receive(
                UnterminatedString {
                    lexeme: token.lexeme.clone(),
                    location: start.location,
                }
                .into(),
            );

            token
        }
    }

    fn handle_numeric_literal(cursor: &mut Cursor, start: Start) -> Self {
        // Tokenizes the whole number part
        Self::walk_iter(cursor, character::is_digit);

        let has_fraction = matches!(cursor.peek(), Some((_, '.')))
            && cursor.peek_second().is_some_and(character::is_digit);

        if has_fraction {
            cursor.next();
            Self::walk_iter(cursor, character::is_digit);

            Self::create(cursor, start, TokenType::Float)
        } else {
            Self::create(cursor, start, TokenType::Number)
        }
    }

    fn handle_identifier_and_keyword(cursor: &mut Cursor, start: Start) -> Self {
        Self::walk_iter(cursor, character::is_identifier_character);

        let word = cursor.slice_from(start.byte);
        let token_type = if KeywordKind::is_keyword(word) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };

        Self::create(cursor, start, token_type)
    }

    fn handle_operator(cursor: &mut Cursor, start: Start, first: char) -> Self {
        let mut operator = String::from(first);

        // two characters, then three; stops at the first extension that is not an operator
        while operator.len() < 3 {
            let Some((_, next)) = cursor.peek() else {
                break;
            };

            operator.push(next);

            if !is_multi_character_operator(&operator) {
                break;
            }

            cursor.next();
        }

        Self::create(cursor, start, TokenType::Operator)
    }

    /// Lexes one token from the given cursor.
    ///
    /// The tokenization starts at the current location of the cursor. The function moves the
    /// cursor at least once and forwards it until it makes a token. After the token is made, the
    /// cursor is left at the next character that is not part of the token.
    ///
    /// # Errors
    /// - [`Error::EndOfSourceCode`] - The cursor argument is at the end of the source code.
    /// - [`Error::InvalidCharacter`] - The character under the cursor starts no token; it has
    ///   been consumed and reported to the `handler`.
    pub fn lex(
        cursor: &mut Cursor,
        index: usize,
        handler: &dyn Handler<error::Error>,
    ) -> Result<Self, Error> {
        let location = cursor.location();

        // Gets the first character
        let (byte, character) = cursor.next().ok_or(Error::EndOfSourceCode)?;

        let start = Start {
            index,
            byte,
            location,
        };

        // Found white spaces
        if character::is_whitespace(character) {
            Ok(Self::handle_whitespace(cursor, start))
        }
        // Found line comment
        else if character == '/' && matches!(cursor.peek(), Some((_, '/'))) {
            Ok(Self::handle_comment(cursor, start))
        }
        // Found string literal
        else if character::is_quote(character) {
            Ok(Self::handle_string(cursor, start, character, handler))
        }
        // Found numeric literal
        else if character::is_digit(character) {
            Ok(Self::handle_numeric_literal(cursor, start))
        }
        // Found identifier/keyword
        else if character::is_letter_or_underscore(character) {
            Ok(Self::handle_identifier_and_keyword(cursor, start))
        }
        // Found operator
        else if character::is_operator_character(character) {
            Ok(Self::handle_operator(cursor, start, character))
        }
        // Found a punctuation
        else if character::is_punctuation(character) {
            Ok(Self::create(cursor, start, TokenType::Punctuation))
        } else {
            handler.receive(
                InvalidCharacter {
                    character,
                    location,
                }
                .into(),
            );

            Err(Error::InvalidCharacter)
        }
    }
}
