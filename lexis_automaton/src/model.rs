//! Contains the [`Dfa`] describing the token grammar as states and guarded transitions.
//!
//! The model is pure data. The guards are evaluated with the character classifiers of
//! [`lexis_lexical::character`], the same ones the scanner dispatches on.

use std::{collections::BTreeSet, fmt::Display};

use derive_new::new;
use getset::CopyGetters;
use lazy_static::lazy_static;
use lexis_lexical::{character, token::TokenType};
use strum_macros::EnumIter;
use thiserror::Error;

/// Is an enumeration of every state of the lexer automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum StateId {
    Start,
    Identifier,
    Number,
    Float,
    DoubleQuoted,
    DoubleQuotedEscape,
    SingleQuoted,
    SingleQuotedEscape,
    String,
    Operator,
    Comment,
    Whitespace,
    Punctuation,
    Error,
}

impl StateId {
    /// Gets the identifier of the state as shown in traces and dumps.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Identifier => "IN_IDENTIFIER",
            Self::Number => "IN_NUMBER",
            Self::Float => "IN_FLOAT",
            Self::DoubleQuoted => "IN_DOUBLE_STRING",
            Self::DoubleQuotedEscape => "IN_DOUBLE_ESCAPE",
            Self::SingleQuoted => "IN_SINGLE_STRING",
            Self::SingleQuotedEscape => "IN_SINGLE_ESCAPE",
            Self::String => "STRING",
            Self::Operator => "IN_OPERATOR",
            Self::Comment => "IN_COMMENT",
            Self::Whitespace => "WHITESPACE",
            Self::Punctuation => "PUNCTUATION",
            Self::Error => "ERROR",
        }
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Is an enumeration of the roles a [`State`] plays in the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
#[allow(missing_docs)]
pub enum StateKind {
    Start,
    Normal,
    Accept,
    Error,
}

/// Represents a node of the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, CopyGetters, new)]
pub struct State {
    /// Gets the identity of the state.
    #[get_copy = "pub"]
    id: StateId,

    /// Gets the role of the state.
    #[get_copy = "pub"]
    kind: StateKind,

    /// Gets the short label of the state, `q₀` for the start state.
    #[get_copy = "pub"]
    short_label: &'static str,

    /// Gets the description of what the state matches.
    #[get_copy = "pub"]
    description: &'static str,

    /// Gets the token type emitted when a lexeme ends in this state.
    #[get_copy = "pub"]
    accepts_token: Option<TokenType>,

    /// Gets the pattern of the text that leads to this state.
    #[get_copy = "pub"]
    regex: &'static str,
}

/// Is an enumeration of the character classes guarding the transitions.
///
/// Lookahead guards look at the character following the current one. [`Guard::CommentStart`] also
/// consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Guard {
    /// `[a-zA-Z_]`
    LetterOrUnderscore,

    /// `[0-9]`
    Digit,

    /// `[a-zA-Z0-9_]`
    IdentifierCharacter,

    /// `"`
    DoubleQuote,

    /// `'`
    SingleQuote,

    /// `\`
    Backslash,

    /// Any of the operator characters.
    OperatorCharacter,

    /// An operator character that does not start a line comment.
    OperatorContinuation,

    /// `//`
    CommentStart,

    /// Any whitespace character.
    Whitespace,

    /// Any of the punctuation characters.
    Punctuation,

    /// `.` followed by a digit.
    FractionDot,

    /// Anything but `\n`.
    NotNewline,

    /// Anything but `"` and `\`.
    DoubleQuotedContent,

    /// Anything but `'` and `\`.
    SingleQuotedContent,

    /// Any character.
    Any,

    /// A character that starts no token.
    Other,
}

impl Guard {
    /// Checks if the guard lets `character` through, `lookahead` being the character after it.
    #[must_use]
    pub fn matches(self, character: char, lookahead: Option<char>) -> bool {
        match self {
            Self::LetterOrUnderscore => character::is_letter_or_underscore(character),
            Self::Digit => character::is_digit(character),
            Self::IdentifierCharacter => character::is_identifier_character(character),
            Self::DoubleQuote => character == '"',
            Self::SingleQuote => character == '\'',
            Self::Backslash => character == '\\',
            Self::OperatorCharacter => character::is_operator_character(character),
            Self::OperatorContinuation => {
                character::is_operator_character(character)
                    && !(character == '/' && lookahead == Some('/'))
            }
            Self::CommentStart => character == '/' && lookahead == Some('/'),
            Self::Whitespace => character::is_whitespace(character),
            Self::Punctuation => character::is_punctuation(character),
            Self::FractionDot => character == '.' && lookahead.is_some_and(character::is_digit),
            Self::NotNewline => character != '\n',
            Self::DoubleQuotedContent => character != '"' && character != '\\',
            Self::SingleQuotedContent => character != '\'' && character != '\\',
            Self::Any => true,
            Self::Other => character::is_other(character),
        }
    }

    /// Gets the number of characters consumed when the guard is taken.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::CommentStart => 2,
            _ => 1,
        }
    }

    /// Checks if the guard looks at the character following the current one.
    #[must_use]
    pub const fn is_lookahead(self) -> bool {
        matches!(
            self,
            Self::CommentStart | Self::FractionDot | Self::OperatorContinuation
        )
    }

    /// Gets the label drawn on the edges guarded by this guard.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LetterOrUnderscore => "[a-zA-Z_]",
            Self::Digit => "[0-9]",
            Self::IdentifierCharacter => "[a-zA-Z0-9_]",
            Self::DoubleQuote => "\"",
            Self::SingleQuote => "'",
            Self::Backslash => "\\",
            Self::OperatorCharacter => "[+\\-*/%=<>!&|^~]",
            Self::OperatorContinuation => "[+\\-*/%=<>!&|^~] (not //)",
            Self::CommentStart => "//",
            Self::Whitespace => "[\\s]",
            Self::Punctuation => "[(){}\\[\\];,.:?]",
            Self::FractionDot => "\\.[0-9]",
            Self::NotNewline => "[^\\n]",
            Self::DoubleQuotedContent => "[^\"\\\\]",
            Self::SingleQuotedContent => "[^'\\\\]",
            Self::Any => ".",
            Self::Other => "Other",
        }
    }
}

impl Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.label()) }
}

/// Represents a directed edge of the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, CopyGetters, new)]
pub struct Transition {
    /// Gets the name of the transition, unique within its automaton.
    #[get_copy = "pub"]
    id: &'static str,

    /// Gets the source state.
    #[get_copy = "pub"]
    from: StateId,

    /// Gets the target state.
    #[get_copy = "pub"]
    to: StateId,

    /// Gets the character class that lets the transition through.
    #[get_copy = "pub"]
    guard: Guard,

    /// Gets the human-readable description of the transition.
    #[get_copy = "pub"]
    description: &'static str,
}

impl Transition {
    /// Checks if the transition goes back to its source state.
    #[must_use]
    pub fn is_self_loop(&self) -> bool { self.from == self.to }
}

/// Is an error that can occur when creating a [`Dfa`] out of states and transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("expected exactly one start state, found {0}")]
    StartStateCount(usize),

    #[error("expected exactly one error state, found {0}")]
    ErrorStateCount(usize),

    #[error("the state {0} is declared more than once")]
    DuplicatedState(StateId),

    #[error("the transition `{transition}` refers to the undeclared state {state}")]
    UndeclaredState {
        transition: &'static str,
        state: StateId,
    },
}

/// Is a deterministic finite automaton: states, transitions between them, one start state, one
/// error sink and a set of accepting states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    states: Vec<State>,
    transitions: Vec<Transition>,
    start: StateId,
    error: StateId,
    accepting: BTreeSet<StateId>,
}

lazy_static! {
    static ref LEXER_DFA: Dfa = Dfa::lexer();
}

/// Gets the automaton of the token grammar, built once and shared read-only.
#[must_use]
pub fn lexer_dfa() -> &'static Dfa { &LEXER_DFA }

impl Dfa {
    /// Creates an automaton out of its states and transitions.
    ///
    /// # Errors
    /// - [`Error::StartStateCount`] - There is not exactly one [`StateKind::Start`] state.
    /// - [`Error::ErrorStateCount`] - There is not exactly one [`StateKind::Error`] state.
    /// - [`Error::DuplicatedState`] - Two states share the same id.
    /// - [`Error::UndeclaredState`] - A transition refers to a state that is not in `states`.
    pub fn new(states: Vec<State>, transitions: Vec<Transition>) -> Result<Self, Error> {
        let mut declared = BTreeSet::new();
        for state in &states {
            if !declared.insert(state.id) {
                return Err(Error::DuplicatedState(state.id));
            }
        }

        for transition in &transitions {
            for state in [transition.from, transition.to] {
                if !declared.contains(&state) {
                    return Err(Error::UndeclaredState {
                        transition: transition.id,
                        state,
                    });
                }
            }
        }

        let of_kind = |kind| {
            states
                .iter()
                .filter(|state| state.kind == kind)
                .map(|state| state.id)
                .collect::<Vec<_>>()
        };

        let starts = of_kind(StateKind::Start);
        let errors = of_kind(StateKind::Error);

        let (start, error) = match (starts.as_slice(), errors.as_slice()) {
            ([start], [error]) => (*start, *error),
            ([_], errors) => return Err(Error::ErrorStateCount(errors.len())),
            (starts, _) => return Err(Error::StartStateCount(starts.len())),
        };

        let accepting = of_kind(StateKind::Accept).into_iter().collect();

        Ok(Self {
            states,
            transitions,
            start,
            error,
            accepting,
        })
    }

    /// Builds the automaton of the token grammar.
    ///
    /// Prefer the shared [`lexer_dfa`] over building a new one.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn lexer() -> Self {
        use StateId as S;

        let accept = |id, short_label, description, token_type, regex| {
            State::new(
                id,
                StateKind::Accept,
                short_label,
                description,
                Some(token_type),
                regex,
            )
        };
        let normal = |id, short_label, description, regex| {
            State::new(id, StateKind::Normal, short_label, description, None, regex)
        };

        let states = vec![
            State::new(
                S::Start,
                StateKind::Start,
                "q₀",
                "Initial state - awaits input to determine token type",
                None,
                "ε",
            ),
            accept(
                S::Identifier,
                "q₁",
                "Identifier or keyword - accepts [a-zA-Z_][a-zA-Z0-9_]*",
                TokenType::Identifier,
                "[a-zA-Z_][a-zA-Z0-9_]*",
            ),
            accept(
                S::Number,
                "q₂",
                "Integer - accepts [0-9]+",
                TokenType::Number,
                "[0-9]+",
            ),
            accept(
                S::Float,
                "q₃",
                "Float - accepts [0-9]+\\.[0-9]+",
                TokenType::Float,
                "[0-9]+\\.[0-9]+",
            ),
            normal(
                S::DoubleQuoted,
                "q₄",
                "Inside a double-quoted string, waiting for the closing quote",
                "\"([^\"\\\\]|\\\\.)*",
            ),
            normal(
                S::DoubleQuotedEscape,
                "q₅",
                "After a backslash in a double-quoted string",
                "\"([^\"\\\\]|\\\\.)*\\\\",
            ),
            normal(
                S::SingleQuoted,
                "q₆",
                "Inside a single-quoted string, waiting for the closing quote",
                "'([^'\\\\]|\\\\.)*",
            ),
            normal(
                S::SingleQuotedEscape,
                "q₇",
                "After a backslash in a single-quoted string",
                "'([^'\\\\]|\\\\.)*\\\\",
            ),
            accept(
                S::String,
                "q₈",
                "Closed string literal - accepts \"...\" or '...'",
                TokenType::String,
                "\"([^\"\\\\]|\\\\.)*\"|'([^'\\\\]|\\\\.)*'",
            ),
            accept(
                S::Operator,
                "q₉",
                "Operator - accepts +, -, *, /, ==, !=, etc.",
                TokenType::Operator,
                "[+\\-*/%=<>!&|^~]+",
            ),
            accept(
                S::Comment,
                "q₁₀",
                "Line comment - accepts // up to the end of the line",
                TokenType::Comment,
                "//[^\\n]*",
            ),
            accept(
                S::Whitespace,
                "q₁₁",
                "Whitespace - accepts spaces, tabs, new lines",
                TokenType::Whitespace,
                "\\s+",
            ),
            accept(
                S::Punctuation,
                "q₁₂",
                "Punctuation - accepts (, ), {, }, [, ], ;, etc.",
                TokenType::Punctuation,
                "[(){}\\[\\];,.:?]",
            ),
            State::new(
                S::Error,
                StateKind::Error,
                "qₑ",
                "Error state - invalid character detected",
                None,
                "[^a-zA-Z0-9_\\s+\\-*/%=<>!&|^~\"'(){}\\[\\];,.:?]",
            ),
        ];

        let transitions = vec![
            // out of the start state
            Transition::new(
                "start-letter",
                S::Start,
                S::Identifier,
                Guard::LetterOrUnderscore,
                "Letter or underscore starts an identifier",
            ),
            Transition::new(
                "start-digit",
                S::Start,
                S::Number,
                Guard::Digit,
                "Digit starts a number",
            ),
            Transition::new(
                "start-double-quote",
                S::Start,
                S::DoubleQuoted,
                Guard::DoubleQuote,
                "Double quote starts a string literal",
            ),
            Transition::new(
                "start-single-quote",
                S::Start,
                S::SingleQuoted,
                Guard::SingleQuote,
                "Single quote starts a string literal",
            ),
            Transition::new(
                "start-operator",
                S::Start,
                S::Operator,
                Guard::OperatorCharacter,
                "Operator character",
            ),
            Transition::new(
                "start-comment",
                S::Start,
                S::Comment,
                Guard::CommentStart,
                "Double slash starts a comment",
            ),
            Transition::new(
                "start-whitespace",
                S::Start,
                S::Whitespace,
                Guard::Whitespace,
                "Whitespace character",
            ),
            Transition::new(
                "start-punctuation",
                S::Start,
                S::Punctuation,
                Guard::Punctuation,
                "Punctuation character",
            ),
            Transition::new(
                "start-error",
                S::Start,
                S::Error,
                Guard::Other,
                "Invalid character",
            ),
            // self-loops
            Transition::new(
                "identifier-loop",
                S::Identifier,
                S::Identifier,
                Guard::IdentifierCharacter,
                "Continue identifier",
            ),
            Transition::new(
                "number-loop",
                S::Number,
                S::Number,
                Guard::Digit,
                "Continue number",
            ),
            Transition::new(
                "float-loop",
                S::Float,
                S::Float,
                Guard::Digit,
                "Continue fractional part",
            ),
            Transition::new(
                "operator-loop",
                S::Operator,
                S::Operator,
                Guard::OperatorContinuation,
                "Continue operator",
            ),
            Transition::new(
                "comment-loop",
                S::Comment,
                S::Comment,
                Guard::NotNewline,
                "Continue comment until the end of the line",
            ),
            Transition::new(
                "whitespace-loop",
                S::Whitespace,
                S::Whitespace,
                Guard::Whitespace,
                "Continue whitespace",
            ),
            // numbers
            Transition::new(
                "number-to-float",
                S::Number,
                S::Float,
                Guard::FractionDot,
                "Dot followed by a digit starts the fractional part",
            ),
            // double-quoted strings
            Transition::new(
                "double-string-loop",
                S::DoubleQuoted,
                S::DoubleQuoted,
                Guard::DoubleQuotedContent,
                "Continue double-quoted string",
            ),
            Transition::new(
                "double-string-escape",
                S::DoubleQuoted,
                S::DoubleQuotedEscape,
                Guard::Backslash,
                "Backslash escapes the next character",
            ),
            Transition::new(
                "double-escape-end",
                S::DoubleQuotedEscape,
                S::DoubleQuoted,
                Guard::Any,
                "Escaped character is kept verbatim",
            ),
            Transition::new(
                "double-string-close",
                S::DoubleQuoted,
                S::String,
                Guard::DoubleQuote,
                "Double quote closes the string literal",
            ),
            // single-quoted strings
            Transition::new(
                "single-string-loop",
                S::SingleQuoted,
                S::SingleQuoted,
                Guard::SingleQuotedContent,
                "Continue single-quoted string",
            ),
            Transition::new(
                "single-string-escape",
                S::SingleQuoted,
                S::SingleQuotedEscape,
                Guard::Backslash,
                "Backslash escapes the next character",
            ),
            Transition::new(
                "single-escape-end",
                S::SingleQuotedEscape,
                S::SingleQuoted,
                Guard::Any,
                "Escaped character is kept verbatim",
            ),
            Transition::new(
                "single-string-close",
                S::SingleQuoted,
                S::String,
                Guard::SingleQuote,
                "Single quote closes the string literal",
            ),
        ];

        let accepting = states
            .iter()
            .filter(|state| state.kind == StateKind::Accept)
            .map(|state| state.id)
            .collect();

        Self {
            states,
            transitions,
            start: S::Start,
            error: S::Error,
            accepting,
        }
    }

    /// Gets every state, in declaration order.
    #[must_use]
    pub fn states(&self) -> &[State] { &self.states }

    /// Gets every transition, in declaration order.
    #[must_use]
    pub fn transitions(&self) -> &[Transition] { &self.transitions }

    /// Gets the id of the start state.
    #[must_use]
    pub fn start_state(&self) -> StateId { self.start }

    /// Gets the id of the error sink.
    #[must_use]
    pub fn error_state(&self) -> StateId { self.error }

    /// Gets the ids of the accepting states.
    #[must_use]
    pub fn accepting_states(&self) -> &BTreeSet<StateId> { &self.accepting }

    /// Finds the state with the given id.
    #[must_use]
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.iter().find(|state| state.id == id)
    }

    /// Gets the transitions leaving the given state.
    pub fn transitions_from(&self, id: StateId) -> impl Iterator<Item = &Transition> {
        self.transitions
            .iter()
            .filter(move |transition| transition.from == id)
    }

    /// Gets the transitions entering the given state.
    pub fn transitions_to(&self, id: StateId) -> impl Iterator<Item = &Transition> {
        self.transitions
            .iter()
            .filter(move |transition| transition.to == id)
    }

    /// Checks if the given state is the start state.
    #[must_use]
    pub fn is_start_state(&self, id: StateId) -> bool { self.start == id }

    /// Checks if the given state is an accepting state.
    #[must_use]
    pub fn is_accepting_state(&self, id: StateId) -> bool { self.accepting.contains(&id) }

    /// Finds a transition between the two states.
    ///
    /// With an `input`, the transition must also either carry exactly that label or let the
    /// characters of `input` through.
    #[must_use]
    pub fn find_transition(
        &self,
        from: StateId,
        to: StateId,
        input: Option<&str>,
    ) -> Option<&Transition> {
        self.transitions_from(from)
            .filter(|transition| transition.to == to)
            .find(|transition| {
                input.map_or(true, |input| {
                    let mut characters = input.chars();

                    transition.guard.label() == input
                        || characters.next().is_some_and(|character| {
                            transition.guard.matches(character, characters.next())
                        })
                })
            })
    }

    /// Resolves the transition taken out of `from` on `character`.
    ///
    /// Lookahead guards are tried first, so `//` wins over the operator class.
    #[must_use]
    pub fn resolve(
        &self,
        from: StateId,
        character: char,
        lookahead: Option<char>,
    ) -> Option<&Transition> {
        let lookahead_guarded = self
            .transitions_from(from)
            .filter(|transition| transition.guard.is_lookahead());
        let others = self
            .transitions_from(from)
            .filter(|transition| !transition.guard.is_lookahead());

        lookahead_guarded
            .chain(others)
            .find(|transition| transition.guard.matches(character, lookahead))
    }
}

#[cfg(test)]
mod tests;
