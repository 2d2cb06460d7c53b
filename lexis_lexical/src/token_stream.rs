//! Contains the [`TokenStream`] struct and the [`analyze`] entry point of the lexical analysis.

use std::ops::Index;

use derive_more::Deref;
use getset::{CopyGetters, Getters};
use lexis_base::diagnostic::{Handler, Storage};

use crate::{
    cursor::Cursor,
    error,
    token::{self, Token},
};

/// Is a list of [`Token`]s in the order they were recognized.
///
/// Concatenating the lexemes of the stream reproduces the source code, except for the characters
/// reported as invalid.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenizes the given source code.
    ///
    /// This function tokenizes the given source code by calling the [`Token::lex()`] repeatedly
    /// until the end of the source code is reached. Lexical errors are reported to the `handler`
    /// and never stop the tokenization.
    #[must_use]
    pub fn tokenize(source: &str, handler: &dyn Handler<error::Error>) -> Self {
        // list of tokens to return
        let mut tokens = Vec::new();
        let mut cursor = Cursor::new(source);

        loop {
            // Tokenizes the next token
            match Token::lex(&mut cursor, tokens.len(), handler) {
                Ok(token) => tokens.push(token),
                Err(token::Error::EndOfSourceCode) => {
                    break;
                }
                // already reported, resumes at the next character
                Err(token::Error::InvalidCharacter) => (),
            }
        }

        Self { tokens }
    }

    /// Dissolves this struct into the underlying vector of tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> { self.tokens }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output { &self.tokens[index] }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter { self.tokens.iter() }
}

/// Is the outcome of one lexical analysis: the tokens, the errors and whether there were none.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct LexicalAnalysisResult {
    /// Gets the tokens recognized in the source code.
    #[get = "pub"]
    tokens: TokenStream,

    /// Gets the lexical errors in the order they were found.
    #[get = "pub"]
    errors: Vec<error::Error>,

    /// Gets whether the analysis found no lexical errors.
    #[get_copy = "pub"]
    success: bool,
}

impl LexicalAnalysisResult {
    /// Creates a result out of the tokens and errors; `success` is derived from `errors`.
    #[must_use]
    pub fn new(tokens: TokenStream, errors: Vec<error::Error>) -> Self {
        Self {
            success: errors.is_empty(),
            tokens,
            errors,
        }
    }

    /// Dissolves this struct into a tuple of its components.
    #[must_use]
    pub fn dissolve(self) -> (TokenStream, Vec<error::Error>, bool) {
        (self.tokens, self.errors, self.success)
    }
}

/// Analyzes the source code, collecting every token and every lexical error.
///
/// Each call owns its own cursor and error storage, so the function can be called from any
/// number of threads at once.
#[must_use]
pub fn analyze(source: &str) -> LexicalAnalysisResult {
    let storage: Storage<error::Error> = Storage::new();
    let tokens = TokenStream::tokenize(source, &storage);

    LexicalAnalysisResult::new(tokens, storage.into_vec())
}
