//! Summaries of a token list and the count formatting used in the reports.

use std::{
    collections::{BTreeMap, HashSet},
    fmt::Display,
};

use lexis_base::log::formatting::{Paint, Style};
use lexis_lexical::token::{Token, TokenCategory, TokenType};

/// The longest lexeme shown as is by [`truncate_lexeme`].
pub const MAX_LEXEME_LENGTH: usize = 50;

/// Is a summary of a list of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenStatistics {
    /// The number of tokens.
    pub total: usize,

    /// The number of tokens of each category that occurs at least once.
    pub by_category: BTreeMap<TokenCategory, usize>,

    /// The number of tokens of each type that occurs at least once.
    pub by_type: BTreeMap<TokenType, usize>,

    /// The number of distinct lexemes.
    pub unique_lexemes: usize,

    /// The highest line a token starts on, 0 without tokens.
    pub lines_processed: usize,
}

impl TokenStatistics {
    /// Summarizes the given tokens.
    #[must_use]
    pub fn new(tokens: &[Token]) -> Self {
        let mut statistics = Self {
            total: tokens.len(),
            ..Self::default()
        };
        let mut lexemes = HashSet::new();

        for token in tokens {
            *statistics.by_category.entry(token.category()).or_default() += 1;
            *statistics.by_type.entry(token.token_type()).or_default() += 1;
            lexemes.insert(token.lexeme().as_str());
            statistics.lines_processed = statistics.lines_processed.max(token.line());
        }

        statistics.unique_lexemes = lexemes.len();
        statistics
    }
}

impl Display for TokenStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", Style::Bold.with("Statistics"))?;
        writeln!(f, "  total:          {}", format_token_count(self.total))?;
        writeln!(f, "  unique lexemes: {}", self.unique_lexemes)?;
        writeln!(f, "  lines:          {}", self.lines_processed)?;

        writeln!(f, "{}", Style::Bold.with("By category"))?;
        for (category, count) in &self.by_category {
            writeln!(f, "  {:<15} {count}", category.to_string())?;
        }

        writeln!(f, "{}", Style::Bold.with("By type"))?;
        for (token_type, count) in &self.by_type {
            writeln!(f, "  {:<15} {count}", token_type.to_string())?;
        }

        Ok(())
    }
}

/// Formats a token count: `1 token`, `3 tokens`.
#[must_use]
pub fn format_token_count(count: usize) -> String {
    format!("{count} token{}", if count == 1 { "" } else { "s" })
}

/// Formats an error count: `1 error`, `0 errors`.
#[must_use]
pub fn format_error_count(count: usize) -> String {
    format!("{count} error{}", if count == 1 { "" } else { "s" })
}

/// Shortens a lexeme longer than `max_length` characters to exactly `max_length` characters, the
/// last three being `...`.
#[must_use]
pub fn truncate_lexeme(lexeme: &str, max_length: usize) -> String {
    if lexeme.chars().count() <= max_length {
        return lexeme.to_string();
    }

    let mut truncated = lexeme
        .chars()
        .take(max_length.saturating_sub(3))
        .collect::<String>();
    truncated.push_str("...");
    truncated
}
