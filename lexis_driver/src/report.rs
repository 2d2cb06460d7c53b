//! Console renderings of the analysis: the token table, the automaton dump and the step trace.

use std::fmt::Display;

use lexis_automaton::{
    model::{Dfa, StateKind},
    simulator::SimulationResult,
};
use lexis_base::log::formatting::{Color, Paint, Style};
use lexis_lexical::token::{Token, TokenCategory, TokenType};

use crate::statistics::{format_token_count, truncate_lexeme, MAX_LEXEME_LENGTH};

/// Gets the color a token category is printed with.
#[must_use]
pub fn category_color(category: TokenCategory) -> Color {
    match category {
        TokenCategory::Keyword => Color::Magenta,
        TokenCategory::Identifier => Color::Blue,
        TokenCategory::Literal => Color::Green,
        TokenCategory::Operator => Color::Yellow,
        TokenCategory::Punctuation => Color::White,
        TokenCategory::Comment | TokenCategory::Whitespace => Color::Gray,
        TokenCategory::Error => Color::Red,
    }
}

/// Escapes the control characters of a lexeme and shortens it to fit a table cell.
fn cell(lexeme: &str) -> String {
    truncate_lexeme(&lexeme.escape_debug().to_string(), MAX_LEXEME_LENGTH)
}

/// Is a struct implementing [`Display`] that prints tokens as a table, colored by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTable<'a> {
    /// The tokens to print.
    pub tokens: &'a [Token],

    /// Whether whitespace tokens get a row.
    pub include_whitespace: bool,
}

impl<'a> Display for TokenTable<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{}",
            Style::Bold.with(format!(
                "{:>5}  {:<width$}  {:<11}  {:<11}  {}",
                "#",
                "Lexeme",
                "Type",
                "Category",
                "Position",
                width = MAX_LEXEME_LENGTH
            ))
        )?;

        let mut shown = 0;
        for token in self.tokens.iter().filter(|token| {
            self.include_whitespace || token.token_type() != TokenType::Whitespace
        }) {
            let color = category_color(token.category());

            writeln!(
                f,
                "{:>5}  {}  {:<11}  {:<11}  {}",
                token.index(),
                color.with(format!(
                    "{:<width$}",
                    cell(token.lexeme()),
                    width = MAX_LEXEME_LENGTH
                )),
                token.token_type().to_string(),
                token.category().to_string(),
                token.location()
            )?;
            shown += 1;
        }

        if shown < self.tokens.len() {
            writeln!(
                f,
                "{}",
                Style::Dim.with(format!(
                    "{} shown of {}",
                    format_token_count(shown),
                    self.tokens.len()
                ))
            )?;
        }

        Ok(())
    }
}

/// Is a struct implementing [`Display`] that prints the states and transitions of an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DfaDump<'a> {
    /// The automaton to print.
    pub dfa: &'a Dfa,
}

impl<'a> Display for DfaDump<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", Style::Bold.with("States"))?;
        for state in self.dfa.states() {
            let color = match state.kind() {
                StateKind::Start => Color::Cyan,
                StateKind::Normal => Color::White,
                StateKind::Accept => Color::Green,
                StateKind::Error => Color::Red,
            };

            write!(
                f,
                "  {:<4} {} {:<8}",
                state.short_label(),
                color.with(format!("{:<18}", state.id())),
                state.kind().to_string()
            )?;
            if let Some(token_type) = state.accepts_token() {
                write!(f, " -> {token_type}")?;
            }
            writeln!(f, "  {}", Style::Dim.with(state.regex()))?;
        }

        writeln!(f, "{}", Style::Bold.with("Transitions"))?;
        for transition in self.dfa.transitions() {
            writeln!(
                f,
                "  {:<22} {:<18} --{}--> {:<18} {}",
                transition.id(),
                transition.from().to_string(),
                Color::Yellow.with(transition.guard()),
                transition.to().to_string(),
                Style::Dim.with(transition.description())
            )?;
        }

        Ok(())
    }
}

/// Is a struct implementing [`Display`] that prints every step of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trace<'a> {
    /// The simulation to print.
    pub result: &'a SimulationResult,
}

impl<'a> Display for Trace<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", Style::Bold.with("Trace"))?;

        for step in self.result.steps() {
            let Some(from) = step.from() else {
                writeln!(f, "  {:>5}  {}", step.step_number(), step.state())?;
                continue;
            };

            let marker = if step.starts_token() { "*" } else { " " };
            let state = if step.is_accepting() {
                Color::Green.with(step.state())
            } else if step.error().is_some() {
                Color::Red.with(step.state())
            } else {
                Color::White.with(step.state())
            };

            let consumed = format!("{:?}", step.consumed());

            write!(
                f,
                "  {:>5}{marker} {:<18} {consumed:<10} {state}",
                step.step_number(),
                from.to_string(),
            )?;
            if let Some(error) = step.error() {
                write!(f, "  {}", Color::Red.with(error))?;
            }
            writeln!(f)?;
        }

        let verdict = if self.result.accepted() {
            Color::Green.with("accepted")
        } else {
            Color::Red.with("rejected")
        };
        writeln!(
            f,
            "{} in {}, {}",
            Style::Bold.with(verdict),
            self.result.final_state(),
            format_token_count(self.result.tokens().len())
        )
    }
}
