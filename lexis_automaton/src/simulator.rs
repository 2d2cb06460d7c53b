//! Contains the [`Simulator`] that replays a [`Dfa`] one transition at a time.
//!
//! Every call to [`Simulator::step`] records one [`Step`]. When no transition leaves an accepting
//! state (or the error sink) on the current character, the pending lexeme ends there: it is
//! recorded as a [`RecognizedToken`] and the automaton restarts from the start state on the same
//! character.

use getset::{CopyGetters, Getters};
use lexis_base::source_file::Location;
use lexis_lexical::token::{KeywordKind, TokenType};

use crate::model::{Dfa, StateId, StateKind};

/// Represents one transition taken by the [`Simulator`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct Step {
    /// Gets the position of the step in the trace; the initial step is number 0.
    #[get_copy = "pub"]
    step_number: usize,

    /// Gets the state the step started from, `None` for the initial step.
    #[get_copy = "pub"]
    from: Option<StateId>,

    /// Gets the state the step ended in.
    #[get_copy = "pub"]
    state: StateId,

    /// Gets the characters consumed by the step.
    #[get = "pub"]
    consumed: String,

    /// Gets the index, in characters, of the first character the step read.
    #[get_copy = "pub"]
    input_index: usize,

    /// Gets the character the step read, `None` past the end of the input.
    #[get_copy = "pub"]
    current_char: Option<char>,

    /// Gets the id of the transition taken, if any.
    #[get_copy = "pub"]
    transition: Option<&'static str>,

    /// Gets whether the state the step ended in is accepting.
    #[get_copy = "pub"]
    is_accepting: bool,

    /// Gets the error found by the step, if any.
    #[get = "pub"]
    error: Option<String>,

    /// Gets the token type implied by the state the step ended in.
    #[get_copy = "pub"]
    token_type: Option<TokenType>,

    /// Gets whether the step restarted the automaton to begin a new lexeme.
    #[get_copy = "pub"]
    starts_token: bool,
}

/// Represents a lexeme delimited by the [`Simulator`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct RecognizedToken {
    /// Gets the text of the token.
    #[get = "pub"]
    lexeme: String,

    /// Gets the type of the token.
    #[get_copy = "pub"]
    token_type: TokenType,

    /// Gets the index, in characters, of the first character of the token.
    #[get_copy = "pub"]
    start_index: usize,

    /// Gets the index, in characters, right past the last character of the token.
    #[get_copy = "pub"]
    end_index: usize,

    /// Gets the line of the first character of the token (starts at 1).
    #[get_copy = "pub"]
    line: usize,

    /// Gets the column of the first character of the token (starts at 1).
    #[get_copy = "pub"]
    column: usize,
}

/// Is a snapshot of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct SimulationResult {
    /// Gets the simulated input.
    #[get = "pub"]
    input: String,

    /// Gets every step recorded so far.
    #[get = "pub"]
    steps: Vec<Step>,

    /// Gets whether the last step ended in an accepting state.
    #[get_copy = "pub"]
    accepted: bool,

    /// Gets the state of the last step.
    #[get_copy = "pub"]
    final_state: StateId,

    /// Gets the errors found so far, in order.
    #[get = "pub"]
    errors: Vec<String>,

    /// Gets the tokens delimited so far, in order.
    #[get = "pub"]
    tokens: Vec<RecognizedToken>,
}

/// Replays a [`Dfa`] over an input, one transition per [`Simulator::step`].
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    dfa: &'a Dfa,
    input: Vec<char>,
    steps: Vec<Step>,
    current_step_index: usize,
    position: usize,
    location: Location,
    token_start: usize,
    token_location: Location,
    errors: Vec<String>,
    tokens: Vec<RecognizedToken>,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator with an empty input and no steps.
    #[must_use]
    pub fn new(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            input: Vec::new(),
            steps: Vec::new(),
            current_step_index: 0,
            position: 0,
            location: Location::START,
            token_start: 0,
            token_location: Location::START,
            errors: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Forgets everything and records the initial step over `input`.
    pub fn initialize(&mut self, input: &str) {
        self.input = input.chars().collect();
        self.restart();
    }

    /// Clears the steps, the cursor, the errors and the tokens but keeps the input.
    ///
    /// No step is left, so [`Self::step`] does nothing until [`Self::initialize`] or
    /// [`Self::run_all`] is called.
    pub fn reset(&mut self) {
        self.steps.clear();
        self.current_step_index = 0;
        self.position = 0;
        self.location = Location::START;
        self.token_start = 0;
        self.token_location = Location::START;
        self.errors.clear();
        self.tokens.clear();
    }

    fn restart(&mut self) {
        self.reset();

        let start = self.dfa.start_state();
        self.steps.push(Step {
            step_number: 0,
            from: None,
            state: start,
            consumed: String::new(),
            input_index: 0,
            current_char: self.input.first().copied(),
            transition: None,
            is_accepting: self.dfa.is_accepting_state(start),
            error: None,
            token_type: None,
            starts_token: false,
        });
    }

    /// Checks if a lexeme may end in the given state.
    fn is_token_boundary(&self, state: StateId) -> bool {
        self.dfa.is_accepting_state(state) || state == self.dfa.error_state()
    }

    fn token_type_of(&self, state: StateId) -> Option<TokenType> {
        self.dfa
            .state(state)
            .and_then(crate::model::State::accepts_token)
    }

    /// Makes the token out of the lexeme pending in `state` that ends right before `end`, together
    /// with the error it causes, if any.
    fn pending_token(
        &self,
        state: StateId,
        end: usize,
    ) -> Option<(RecognizedToken, Option<String>)> {
        if end == self.token_start {
            return None;
        }

        let lexeme = self.input[self.token_start..end].iter().collect::<String>();
        let kind = self.dfa.state(state).map(crate::model::State::kind);

        let (token_type, error) = match (kind, self.token_type_of(state)) {
            (Some(StateKind::Accept), Some(TokenType::Identifier))
                if KeywordKind::is_keyword(&lexeme) =>
            {
                (TokenType::Keyword, None)
            }
            (Some(StateKind::Accept), Some(token_type)) => (token_type, None),

            // cut short by the end of the input
            (Some(StateKind::Normal), _) => (
                TokenType::Error,
                Some(format!(
                    "Unterminated string literal at position {}",
                    self.token_start
                )),
            ),
            _ => return None,
        };

        Some((
            RecognizedToken {
                lexeme,
                token_type,
                start_index: self.token_start,
                end_index: end,
                line: self.token_location.line,
                column: self.token_location.column,
            },
            error,
        ))
    }

    /// Takes one more transition.
    ///
    /// Returns `false` without recording anything when there is no step or the input is
    /// exhausted. Otherwise records one step and returns whether input remains after it.
    pub fn step(&mut self) -> bool {
        let Some(last) = self.steps.last() else {
            return false;
        };
        let Some(&character) = self.input.get(self.position) else {
            return false;
        };

        let lookahead = self.input.get(self.position + 1).copied();
        let mut from = last.state;
        let mut transition = self.dfa.resolve(from, character, lookahead).copied();
        let start = self.dfa.start_state();

        if transition.is_none() && self.is_token_boundary(from) {
            if let Some((token, error)) = self.pending_token(from, self.position) {
                self.tokens.push(token);
                self.errors.extend(error);
            }

            from = start;
            transition = self.dfa.resolve(from, character, lookahead).copied();
        }

        let starts_token = from == start;
        if starts_token {
            self.token_start = self.position;
            self.token_location = self.location;
        }

        let (state, width, error) = match transition {
            Some(transition) => {
                let error = (transition.to() == self.dfa.error_state())
                    .then(|| format!("Invalid character: '{character}'"));

                (transition.to(), transition.guard().width(), error)
            }
            None => (
                self.dfa.error_state(),
                1,
                Some(format!("Cannot transition from {from} with '{character}'")),
            ),
        };

        if let Some(error) = &error {
            self.errors
                .push(format!("{error} at position {}", self.position));
        }

        let end = (self.position + width).min(self.input.len());
        let consumed = self.input[self.position..end].iter().collect::<String>();

        for character in consumed.chars() {
            self.location = self.location.advance(character);
        }

        self.steps.push(Step {
            step_number: self.steps.len(),
            from: Some(from),
            state,
            consumed,
            input_index: self.position,
            current_char: Some(character),
            transition: transition.map(|transition| transition.id()),
            is_accepting: self.dfa.is_accepting_state(state),
            error,
            token_type: self.token_type_of(state),
            starts_token,
        });
        self.current_step_index = self.steps.len() - 1;
        self.position = end;

        self.position < self.input.len()
    }

    /// Restarts the simulation and steps until the input is exhausted.
    pub fn run_all(&mut self) -> SimulationResult {
        self.restart();

        while self.step() {}

        self.result()
    }

    /// Summarizes the simulation so far.
    ///
    /// Once the input is exhausted, the lexeme still pending is included in the tokens.
    #[must_use]
    pub fn result(&self) -> SimulationResult {
        let final_state = self
            .steps
            .last()
            .map_or_else(|| self.dfa.start_state(), |step| step.state);

        let mut errors = self.errors.clone();
        let mut tokens = self.tokens.clone();

        if !self.steps.is_empty() && self.position >= self.input.len() {
            if let Some((token, error)) = self.pending_token(final_state, self.position) {
                tokens.push(token);
                errors.extend(error);
            }
        }

        SimulationResult {
            input: self.input.iter().collect(),
            steps: self.steps.clone(),
            accepted: self.dfa.is_accepting_state(final_state),
            final_state,
            errors,
            tokens,
        }
    }

    /// Gets every step recorded so far.
    #[must_use]
    pub fn steps(&self) -> &[Step] { &self.steps }

    /// Gets the most recent step.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> { self.steps.get(self.current_step_index) }

    /// Gets the automaton being simulated.
    #[must_use]
    pub fn dfa(&self) -> &'a Dfa { self.dfa }
}
