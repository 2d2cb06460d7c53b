use lexis_lexical::token::TokenType;
use strum::IntoEnumIterator;

use super::{lexer_dfa, Dfa, Error, Guard, State, StateId, StateKind, Transition};

fn characters() -> impl Iterator<Item = char> { (0..=0x2FFF_u32).filter_map(char::from_u32) }

fn lookaheads() -> [Option<char>; 5] { [None, Some('/'), Some('1'), Some('a'), Some('\n')] }

#[test]
fn every_state_is_declared_once() {
    let dfa = lexer_dfa();

    for id in StateId::iter() {
        let state = dfa.state(id).unwrap();
        assert_eq!(state.id(), id);
    }

    assert_eq!(dfa.states().len(), StateId::iter().count());
}

#[test]
fn start_error_and_accepting_states() {
    let dfa = lexer_dfa();

    assert_eq!(dfa.start_state(), StateId::Start);
    assert_eq!(dfa.error_state(), StateId::Error);
    assert!(dfa.is_start_state(StateId::Start));
    assert!(!dfa.is_start_state(StateId::Identifier));

    let starts = dfa
        .states()
        .iter()
        .filter(|state| state.kind() == StateKind::Start)
        .count();
    let errors = dfa
        .states()
        .iter()
        .filter(|state| state.kind() == StateKind::Error)
        .count();
    assert_eq!((starts, errors), (1, 1));

    for state in dfa.states() {
        assert_eq!(
            dfa.is_accepting_state(state.id()),
            state.kind() == StateKind::Accept
        );
        assert_eq!(state.accepts_token().is_some(), state.kind() == StateKind::Accept);
    }

    assert_eq!(
        dfa.state(StateId::String).unwrap().accepts_token(),
        Some(TokenType::String)
    );
    assert!(!dfa.is_accepting_state(StateId::DoubleQuoted));
    assert!(!dfa.is_accepting_state(StateId::Error));
    assert_eq!(dfa.accepting_states().len(), 8);
}

#[test]
fn error_state_is_a_sink() {
    let dfa = lexer_dfa();

    assert_eq!(dfa.transitions_from(StateId::Error).count(), 0);
    assert_eq!(
        dfa.transitions_to(StateId::Error)
            .map(Transition::id)
            .collect::<Vec<_>>(),
        ["start-error"]
    );
}

#[test]
fn transitions_are_mutually_exclusive() {
    let dfa = lexer_dfa();

    for state in StateId::iter() {
        let transitions = dfa.transitions_from(state).collect::<Vec<_>>();

        for character in characters() {
            for lookahead in lookaheads() {
                let matching = transitions
                    .iter()
                    .filter(|transition| transition.guard().matches(character, lookahead))
                    .map(|transition| transition.id())
                    .collect::<Vec<_>>();

                // the only overlap: `//` against the operator class out of the start state
                let allowed = state == StateId::Start && character == '/' && lookahead == Some('/');

                assert!(
                    matching.len() <= 1 || (allowed && matching.len() == 2),
                    "{state} on {character:?} followed by {lookahead:?}: {matching:?}"
                );
            }
        }
    }
}

#[test]
fn start_state_covers_every_character() {
    let dfa = lexer_dfa();

    for character in characters() {
        assert!(dfa.resolve(StateId::Start, character, None).is_some());
    }
}

#[test]
fn string_interiors_cover_every_character() {
    let dfa = lexer_dfa();

    for state in [
        StateId::DoubleQuoted,
        StateId::DoubleQuotedEscape,
        StateId::SingleQuoted,
        StateId::SingleQuotedEscape,
    ] {
        for character in characters() {
            assert!(dfa.resolve(state, character, None).is_some());
        }
    }
}

#[test]
fn resolve_prefers_lookahead_guards() {
    let dfa = lexer_dfa();

    let comment = dfa.resolve(StateId::Start, '/', Some('/')).unwrap();
    assert_eq!(comment.to(), StateId::Comment);
    assert_eq!(comment.guard().width(), 2);

    let division = dfa.resolve(StateId::Start, '/', Some('x')).unwrap();
    assert_eq!(division.to(), StateId::Operator);
    assert_eq!(division.guard().width(), 1);

    assert!(dfa.resolve(StateId::Operator, '/', Some('/')).is_none());
    assert_eq!(
        dfa.resolve(StateId::Operator, '/', Some('=')).unwrap().id(),
        "operator-loop"
    );

    assert_eq!(
        dfa.resolve(StateId::Number, '.', Some('5')).unwrap().to(),
        StateId::Float
    );
    assert!(dfa.resolve(StateId::Number, '.', None).is_none());
    assert_eq!(
        dfa.resolve(StateId::Number, '.', Some('x'))
            .map(Transition::id),
        None
    );
    assert_eq!(
        dfa.resolve(StateId::Start, '/', Some('/'))
            .map(Transition::id),
        Some("start-comment")
    );
    assert_eq!(
        dfa.resolve(StateId::Start, '@', None).unwrap().to(),
        StateId::Error
    );
}

#[test]
fn lookups() {
    let dfa = lexer_dfa();

    let from_start = dfa
        .transitions_from(StateId::Start)
        .map(Transition::id)
        .collect::<Vec<_>>();
    assert_eq!(from_start, [
        "start-letter",
        "start-digit",
        "start-double-quote",
        "start-single-quote",
        "start-operator",
        "start-comment",
        "start-whitespace",
        "start-punctuation",
        "start-error",
    ]);

    let into_string = dfa
        .transitions_to(StateId::String)
        .map(Transition::id)
        .collect::<Vec<_>>();
    assert_eq!(into_string, ["double-string-close", "single-string-close"]);

    let found = dfa
        .find_transition(StateId::Start, StateId::Identifier, None)
        .unwrap();
    assert_eq!(found.id(), "start-letter");

    // by label or by a matching character
    assert_eq!(
        dfa.find_transition(StateId::Start, StateId::Comment, Some("//"))
            .unwrap()
            .id(),
        "start-comment"
    );
    assert_eq!(
        dfa.find_transition(StateId::Start, StateId::Number, Some("7"))
            .unwrap()
            .id(),
        "start-digit"
    );
    assert!(dfa
        .find_transition(StateId::Start, StateId::Number, Some("x"))
        .is_none());
    assert!(dfa
        .find_transition(StateId::Identifier, StateId::Number, None)
        .is_none());

    let self_loops = dfa
        .transitions()
        .iter()
        .filter(|transition| transition.is_self_loop())
        .count();
    assert_eq!(self_loops, 8);
}

#[test]
fn names_and_labels() {
    assert_eq!(StateId::Start.to_string(), "START");
    assert_eq!(StateId::Identifier.as_str(), "IN_IDENTIFIER");
    assert_eq!(StateKind::Accept.to_string(), "accept");
    assert_eq!(Guard::CommentStart.to_string(), "//");

    let dfa = lexer_dfa();
    let mut ids = dfa
        .transitions()
        .iter()
        .map(|transition| transition.id())
        .collect::<Vec<_>>();
    let count = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

#[test]
fn shared_automaton_equals_a_fresh_one() {
    assert_eq!(lexer_dfa(), &Dfa::lexer());
    assert!(std::ptr::eq(lexer_dfa(), lexer_dfa()));
}

#[test]
fn new_validates_the_states() {
    let start = State::new(StateId::Start, StateKind::Start, "q₀", "start", None, "ε");
    let error = State::new(StateId::Error, StateKind::Error, "qₑ", "error", None, ".");
    let number = State::new(
        StateId::Number,
        StateKind::Accept,
        "q₁",
        "number",
        Some(TokenType::Number),
        "[0-9]+",
    );
    let digit = Transition::new("digit", StateId::Start, StateId::Number, Guard::Digit, "digit");

    let dfa = Dfa::new(vec![start, error, number], vec![digit]).unwrap();
    assert_eq!(dfa.accepting_states().iter().copied().collect::<Vec<_>>(), [
        StateId::Number
    ]);

    assert_eq!(
        Dfa::new(vec![error, number], vec![]),
        Err(Error::StartStateCount(0))
    );
    assert_eq!(
        Dfa::new(vec![start, number], vec![]),
        Err(Error::ErrorStateCount(0))
    );
    assert_eq!(
        Dfa::new(vec![start, error, start], vec![]),
        Err(Error::DuplicatedState(StateId::Start))
    );
    assert_eq!(
        Dfa::new(vec![start, error], vec![digit]),
        Err(Error::UndeclaredState {
            transition: "digit",
            state: StateId::Number
        })
    );
}
