//! Contains the character classifiers of the token grammar.
//!
//! Every character falls into exactly one class, except `/`, which starts either an operator or a
//! line comment depending on the character that follows it.

/// The characters that start an operator.
pub const OPERATOR_CHARACTERS: [char; 13] =
    ['+', '-', '*', '/', '%', '=', '<', '>', '!', '&', '|', '^', '~'];

/// The characters emitted as single-character punctuation.
pub const PUNCTUATION_CHARACTERS: [char; 11] =
    ['(', ')', '{', '}', '[', ']', ';', ',', '.', ':', '?'];

/// Checks if the character starts an identifier: `[a-zA-Z_]`.
#[must_use]
pub fn is_letter_or_underscore(character: char) -> bool {
    character.is_ascii_alphabetic() || character == '_'
}

/// Checks if the character is an ASCII digit: `[0-9]`.
#[must_use]
pub fn is_digit(character: char) -> bool { character.is_ascii_digit() }

/// Checks if the character may continue an identifier: `[a-zA-Z0-9_]`.
#[must_use]
pub fn is_identifier_character(character: char) -> bool {
    is_letter_or_underscore(character) || is_digit(character)
}

/// Checks if the character is whitespace, including the byte order mark.
#[must_use]
pub fn is_whitespace(character: char) -> bool {
    character.is_whitespace() || character == '\u{feff}'
}

/// Checks if the character is one of the [`OPERATOR_CHARACTERS`].
#[must_use]
pub fn is_operator_character(character: char) -> bool {
    OPERATOR_CHARACTERS.contains(&character)
}

/// Checks if the character is one of the [`PUNCTUATION_CHARACTERS`].
#[must_use]
pub fn is_punctuation(character: char) -> bool { PUNCTUATION_CHARACTERS.contains(&character) }

/// Checks if the character opens or closes a string literal.
#[must_use]
pub fn is_quote(character: char) -> bool { character == '"' || character == '\'' }

/// Checks if the character belongs to none of the classes above and therefore is invalid.
#[must_use]
pub fn is_other(character: char) -> bool {
    !(is_whitespace(character)
        || is_identifier_character(character)
        || is_quote(character)
        || is_operator_character(character)
        || is_punctuation(character))
}

#[cfg(test)]
mod tests {
    use super::{
        is_digit, is_letter_or_underscore, is_operator_character, is_other, is_punctuation,
        is_quote, is_whitespace,
    };

    #[test]
    fn classes_are_disjoint() {
        let classifiers: [fn(char) -> bool; 7] = [
            is_letter_or_underscore,
            is_digit,
            is_whitespace,
            is_operator_character,
            is_punctuation,
            is_quote,
            is_other,
        ];

        for character in (0..=0x2FFF_u32).filter_map(char::from_u32) {
            let matches = classifiers
                .iter()
                .filter(|classifier| classifier(character))
                .count();

            assert_eq!(matches, 1, "{character:?} matches {matches} classes");
        }
    }

    #[test]
    fn non_ascii_letters_are_invalid() {
        assert!(is_other('é'));
        assert!(is_other('λ'));
        assert!(is_other('@'));
        assert!(is_other('#'));
        assert!(is_other('$'));
        assert!(!is_other('_'));
        assert!(!is_other('\u{a0}'));
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        assert!(is_whitespace('\u{feff}'));
        assert!(!is_other('\u{feff}'));
    }
}
