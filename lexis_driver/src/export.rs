//! Renders tokens as CSV or JSON documents.

use lexis_lexical::token::Token;

/// The header row of [`to_csv`].
pub const CSV_HEADER: &str = "Index,Lexeme,Token Type,Category,Line,Column";

/// Renders the tokens as CSV, one row per token under [`CSV_HEADER`].
///
/// Lexemes are always quoted; a quote inside a lexeme is doubled.
#[must_use]
pub fn to_csv(tokens: &[Token]) -> String {
    let rows = tokens.iter().map(|token| {
        format!(
            "{},\"{}\",{},{},{},{}",
            token.index(),
            token.lexeme().replace('"', "\"\""),
            token.token_type(),
            token.category(),
            token.line(),
            token.column()
        )
    });

    std::iter::once(CSV_HEADER.to_string())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the tokens as a pretty-printed JSON array.
///
/// # Errors
/// Forwards the error of [`serde_json::to_string_pretty`].
pub fn to_json(tokens: &[Token]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tokens)
}

#[cfg(test)]
mod tests {
    use lexis_lexical::analyze;

    use super::{to_csv, to_json};

    #[test]
    fn csv_quotes_lexemes() {
        let result = analyze("x = \"a\";");
        let csv = to_csv(result.tokens());
        let lines = csv.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "Index,Lexeme,Token Type,Category,Line,Column");
        assert_eq!(lines[1], "0,\"x\",IDENTIFIER,Identifier,1,1");
        assert_eq!(lines[5], "4,\"\"\"a\"\"\",STRING,Literal,1,5");
        assert_eq!(lines.len(), result.tokens().len() + 1);
    }

    #[test]
    fn csv_of_no_tokens_is_the_header() {
        assert_eq!(to_csv(&[]), "Index,Lexeme,Token Type,Category,Line,Column");
    }

    #[test]
    fn json_names_the_fields() {
        let result = analyze("if\n3.5");
        let json = to_json(result.tokens()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["index"], 0);
        assert_eq!(value[0]["lexeme"], "if");
        assert_eq!(value[0]["type"], "KEYWORD");
        assert_eq!(value[0]["category"], "Keyword");
        assert_eq!(value[2]["type"], "FLOAT");
        assert_eq!(value[2]["category"], "Literal");
        assert_eq!(value[2]["line"], 2);
        assert_eq!(value[2]["column"], 1);
    }
}
