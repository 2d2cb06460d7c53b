use std::{
    cell::Cell,
    fs::File,
    io::Write,
    path::PathBuf,
    process::ExitCode,
};

pub use clap::Parser;
use lexis_automaton::{model::lexer_dfa, simulator::Simulator};
use lexis_base::{
    diagnostic::Handler,
    log::{Message, Severity, SourceCodeDisplay},
    source_file::SourceFile,
};
use lexis_lexical::{error::Error as LexicalError, token_stream::TokenStream};

pub mod export;
pub mod report;
pub mod statistics;

mod error;

pub use error::Error;

/// The output formats of the token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, clap::ValueEnum)]
pub enum Format {
    /// A colored table, one row per token.
    #[default]
    Table,

    /// Comma-separated values with a header row.
    Csv,

    /// A pretty-printed JSON array.
    Json,
}

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "lexis",
    about = "Lexis lexical analyzer and automaton simulator.",
    author = "66011245@kmitl.ac.th"
)]
pub struct Argument {
    /// The source file to analyze.
    #[clap(required_unless_present = "dump_dfa")]
    pub file: Option<PathBuf>,

    /// The format the tokens are printed in.
    #[clap(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Keeps the whitespace tokens in the table.
    #[clap(long = "include-whitespace")]
    pub include_whitespace: bool,

    /// Prints the token statistics.
    #[clap(long)]
    pub stats: bool,

    /// Replays the automaton over the file and prints every step.
    #[clap(long)]
    pub trace: bool,

    /// Prints the states and transitions of the automaton.
    #[clap(long = "dump-dfa")]
    pub dump_dfa: bool,
}

/// A struct that implements [`Handler`] but prints all the lexical errors to the standard error
/// stream, together with the offending source line.
#[derive(Debug)]
struct Printer<'a> {
    source_file: &'a SourceFile,
    count: Cell<usize>,
}

impl<'a> Printer<'a> {
    /// Creates a new [`Printer`].
    fn new(source_file: &'a SourceFile) -> Self {
        Self {
            source_file,
            count: Cell::new(0),
        }
    }

    fn count(&self) -> usize { self.count.get() }
}

impl<'a> Handler<LexicalError> for Printer<'a> {
    fn receive(&self, error: LexicalError) {
        let help = match &error {
            LexicalError::InvalidCharacter(..) => "this character does not start any token",
            LexicalError::UnterminatedString(..) => "the closing quote is never found",
        };

        eprintln!("{}", Message::new(Severity::Error, &error));
        eprintln!(
            "{}",
            SourceCodeDisplay::new(
                self.source_file,
                error.location(),
                error.lexeme().chars().count(),
                Some(help)
            )
        );

        self.count.set(self.count.get() + 1);
    }
}

/// Analyzes the file named by the argument and writes the requested reports to `out`.
///
/// Lexical errors are printed to the standard error stream as they are found.
///
/// # Returns
/// Whether the file is free of lexical errors.
///
/// # Errors
/// - [`Error::Io`] - The file cannot be opened or `out` cannot be written.
/// - [`Error::Source`] - The file cannot be mapped or is not UTF-8.
/// - [`Error::Json`] - The tokens cannot be serialized.
pub fn execute(argument: &Argument, out: &mut dyn Write) -> Result<bool, Error> {
    if argument.dump_dfa {
        write!(out, "{}", report::DfaDump { dfa: lexer_dfa() })?;
    }

    let Some(path) = &argument.file else {
        return Ok(true);
    };

    let source_file = SourceFile::load(File::open(path)?, path.clone())?;
    let printer = Printer::new(&source_file);

    let tokens = TokenStream::tokenize(source_file.content(), &printer);

    match argument.format {
        Format::Table => {
            write!(out, "{}", report::TokenTable {
                tokens: &tokens,
                include_whitespace: argument.include_whitespace,
            })?;
            writeln!(
                out,
                "{}, {}",
                statistics::format_token_count(tokens.len()),
                statistics::format_error_count(printer.count())
            )?;
        }
        Format::Csv => writeln!(out, "{}", export::to_csv(&tokens))?,
        Format::Json => writeln!(out, "{}", export::to_json(&tokens)?)?,
    }

    if argument.stats {
        write!(out, "{}", statistics::TokenStatistics::new(&tokens))?;
    }

    if argument.trace {
        let mut simulator = Simulator::new(lexer_dfa());
        simulator.initialize(source_file.content());

        write!(out, "{}", report::Trace {
            result: &simulator.run_all()
        })?;
    }

    Ok(printer.count() == 0)
}

/// Runs the program with the given arguments.
pub fn run(argument: Argument) -> ExitCode {
    let stdout = std::io::stdout();

    match execute(&argument, &mut stdout.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            let display = argument.file.as_ref().map_or_else(
                || error.to_string(),
                |path| format!("{}: {error}", path.display()),
            );

            eprintln!("{}", Message::new(Severity::Error, display));
            ExitCode::FAILURE
        }
    }
}
