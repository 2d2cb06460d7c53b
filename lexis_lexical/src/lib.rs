//! This crate implements the lexical analysis of Lexis. It is responsible for turning source code
//! into a flat list of classified tokens and a list of lexical errors.
//!
//! The entry point is [`token_stream::analyze`], which produces a
//! [`token_stream::LexicalAnalysisResult`]. The character classes shared with the automaton
//! description live in [`character`].

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod character;
pub mod cursor;
pub mod error;
pub mod token;
pub mod token_stream;

pub use token_stream::{analyze, LexicalAnalysisResult};
