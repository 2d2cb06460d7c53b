//! This crate describes the token grammar of Lexis as a deterministic finite automaton and replays
//! it character by character.
//!
//! [`model::lexer_dfa`] is the shared, read-only automaton. A [`simulator::Simulator`] walks it
//! over an input and records every transition as a [`simulator::Step`], for traces and teaching.
//! Production tokenization goes through [`lexis_lexical::analyze`] instead.

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

pub mod model;
pub mod simulator;
