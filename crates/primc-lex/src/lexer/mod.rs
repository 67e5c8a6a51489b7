//! The lexer proper, split by token family.
//!
//! `core` owns the `Lexer` struct and the dispatch loop; the sibling
//! modules each extend it with the scanning routines for one family of
//! tokens.

mod comment;
mod core;
mod identifier;
mod number;
mod operator;
mod string;

pub use core::{ErrorPolicy, Lexer};
