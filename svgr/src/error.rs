//! Error types

use std::io;
use thiserror::Error;

use crate::types::Symbol;

/// Errors raised while parsing path data. The first one encountered ends the parse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// No number or command letter starts at this byte offset
    #[error("invalid path data at offset {offset}: {reason}")]
    Tokenization { offset: usize, reason: String },

    /// A letter that is not a path command
    #[error("unknown path command {letter:?} at offset {offset}")]
    UnknownCommand { offset: usize, letter: char },

    /// The numbers following a command do not form whole parameter groups
    #[error("incorrect number of parameters for {symbol}")]
    Arity { symbol: Symbol, count: usize },
}

/// Errors raised while loading a document tree
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("SVG markup error: {0}")]
    Markup(String),

    #[error("path data of element {element:?}: {source}")]
    Path {
	element: String,
	#[source]
	source: PathError,
    },
}
