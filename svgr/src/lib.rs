//! Parser for SVG path data.
//!
//! Turns the contents of a `d` attribute into [`Path`]: subpaths of commands
//! in document order, each command a [`Symbol`] with its numeric parameters.
//!
//! ```
//! let path: svgr::Path = "M10-20 30,40 Z".parse().unwrap();
//! assert_eq!(path.to_string(), "M10 -20 L30 40 Z");
//! ```
//!
//! [`tag::Element`] is a minimal document tree for locating path elements in
//! SVG markup.

mod error;
mod number;
mod parse;
mod token;
mod types;
pub mod tag;

pub use error::{DocumentError, PathError};
pub use parse::parse_path;
pub use token::{Token, Tokens};
pub use types::{Command, Letter, Path, Position, Subpath, Symbol};
