use std::fmt;
use std::slice::Iter;
use std::str::FromStr;

use svg_macro::PathLetter;

use crate::error::PathError;

///Whether a command's coordinates are absolute or relative to the current point.
///Encoded in the letter case: uppercase absolute, lowercase relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Absolute,
    Relative,
}

#[derive(PathLetter, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    #[letter('M')] #[arity(2)]
    Move,
    #[letter('L')] #[arity(2)]
    Line,
    #[letter('H')] #[arity(1)]
    HorizontalLine,
    #[letter('V')] #[arity(1)]
    VerticalLine,
    #[letter('C')] #[arity(6)]
    CubicCurve,
    #[letter('S')] #[arity(4)]
    SmoothCubicCurve,
    #[letter('Q')] #[arity(4)]
    QuadraticCurve,
    #[letter('T')] #[arity(2)]
    SmoothQuadraticCurve,
    #[letter('A')] #[arity(7)]
    EllipticalArc,
    #[letter('Z')] #[arity(0)]
    Close,
}

///A command letter together with its case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub letter: Letter,
    pub position: Position,
}

impl Symbol {
    pub fn new(letter: Letter, position: Position) -> Self {
	Symbol { letter, position }
    }

    pub fn from_char(c: char) -> Option<Self> {
	let letter = Letter::from_char(c)?;
	let position = if c.is_ascii_lowercase() {
	    Position::Relative
	} else {
	    Position::Absolute
	};

	Some(Symbol { letter, position })
    }

    pub fn to_char(self) -> char {
	match self.position {
	    Position::Absolute => self.letter.to_char(),
	    Position::Relative => self.letter.to_char().to_ascii_lowercase(),
	}
    }

    pub fn arity(self) -> usize {
	self.letter.arity()
    }

    pub fn is_moveto(self) -> bool {
	self.letter == Letter::Move
    }

    pub fn is_closepath(self) -> bool {
	self.letter == Letter::Close
    }

    ///The symbol used for parameter groups that follow the first one
    ///without a new letter. A moveto continues as a lineto of the same case.
    pub fn repeated(self) -> Self {
	match self.letter {
	    Letter::Move => Symbol::new(Letter::Line, self.position),
	    _ => self,
	}
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub symbol: Symbol,
    pub params: Vec<f64>,
}

impl Command {
    pub fn new(symbol: Symbol, params: Vec<f64>) -> Self {
	Command { symbol, params }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	write!(f, "{}", self.symbol)?;

	let mut params = self.params.iter();
	if let Some(first) = params.next() {
	    write!(f, "{}", first)?;
	}
	for p in params {
	    write!(f, " {}", p)?;
	}

	Ok(())
    }
}

///A run of commands starting at a moveto.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    pub commands: Vec<Command>,
}

impl Subpath {
    pub fn commands(&self) -> Iter<'_, Command> {
	self.commands.iter()
    }
}

impl fmt::Display for Subpath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	write_separated(f, self.commands.iter())
    }
}

///Parsed path data: subpaths in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub subpaths: Vec<Subpath>,
}

impl Path {
    pub fn parse(data: &str) -> Result<Path, PathError> {
	crate::parse::parse_path(data)
    }

    pub fn subpaths(&self) -> Iter<'_, Subpath> {
	self.subpaths.iter()
    }

    ///All commands of all subpaths in document order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> + '_ {
	self.subpaths.iter().flat_map(|it| it.commands.iter())
    }

    pub fn is_empty(&self) -> bool {
	self.subpaths.is_empty()
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	write_separated(f, self.subpaths.iter())
    }
}

fn write_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, mut items: Iter<'_, T>) -> fmt::Result {
    if let Some(first) = items.next() {
	write!(f, "{}", first)?;
    }
    for it in items {
	write!(f, " {}", it)?;
    }

    Ok(())
}
