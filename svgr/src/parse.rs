use tracing::{debug, trace};

use crate::error::PathError;
use crate::token::{Token, Tokens};
use crate::types::{Command, Path, Subpath, Symbol};

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    ///Only a command letter may follow. Holds the last symbol if it was a closepath.
    AwaitingCommand(Option<Symbol>),
    ///Collecting parameters for `symbol`; `groups` complete groups were emitted so far.
    ConsumingGroup { symbol: Symbol, groups: usize },
}

///Opens a new subpath at every moveto.
#[derive(Default)]
struct SubpathBuilder {
    subpaths: Vec<Subpath>,
}

impl SubpathBuilder {
    fn push(&mut self, command: Command) {
	if self.subpaths.is_empty() && !command.symbol.is_moveto() {
	    debug!("path data starts with {} instead of a moveto", command.symbol);
	}

	match self.subpaths.last_mut() {
	    Some(current) if !command.symbol.is_moveto() => current.commands.push(command),
	    _ => self.subpaths.push(Subpath { commands: vec![command] }),
	}
    }

    fn finish(self) -> Path {
	Path { subpaths: self.subpaths }
    }
}

struct Assembler {
    state: State,
    params: Vec<f64>,
    builder: SubpathBuilder,
}

impl Assembler {
    fn new() -> Self {
	Assembler {
	    state: State::AwaitingCommand(None),
	    params: Vec::new(),
	    builder: SubpathBuilder::default(),
	}
    }

    fn emit(&mut self, symbol: Symbol, params: Vec<f64>) {
	trace!(%symbol, ?params, "command");
	self.builder.push(Command::new(symbol, params));
    }

    ///Fails unless the run of numbers after `symbol` was whole groups, and at least one.
    fn check_run(&self, symbol: Symbol, groups: usize) -> Result<(), PathError> {
	if groups == 0 || !self.params.is_empty() {
	    return Err(PathError::Arity {
		symbol,
		count: groups * symbol.arity() + self.params.len(),
	    });
	}

	Ok(())
    }

    fn step(&mut self, state: State, offset: usize, token: Token) -> Result<State, PathError> {
	if let State::ConsumingGroup { symbol, groups } = state {
	    if let Token::Letter(_) = token {
		self.check_run(symbol, groups)?;
	    }
	}

	Ok(match (state, token) {
	    (_, Token::Letter(c)) => {
		let symbol = Symbol::from_char(c)
		    .ok_or(PathError::UnknownCommand { offset, letter: c })?;

		if symbol.is_closepath() {
		    self.emit(symbol, Vec::new());
		    State::AwaitingCommand(Some(symbol))
		} else {
		    State::ConsumingGroup { symbol, groups: 0 }
		}
	    },
	    (State::AwaitingCommand(Some(symbol)), Token::Number(_)) => {
		return Err(PathError::Arity { symbol, count: 1 });
	    },
	    (State::AwaitingCommand(None), Token::Number(n)) => {
		return Err(PathError::Tokenization {
		    offset,
		    reason: format!("number {} before any command", n),
		});
	    },
	    (State::ConsumingGroup { symbol, groups }, Token::Number(n)) => {
		self.params.push(n);
		if self.params.len() < symbol.arity() {
		    return Ok(state);
		}

		let params = std::mem::take(&mut self.params);
		let emitted = if groups == 0 { symbol } else { symbol.repeated() };
		self.emit(emitted, params);

		State::ConsumingGroup { symbol, groups: groups + 1 }
	    },
	})
    }

    fn feed(&mut self, offset: usize, token: Token) -> Result<(), PathError> {
	self.state = self.step(self.state, offset, token)?;
	Ok(())
    }

    fn finish(self) -> Result<Path, PathError> {
	if let State::ConsumingGroup { symbol, groups } = self.state {
	    self.check_run(symbol, groups)?;
	}

	Ok(self.builder.finish())
    }
}

///Parses the contents of a `d` attribute.
///
///Returns the first error encountered; no partial path is produced.
pub fn parse_path(data: &str) -> Result<Path, PathError> {
    let mut assembler = Assembler::new();

    for token in Tokens::new(data) {
	let (offset, token) = token?;
	assembler.feed(offset, token)?;
    }

    let path = assembler.finish()?;
    debug!(subpaths = path.subpaths.len(), "parsed path data");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(path: &Path) -> Vec<Vec<String>> {
	path.subpaths()
	    .map(|sp| sp.commands().map(|c| c.to_string()).collect())
	    .collect()
    }

    fn parsed(data: &str) -> Vec<Vec<String>> {
	symbols(&parse_path(data).unwrap())
    }

    #[test]
    fn test_simple_path() {
	assert_eq!(parsed("M 10,20 L 30,30 Z"), vec![vec!["M10 20", "L30 30", "Z"]]);
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
	assert_eq!(parsed("M 10,20 30,40 Z"), vec![vec!["M10 20", "L30 40", "Z"]]);
	assert_eq!(parsed("m 1 2 3 4 5 6"), vec![vec!["m1 2", "l3 4", "l5 6"]]);
    }

    #[test]
    fn test_implicit_repetition_keeps_symbol() {
	assert_eq!(parsed("M0 0 h 1 2 3 c1 2 3 4 5 6 7 8 9 10 11 12"), vec![vec![
	    "M0 0", "h1", "h2", "h3", "c1 2 3 4 5 6", "c7 8 9 10 11 12",
	]]);
    }

    #[test]
    fn test_every_moveto_opens_subpath() {
	assert_eq!(parsed("M1 1 M1 1 M2 2 L3 3"), vec![
	    vec!["M1 1"],
	    vec!["M1 1"],
	    vec!["M2 2", "L3 3"],
	]);
    }

    #[test]
    fn test_leading_non_moveto_is_tolerated() {
	assert_eq!(parsed("L 1 2 M 3 4"), vec![vec!["L1 2"], vec!["M3 4"]]);
    }

    #[test]
    fn test_empty_input() {
	assert_eq!(parse_path(""), Ok(Path::default()));
	assert_eq!(parse_path("  ,\n"), Ok(Path::default()));
    }

    #[test]
    fn test_partial_group() {
	let err = parse_path("M 10 20 30 Z").unwrap_err();
	assert_eq!(err.to_string(), "incorrect number of parameters for M");
	assert!(matches!(err, PathError::Arity { count: 3, .. }));
    }

    #[test]
    fn test_partial_group_at_end() {
	let err = parse_path("M 0 0 c 1 2 3").unwrap_err();
	assert_eq!(err.to_string(), "incorrect number of parameters for c");
    }

    #[test]
    fn test_command_without_parameters() {
	let err = parse_path("M L 1 2").unwrap_err();
	assert_eq!(err, PathError::Arity { symbol: Symbol::from_char('M').unwrap(), count: 0 });

	let err = parse_path("M 1 2 L").unwrap_err();
	assert_eq!(err.to_string(), "incorrect number of parameters for L");
    }

    #[test]
    fn test_numbers_after_closepath() {
	let err = parse_path("M 1 2 z 3 4").unwrap_err();
	assert_eq!(err.to_string(), "incorrect number of parameters for z");
    }

    #[test]
    fn test_number_before_command() {
	let err = parse_path("  10 20").unwrap_err();
	assert!(matches!(err, PathError::Tokenization { offset: 2, .. }));
    }

    #[test]
    fn test_unknown_command() {
	let err = parse_path("M 1 2 X 3").unwrap_err();
	assert_eq!(err, PathError::UnknownCommand { offset: 6, letter: 'X' });
    }

    #[test]
    fn test_unknown_command_after_partial_group() {
	let err = parse_path("M 1 X").unwrap_err();
	assert!(matches!(err, PathError::Arity { .. }));
    }

    #[test]
    fn test_closepath_twice() {
	assert_eq!(parsed("M0 0 Z Z"), vec![vec!["M0 0", "Z", "Z"]]);
    }
}
