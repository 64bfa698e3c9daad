use nom::{IResult, bytes::complete::take_while};

use crate::error::PathError;
use crate::number::{number, starts_number};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Letter(char),
    Number(f64),
}

fn separators(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_ascii_whitespace() || c == ',')(input)
}

///Forward-only stream of tokens over path data, each paired with its byte offset.
///Whitespace and commas are skipped. The stream ends after the first error.
pub struct Tokens<'a> {
    source: &'a str,
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    pub fn new(source: &'a str) -> Self {
	Tokens { source, rest: source }
    }

    fn offset(&self) -> usize {
	self.source.len() - self.rest.len()
    }

    fn fail(&mut self, reason: String) -> PathError {
	let offset = self.offset();
	self.rest = "";

	PathError::Tokenization { offset, reason }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<(usize, Token), PathError>;

    fn next(&mut self) -> Option<Self::Item> {
	if let Ok((rest, _)) = separators(self.rest) {
	    self.rest = rest;
	}

	let c = self.rest.chars().next()?;
	let offset = self.offset();

	if c.is_ascii_alphabetic() {
	    self.rest = &self.rest[1..];
	    return Some(Ok((offset, Token::Letter(c))));
	}

	if !starts_number(c) {
	    return Some(Err(self.fail(format!("unexpected character {:?}", c))));
	}

	match number(self.rest) {
	    Ok((rest, n)) => {
		self.rest = rest;
		Some(Ok((offset, Token::Number(n))))
	    },
	    Err(_) => {
		let end = self.rest.find(|c: char| c.is_ascii_whitespace() || c == ',').unwrap_or(self.rest.len());
		let reason = format!("malformed number {:?}", &self.rest[..end]);
		Some(Err(self.fail(reason)))
	    },
	}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Token::*;

    fn tokens(input: &str) -> Vec<Token> {
	Tokens::new(input).map(|it| it.unwrap().1).collect()
    }

    #[test]
    fn test_letters_and_numbers() {
	assert_eq!(tokens("M 10,20 L 30,30 Z"), vec![
	    Letter('M'), Number(10.0), Number(20.0),
	    Letter('L'), Number(30.0), Number(30.0),
	    Letter('Z'),
	]);
    }

    #[test]
    fn test_no_separators() {
	assert_eq!(tokens("M10-20L.2.3z"), vec![
	    Letter('M'), Number(10.0), Number(-20.0),
	    Letter('L'), Number(0.2), Number(0.3),
	    Letter('z'),
	]);
    }

    #[test]
    fn test_offsets() {
	let offsets: Vec<usize> = Tokens::new(" M1, 2")
	    .map(|it| it.unwrap().0)
	    .collect();
	assert_eq!(offsets, vec![1, 2, 5]);
    }

    #[test]
    fn test_separators_only() {
	assert!(tokens("").is_empty());
	assert!(tokens(" ,\t\n, ").is_empty());
    }

    #[test]
    fn test_unexpected_character() {
	let mut stream = Tokens::new("M 1 # 2");
	assert_eq!(stream.next(), Some(Ok((0, Letter('M')))));
	assert_eq!(stream.next(), Some(Ok((2, Number(1.0)))));
	assert!(matches!(stream.next(), Some(Err(PathError::Tokenization { offset: 4, .. }))));
	assert_eq!(stream.next(), None);
    }

    #[test]
    fn test_only_ascii_whitespace_separates() {
	let mut stream = Tokens::new("M\u{a0}1 2");
	assert_eq!(stream.next(), Some(Ok((0, Letter('M')))));
	assert!(matches!(stream.next(), Some(Err(PathError::Tokenization { offset: 1, .. }))));
    }

    #[test]
    fn test_number_out_of_range() {
	let err = Tokens::new("M1e400 0").find_map(|it| it.err()).unwrap();
	assert_eq!(err, PathError::Tokenization {
	    offset: 1,
	    reason: String::from("malformed number \"1e400\""),
	});
    }

    #[test]
    fn test_malformed_number() {
	let err = Tokens::new("M 1 -. 2").find_map(|it| it.err()).unwrap();
	assert_eq!(err, PathError::Tokenization {
	    offset: 4,
	    reason: String::from("malformed number \"-.\""),
	});
    }
}
